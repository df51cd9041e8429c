//! Persistence port for the login state.
//!
//! Only the whitelisted [`AuthSession`] fields (token, role, authenticated flag)
//! ever reach a store; transient state such as the last login error does not.

pub mod file;
pub mod memory;

pub use file::FileAuthStore;
pub use memory::MemoryAuthStore;

use crate::models::AuthSession;
use crate::utils::AppResult;

pub trait AuthStore: Send {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> AppResult<Option<AuthSession>>;
    fn save(&mut self, session: &AuthSession) -> AppResult<()>;
    /// Removing an absent record is not an error.
    fn clear(&mut self) -> AppResult<()>;
}
