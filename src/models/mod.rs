pub mod auth;
pub mod envelope;
pub mod session;
pub mod volunteer;

pub use auth::*;
pub use envelope::*;
pub use session::*;
pub use volunteer::*;
