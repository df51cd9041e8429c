use std::sync::{Arc, Mutex};

use super::AuthStore;
use crate::models::AuthSession;
use crate::utils::{AppError, AppResult};

/// In-process store. Clones share the same slot, which lets a test keep a
/// handle on what the auth context persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthStore {
    slot: Arc<Mutex<Option<AuthSession>>>,
}

impl MemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: AuthSession) -> Self {
        MemoryAuthStore {
            slot: Arc::new(Mutex::new(Some(session))),
        }
    }
}

impl AuthStore for MemoryAuthStore {
    fn load(&self) -> AppResult<Option<AuthSession>> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|_| AppError::Storage("auth slot poisoned".to_string()))
    }

    fn save(&mut self, session: &AuthSession) -> AppResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AppError::Storage("auth slot poisoned".to_string()))?;
        *slot = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AppError::Storage("auth slot poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
