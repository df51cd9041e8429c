use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::AuthStore;
use crate::models::AuthSession;
use crate::utils::{AppError, AppResult};

/// Keeps the login in a small JSON file so it survives restarts.
#[derive(Debug, Clone)]
pub struct FileAuthStore {
    path: PathBuf,
}

impl FileAuthStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileAuthStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuthStore for FileAuthStore {
    fn load(&self) -> AppResult<Option<AuthSession>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session: AuthSession = serde_json::from_slice(&raw).map_err(|e| {
            AppError::Storage(format!("{} is not a saved login: {}", self.path.display(), e))
        })?;
        log::debug!("🔑 Restored {} login from {}", session.role, self.path.display());
        Ok(Some(session))
    }

    fn save(&mut self, session: &AuthSession) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_vec_pretty(session)
            .map_err(|e| AppError::Storage(e.to_string()))?;

        // Write-then-rename so a crash never leaves half a file behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
