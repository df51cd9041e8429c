pub mod auth_service;
pub mod directory;
pub mod session_service;
pub mod volunteer_service;

#[cfg(test)]
pub(crate) mod testing;

pub use auth_service::AuthContext;
pub use directory::{filter_sessions, MentorDirectory, MentorFilter};
pub use session_service::SessionDashboard;
pub use volunteer_service::AdminDashboard;

use crate::utils::{AppError, AppResult};

/// What a dashboard knows about a remote collection. A failed read is kept
/// apart from an empty but successful one.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    NotLoaded,
    Loaded(Vec<T>),
    Failed(ActionFailure),
}

impl<T> ListState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ListState::Loaded(_))
    }

    /// Loaded and holding nothing, i.e. "no data yet" rather than an error.
    pub fn is_empty(&self) -> bool {
        matches!(self, ListState::Loaded(items) if items.is_empty())
    }

    /// The loaded items, or the error that kept them from loading.
    pub fn ready(&self) -> AppResult<&[T]> {
        match self {
            ListState::Loaded(items) => Ok(items),
            ListState::Failed(failure) => Err(failure.error.clone()),
            ListState::NotLoaded => Err(AppError::Validation(
                "List is not loaded; refresh first".to_string(),
            )),
        }
    }
}

/// User-visible record of a failed action, with whether retrying can help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    pub action: String,
    pub message: String,
    pub retryable: bool,
    pub error: AppError,
}

impl ActionFailure {
    pub fn new(action: impl Into<String>, error: &AppError) -> Self {
        ActionFailure {
            action: action.into(),
            message: error.user_message(),
            retryable: error.is_retryable(),
            error: error.clone(),
        }
    }
}

impl std::fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.action, self.message)?;
        if self.retryable {
            write!(f, " (you can retry)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_read_is_not_empty() {
        let failed: ListState<u32> = ListState::Failed(ActionFailure::new(
            "Load volunteers",
            &AppError::Transport("timeout".into()),
        ));
        assert!(!failed.is_empty());
        assert!(failed.items().is_empty());
        assert!(ListState::<u32>::Loaded(vec![]).is_empty());
        assert!(!ListState::<u32>::NotLoaded.is_empty());
    }

    #[test]
    fn failure_display_mentions_retry() {
        let failure = ActionFailure::new("Delete volunteer", &AppError::Transport("reset".into()));
        assert!(failure.retryable);
        assert!(failure.to_string().ends_with("(you can retry)"));
    }

    #[test]
    fn failed_list_hands_back_its_own_error() {
        let expired = AppError::Unauthorized("Token expired".to_string());
        let failed: ListState<u32> =
            ListState::Failed(ActionFailure::new("Load volunteers", &expired));
        assert_eq!(failed.ready(), Err(expired));

        let server = AppError::Server { status: 500, message: "Database unavailable".to_string() };
        let failed: ListState<u32> =
            ListState::Failed(ActionFailure::new("Load sessions", &server));
        assert_eq!(failed.ready().unwrap_err().user_message(), "Database unavailable");

        assert!(matches!(ListState::<u32>::NotLoaded.ready(), Err(AppError::Validation(_))));
        assert_eq!(ListState::Loaded(vec![1, 2]).ready().unwrap(), &[1, 2]);
    }
}
