use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    Transport(String),
    /// The API answered with `success: false` or a non-2xx status.
    Server { status: u16, message: String },
    /// 401/403 from the API, or no usable auth session for the action.
    Unauthorized(String),
    /// A client-side rule rejected the input before any request was sent.
    Validation(String),
    /// The response body did not match the expected schema.
    Decode(String),
    /// The auth store could not be read or written.
    Storage(String),
}

impl AppError {
    /// Whether repeating the same action unchanged can succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Transport(_) => true,
            AppError::Server { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429 || (200..300).contains(status)
            }
            AppError::Unauthorized(_)
            | AppError::Validation(_)
            | AppError::Decode(_)
            | AppError::Storage(_) => false,
        }
    }

    /// Message suitable for showing to the person who triggered the action.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Transport(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            AppError::Server { message, .. } => message.clone(),
            AppError::Unauthorized(msg) => format!("Not authorized: {}", msg),
            AppError::Validation(msg) => msg.clone(),
            AppError::Decode(_) => "Unexpected response from the server".to_string(),
            AppError::Storage(msg) => format!("Could not access saved login: {}", msg),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Transport(msg) => write!(f, "Transport error: {}", msg),
            AppError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Decode(msg) => write!(f, "Decode error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            AppError::Server {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
