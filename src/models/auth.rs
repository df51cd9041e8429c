use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{is_valid_email, AppError};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

/// Which dashboard an auth session opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Volunteer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Volunteer => "volunteer",
        }
    }

    /// API path that exchanges credentials for a token.
    pub fn login_endpoint(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/login",
            Role::Volunteer => "/volunteers/login",
        }
    }

    /// Site route a visitor without a session is sent to.
    pub fn login_route(&self) -> String {
        format!("/{}/login", self.as_str())
    }

    pub fn dashboard_route(&self) -> String {
        format!("/{}/dashboard", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "volunteer" => Ok(Role::Volunteer),
            other => Err(format!("Unknown role '{}' (expected admin or volunteer)", other)),
        }
    }
}

/// Persisted login. These three fields are the only ones written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    #[serde(rename = "userType")]
    pub role: Role,
    pub is_authenticated: bool,
}

impl AuthSession {
    pub fn new(token: String, role: Role) -> Self {
        AuthSession {
            token,
            role,
            is_authenticated: true,
        }
    }

    /// A stored record only counts when flagged authenticated and holding a token.
    pub fn is_active(&self) -> bool {
        self.is_authenticated && !self.token.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("Email address is invalid".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }
        Ok(())
    }
}

/// Body of `POST /volunteers/set-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPasswordRequest {
    pub token: String,
    pub password: String,
}

impl SetPasswordRequest {
    /// Builds the request from the reset link token and the two password fields.
    pub fn from_form(token: &str, password: &str, confirm: &str) -> Result<Self, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::Validation("Invalid password reset link".to_string()));
        }
        if password != confirm {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(
                "Password must be at least 6 characters long".to_string(),
            ));
        }
        Ok(SetPasswordRequest {
            token: token.trim().to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

/// Login reply. The token arrives at top level or nested under `data`.
#[derive(Debug, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    data: Option<TokenData>,
    #[serde(default)]
    message: Option<String>,
}

impl LoginReply {
    pub fn into_token(self, status: u16) -> Result<String, AppError> {
        if self.success == Some(false) {
            return Err(AppError::Server {
                status,
                message: self.message.unwrap_or_else(|| "Login failed".to_string()),
            });
        }
        self.token
            .or(self.data.map(|d| d.token))
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Decode("login response carried no token".to_string()))
    }
}
