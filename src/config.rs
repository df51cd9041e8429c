use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::{AppError, AppResult, MeetLinkPolicy};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_AUTH_FILE: &str = ".helpfreshers/auth.json";

/// Runtime settings, read from the environment (after `.env`) and
/// overridable from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub auth_file: PathBuf,
    pub meet_link_policy: MeetLinkPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_file: PathBuf::from(DEFAULT_AUTH_FILE),
            meet_link_policy: MeetLinkPolicy::Strict,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> AppResult<Self> {
        let api_url =
            env::var("HELPFRESHERS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match env::var("HELPFRESHERS_API_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Validation(format!(
                    "HELPFRESHERS_API_TIMEOUT_SECS must be a number, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let auth_file = env::var("HELPFRESHERS_AUTH_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_AUTH_FILE));

        let meet_link_policy = match env::var("HELPFRESHERS_MEET_LINK_POLICY") {
            Ok(raw) => raw.parse::<MeetLinkPolicy>().map_err(AppError::Validation)?,
            Err(_) => MeetLinkPolicy::Strict,
        };

        Ok(ClientConfig {
            api_url: normalize_base_url(&api_url),
            timeout: Duration::from_secs(timeout_secs),
            auth_file,
            meet_link_policy,
        })
    }
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
