//! Field rules shared by the registration, booking and session forms.

use url::Url;

/// Host every meeting link must point at under the strict policy.
pub const GOOGLE_MEET_HOST: &str = "meet.google.com";

/// Which meeting links a volunteer may attach when accepting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeetLinkPolicy {
    /// Only `https://meet.google.com/...` links.
    #[default]
    Strict,
    /// Any absolute http(s) URL.
    Any,
}

impl std::str::FromStr for MeetLinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(MeetLinkPolicy::Strict),
            "any" => Ok(MeetLinkPolicy::Any),
            other => Err(format!("Unknown meet link policy '{}' (expected strict or any)", other)),
        }
    }
}

/// Minimal address check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(l), Some(d), None) => (l, d),
        _ => return false,
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn count_digits(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

pub fn is_http_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Checks a meeting link against `policy`, returning the trimmed link.
pub fn validate_meet_link(link: &str, policy: MeetLinkPolicy) -> Result<String, String> {
    let link = link.trim();
    if link.is_empty() {
        return Err("Please provide a Google Meet link".to_string());
    }

    let url = Url::parse(link).map_err(|_| format!("'{}' is not a valid URL", link))?;

    match policy {
        MeetLinkPolicy::Strict => {
            if url.scheme() != "https" || url.host_str() != Some(GOOGLE_MEET_HOST) {
                return Err(format!("Meeting link must be a https://{} link", GOOGLE_MEET_HOST));
            }
            if url.path().trim_matches('/').is_empty() {
                return Err("Meeting link is missing the meeting code".to_string());
            }
        }
        MeetLinkPolicy::Any => {
            if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
                return Err("Meeting link must be an http(s) URL".to_string());
            }
        }
    }

    Ok(link.to_string())
}

/// Length in characters, ignoring surrounding whitespace.
pub fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}
