//! Role gate in front of the admin and volunteer dashboards.

use crate::models::{AuthSession, Role, UNAUTHORIZED_ROUTE};
use crate::utils::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// The visitor must be sent to this site route instead.
    Redirect(String),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

/// No authenticated session -> the required role's login page.
/// Authenticated with another role -> `/unauthorized`.
pub fn check_access(required: Role, session: Option<&AuthSession>) -> Access {
    match session {
        Some(session) if session.is_active() => {
            if session.role == required {
                Access::Granted
            } else {
                Access::Redirect(UNAUTHORIZED_ROUTE.to_string())
            }
        }
        _ => Access::Redirect(required.login_route()),
    }
}

/// Same gate, returning the bearer token for the guarded calls.
pub fn require_role(required: Role, session: Option<&AuthSession>) -> Result<&str, AppError> {
    match (check_access(required, session), session) {
        (Access::Granted, Some(session)) => Ok(session.token.as_str()),
        (Access::Redirect(route), _) => {
            log::warn!("🚫 {} access denied, redirecting to {}", required, route);
            Err(AppError::Unauthorized(format!(
                "{} login required (redirect to {})",
                required, route
            )))
        }
        (Access::Granted, None) => Err(AppError::Unauthorized(required.login_route())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_session_redirects_to_role_login() {
        assert_eq!(
            check_access(Role::Volunteer, None),
            Access::Redirect("/volunteer/login".to_string())
        );
        assert_eq!(
            check_access(Role::Admin, None),
            Access::Redirect("/admin/login".to_string())
        );
    }

    #[test]
    fn wrong_role_redirects_to_unauthorized() {
        let admin = AuthSession::new("adm".to_string(), Role::Admin);
        assert_eq!(
            check_access(Role::Volunteer, Some(&admin)),
            Access::Redirect("/unauthorized".to_string())
        );
    }

    #[test]
    fn matching_role_is_granted() {
        let volunteer = AuthSession::new("vol".to_string(), Role::Volunteer);
        assert!(check_access(Role::Volunteer, Some(&volunteer)).is_granted());
        assert_eq!(require_role(Role::Volunteer, Some(&volunteer)).unwrap(), "vol");
    }

    #[test]
    fn logged_out_record_counts_as_no_session() {
        let mut stale = AuthSession::new("vol".to_string(), Role::Volunteer);
        stale.is_authenticated = false;
        assert_eq!(
            check_access(Role::Volunteer, Some(&stale)),
            Access::Redirect("/volunteer/login".to_string())
        );
        assert!(matches!(
            require_role(Role::Admin, Some(&stale)),
            Err(AppError::Unauthorized(_))
        ));
    }
}
