use crate::api::AuthApi;
use crate::middleware::auth::{check_access, require_role, Access};
use crate::models::{AuthSession, Credentials, Role, SetPasswordRequest};
use crate::storage::AuthStore;
use crate::utils::AppResult;

/// Login state handed explicitly to every guarded workflow.
///
/// The session is mirrored into the injected [`AuthStore`] on every change so
/// a restarted process comes back logged in.
pub struct AuthContext {
    store: Box<dyn AuthStore>,
    session: Option<AuthSession>,
    last_error: Option<String>,
}

impl AuthContext {
    /// Rehydrates from the store. A stored record that is not active is discarded.
    pub fn restore(store: Box<dyn AuthStore>) -> AppResult<Self> {
        let session = store.load()?.filter(AuthSession::is_active);
        if let Some(session) = &session {
            log::info!("🔑 Restored {} session", session.role);
        }
        Ok(AuthContext {
            store,
            session,
            last_error: None,
        })
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    /// Error from the most recent failed login, cleared by the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn access(&self, required: Role) -> Access {
        check_access(required, self.session.as_ref())
    }

    /// Bearer token for a call that needs `required`.
    pub fn token_for(&self, required: Role) -> AppResult<&str> {
        require_role(required, self.session.as_ref())
    }

    /// Exchanges credentials for a token and persists `{token, role, authenticated}`.
    /// A rejected login leaves the context logged out.
    pub async fn login(
        &mut self,
        api: &dyn AuthApi,
        role: Role,
        credentials: &Credentials,
    ) -> AppResult<&AuthSession> {
        credentials.validate()?;
        self.last_error = None;

        match api.login(role, credentials).await {
            Ok(token) => {
                let session = AuthSession::new(token, role);
                self.store.save(&session)?;
                log::info!("✅ Logged in as {} ({})", credentials.email, role);
                let session: &AuthSession = self.session.insert(session);
                Ok(session)
            }
            Err(e) => {
                log::warn!("❌ Login failed for {} ({}): {}", credentials.email, role, e);
                self.last_error = Some(e.user_message());
                self.session = None;
                if let Err(clear_err) = self.store.clear() {
                    log::error!("❌ Failed to clear saved login: {}", clear_err);
                }
                Err(e)
            }
        }
    }

    /// Clears token, role and the authenticated flag, in memory and in the store.
    pub fn logout(&mut self) -> AppResult<()> {
        if let Some(session) = self.session.take() {
            log::info!("👋 Logged out {} session", session.role);
        }
        self.last_error = None;
        self.store.clear()
    }

    /// Consumes a password-reset token. Needs no login.
    pub async fn set_password(
        api: &dyn AuthApi,
        reset_token: &str,
        password: &str,
        confirm: &str,
    ) -> AppResult<()> {
        let request = SetPasswordRequest::from_form(reset_token, password, confirm)?;
        api.set_password(&request).await.map_err(|e| {
            log::warn!("❌ Set password failed: {}", e);
            e
        })?;
        log::info!("✅ Password set; volunteer can now log in");
        Ok(())
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("role", &self.role())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
