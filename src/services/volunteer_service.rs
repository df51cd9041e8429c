use std::sync::Arc;

use super::{ActionFailure, AuthContext, ListState};
use crate::api::VolunteerApi;
use crate::models::{Role, Volunteer, VolunteerRegistration, VolunteerStats, VolunteerStatus};
use crate::utils::{AppError, AppResult};

const REGISTRATION_RECEIVED: &str =
    "Registration successful! We'll review your application and get back to you soon.";

/// Public self-registration. Validates locally so a bad form never reaches the API.
pub async fn register(
    api: &dyn VolunteerApi,
    registration: &VolunteerRegistration,
) -> AppResult<String> {
    registration.validate()?;
    log::info!(
        "📝 Registering volunteer {} {} <{}> as {}",
        registration.first_name,
        registration.last_name,
        registration.email,
        registration.role_preference
    );
    let message = api.register_volunteer(registration).await?;
    Ok(message.unwrap_or_else(|| REGISTRATION_RECEIVED.to_string()))
}

/// Signed-in volunteer's own record.
pub async fn profile(api: &dyn VolunteerApi, auth: &AuthContext) -> AppResult<Volunteer> {
    let token = auth.token_for(Role::Volunteer)?;
    api.volunteer_profile(token).await
}

/// Admin view over every volunteer application.
///
/// Status changes and deletes patch the local list in place after the API
/// confirms, so the list is never re-fetched just to reflect one edit.
pub struct AdminDashboard {
    api: Arc<dyn VolunteerApi>,
    token: String,
    volunteers: ListState<Volunteer>,
    last_failure: Option<ActionFailure>,
}

impl AdminDashboard {
    /// Requires an admin session and loads the full list once.
    pub async fn open(api: Arc<dyn VolunteerApi>, auth: &AuthContext) -> AppResult<Self> {
        let token = auth.token_for(Role::Admin)?.to_string();
        let mut dashboard = AdminDashboard {
            api,
            token,
            volunteers: ListState::NotLoaded,
            last_failure: None,
        };
        dashboard.refresh().await;
        Ok(dashboard)
    }

    pub async fn refresh(&mut self) {
        match self.api.list_volunteers(&self.token).await {
            Ok(volunteers) => {
                log::info!("📋 Admin dashboard loaded {} volunteers", volunteers.len());
                self.volunteers = ListState::Loaded(volunteers);
                self.last_failure = None;
            }
            Err(e) => {
                log::error!("❌ Failed to load volunteers: {}", e);
                let failure = ActionFailure::new("Load volunteers", &e);
                self.volunteers = ListState::Failed(failure.clone());
                self.last_failure = Some(failure);
            }
        }
    }

    pub fn state(&self) -> &ListState<Volunteer> {
        &self.volunteers
    }

    pub fn volunteers(&self) -> &[Volunteer] {
        self.volunteers.items()
    }

    pub fn last_failure(&self) -> Option<&ActionFailure> {
        self.last_failure.as_ref()
    }

    pub fn stats(&self) -> VolunteerStats {
        VolunteerStats::from_volunteers(self.volunteers.items())
    }

    pub fn by_status(&self, status: VolunteerStatus) -> Vec<&Volunteer> {
        self.volunteers().iter().filter(|v| v.status == status).collect()
    }

    /// Sets any of the three statuses. On failure the list is left as it was.
    pub async fn update_status(
        &mut self,
        volunteer_id: &str,
        status: VolunteerStatus,
    ) -> AppResult<()> {
        self.ensure_loaded()?;
        let result = self
            .api
            .update_volunteer_status(&self.token, volunteer_id, status)
            .await;

        match result {
            Ok(()) => {
                log::info!("✅ Volunteer {} is now {}", volunteer_id, status);
                if let ListState::Loaded(list) = &mut self.volunteers {
                    *list = std::mem::take(list)
                        .into_iter()
                        .map(|mut v| {
                            if v.id == volunteer_id {
                                v.status = status;
                            }
                            v
                        })
                        .collect();
                }
                self.last_failure = None;
                Ok(())
            }
            Err(e) => Err(self.record("Update volunteer status", e)),
        }
    }

    pub async fn approve(&mut self, volunteer_id: &str) -> AppResult<()> {
        self.update_status(volunteer_id, VolunteerStatus::Approved).await
    }

    pub async fn reject(&mut self, volunteer_id: &str) -> AppResult<()> {
        self.update_status(volunteer_id, VolunteerStatus::Rejected).await
    }

    pub async fn delete(&mut self, volunteer_id: &str) -> AppResult<()> {
        self.ensure_loaded()?;
        match self.api.delete_volunteer(&self.token, volunteer_id).await {
            Ok(()) => {
                log::info!("🗑️  Volunteer {} deleted", volunteer_id);
                if let ListState::Loaded(list) = &mut self.volunteers {
                    list.retain(|v| v.id != volunteer_id);
                }
                self.last_failure = None;
                Ok(())
            }
            Err(e) => Err(self.record("Delete volunteer", e)),
        }
    }

    fn ensure_loaded(&self) -> AppResult<()> {
        self.volunteers.ready().map(|_| ())
    }

    fn record(&mut self, action: &str, error: AppError) -> AppError {
        log::error!("❌ {} failed: {}", action, error);
        self.last_failure = Some(ActionFailure::new(action, &error));
        error
    }
}
