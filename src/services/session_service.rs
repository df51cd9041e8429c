use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{filter_sessions, ActionFailure, AuthContext, ListState, MentorDirectory};
use crate::api::SessionApi;
use crate::models::{
    BookingRequest, Role, Session, SessionBuckets, SessionStatus, SessionStatusUpdate,
};
use crate::utils::{validate_meet_link, AppError, AppResult, MeetLinkPolicy};

/// Anonymous booking against the approved-mentor directory.
///
/// The target must be present in `directory`, which only ever holds approved
/// volunteers. The created session starts out pending.
pub async fn book_session(
    api: &dyn SessionApi,
    directory: &MentorDirectory,
    request: &BookingRequest,
    now: DateTime<Utc>,
) -> AppResult<Option<Session>> {
    request.validate(now)?;
    let mentor = directory.bookable(&request.volunteer_id)?;
    log::info!(
        "📅 Booking {} with {} on {}",
        request.requester.name,
        mentor.full_name(),
        request.scheduled_for
    );

    let created = api.book_session(request).await?;
    if let Some(session) = &created {
        if session.status != SessionStatus::Pending {
            log::warn!(
                "⚠️  New session {} came back as {} instead of pending",
                session.id,
                session.status
            );
        }
    }
    Ok(created)
}

/// Volunteer view over the sessions booked with them.
///
/// Every successful status change is followed by a full re-fetch so the
/// dashboard always shows what the server holds.
pub struct SessionDashboard {
    api: Arc<dyn SessionApi>,
    token: String,
    policy: MeetLinkPolicy,
    sessions: ListState<Session>,
    last_failure: Option<ActionFailure>,
}

impl SessionDashboard {
    /// Requires a volunteer session and loads that volunteer's sessions.
    pub async fn open(
        api: Arc<dyn SessionApi>,
        auth: &AuthContext,
        policy: MeetLinkPolicy,
    ) -> AppResult<Self> {
        let token = auth.token_for(Role::Volunteer)?.to_string();
        let mut dashboard = SessionDashboard {
            api,
            token,
            policy,
            sessions: ListState::NotLoaded,
            last_failure: None,
        };
        dashboard.refresh().await;
        Ok(dashboard)
    }

    pub async fn refresh(&mut self) {
        match self.api.list_sessions_for_volunteer(&self.token).await {
            Ok(sessions) => {
                log::info!("📋 Volunteer dashboard loaded {} sessions", sessions.len());
                self.sessions = ListState::Loaded(sessions);
                self.last_failure = None;
            }
            Err(e) => {
                log::error!("❌ Failed to load sessions: {}", e);
                let failure = ActionFailure::new("Load sessions", &e);
                self.sessions = ListState::Failed(failure.clone());
                self.last_failure = Some(failure);
            }
        }
    }

    pub fn state(&self) -> &ListState<Session> {
        &self.sessions
    }

    pub fn sessions(&self) -> &[Session] {
        self.sessions.items()
    }

    pub fn last_failure(&self) -> Option<&ActionFailure> {
        self.last_failure.as_ref()
    }

    pub fn find(&self, session_id: &str) -> Option<&Session> {
        self.sessions().iter().find(|s| s.id == session_id)
    }

    pub fn buckets(&self, now: DateTime<Utc>) -> SessionBuckets {
        SessionBuckets::partition(self.sessions(), now)
    }

    pub fn search(&self, term: &str, status: Option<SessionStatus>) -> Vec<&Session> {
        filter_sessions(self.sessions(), term, status)
    }

    /// Accepting needs a meeting link that passes the configured policy;
    /// rejecting never sends one. The session must be in the loaded list and
    /// its current status must allow the move.
    pub async fn set_session_status(
        &mut self,
        session_id: &str,
        status: SessionStatus,
        meet_link: Option<&str>,
    ) -> AppResult<()> {
        let current = self
            .sessions
            .ready()?
            .iter()
            .find(|s| s.id == session_id)
            .map(|s| s.status)
            .ok_or_else(|| AppError::Validation(format!("Unknown session {}", session_id)))?;
        if !current.allows(status) {
            return Err(AppError::Validation(format!(
                "Session {} is {} and cannot become {}",
                session_id, current, status
            )));
        }

        let update = match status {
            SessionStatus::Accepted => {
                let link = meet_link.unwrap_or_default();
                let link = validate_meet_link(link, self.policy).map_err(AppError::Validation)?;
                SessionStatusUpdate::accept(link)
            }
            SessionStatus::Rejected => SessionStatusUpdate::reject(),
            SessionStatus::Pending => {
                return Err(AppError::Validation(
                    "A session cannot be moved back to pending".to_string(),
                ))
            }
        };

        match self.api.update_session_status(&self.token, session_id, &update).await {
            Ok(()) => {
                log::info!("✅ Session {} marked {}", session_id, status);
                self.last_failure = None;
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Failed to update session {}: {}", session_id, e);
                self.last_failure = Some(ActionFailure::new("Update session status", &e));
                Err(e)
            }
        }
    }

    pub async fn accept(&mut self, session_id: &str, meet_link: &str) -> AppResult<()> {
        self.set_session_status(session_id, SessionStatus::Accepted, Some(meet_link))
            .await
    }

    pub async fn reject(&mut self, session_id: &str) -> AppResult<()> {
        self.set_session_status(session_id, SessionStatus::Rejected, None)
            .await
    }

    /// Replaces the link of an already accepted session.
    pub async fn update_meeting_link(
        &mut self,
        session_id: &str,
        meet_link: &str,
    ) -> AppResult<()> {
        match self.find(session_id).map(|s| s.status) {
            Some(SessionStatus::Accepted) => self.accept(session_id, meet_link).await,
            Some(other) => Err(AppError::Validation(format!(
                "Only accepted sessions have a meeting link (session {} is {})",
                session_id, other
            ))),
            None => Err(AppError::Validation(format!("Unknown session {}", session_id))),
        }
    }
}

/// One-off listing of another volunteer's sessions by id.
pub async fn list_sessions_by_volunteer(
    api: &dyn SessionApi,
    auth: &AuthContext,
    volunteer_id: &str,
) -> AppResult<Vec<Session>> {
    let token = auth.token_for(Role::Volunteer)?;
    api.list_sessions_by_volunteer(token, volunteer_id).await
}
