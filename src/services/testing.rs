//! In-memory stand-in for the REST API used by the workflow tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{AuthApi, SessionApi, VolunteerApi};
use crate::models::{
    BookingRequest, Credentials, DEFAULT_SESSION_MINUTES, Role, Session, SessionStatus,
    SessionStatusUpdate, SetPasswordRequest, Volunteer, VolunteerRef, VolunteerRegistration,
    VolunteerStatus,
};
use crate::utils::{AppError, AppResult};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const VOLUNTEER_TOKEN: &str = "vol-token";
pub const VOLUNTEER_ID: &str = "v1";
pub const PASSWORD: &str = "pw123456";

#[derive(Default)]
struct FakeState {
    volunteers: Vec<Volunteer>,
    sessions: Vec<Session>,
    offline: bool,
    next_id: u32,
    calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volunteers(volunteers: Vec<Volunteer>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().volunteers = volunteers;
        api
    }

    pub fn add_session(&self, session: Session) {
        self.state.lock().unwrap().sessions.push(session);
    }

    /// Every following call fails with a transport error until turned off.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn volunteers(&self) -> Vec<Volunteer> {
        self.state.lock().unwrap().volunteers.clone()
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.state.lock().unwrap().sessions.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn enter(&self, call: &str) -> AppResult<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        if state.offline {
            return Err(AppError::Transport("connection refused".to_string()));
        }
        Ok(state)
    }
}

fn expect_token(token: &str, expected: &str) -> AppResult<()> {
    if token == expected {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Invalid token".to_string()))
    }
}

fn not_found(what: &str) -> AppError {
    AppError::Server {
        status: 404,
        message: format!("{} not found", what),
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, role: Role, credentials: &Credentials) -> AppResult<String> {
        let _state = self.enter("login")?;
        match (role, credentials.email.as_str(), credentials.password.as_str()) {
            (Role::Admin, "admin@x.com", PASSWORD) => Ok(ADMIN_TOKEN.to_string()),
            (Role::Volunteer, "a@x.com", PASSWORD) => Ok(VOLUNTEER_TOKEN.to_string()),
            _ => Err(AppError::Unauthorized("Invalid credentials".to_string())),
        }
    }

    async fn set_password(&self, request: &SetPasswordRequest) -> AppResult<()> {
        let _state = self.enter("set_password")?;
        if request.token == "reset-ok" {
            Ok(())
        } else {
            Err(AppError::Server {
                status: 400,
                message: "Invalid or expired token".to_string(),
            })
        }
    }
}

#[async_trait]
impl VolunteerApi for FakeApi {
    async fn register_volunteer(
        &self,
        registration: &VolunteerRegistration,
    ) -> AppResult<Option<String>> {
        let mut state = self.enter("register_volunteer")?;
        state.next_id += 1;
        let id = format!("new{}", state.next_id);
        state.volunteers.push(Volunteer {
            id,
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            profession: registration.profession.clone(),
            organization: registration.organization.clone(),
            years_of_experience: registration.years_of_experience,
            linkedin_profile: None,
            role_preference: registration.role_preference,
            availability_hours_per_week: registration.availability_hours_per_week,
            preferred_schedule: registration.preferred_schedule.clone(),
            areas_of_expertise: registration.areas_of_expertise.clone(),
            skills: registration.skills.clone(),
            motivation: Some(registration.motivation.clone()),
            status: VolunteerStatus::Pending,
            created_at: None,
        });
        Ok(Some("Registration successful".to_string()))
    }

    async fn list_volunteers(&self, token: &str) -> AppResult<Vec<Volunteer>> {
        let state = self.enter("list_volunteers")?;
        expect_token(token, ADMIN_TOKEN)?;
        Ok(state.volunteers.clone())
    }

    async fn list_approved_volunteers(&self) -> AppResult<Vec<Volunteer>> {
        let state = self.enter("list_approved_volunteers")?;
        Ok(state
            .volunteers
            .iter()
            .filter(|v| v.status == VolunteerStatus::Approved)
            .cloned()
            .collect())
    }

    async fn volunteer_profile(&self, token: &str) -> AppResult<Volunteer> {
        let state = self.enter("volunteer_profile")?;
        expect_token(token, VOLUNTEER_TOKEN)?;
        state
            .volunteers
            .iter()
            .find(|v| v.id == VOLUNTEER_ID)
            .cloned()
            .ok_or_else(|| not_found("Volunteer"))
    }

    async fn update_volunteer_status(
        &self,
        token: &str,
        volunteer_id: &str,
        status: VolunteerStatus,
    ) -> AppResult<()> {
        let mut state = self.enter("update_volunteer_status")?;
        expect_token(token, ADMIN_TOKEN)?;
        let volunteer = state
            .volunteers
            .iter_mut()
            .find(|v| v.id == volunteer_id)
            .ok_or_else(|| not_found("Volunteer"))?;
        volunteer.status = status;
        Ok(())
    }

    async fn delete_volunteer(&self, token: &str, volunteer_id: &str) -> AppResult<()> {
        let mut state = self.enter("delete_volunteer")?;
        expect_token(token, ADMIN_TOKEN)?;
        let before = state.volunteers.len();
        state.volunteers.retain(|v| v.id != volunteer_id);
        if state.volunteers.len() == before {
            return Err(not_found("Volunteer"));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionApi for FakeApi {
    async fn book_session(&self, request: &BookingRequest) -> AppResult<Option<Session>> {
        let mut state = self.enter("book_session")?;
        let approved = state
            .volunteers
            .iter()
            .any(|v| v.id == request.volunteer_id && v.status == VolunteerStatus::Approved);
        if !approved {
            return Err(AppError::Server {
                status: 400,
                message: "Volunteer is not available".to_string(),
            });
        }
        state.next_id += 1;
        let session = Session {
            id: format!("s{}", state.next_id),
            volunteer: VolunteerRef::Id(request.volunteer_id.clone()),
            requester: request.requester.clone(),
            topic: request.topic.clone(),
            scheduled_for: request.scheduled_for,
            status: SessionStatus::Pending,
            duration: DEFAULT_SESSION_MINUTES,
            meet_link: None,
            created_at: None,
        };
        state.sessions.push(session.clone());
        Ok(Some(session))
    }

    async fn list_sessions_for_volunteer(&self, token: &str) -> AppResult<Vec<Session>> {
        let state = self.enter("list_sessions_for_volunteer")?;
        expect_token(token, VOLUNTEER_TOKEN)?;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.volunteer.id() == VOLUNTEER_ID)
            .cloned()
            .collect())
    }

    async fn list_sessions_by_volunteer(
        &self,
        token: &str,
        volunteer_id: &str,
    ) -> AppResult<Vec<Session>> {
        let state = self.enter("list_sessions_by_volunteer")?;
        expect_token(token, VOLUNTEER_TOKEN)?;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.volunteer.id() == volunteer_id)
            .cloned()
            .collect())
    }

    async fn update_session_status(
        &self,
        token: &str,
        session_id: &str,
        update: &SessionStatusUpdate,
    ) -> AppResult<()> {
        let mut state = self.enter("update_session_status")?;
        expect_token(token, VOLUNTEER_TOKEN)?;
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| not_found("Session"))?;
        session.status = update.status;
        session.meet_link = update.meet_link.clone();
        Ok(())
    }
}
