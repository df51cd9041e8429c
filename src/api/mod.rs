//! Typed client for the HelpFreshers REST API.
//!
//! The workflows in `services` depend only on the traits below; [`ApiClient`]
//! implements all of them over HTTP.

pub mod auth;
pub mod client;
pub mod sessions;
pub mod volunteers;

pub use client::ApiClient;

use async_trait::async_trait;

use crate::models::{
    BookingRequest, Credentials, Role, Session, SessionStatusUpdate, SetPasswordRequest,
    Volunteer, VolunteerRegistration, VolunteerStatus,
};
use crate::utils::AppResult;

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a bearer token at the role's login endpoint.
    async fn login(&self, role: Role, credentials: &Credentials) -> AppResult<String>;
    async fn set_password(&self, request: &SetPasswordRequest) -> AppResult<()>;
}

#[async_trait]
pub trait VolunteerApi: Send + Sync {
    /// Returns the server's confirmation message, if any.
    async fn register_volunteer(
        &self,
        registration: &VolunteerRegistration,
    ) -> AppResult<Option<String>>;
    async fn list_volunteers(&self, token: &str) -> AppResult<Vec<Volunteer>>;
    async fn list_approved_volunteers(&self) -> AppResult<Vec<Volunteer>>;
    async fn volunteer_profile(&self, token: &str) -> AppResult<Volunteer>;
    async fn update_volunteer_status(
        &self,
        token: &str,
        volunteer_id: &str,
        status: VolunteerStatus,
    ) -> AppResult<()>;
    async fn delete_volunteer(&self, token: &str, volunteer_id: &str) -> AppResult<()>;
}

#[async_trait]
pub trait SessionApi: Send + Sync {
    /// The created session when the server echoes it back.
    async fn book_session(&self, request: &BookingRequest) -> AppResult<Option<Session>>;
    /// Sessions of the volunteer the token belongs to.
    async fn list_sessions_for_volunteer(&self, token: &str) -> AppResult<Vec<Session>>;
    async fn list_sessions_by_volunteer(
        &self,
        token: &str,
        volunteer_id: &str,
    ) -> AppResult<Vec<Session>>;
    async fn update_session_status(
        &self,
        token: &str,
        session_id: &str,
        update: &SessionStatusUpdate,
    ) -> AppResult<()>;
}
