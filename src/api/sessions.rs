use async_trait::async_trait;

use super::client::{segment, ApiClient};
use super::SessionApi;
use crate::models::{decode_envelope, BookingRequest, Session, SessionStatusUpdate};
use crate::utils::AppResult;

#[async_trait]
impl SessionApi for ApiClient {
    async fn book_session(&self, request: &BookingRequest) -> AppResult<Option<Session>> {
        let endpoint = "POST /sessions/book";
        log::info!(
            "📅 {} - volunteer: {}, at {}",
            endpoint,
            request.volunteer_id,
            request.scheduled_for
        );

        let http_request = self.http().post(self.url("/sessions/book")).json(request);
        let (status, body) = self.execute(http_request, endpoint).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope = decode_envelope::<Session>(endpoint, &body)?;
        if envelope.data.is_some() {
            envelope.into_data(status).map(Some)
        } else {
            envelope.into_ack(status).map(|_| None)
        }
    }

    async fn list_sessions_for_volunteer(&self, token: &str) -> AppResult<Vec<Session>> {
        log::info!("📋 GET /sessions/volunteer/sessions");
        let request = self
            .http()
            .get(self.url("/sessions/volunteer/sessions"))
            .bearer_auth(token);
        self.fetch(request, "GET /sessions/volunteer/sessions").await
    }

    async fn list_sessions_by_volunteer(
        &self,
        token: &str,
        volunteer_id: &str,
    ) -> AppResult<Vec<Session>> {
        let endpoint = format!("GET /sessions/volunteer/{}", volunteer_id);
        log::info!("📋 {}", endpoint);
        let request = self
            .http()
            .get(self.url(&format!("/sessions/volunteer/{}", segment(volunteer_id))))
            .bearer_auth(token);
        self.fetch(request, &endpoint).await
    }

    async fn update_session_status(
        &self,
        token: &str,
        session_id: &str,
        update: &SessionStatusUpdate,
    ) -> AppResult<()> {
        let endpoint = format!("PUT /sessions/{}/status", session_id);
        log::info!("🔁 {} -> {}", endpoint, update.status);
        let request = self
            .http()
            .put(self.url(&format!("/sessions/{}/status", segment(session_id))))
            .bearer_auth(token)
            .json(update);
        self.acknowledge(request, &endpoint).await.map(|_| ())
    }
}
