use async_trait::async_trait;

use super::client::{segment, ApiClient};
use super::VolunteerApi;
use crate::models::{Volunteer, VolunteerRegistration, VolunteerStatus};
use crate::utils::AppResult;

#[async_trait]
impl VolunteerApi for ApiClient {
    async fn register_volunteer(
        &self,
        registration: &VolunteerRegistration,
    ) -> AppResult<Option<String>> {
        log::info!("📝 POST /volunteers/register - email: {}", registration.email);
        let request = self.http().post(self.url("/volunteers/register")).json(registration);
        self.acknowledge(request, "POST /volunteers/register").await
    }

    async fn list_volunteers(&self, token: &str) -> AppResult<Vec<Volunteer>> {
        log::info!("📋 GET /volunteers");
        let request = self.http().get(self.url("/volunteers")).bearer_auth(token);
        self.fetch(request, "GET /volunteers").await
    }

    async fn list_approved_volunteers(&self) -> AppResult<Vec<Volunteer>> {
        log::info!("📋 GET /volunteers/approved");
        let request = self.http().get(self.url("/volunteers/approved"));
        self.fetch(request, "GET /volunteers/approved").await
    }

    async fn volunteer_profile(&self, token: &str) -> AppResult<Volunteer> {
        log::info!("👤 GET /volunteers/profile");
        let request = self.http().get(self.url("/volunteers/profile")).bearer_auth(token);
        self.fetch(request, "GET /volunteers/profile").await
    }

    async fn update_volunteer_status(
        &self,
        token: &str,
        volunteer_id: &str,
        status: VolunteerStatus,
    ) -> AppResult<()> {
        let endpoint = format!("PUT /admin/volunteers/{}/status", volunteer_id);
        log::info!("🔁 {} -> {}", endpoint, status);
        let request = self
            .http()
            .put(self.url(&format!("/admin/volunteers/{}/status", segment(volunteer_id))))
            .bearer_auth(token)
            .json(&serde_json::json!({ "status": status }));
        self.acknowledge(request, &endpoint).await.map(|_| ())
    }

    async fn delete_volunteer(&self, token: &str, volunteer_id: &str) -> AppResult<()> {
        let endpoint = format!("DELETE /admin/volunteers/{}", volunteer_id);
        log::info!("🗑️ {}", endpoint);
        let request = self
            .http()
            .delete(self.url(&format!("/admin/volunteers/{}", segment(volunteer_id))))
            .bearer_auth(token);
        self.acknowledge(request, &endpoint).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::utils::AppError;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ClientConfig {
            api_url: server.uri(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn record(id: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "firstName": "Ana",
            "lastName": "Lee",
            "email": "a@x.com",
            "rolePreference": "Mentor",
            "areasOfExpertise": ["Data Science"],
            "status": status
        })
    }

    #[tokio::test]
    async fn list_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volunteers"))
            .and(header("Authorization", "Bearer admin-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": [record("v1", "pending"), record("v2", "approved")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let volunteers = client_for(&server).list_volunteers("admin-token").await.unwrap();
        assert_eq!(volunteers.len(), 2);
        assert_eq!(volunteers[1].status, VolunteerStatus::Approved);
    }

    #[tokio::test]
    async fn list_without_data_fails_instead_of_defaulting() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volunteers/approved"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).list_approved_volunteers().await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn status_update_puts_lowercase_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/volunteers/v1/status"))
            .and(body_json(serde_json::json!({"status": "approved"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": record("v1", "approved")
            })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .update_volunteer_status("t", "v1", VolunteerStatus::Approved)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn register_surfaces_server_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/volunteers/register"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "success": false,
                "message": "Email already registered"
            })))
            .mount(&server)
            .await;

        let reg = crate::models::volunteer::fixtures::registration();
        match client_for(&server).register_volunteer(&reg).await {
            Err(AppError::Server { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email already registered");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_hits_admin_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/admin/volunteers/v7"))
            .and(header("Authorization", "Bearer t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Volunteer deleted"
            })))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete_volunteer("t", "v7").await.unwrap();
    }
}
