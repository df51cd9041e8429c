use async_trait::async_trait;

use super::client::ApiClient;
use super::AuthApi;
use crate::models::{Credentials, LoginReply, Role, SetPasswordRequest};
use crate::utils::{AppError, AppResult};

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, role: Role, credentials: &Credentials) -> AppResult<String> {
        let path = role.login_endpoint();
        let endpoint = format!("POST {}", path);
        log::info!("🔐 {} - email: {}", endpoint, credentials.email);

        let request = self.http().post(self.url(path)).json(credentials);
        let (status, body) = self.execute(request, &endpoint).await?;

        let reply: LoginReply = serde_json::from_slice(&body)
            .map_err(|e| AppError::Decode(format!("{}: {}", endpoint, e)))?;
        reply.into_token(status)
    }

    async fn set_password(&self, request: &SetPasswordRequest) -> AppResult<()> {
        log::info!("🔑 POST /volunteers/set-password");
        let http_request = self.http().post(self.url("/volunteers/set-password")).json(request);
        self.acknowledge(http_request, "POST /volunteers/set-password")
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ClientConfig {
            api_url: server.uri(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    fn creds() -> Credentials {
        Credentials {
            email: "admin@helpfreshers.org".to_string(),
            password: "s3cret!".to_string(),
        }
    }

    #[tokio::test]
    async fn admin_login_reads_top_level_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/login"))
            .and(body_json(serde_json::json!({
                "email": "admin@helpfreshers.org",
                "password": "s3cret!"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "adm"})),
            )
            .mount(&server)
            .await;

        let token = client_for(&server).login(Role::Admin, &creds()).await.unwrap();
        assert_eq!(token, "adm");
    }

    #[tokio::test]
    async fn volunteer_login_rejection_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/volunteers/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "success": false,
                "message": "Invalid credentials"
            })))
            .mount(&server)
            .await;

        match client_for(&server).login(Role::Volunteer, &creds()).await {
            Err(AppError::Unauthorized(message)) => assert_eq!(message, "Invalid credentials"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn set_password_posts_token_and_password() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/volunteers/set-password"))
            .and(body_json(serde_json::json!({"token": "reset-1", "password": "hunter22"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = SetPasswordRequest::from_form("reset-1", "hunter22", "hunter22").unwrap();
        client_for(&server).set_password(&request).await.unwrap();
    }
}
