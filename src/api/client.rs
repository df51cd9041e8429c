use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::{normalize_base_url, ClientConfig};
use crate::models::{decode_envelope, error_message};
use crate::utils::{AppError, AppResult};

/// HTTP transport shared by every endpoint group.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ApiClient {
            http,
            base_url: normalize_base_url(&config.api_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Sends the request and returns status plus body of a 2xx reply.
    /// 401/403 become `Unauthorized`, other non-2xx become `Server`.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> AppResult<(u16, Vec<u8>)> {
        log::debug!("➡️  {}", endpoint);

        let response = request.send().await.map_err(|e| {
            log::warn!("❌ {} - transport failure: {}", endpoint, e);
            AppError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(format!("{}: failed to read body: {}", endpoint, e)))?
            .to_vec();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = error_message(&body).unwrap_or_else(|| status.to_string());
            log::warn!("🔒 {} - {}: {}", endpoint, status, message);
            return Err(AppError::Unauthorized(message));
        }

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| format!("{} failed with status {}", endpoint, status));
            log::warn!("❌ {} - {}: {}", endpoint, status, message);
            return Err(AppError::Server {
                status: status.as_u16(),
                message,
            });
        }

        log::debug!("✅ {} - {}", endpoint, status);
        Ok((status.as_u16(), body))
    }

    /// For endpoints whose envelope must carry `data`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> AppResult<T> {
        let (status, body) = self.execute(request, endpoint).await?;
        decode_envelope::<T>(endpoint, &body)?.into_data(status)
    }

    /// For endpoints where only `success` matters. An empty 2xx body counts as success.
    pub(crate) async fn acknowledge(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> AppResult<Option<String>> {
        let (status, body) = self.execute(request, endpoint).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode_envelope::<serde_json::Value>(endpoint, &body)?.into_ack(status)
    }
}

pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
