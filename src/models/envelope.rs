use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// `{ success, data?, message? }` wrapper used by every API reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Returns the payload, failing on `success: false` or a missing `data`.
    pub fn into_data(self, status: u16) -> Result<T, AppError> {
        if !self.success {
            return Err(AppError::Server {
                status,
                message: self.message.unwrap_or_else(|| "Request failed".to_string()),
            });
        }
        self.data
            .ok_or_else(|| AppError::Decode("response envelope has no data".to_string()))
    }

    /// For replies whose payload is irrelevant (deletes, acknowledgements).
    pub fn into_ack(self, status: u16) -> Result<Option<String>, AppError> {
        if !self.success {
            return Err(AppError::Server {
                status,
                message: self.message.unwrap_or_else(|| "Request failed".to_string()),
            });
        }
        Ok(self.message)
    }
}

/// Decodes a reply body into `ApiEnvelope<T>`, naming the endpoint on failure.
pub fn decode_envelope<T: DeserializeOwned>(
    endpoint: &str,
    body: &[u8],
) -> Result<ApiEnvelope<T>, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::Decode(format!("{}: {}", endpoint, e)))
}

/// Best-effort `message` from an error body that may not be an envelope at all.
pub fn error_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct Partial {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        error: Option<String>,
    }
    serde_json::from_slice::<Partial>(body)
        .ok()
        .and_then(|p| p.message.or(p.error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_data() {
        let env: ApiEnvelope<Vec<u32>> =
            decode_envelope("GET /x", br#"{"success":true,"data":[1,2]}"#).unwrap();
        assert_eq!(env.into_data(200).unwrap(), vec![1, 2]);
    }

    #[test]
    fn missing_data_is_not_an_empty_list() {
        let env: ApiEnvelope<Vec<u32>> =
            decode_envelope("GET /x", br#"{"success":true}"#).unwrap();
        assert!(matches!(env.into_data(200), Err(AppError::Decode(_))));
    }

    #[test]
    fn failure_carries_server_message() {
        let env: ApiEnvelope<Vec<u32>> =
            decode_envelope("GET /x", br#"{"success":false,"message":"Volunteer not found"}"#)
                .unwrap();
        match env.into_data(200) {
            Err(AppError::Server { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "Volunteer not found");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn wrong_shape_names_the_endpoint() {
        let err = decode_envelope::<Vec<u32>>("GET /volunteers", br#"{"data":[]}"#).unwrap_err();
        assert!(err.to_string().contains("GET /volunteers"));
    }

    #[test]
    fn error_message_reads_either_key() {
        assert_eq!(error_message(br#"{"message":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message(br#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(error_message(b"<html>"), None);
    }
}
