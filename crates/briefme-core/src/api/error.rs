//! The normalized error shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Tag carried by every error produced by the gateway.
pub const API_ERROR_NAME: &str = "ApiError";

/// Tag carried by errors for calls aborted through a cancellation token.
pub const CANCELED_ERROR_NAME: &str = "CanceledError";

/// Fixed-shape error every gateway failure is reshaped into.
///
/// `status` and `data` are only present when the server actually answered.
/// Network-level failures carry just a `message`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{name}: {message}")]
pub struct ApiError {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiError {
    /// Failure without any response (DNS, refused connection, TLS, ...).
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            name: API_ERROR_NAME.to_string(),
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// Failure for a response with an error status.
    ///
    /// Falls back to a generic message when the server did not provide one.
    pub fn from_status(status: u16, message: Option<String>, data: Option<Value>) -> Self {
        Self {
            name: API_ERROR_NAME.to_string(),
            message: message
                .unwrap_or_else(|| format!("Request failed with status code {}", status)),
            status: Some(status),
            data,
        }
    }

    /// Failure raised locally, before any request left the client.
    pub fn local(message: impl Into<String>) -> Self {
        Self::network(message)
    }

    /// Rejection for a verb outside the supported set. Raised before any request exists.
    pub fn invalid_method(method: &str) -> Self {
        Self::local(format!("Invalid method: {}", method))
    }

    pub fn canceled() -> Self {
        Self {
            name: CANCELED_ERROR_NAME.to_string(),
            message: "canceled".to_string(),
            status: None,
            data: None,
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.name == CANCELED_ERROR_NAME
    }

    /// Extracts a human readable message from an error body, if the server sent one.
    pub fn server_message(body: &Value) -> Option<String> {
        ["message", "error"]
            .iter()
            .filter_map(|key| body.get(key))
            .find_map(|value| value.as_str())
            .filter(|message| !message.trim().is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_status_generic_message() {
        let err = ApiError::from_status(502, None, Some(json!("bad gateway")));
        assert_eq!(err.name, API_ERROR_NAME);
        assert_eq!(err.message, "Request failed with status code 502");
        assert_eq!(err.status, Some(502));
        assert_eq!(err.data, Some(json!("bad gateway")));
    }

    #[test]
    fn test_network_error_has_no_response() {
        let err = ApiError::network("connection refused");
        assert!(err.status.is_none());
        assert!(err.data.is_none());
    }

    #[test]
    fn test_server_message_prefers_message_field() {
        let body = json!({"message": "Token expired", "error": "unauthorized"});
        assert_eq!(ApiError::server_message(&body).as_deref(), Some("Token expired"));

        let body = json!({"error": "unauthorized"});
        assert_eq!(ApiError::server_message(&body).as_deref(), Some("unauthorized"));

        assert!(ApiError::server_message(&json!("plain text")).is_none());
        assert!(ApiError::server_message(&json!({"message": ""})).is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from_status(401, Some("nope".into()), Some(json!({"a": 1})));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({"name": "ApiError", "message": "nope", "status": 401, "data": {"a": 1}})
        );
    }

    #[test]
    fn test_canceled() {
        let err = ApiError::canceled();
        assert!(err.is_canceled());
        assert!(err.status.is_none());
    }
}
