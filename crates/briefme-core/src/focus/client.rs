use std::sync::Arc;

use serde_json::Value;

use super::model::FocusModeRequest;
use crate::api::{ApiGateway, ApiResponse, HttpMethod, RequestOptions};
use crate::error::{BriefMeError, Result};
use crate::storage::{ClientStorage, read_token};

pub const FOCUS_MODE_PATH: &str = "/focus-mode";

/// Activates focus mode on the remote API.
///
/// The persisted token travels with the call itself rather than through the
/// gateway's shared credential.
pub struct FocusModeClient {
    gateway: Arc<dyn ApiGateway>,
    storage: Arc<dyn ClientStorage>,
}

impl FocusModeClient {
    pub fn new(gateway: Arc<dyn ApiGateway>, storage: Arc<dyn ClientStorage>) -> Self {
        Self { gateway, storage }
    }

    /// Sends the activation request.
    ///
    /// A non-success answer becomes [`BriefMeError::FocusMode`] carrying the
    /// status and the raw body text. Failures without a response stay
    /// [`BriefMeError::Api`].
    pub async fn activate(&self, request: &FocusModeRequest) -> Result<ApiResponse> {
        let mut options = RequestOptions::new();
        if let Some(token) = read_token(self.storage.as_ref()).await? {
            options = options.with_bearer_token(token);
        }

        let body = serde_json::to_value(request)?;
        tracing::info!(
            "[FocusModeClient] Activating focus mode for {}",
            request.duration
        );

        self.gateway
            .call(HttpMethod::Post, FOCUS_MODE_PATH, Some(body), options)
            .await
            .map_err(|err| match err.status {
                Some(status) => BriefMeError::FocusMode {
                    status,
                    body: body_text(err.data.as_ref()),
                },
                None => BriefMeError::Api(err),
            })
    }
}

fn body_text(data: Option<&Value>) -> String {
    match data {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
