use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::api::{ApiGateway, HttpMethod, RequestOptions};
use crate::error::Result;
use crate::storage::{ClientStorage, read_token};

pub const UNREAD_COUNT_PATH: &str = "/summaries/unread-count";

/// Fetch-and-cache holder for the unread summary count.
///
/// `None` means not loaded yet or the last refresh failed; the two are not
/// distinguished. Nothing refreshes automatically and concurrent refreshes are
/// not de-duplicated, so the last response to arrive wins.
pub struct UnreadCountStore {
    gateway: Arc<dyn ApiGateway>,
    storage: Arc<dyn ClientStorage>,
    count: Mutex<Option<u64>>,
}

impl UnreadCountStore {
    pub fn new(gateway: Arc<dyn ApiGateway>, storage: Arc<dyn ClientStorage>) -> Self {
        Self {
            gateway,
            storage,
            count: Mutex::new(None),
        }
    }

    /// Last stored value.
    pub async fn count(&self) -> Option<u64> {
        *self.count.lock().await
    }

    /// Fetches the count and replaces the stored value.
    ///
    /// Failures are logged and stored as `None`; they never reach the caller.
    pub async fn refresh(&self) -> Option<u64> {
        let count = match self.fetch().await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!("[UnreadCountStore] Failed to fetch unread count: {}", e);
                None
            }
        };

        *self.count.lock().await = count;
        count
    }

    async fn fetch(&self) -> Result<Option<u64>> {
        // Always overwrite, a removed token must not linger on the gateway
        let token = read_token(self.storage.as_ref()).await?;
        self.gateway.set_bearer_token(token.as_deref());

        let response = self
            .gateway
            .call(HttpMethod::Get, UNREAD_COUNT_PATH, None, RequestOptions::new())
            .await?;

        // A zero count is a real value, only a missing or non-numeric one maps to None
        Ok(response.body.get("count").and_then(Value::as_u64))
    }
}
