//! Persisted view state store.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::model::{ViewState, ViewStatePatch};
use crate::error::Result;
use crate::storage::{ClientStorage, VIEW_STATE_KEY};

/// Store for [`ViewState`].
///
/// Keeps the state cached in memory and writes it back on every update.
/// Logging out wipes it together with the rest of the client storage.
pub struct ViewStateStore {
    storage: Arc<dyn ClientStorage>,
    state: Mutex<ViewState>,
}

impl ViewStateStore {
    /// Loads the state, falling back to defaults when missing or unreadable.
    pub async fn load(storage: Arc<dyn ClientStorage>) -> Result<Self> {
        let state = match storage.get_item(VIEW_STATE_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("[ViewStateStore] Resetting unreadable view state: {}", e);
                ViewState::default()
            }),
            None => ViewState::default(),
        };

        Ok(Self {
            storage,
            state: Mutex::new(state),
        })
    }

    pub async fn get(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// Applies the patch and persists the result. Returns the new state.
    pub async fn update(&self, patch: ViewStatePatch) -> Result<ViewState> {
        let mut state = self.state.lock().await;

        let mut next = state.clone();
        next.apply(patch);

        let raw = serde_json::to_string(&next)?;
        self.storage.set_item(VIEW_STATE_KEY, raw).await?;
        *state = next.clone();

        Ok(next)
    }

    pub async fn reset(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        self.storage.remove_item(VIEW_STATE_KEY).await?;
        *state = ViewState::default();
        Ok(())
    }
}
