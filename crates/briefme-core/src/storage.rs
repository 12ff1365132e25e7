//! Persisted client storage.
//!
//! A durable key/value store with string values, surviving restarts. Session
//! data and the flat token key both live here and are wiped together on logout.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;

/// Flat key holding the bearer token, read by code that has no session handle.
pub const TOKEN_KEY: &str = "token";

/// Namespaced key holding the serialized session.
pub const SESSION_KEY: &str = "briefme-session";

/// Namespaced key holding the serialized view state.
pub const VIEW_STATE_KEY: &str = "briefme-view";

/// Durable key/value storage shared by every store in the client.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&self, key: &str, value: String) -> Result<()>;

    /// Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Removes every key, not only the ones a given store owns.
    async fn clear(&self) -> Result<()>;
}

/// The one accessor for "who is the current identity".
///
/// Every component that needs the credential reads it through here instead
/// of touching the flat key itself. Empty values count as absent.
pub async fn read_token(storage: &dyn ClientStorage) -> Result<Option<String>> {
    Ok(storage
        .get_item(TOKEN_KEY)
        .await?
        .filter(|token| !token.trim().is_empty()))
}

/// Volatile storage, used for tests and for runs that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryClientStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryClientStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

#[async_trait]
impl ClientStorage for MemoryClientStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.items.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.lock().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.items.lock().await.clear();
        Ok(())
    }
}
