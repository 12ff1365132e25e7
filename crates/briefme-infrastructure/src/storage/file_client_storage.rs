//! File-backed client storage.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use briefme_core::error::{BriefMeError, Result};
use briefme_core::storage::ClientStorage;
use serde::{Deserialize, Serialize};

use super::atomic_toml::{AtomicTomlError, AtomicTomlFile};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StorageDocument {
    #[serde(default)]
    items: BTreeMap<String, String>,
}

/// [`ClientStorage`] persisted as a single TOML document.
///
/// File I/O runs on the blocking pool. Each write is a locked
/// read-modify-write, so keys written by other processes are preserved.
#[derive(Clone)]
pub struct FileClientStorage {
    file: Arc<AtomicTomlFile<StorageDocument>>,
}

impl FileClientStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicTomlFile<StorageDocument>) -> std::result::Result<R, AtomicTomlError>
            + Send
            + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| BriefMeError::internal(format!("Failed to join task: {}", e)))?
            .map_err(BriefMeError::from)
    }
}

#[async_trait]
impl ClientStorage for FileClientStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.blocking(move |file| {
            Ok(file
                .load()?
                .and_then(|mut doc| doc.items.remove(&key)))
        })
        .await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |file| {
            file.update(StorageDocument::default(), |doc| {
                doc.items.insert(key, value);
                Ok(())
            })
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.blocking(move |file| {
            if file.load()?.is_none() {
                return Ok(());
            }
            file.update(StorageDocument::default(), |doc| {
                doc.items.remove(&key);
                Ok(())
            })
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        tracing::debug!("[FileClientStorage] Clearing {:?}", self.file.path());
        self.blocking(|file| file.remove()).await
    }
}
