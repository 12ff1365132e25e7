//! Storage layer for atomic file operations.

mod atomic_toml;
mod file_client_storage;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use file_client_storage::FileClientStorage;
