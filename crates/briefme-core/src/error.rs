//! Error types for the Brief Me client.

use thiserror::Error;

use crate::api::ApiError;

/// A shared error type for the entire Brief Me client core.
///
/// Transport failures never show up here in their raw form: the HTTP gateway
/// normalizes them into [`ApiError`] first, which is then wrapped by the
/// `Api` variant.
#[derive(Error, Debug, Clone)]
pub enum BriefMeError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Persisted client storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A session mutation would leave the session in an inconsistent state
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Normalized error coming out of the HTTP gateway
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Focus mode endpoint answered with a non-success status
    #[error("Failed to activate focus mode ({status}): {body}")]
    FocusMode { status: u16, body: String },

    /// Local desktop integration failed (closing apps, callbacks)
    #[error("Desktop error: {0}")]
    Desktop(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BriefMeError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidSession error
    pub fn invalid_session(message: impl Into<String>) -> Self {
        Self::InvalidSession(message.into())
    }

    pub fn desktop(message: impl Into<String>) -> Self {
        Self::Desktop(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error came out of the HTTP gateway
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns the HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => err.status,
            Self::FocusMode { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for BriefMeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BriefMeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BriefMeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for BriefMeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BriefMeError>`.
pub type Result<T> = std::result::Result<T, BriefMeError>;
