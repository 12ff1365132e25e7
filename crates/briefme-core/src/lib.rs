pub mod api;
pub mod config;
pub mod desktop;
pub mod error;
pub mod focus;
pub mod session;
pub mod storage;
pub mod summaries;
pub mod view_state;

// Re-export common error type
pub use error::BriefMeError;
