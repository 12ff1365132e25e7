//! Focus mode activation.

mod client;
mod model;

pub use client::{FOCUS_MODE_PATH, FocusModeClient};
pub use model::{CloseApps, FocusDuration, FocusModeRequest, StatusUpdates};
