//! Lightweight view state that persists across restarts.

mod model;
mod store;

pub use model::{FocusPreferences, ViewState, ViewStatePatch};
pub use store::ViewStateStore;
