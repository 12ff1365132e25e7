//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: user, partial user update and session records
//! - `navigation`: the seam used to send the user back to the login screen
//! - `store`: the persisted session store

mod model;
mod navigation;
mod store;

pub use model::{Session, User, UserPatch};
pub use navigation::{DEFAULT_LOGIN_PATH, DEFAULT_PUBLIC_PATHS, Navigator};
pub use store::SessionStore;
