//! Summary-derived values fetched through the gateway.

mod unread;

pub use unread::{UNREAD_COUNT_PATH, UnreadCountStore};
