//! Desktop shell capabilities: quieting local chat apps.

mod apps;

pub use apps::{AppCloser, ChatApp, Platform, ShellCommand, quit_command};
