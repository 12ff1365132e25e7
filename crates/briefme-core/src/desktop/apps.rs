use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{BriefMeError, Result};

/// Local chat applications focus mode can close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatApp {
    Slack,
    Discord,
    Teams,
}

impl ChatApp {
    /// Application name as macOS knows it.
    pub fn display_name(&self) -> &'static str {
        match self {
            ChatApp::Slack => "Slack",
            ChatApp::Discord => "Discord",
            ChatApp::Teams => "Microsoft Teams",
        }
    }

    /// Process image name on Windows.
    pub fn windows_image(&self) -> &'static str {
        match self {
            ChatApp::Slack => "slack.exe",
            ChatApp::Discord => "Discord.exe",
            ChatApp::Teams => "ms-teams.exe",
        }
    }

    /// Pattern matched against the full command line elsewhere.
    pub fn process_pattern(&self) -> &'static str {
        match self {
            ChatApp::Slack => "slack",
            ChatApp::Discord => "discord",
            ChatApp::Teams => "teams",
        }
    }
}

impl fmt::Display for ChatApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.process_pattern())
    }
}

impl FromStr for ChatApp {
    type Err = BriefMeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slack" => Ok(ChatApp::Slack),
            "discord" => Ok(ChatApp::Discord),
            "teams" | "msteams" => Ok(ChatApp::Teams),
            other => Err(BriefMeError::desktop(format!("Unknown chat app: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Whether a failed quit should be reported. Elsewhere it is best effort.
    pub fn reports_failures(&self) -> bool {
        !matches!(self, Platform::Other)
    }
}

/// A program invocation, kept as data so it can be inspected before running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Builds the command that quits `app` on `platform`.
pub fn quit_command(platform: Platform, app: ChatApp) -> ShellCommand {
    match platform {
        Platform::MacOs => ShellCommand {
            program: "osascript".to_string(),
            args: vec![
                "-e".to_string(),
                format!("quit app \"{}\"", app.display_name()),
            ],
        },
        Platform::Windows => ShellCommand {
            program: "taskkill".to_string(),
            args: vec![
                "/IM".to_string(),
                app.windows_image().to_string(),
                "/F".to_string(),
            ],
        },
        Platform::Other => ShellCommand {
            program: "pkill".to_string(),
            args: vec!["-f".to_string(), app.process_pattern().to_string()],
        },
    }
}

/// Capability to terminate a local chat application.
#[async_trait]
pub trait AppCloser: Send + Sync {
    async fn close_app(&self, app: ChatApp) -> Result<()>;
}
