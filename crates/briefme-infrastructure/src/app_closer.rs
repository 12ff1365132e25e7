//! Quits local chat applications by running the platform's own tooling.

use async_trait::async_trait;
use briefme_core::desktop::{AppCloser, ChatApp, Platform, ShellCommand, quit_command};
use briefme_core::error::{BriefMeError, Result};
use tokio::process::Command;

/// [`AppCloser`] that shells out to `osascript`, `taskkill` or `pkill`.
pub struct SystemAppCloser {
    platform: Platform,
}

impl SystemAppCloser {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    async fn run(command: &ShellCommand) -> Result<()> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .output()
            .await
            .map_err(|e| BriefMeError::desktop(format!("Failed to run {}: {}", command.program, e)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(BriefMeError::desktop(format!(
            "{} exited with {}: {}",
            command.program,
            output.status,
            stderr.trim()
        )))
    }
}

impl Default for SystemAppCloser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppCloser for SystemAppCloser {
    async fn close_app(&self, app: ChatApp) -> Result<()> {
        let command = quit_command(self.platform, app);
        tracing::info!("[AppCloser] Closing {} via {}", app, command.program);

        match Self::run(&command).await {
            Ok(()) => Ok(()),
            Err(e) if self.platform.reports_failures() => {
                tracing::error!("[AppCloser] Failed to close {}: {}", app, e);
                Err(e)
            }
            Err(e) => {
                // pkill exits non-zero when nothing matched
                tracing::debug!("[AppCloser] Ignoring failure closing {}: {}", app, e);
                Ok(())
            }
        }
    }
}
