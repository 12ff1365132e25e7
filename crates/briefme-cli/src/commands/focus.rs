use anyhow::Result;
use briefme_core::BriefMeError;
use briefme_core::desktop::{AppCloser, ChatApp};
use briefme_core::focus::{FocusDuration, FocusModeClient};
use briefme_core::view_state::{ViewStatePatch, ViewStateStore};
use briefme_infrastructure::SystemAppCloser;

use crate::context::AppContext;

pub struct FocusFlags {
    pub duration: Option<String>,
    pub close_slack: bool,
    pub close_gmail: bool,
    pub close_calendar: bool,
    pub slack_status: Option<String>,
}

impl FocusFlags {
    fn is_empty(&self) -> bool {
        self.duration.is_none()
            && !self.close_slack
            && !self.close_gmail
            && !self.close_calendar
            && self.slack_status.is_none()
    }

    /// Flags replace the saved toggles as a whole; duration and status only when given.
    fn into_patch(self) -> ViewStatePatch {
        ViewStatePatch {
            duration: self.duration.as_deref().map(FocusDuration::parse),
            close_slack: Some(self.close_slack),
            close_gmail: Some(self.close_gmail),
            close_calendar: Some(self.close_calendar),
            slack_status: self.slack_status,
            ..ViewStatePatch::default()
        }
    }
}

pub async fn activate(ctx: &AppContext, flags: FocusFlags) -> Result<()> {
    let view_state = ViewStateStore::load(ctx.storage.clone()).await?;
    let state = if flags.is_empty() {
        view_state.get().await
    } else {
        view_state.update(flags.into_patch()).await?
    };

    let request = state.focus.to_request();
    let client = FocusModeClient::new(ctx.gateway.clone(), ctx.storage.clone());

    match client.activate(&request).await {
        Ok(_) => println!("Focus mode on for {}", request.duration),
        Err(err) => {
            if matches!(err, BriefMeError::FocusMode { status: 401, .. }) {
                ctx.session.goto_login(&ctx.navigator).await?;
            }
            return Err(err.into());
        }
    }

    if request.close_apps.slack {
        // The remote side already succeeded, a local failure is only reported
        if let Err(e) = SystemAppCloser::new().close_app(ChatApp::Slack).await {
            tracing::warn!("[Focus] Could not quit Slack: {}", e);
            eprintln!("Could not quit Slack: {}", e);
        }
    }

    Ok(())
}

pub async fn quit_app(app: &str) -> Result<()> {
    let app: ChatApp = app.parse()?;
    SystemAppCloser::new().close_app(app).await?;
    println!("Asked {} to quit", app.display_name());
    Ok(())
}
