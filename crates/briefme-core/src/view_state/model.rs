//! View state domain models.

use serde::{Deserialize, Serialize};

use crate::focus::{CloseApps, FocusDuration, FocusModeRequest, StatusUpdates};

/// Focus mode settings the user picked last time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusPreferences {
    pub duration: FocusDuration,
    #[serde(default)]
    pub close_apps: CloseApps,
    #[serde(default)]
    pub slack_status: String,
}

impl FocusPreferences {
    pub fn to_request(&self) -> FocusModeRequest {
        FocusModeRequest {
            duration: self.duration.clone(),
            close_apps: self.close_apps,
            status_updates: StatusUpdates {
                slack: self.slack_status.clone(),
            },
        }
    }
}

/// View state that should be preserved across restarts.
///
/// # Fields
///
/// * `last_view` - The screen the user was on, restored on startup.
/// * `focus` - Focus mode settings used to prefill the next activation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub last_view: Option<String>,

    #[serde(default)]
    pub focus: FocusPreferences,
}

/// Typed partial update for [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ViewStatePatch {
    pub last_view: Option<String>,
    pub duration: Option<FocusDuration>,
    pub close_slack: Option<bool>,
    pub close_gmail: Option<bool>,
    pub close_calendar: Option<bool>,
    pub slack_status: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, patch: ViewStatePatch) {
        if patch.last_view.is_some() {
            self.last_view = patch.last_view;
        }
        if let Some(duration) = patch.duration {
            self.focus.duration = duration;
        }
        if let Some(slack) = patch.close_slack {
            self.focus.close_apps.slack = slack;
        }
        if let Some(gmail) = patch.close_gmail {
            self.focus.close_apps.gmail = gmail;
        }
        if let Some(calendar) = patch.close_calendar {
            self.focus.close_apps.calendar = calendar;
        }
        if let Some(status) = patch.slack_status {
            self.focus.slack_status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let state = ViewState::default();
        assert!(state.last_view.is_none());
        assert_eq!(state.focus.duration, FocusDuration::Minutes(60));
        assert!(!state.focus.close_apps.slack);
    }

    #[test]
    fn test_apply_patch() {
        let mut state = ViewState::new();
        state.apply(ViewStatePatch {
            close_gmail: Some(true),
            slack_status: Some("Deep work".to_string()),
            ..Default::default()
        });

        assert!(state.focus.close_apps.gmail);
        assert!(!state.focus.close_apps.slack);
        assert_eq!(state.focus.slack_status, "Deep work");

        let request = state.focus.to_request();
        assert_eq!(request.status_updates.slack, "Deep work");
        assert!(request.close_apps.gmail);
    }
}
