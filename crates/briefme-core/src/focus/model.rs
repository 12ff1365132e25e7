use std::fmt;

use serde::{Deserialize, Serialize};

/// How long focus mode lasts: a number of minutes or a named span the API
/// understands (e.g. `"until-tomorrow"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FocusDuration {
    Minutes(u32),
    Named(String),
}

impl FocusDuration {
    /// Parses command-line style input: digits become minutes, anything else a named span.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<u32>() {
            Ok(minutes) => FocusDuration::Minutes(minutes),
            Err(_) => FocusDuration::Named(input.to_string()),
        }
    }
}

impl Default for FocusDuration {
    fn default() -> Self {
        FocusDuration::Minutes(60)
    }
}

impl fmt::Display for FocusDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusDuration::Minutes(minutes) => write!(f, "{} min", minutes),
            FocusDuration::Named(name) => f.write_str(name),
        }
    }
}

/// Which apps the backend should quiet while focus mode runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CloseApps {
    pub slack: bool,
    pub gmail: bool,
    pub calendar: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusUpdates {
    /// Slack status text shown while focused. Empty leaves the status alone.
    pub slack: String,
}

/// Body of `POST /focus-mode`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusModeRequest {
    pub duration: FocusDuration,
    pub close_apps: CloseApps,
    pub status_updates: StatusUpdates,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let request = FocusModeRequest {
            duration: FocusDuration::Minutes(45),
            close_apps: CloseApps {
                slack: true,
                gmail: false,
                calendar: true,
            },
            status_updates: StatusUpdates {
                slack: "Heads down".to_string(),
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "duration": 45,
                "closeApps": {"slack": true, "gmail": false, "calendar": true},
                "statusUpdates": {"slack": "Heads down"}
            })
        );
    }

    #[test]
    fn test_named_duration_is_a_string() {
        let value = serde_json::to_value(FocusDuration::parse("until-tomorrow")).unwrap();
        assert_eq!(value, json!("until-tomorrow"));
        assert_eq!(FocusDuration::parse(" 30 "), FocusDuration::Minutes(30));
    }
}
