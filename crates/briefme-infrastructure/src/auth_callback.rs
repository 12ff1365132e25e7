//! Parsing of `briefme://auth?token=...` deep links.

use briefme_core::error::{BriefMeError, Result};
use reqwest::Url;

pub const CALLBACK_SCHEME: &str = "briefme";

/// Extracts the token from a login callback URL.
///
/// The scheme must be `briefme` and the `token` query parameter non-empty.
pub fn parse_auth_callback(url: &str) -> Result<String> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| BriefMeError::desktop(format!("Invalid callback URL: {}", e)))?;

    if parsed.scheme() != CALLBACK_SCHEME {
        return Err(BriefMeError::desktop(format!(
            "Unexpected callback scheme: {}",
            parsed.scheme()
        )));
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| BriefMeError::desktop("Callback URL carries no token"))
}
