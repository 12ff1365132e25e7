pub mod call;
pub mod focus;
pub mod session;
pub mod unread;

use std::io::Read;

use anyhow::{Context, Result};

/// Reads a JSON argument from a file path, or stdin for `-`.
pub(crate) fn read_json_source(source: &str) -> Result<serde_json::Value> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read JSON from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))?
    };

    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", source))
}
