use anyhow::{Context, Result};
use briefme_core::api::RequestOptions;
use serde_json::Value;

use crate::context::AppContext;

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .with_context(|| format!("Header must look like Name:Value, got '{}'", raw))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

pub async fn run(
    ctx: &AppContext,
    method: &str,
    path: &str,
    data: Option<&str>,
    headers: &[String],
) -> Result<()> {
    let data = data
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--data is not valid JSON")?;

    let mut options = RequestOptions::new();
    for raw in headers {
        let (name, value) = parse_header(raw)?;
        options = options.with_header(name, value);
    }

    match ctx.gateway.call_api(method, path, data, options).await {
        Ok(response) => {
            println!("{}", response.status);
            println!("{}", serde_json::to_string_pretty(&response.body)?);
            Ok(())
        }
        Err(err) => {
            ctx.handle_unauthorized(&err).await?;
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
            Err(err.into())
        }
    }
}
