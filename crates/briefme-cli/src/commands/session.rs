use anyhow::{Context, Result};
use briefme_core::session::{User, UserPatch};
use briefme_infrastructure::parse_auth_callback;
use serde_json::json;

use super::read_json_source;
use crate::context::AppContext;

fn read_user(source: &str) -> Result<User> {
    serde_json::from_value(read_json_source(source)?).context("JSON is not a valid user record")
}

pub async fn login(ctx: &AppContext, token: Option<String>, user_json: &str) -> Result<()> {
    let user = read_user(user_json)?;
    let name = user.name.clone();
    ctx.session.login(user, token).await?;
    println!("Signed in as {}", name);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session.logout().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    let session = ctx.session.snapshot().await;
    let summary = json!({
        "api": ctx.config.api_base_url,
        "isAuthenticated": session.is_authenticated,
        "hasToken": session.token.is_some(),
        "user": session.user.map(|user| json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "jobTitle": user.job_title,
            "department": user.department,
            "onboardingCompleted": user.onboarding_completed,
        })),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub async fn verify(ctx: &AppContext, user_json: Option<&str>, revoke: bool) -> Result<()> {
    let user = match user_json {
        Some(source) => Some(read_user(source)?),
        None => ctx.session.user().await,
    };

    ctx.session.verify(user, !revoke).await?;
    if revoke {
        println!("Session marked as unauthenticated");
    } else {
        println!("Session verified");
    }
    Ok(())
}

pub async fn set_user(
    ctx: &AppContext,
    name: Option<String>,
    job_title: Option<String>,
    department: Option<String>,
) -> Result<()> {
    let patch = UserPatch {
        name,
        job_title,
        department,
        ..UserPatch::default()
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to update, pass --name, --job-title or --department");
    }

    ctx.session.set_user(patch).await?;
    println!("User updated");
    Ok(())
}

pub async fn auth_callback(ctx: &AppContext, url: &str) -> Result<()> {
    let token = parse_auth_callback(url)?;
    ctx.session.accept_callback_token(token).await?;
    println!("Token received, finish with `briefme login --user-json <FILE>`");
    Ok(())
}
