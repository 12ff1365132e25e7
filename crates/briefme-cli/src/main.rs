use std::path::PathBuf;

use anyhow::Result;
use briefme_infrastructure::BriefMePaths;
use clap::{Parser, Subcommand};

mod commands;
mod context;
mod logging;
mod navigator;

use context::AppContext;

#[derive(Parser)]
#[command(name = "briefme")]
#[command(about = "Brief Me CLI - session, summaries and focus mode from the terminal", long_about = None)]
struct Cli {
    /// Use this directory instead of the platform config directory
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// View the command runs from, used when a 401 forces a redirect
    #[arg(long, global = true, default_value = "/dashboard")]
    path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a user and token as the active session
    Login {
        /// Bearer token. Omit to keep the token from a previous auth callback
        #[arg(long)]
        token: Option<String>,
        /// User record as JSON, from a file or `-` for stdin
        #[arg(long)]
        user_json: String,
    },
    /// Clear the session and all persisted client data
    Logout,
    /// Print the current session
    Whoami,
    /// Re-validate the session without re-authenticating
    Verify {
        /// Fresh user record as JSON, from a file or `-` for stdin
        #[arg(long, conflicts_with = "revoke")]
        user_json: Option<String>,
        /// Mark the session as no longer authenticated
        #[arg(long)]
        revoke: bool,
    },
    /// Update fields of the stored user
    SetUser {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        job_title: Option<String>,
        #[arg(long)]
        department: Option<String>,
    },
    /// Fetch the unread summary count
    Unread,
    /// Activate focus mode
    Focus {
        /// Minutes, or a named span such as `until-tomorrow`
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        close_slack: bool,
        #[arg(long)]
        close_gmail: bool,
        #[arg(long)]
        close_calendar: bool,
        /// Slack status text while focused
        #[arg(long)]
        slack_status: Option<String>,
    },
    /// Quit a local chat app (slack, discord, teams)
    QuitApp { app: String },
    /// Accept a `briefme://auth?token=...` login callback
    AuthCallback { url: String },
    /// Send a raw request through the API gateway
    Call {
        method: String,
        path: String,
        /// JSON payload
        #[arg(long)]
        data: Option<String>,
        /// Extra header as `Name:Value`, repeatable
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BriefMePaths::new(cli.config_dir.as_deref());
    let _log_guard = logging::init(&paths)?;
    let ctx = AppContext::build(paths, cli.path).await?;

    match cli.command {
        Commands::Login { token, user_json } => {
            commands::session::login(&ctx, token, &user_json).await?
        }
        Commands::Logout => commands::session::logout(&ctx).await?,
        Commands::Whoami => commands::session::whoami(&ctx).await?,
        Commands::Verify { user_json, revoke } => {
            commands::session::verify(&ctx, user_json.as_deref(), revoke).await?
        }
        Commands::SetUser {
            name,
            job_title,
            department,
        } => commands::session::set_user(&ctx, name, job_title, department).await?,
        Commands::Unread => commands::unread::run(&ctx).await?,
        Commands::Focus {
            duration,
            close_slack,
            close_gmail,
            close_calendar,
            slack_status,
        } => {
            let flags = commands::focus::FocusFlags {
                duration,
                close_slack,
                close_gmail,
                close_calendar,
                slack_status,
            };
            commands::focus::activate(&ctx, flags).await?
        }
        Commands::QuitApp { app } => commands::focus::quit_app(&app).await?,
        Commands::AuthCallback { url } => commands::session::auth_callback(&ctx, &url).await?,
        Commands::Call {
            method,
            path,
            data,
            headers,
        } => commands::call::run(&ctx, &method, &path, data.as_deref(), &headers).await?,
    }

    Ok(())
}
