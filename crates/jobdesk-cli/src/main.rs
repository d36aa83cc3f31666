use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

const PASSWORD_ENV: &str = "JOBDESK_PASSWORD";

#[derive(Parser)]
#[command(name = "jobdesk")]
#[command(about = "Jobdesk CLI - submit image batches and fetch their PDF reports", long_about = None)]
struct Cli {
    /// Directory holding config.toml, session.toml and logs
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Backend base URL (overrides JOBDESK_API_BASE_URL and config.toml)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Signin {
        #[arg(long)]
        email: String,
        /// Password (or set JOBDESK_PASSWORD)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
    /// Create an account (password must be at least 8 characters)
    Signup {
        #[arg(long)]
        email: String,
        /// Password (or set JOBDESK_PASSWORD)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Signout,
    /// Show the signed-in user
    Whoami,
    /// Manage jobs
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },
    /// Show the screen the client settles on after startup
    Status,
}

#[derive(Subcommand)]
enum JobsAction {
    /// List your jobs
    List,
    /// Delete a job
    Delete {
        /// Job id
        id: String,
    },
    /// Resolve (and optionally download) a job's PDF report
    Report {
        /// Job id
        id: String,
        /// Save the report into this directory instead of printing its URL
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Create a job from image files (max 100, 5MB each)
    Create {
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (paths, log_level, logs_dir) = commands::Bootstrap::logging_setup(cli.config_dir)?;
    let _log_guard = logging::init(&log_level, &logs_dir)?;
    let mut app = commands::Bootstrap::load(paths, cli.api_url)?.connect()?;

    match cli.command {
        Commands::Signin { email, password } => {
            commands::auth::sign_in(&mut app, &email, &password).await?
        }
        Commands::Signup { email, password } => {
            commands::auth::sign_up(&mut app, &email, &password).await?
        }
        Commands::Signout => commands::auth::sign_out(&mut app).await?,
        Commands::Whoami => commands::auth::whoami(&mut app).await?,
        Commands::Jobs { action } => match action {
            JobsAction::List => commands::jobs::list(&mut app).await?,
            JobsAction::Delete { id } => commands::jobs::delete(&mut app, &id).await?,
            JobsAction::Report { id, output } => {
                commands::jobs::report(&mut app, &id, output.as_deref()).await?
            }
            JobsAction::Create { files } => commands::jobs::create(&mut app, &files).await?,
        },
        Commands::Status => commands::status::run(&mut app).await?,
    }

    Ok(())
}
