//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use notehub_core::api::ApiClient;
use notehub_core::config;
use notehub_core::session::SessionStore;

mod commands;

#[derive(Parser)]
#[command(name = "notehub")]
#[command(version)]
#[command(about = "Browse and manage a notes server from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server base URL (overrides config)
    #[arg(long, global = true, env = "NOTEHUB_SERVER_URL", value_name = "URL")]
    server: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Create a user account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin (twice, for confirmation) when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the logged-in account
    Whoami,
    /// List streams, or the children of the deepest id given
    Ls {
        #[arg(long, value_name = "ID")]
        stream: Option<i64>,
        #[arg(long, value_name = "ID", requires = "stream")]
        semester: Option<i64>,
        #[arg(long, value_name = "ID", requires = "semester")]
        subject: Option<i64>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Save the server URL to the config file
    SetServer {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logging is best effort; a read-only home must not block the CLI
    let _log_guard = notehub_core::logging::init().ok();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, server } = cli;
    let server = server.as_deref();
    let store = SessionStore::default();

    // default to the interactive browser
    let Some(command) = command else {
        let (config, api) = connect(server)?;
        return commands::browse::interactive(&config, api, store).await;
    };

    match command {
        Commands::Login { email, password } => {
            let (_, api) = connect(server)?;
            commands::auth::login(&api, &store, &email, password).await
        }
        Commands::Logout => commands::auth::logout(&store),
        Commands::Register {
            name,
            email,
            password,
        } => {
            let (_, api) = connect(server)?;
            commands::auth::register(&api, name, email, password).await
        }
        Commands::Whoami => {
            let (_, api) = connect(server)?;
            commands::auth::whoami(&api, &store).await
        }
        Commands::Ls {
            stream,
            semester,
            subject,
        } => {
            let (_, api) = connect(server)?;
            commands::browse::ls(&api, &store, stream, semester, subject).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetServer { url } => commands::config::set_server(&url),
        },
    }
}

/// Loads the config and builds a client for the effective server.
fn connect(server: Option<&str>) -> Result<(config::Config, ApiClient)> {
    let config = config::Config::load().context("load config")?;
    let api = ApiClient::from_config(&config, server).context("create API client")?;
    tracing::debug!(server = api.base_url(), "Using server");
    Ok((config, api))
}
