mod backend;
mod commands;
mod error;
mod file_storage;


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::backend::ReqwestBackend;
use crate::commands::{CliAuth, ResourceAction};
use crate::error::CliError;
use crate::file_storage::FileStorage;

#[derive(Parser, Debug)]
#[command(name = "stem-admin", about = "STEM Inspire admin CLI")]
struct Cli {
    #[arg(long, env = "STEM_BACKEND_URL", default_value = "http://127.0.0.1:5000")]
    backend_url: String,

    #[arg(long, env = "STEM_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the site host's health endpoint.
    Ping {
        #[arg(long, env = "STEM_HOST_URL", default_value = "http://127.0.0.1:3000")]
        host_url: String,
    },
    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that run against the persisted admin session.
#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STEM_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the persisted session.
    Logout,
    /// Show who is signed in.
    Status,
    ChangePassword {
        #[arg(long, env = "STEM_CURRENT_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "STEM_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
    Resource(ResourceCommand),
}

#[derive(Args, Debug)]
struct ResourceCommand {
    #[command(subcommand)]
    command: ResourceSubcommand,
}

#[derive(Subcommand, Debug)]
enum ResourceSubcommand {
    List {
        resource: String,
    },
    Get {
        resource: String,
        id: String,
    },
    Create {
        resource: String,
        #[arg(long)]
        data: String,
    },
    Update {
        resource: String,
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        resource: String,
        id: String,
    },
}

impl ResourceSubcommand {
    fn into_action(self) -> Result<(String, ResourceAction), CliError> {
        Ok(match self {
            Self::List { resource } => (resource, ResourceAction::List),
            Self::Get { resource, id } => (resource, ResourceAction::Get { id }),
            Self::Create { resource, data } => (resource, ResourceAction::Create { body: serde_json::from_str(&data)? }),
            Self::Update { resource, id, data } => {
                (resource, ResourceAction::Update { id, body: serde_json::from_str(&data)? })
            }
            Self::Delete { resource, id } => (resource, ResourceAction::Delete { id }),
        })
    }
}

fn default_session_file() -> Result<PathBuf, CliError> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".stem-admin").join("session.json"))
        .ok_or(CliError::NoSessionFile)
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = match cli.command {
        Command::Ping { host_url } => commands::ping(&host_url).await?,
        Command::Session(command) => {
            let auth = open_session(cli.session_file, cli.backend_url)?;
            run(&auth, command).await?
        }
    };
    println!("{output}");
    Ok(())
}

fn open_session(session_file: Option<PathBuf>, backend_url: String) -> Result<CliAuth, CliError> {
    let session_file = match session_file {
        Some(path) => path,
        None => default_session_file()?,
    };
    tracing::debug!(path = %session_file.display(), "using session file");
    Ok(CliAuth::start(FileStorage::new(session_file), ReqwestBackend::new(backend_url)?))
}

async fn run(auth: &CliAuth, command: SessionCommand) -> Result<String, CliError> {
    match command {
        SessionCommand::Login { email, password } => commands::login(auth, &email, &password).await,
        SessionCommand::Logout => Ok(commands::logout(auth)),
        SessionCommand::Status => Ok(commands::status(auth)),
        SessionCommand::ChangePassword { current, new } => commands::change_password(auth, &current, &new).await,
        SessionCommand::Resource(resource) => {
            let (name, action) = resource.command.into_action()?;
            commands::resource(auth, commands::parse_resource(&name)?, action).await
        }
    }
}
