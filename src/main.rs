use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use navguard::config::{load_config, render_schema, ConfigV1};
use navguard::navigation::Navigator;
use navguard::session::{create_token_store, TOKEN_KEY};
use navguard::startup::{self, build_state};
use navguard::utils::logger::init_logging;

#[derive(Parser, Debug)]
#[command(name = "navguard", about = "Route authorization guard for the dating app front end")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "NAVGUARD_CONFIG", default_value = "./config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Print the configuration JSON schema.
    Schema,
    /// Navigate to a path using the configured session store and print where it lands.
    Check { path: String },
    /// Maintain the configured session store.
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Store a session token.
    Set { token: String },
    /// Remove the session token.
    Clear,
    /// Print the stored session token, if any.
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve);

    if let Command::Schema = command {
        return match render_schema() {
            Ok(schema) => {
                println!("{}", schema);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error rendering schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let result = match command {
        Command::Serve => startup::run(config).await.map_err(|e| e.to_string()),
        // Printed above, before any config is needed.
        Command::Schema => Ok(()),
        Command::Check { path } => check(config, &path).await,
        Command::Session(cmd) => session(&config, cmd).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn check(config: ConfigV1, path: &str) -> Result<(), String> {
    let store = create_token_store(&config.session);
    let state = build_state(config).map_err(|e| e.to_string())?;
    let navigator = Navigator::new(state.guard, state.table, store);

    let resolution = navigator.navigate(path).await.map_err(|e| e.to_string())?;
    let rendered = serde_json::to_string_pretty(&resolution).map_err(|e| e.to_string())?;
    println!("{}", rendered);
    Ok(())
}

async fn session(config: &ConfigV1, command: SessionCommand) -> Result<(), String> {
    let store = create_token_store(&config.session);
    match command {
        SessionCommand::Set { token } => store.set(TOKEN_KEY, &token).await,
        SessionCommand::Clear => store.remove(TOKEN_KEY).await,
        SessionCommand::Show => store.get(TOKEN_KEY).await.map(|token| {
            println!("{}", token.unwrap_or_default());
        }),
    }
    .map_err(|e| e.to_string())
}
