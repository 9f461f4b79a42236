//! Carwise application binary - composition root.
//!
//! 1. Parse the command line and load configuration from TOML
//! 2. Load the vehicle and maintenance catalogs
//! 3. Answer one question, run the interactive chat, or serve the HTTP API

mod cli;
mod repl;
mod reveal;

use std::path::Path;

use clap::Parser;
use tokio::io::BufReader;

use carwise_api::{start_server, AppState};
use carwise_chat::{ChatOrchestrator, ConversationStore, Dispatcher};
use carwise_core::config::CarwiseConfig;
use carwise_core::Catalogs;

use cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing starts so its log level can apply.
    let config_file = args.resolve_config_path();
    let (mut config, config_error) = match CarwiseConfig::load(&config_file) {
        Ok(c) => (c, None),
        Err(e) => (CarwiseConfig::default(), Some(e)),
    };
    args.apply_overrides(&mut config);

    // Tracing goes to stderr so `ask --json` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Carwise v{}", env!("CARGO_PKG_VERSION"));
    match config_error {
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Some(_) if !config_file.exists() => {
            tracing::debug!(path = %config_file.display(), "No config file, using defaults")
        }
        Some(e) => {
            tracing::warn!(path = %config_file.display(), error = %e, "Failed to load config, using defaults")
        }
    }

    let catalogs = match Catalogs::load(
        Path::new(&config.data.vehicles_path),
        Path::new(&config.data.maintenance_path),
    ) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalogs");
            return Err(e.into());
        }
    };
    let orchestrator = ChatOrchestrator::new(Dispatcher::new(catalogs), config.chat.clone());

    match args.command() {
        Command::Ask { query, json } => {
            let mut store = ConversationStore::new();
            let exchange = orchestrator.handle_message(&mut store, &query.join(" "))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&exchange)?);
            } else {
                println!("{}", exchange.reply);
            }
        }
        Command::Chat => {
            let mut store = ConversationStore::new();
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            repl::run(&orchestrator, &mut store, stdin, &mut stdout).await?;
        }
        Command::Serve => {
            let server = config.server.clone();
            let state = AppState::new(config, orchestrator);
            start_server(&server, state).await?;
        }
    }

    Ok(())
}
