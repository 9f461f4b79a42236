//! CLI argument definitions for the Carwise application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use carwise_core::config::CarwiseConfig;

/// Carwise - a rule-based car advisory chatbot.
#[derive(Parser, Debug)]
#[command(name = "carwise", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Vehicle specification CSV.
    #[arg(long = "vehicles", global = true)]
    pub vehicles: Option<PathBuf>,

    /// Maintenance schedule CSV.
    #[arg(long = "maintenance", global = true)]
    pub maintenance: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// API server port (serve only).
    #[arg(short = 'p', long = "port", global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Answer one question and exit.
    Ask {
        /// The question; words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print the session id, intent and reply as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Interactive chat (the default).
    Chat,
    /// Serve the HTTP API.
    Serve,
}

impl CliArgs {
    /// The subcommand to run; `chat` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > CARWISE_CONFIG env var > platform default (~/.carwise/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("CARWISE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > CARWISE_PORT env var > config file value > 3030.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("CARWISE_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        if config_port != 0 {
            return config_port;
        }
        3030
    }

    /// Fold every command-line override into `config`.
    pub fn apply_overrides(&self, config: &mut CarwiseConfig) {
        if let Some(ref p) = self.vehicles {
            config.data.vehicles_path = p.to_string_lossy().to_string();
        }
        if let Some(ref p) = self.maintenance {
            config.data.maintenance_path = p.to_string_lossy().to_string();
        }
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
        config.server.port = self.resolve_port(config.server.port);
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".carwise").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".carwise").join("config.toml");
    }
    PathBuf::from("config.toml")
}
