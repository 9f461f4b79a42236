use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the Carwise system.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for CarwiseError` where they need `?` to cross
/// crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CarwiseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dataset error: {0}")]
    Load(#[from] LoadError),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for CarwiseError {
    fn from(err: toml::de::Error) -> Self {
        CarwiseError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CarwiseError {
    fn from(err: toml::ser::Error) -> Self {
        CarwiseError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CarwiseError {
    fn from(err: serde_json::Error) -> Self {
        CarwiseError::Serialization(err.to_string())
    }
}

/// Failure to read one of the two catalog datasets.
///
/// Always fatal at startup: there is no partial catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read {source_name}: {source}")]
    Read {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name} is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        source_name: String,
        columns: Vec<String>,
    },

    #[error("{source_name} has a malformed row{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Malformed {
        source_name: String,
        line: Option<u64>,
        message: String,
    },
}

/// A specialized `Result` type for Carwise operations.
pub type Result<T> = std::result::Result<T, CarwiseError>;
