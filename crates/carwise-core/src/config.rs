use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{CarwiseError, Result};

/// Top-level configuration for the Carwise application.
///
/// Loaded from `~/.carwise/config.toml` by default. Every section falls back
/// to its defaults when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarwiseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl CarwiseConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CarwiseConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CarwiseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Locations of the two catalog datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Vehicle specification table.
    pub vehicles_path: String,
    /// Maintenance schedule table.
    pub maintenance_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            vehicles_path: "data/cars.csv".to_string(),
            maintenance_path: "data/maintenance.csv".to_string(),
        }
    }
}

/// Chat behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the chat endpoint answers at all.
    pub enabled: bool,
    /// Longest accepted message, in characters.
    pub max_message_length: usize,
    /// Delay between revealed characters in the interactive chat.
    pub reveal_interval_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_message_length: 2000,
            reveal_interval_ms: 20,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = CarwiseConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.data.vehicles_path, "data/cars.csv");
        assert_eq!(config.data.maintenance_path, "data/maintenance.csv");
        assert!(config.chat.enabled);
        assert_eq!(config.chat.max_message_length, 2000);
        assert_eq!(config.chat.reveal_interval_ms, 20);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3030);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[data]
vehicles_path = "/srv/carwise/cars.csv"
maintenance_path = "/srv/carwise/maintenance.csv"

[chat]
enabled = false
max_message_length = 500
reveal_interval_ms = 5

[server]
host = "0.0.0.0"
port = 8080
"#;
        let file = create_temp_config(content);
        let config = CarwiseConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.data.vehicles_path, "/srv/carwise/cars.csv");
        assert!(!config.chat.enabled);
        assert_eq!(config.chat.max_message_length, 500);
        assert_eq!(config.chat.reveal_interval_ms, 5);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[chat]
reveal_interval_ms = 0
"#;
        let file = create_temp_config(content);
        let config = CarwiseConfig::load(file.path()).unwrap();
        assert_eq!(config.chat.reveal_interval_ms, 0);
        assert_eq!(config.chat.max_message_length, 2000);
        assert_eq!(config.server.port, 3030);
        assert_eq!(config.data.vehicles_path, "data/cars.csv");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = CarwiseConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("[chat\nenabled = ");
        let err = CarwiseConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CarwiseError::Config(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = CarwiseConfig::default();
        config.server.port = 4040;
        config.data.vehicles_path = "fleet.csv".to_string();
        config.save(&path).unwrap();

        let reloaded = CarwiseConfig::load(&path).unwrap();
        assert_eq!(reloaded.server.port, 4040);
        assert_eq!(reloaded.data.vehicles_path, "fleet.csv");
    }
}
