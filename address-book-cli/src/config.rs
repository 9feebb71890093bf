use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[roles]
# Offer only origin and destination when editing address types
no_role = false
# Use the reduced origin/destination role model
better_roles = false

[logging]
# Overridden by RUST_LOG when set
level = "info"
"#;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct CliConfig {
    pub roles: Option<RolesConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy)]
pub struct RolesConfig {
    #[serde(default)]
    pub no_role: bool,
    #[serde(default)]
    pub better_roles: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads the config file, creating it with defaults on first run.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: CliConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn roles(&self) -> RolesConfig {
        self.roles.unwrap_or_default()
    }

    pub fn log_level(&self) -> String {
        self.logging.clone().unwrap_or_default().level
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("address-book").join("address-book.toml")
    } else {
        PathBuf::from("address-book.toml")
    }
}
