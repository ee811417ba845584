//! Configuration for the calorie client.

use std::path::PathBuf;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure for the calorie client.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote calorie service connection.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Ceiling for every outbound request; exceeding it is a network error.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding the persisted slots.
    /// Defaults to `<data dir>/calorie-tracker`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolve_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const APP_DIR_NAME: &str = "calorie-tracker";

// Default values
fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (CALORIE__SECTION__KEY format)
    /// 2. calorie.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("api.base_url", default_base_url())?
            .set_default("api.timeout_secs", default_timeout() as i64)?
            .set_default("logging.level", default_log_level())?
            .add_source(File::with_name("calorie").required(false))
            .add_source(
                Environment::with_prefix("CALORIE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_config() {
        let api = ApiConfig::default();
        assert_eq!(api.base_url, "http://localhost:5000");
        assert_eq!(api.timeout_secs, 10);
    }

    #[test]
    fn test_explicit_storage_dir_wins() {
        let storage = StorageConfig {
            dir: Some(PathBuf::from("/tmp/calorie-test")),
        };
        assert_eq!(storage.resolve_dir(), PathBuf::from("/tmp/calorie-test"));
    }

    #[test]
    fn test_default_storage_dir_is_namespaced() {
        let dir = StorageConfig::default().resolve_dir();
        assert!(dir.ends_with("calorie-tracker"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = ConfigLoader::builder()
            .add_source(config::File::from_str(
                "[api]\nbase_url = \"https://calories.example.com\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api.base_url, "https://calories.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.logging.level, "warn");
        assert!(config.storage.dir.is_none());
    }
}
