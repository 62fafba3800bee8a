//! # Configuration
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Hanghae Shop"
//! currency_suffix = "원"
//! seed_demo_catalog = true
//!
//! [storage]
//! backend = "file"          # file | memory
//! data_dir = "/var/lib/storefront"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed.

use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::Money;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid storefront configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Storage Backend
// =============================================================================

/// Where the cart and catalog are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON files under `data_dir`.
    #[default]
    File,
    /// Process memory only; nothing survives a restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid(format!(
                "unknown storage backend '{}', expected file or memory",
                other
            ))),
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Store name shown in the header and on order confirmations.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Appended to formatted amounts ("10,000원").
    #[serde(default = "default_currency_suffix")]
    pub currency_suffix: String,

    /// Load the demo catalog when storage holds no products yet.
    #[serde(default = "default_true")]
    pub seed_demo_catalog: bool,

    #[serde(default)]
    pub storage: StorageSettings,
}

fn default_store_name() -> String {
    "Storefront".to_string()
}

fn default_currency_suffix() -> String {
    "원".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            store_name: default_store_name(),
            currency_suffix: default_currency_suffix(),
            seed_demo_catalog: true,
            storage: StorageSettings::default(),
        }
    }
}

impl StorefrontConfig {
    /// Configuration for tests and throwaway sessions: memory storage,
    /// demo catalog.
    pub fn in_memory() -> Self {
        StorefrontConfig {
            storage: StorageSettings {
                backend: StorageBackend::Memory,
                data_dir: None,
            },
            ..Self::default()
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }
        if self.storage.backend == StorageBackend::File && self.data_dir().is_none() {
            return Err(ConfigError::Invalid(
                "file storage needs a data_dir and no platform data directory was found".into(),
            ));
        }
        Ok(())
    }

    /// Effective data directory for the file backend.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    /// Formats an amount for display ("102,000원").
    pub fn format_money(&self, amount: Money) -> String {
        format!("{}{}", amount, self.currency_suffix)
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "storefront", "storefront")
    }

    /// Default config file location.
    ///
    /// ## Platform-Specific Paths
    /// - **Linux**: `~/.config/storefront/storefront.toml`
    /// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.toml`
    /// - **Windows**: `%APPDATA%\storefront\storefront\config\storefront.toml`
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(name) = std::env::var("STOREFRONT_STORE_NAME") {
            self.store_name = name;
        }

        if let Ok(backend) = std::env::var("STOREFRONT_STORAGE") {
            debug!(backend = %backend, "Overriding storage backend from environment");
            self.storage.backend = backend.parse()?;
        }

        if let Ok(dir) = std::env::var("STOREFRONT_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(seed) = std::env::var("STOREFRONT_SEED_DEMO") {
            self.seed_demo_catalog = matches!(seed.as_str(), "1" | "true" | "yes");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.seed_demo_catalog);
    }

    #[test]
    fn test_parse_toml() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            store_name = "Hanghae Shop"

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.store_name, "Hanghae Shop");
        assert_eq!(config.currency_suffix, "원");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("FILE".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let config = StorefrontConfig {
            store_name: " ".to_string(),
            ..StorefrontConfig::in_memory()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_format_money() {
        let config = StorefrontConfig::in_memory();
        assert_eq!(config.format_money(Money::from_units(102_000)), "102,000원");
    }
}
