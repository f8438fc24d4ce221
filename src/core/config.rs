use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::providers::coinbase::DEFAULT_BASE_URL;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CoinbaseProviderConfig {
    pub base_url: String,
}

impl Default for CoinbaseProviderConfig {
    fn default() -> Self {
        CoinbaseProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub coinbase: CoinbaseProviderConfig,
}

/// Defaults for the CLI. Ratios are kept as strings so the entered precision
/// reaches the ratio validation untouched.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_btc_ratio")]
    pub btc_ratio: String,
    #[serde(default = "default_eth_ratio")]
    pub eth_ratio: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_btc_ratio() -> String {
    "0.7".to_string()
}

fn default_eth_ratio() -> String {
    "0.3".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            currency: default_currency(),
            btc_ratio: default_btc_ratio(),
            eth_ratio: default_eth_ratio(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults when
    /// no config file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "cryptosplit")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
