//! Application configuration management.
//!
//! Holds the service base URL, the detail lookup URL, the optional request
//! timeout and which token store to use.
//!
//! Configuration is stored at `~/.config/barcart/config.json`. Missing
//! fields fall back to their defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{FileTokenStore, KeyringTokenStore, TokenProvider};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "barcart";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// TheCocktailDB public API (free test key "1").
pub const DEFAULT_DETAIL_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub detail_base_url: String,
    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,
    pub token_store: TokenStoreKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            detail_base_url: DEFAULT_DETAIL_BASE_URL.to_string(),
            request_timeout_secs: None,
            token_store: TokenStoreKind::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Build the token store this config selects.
    pub fn token_provider(&self) -> Result<Arc<dyn TokenProvider>> {
        let provider: Arc<dyn TokenProvider> = match self.token_store {
            TokenStoreKind::File => Arc::new(FileTokenStore::open(&self.cache_dir()?)?),
            TokenStoreKind::Keyring => Arc::new(KeyringTokenStore::new()?),
        };
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.token_store, TokenStoreKind::File);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{"base_url": "https://bar.example.com", "token_store": "keyring"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://bar.example.com");
        assert_eq!(config.detail_base_url, DEFAULT_DETAIL_BASE_URL);
        assert_eq!(config.token_store, TokenStoreKind::Keyring);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            request_timeout_secs: Some(10),
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
