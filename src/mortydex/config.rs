use crate::catalog::graphql::DEFAULT_ENDPOINT;
use crate::error::{DexError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRIES: u32 = 1;

/// Configuration for mortydex, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DexConfig {
    /// GraphQL endpoint of the character catalog
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many times a failed catalog request is re-issued
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Read the catalog from this saved response instead of the network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<PathBuf>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: DEFAULT_RETRIES,
            catalog_file: None,
        }
    }
}

/// The keys `mortydex config` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Endpoint,
    TimeoutSecs,
    Retries,
    CatalogFile,
}

impl ConfigKey {
    pub const ALL: &'static [ConfigKey] = &[
        ConfigKey::Endpoint,
        ConfigKey::TimeoutSecs,
        ConfigKey::Retries,
        ConfigKey::CatalogFile,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "endpoint",
            ConfigKey::TimeoutSecs => "timeout-secs",
            ConfigKey::Retries => "retries",
            ConfigKey::CatalogFile => "catalog-file",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|k| k.name() == name)
            .copied()
            .ok_or_else(|| DexError::Config(format!("Unknown config key: {}", name)))
    }
}

impl DexConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DexError::Io)?;
        let config: DexConfig = serde_json::from_str(&content).map_err(DexError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DexError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DexError::Serialization)?;
        fs::write(config_path, content).map_err(DexError::Io)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::Endpoint => self.endpoint.clone(),
            ConfigKey::TimeoutSecs => self.timeout_secs.to_string(),
            ConfigKey::Retries => self.retries.to_string(),
            ConfigKey::CatalogFile => self
                .catalog_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Set `key` from its textual form. An empty value unsets `catalog-file`;
    /// a relative one is made absolute against the current directory.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            ConfigKey::Endpoint => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(DexError::Config(format!(
                        "endpoint must be an http(s) URL, got '{}'",
                        value
                    )));
                }
                self.endpoint = value.to_string();
            }
            ConfigKey::TimeoutSecs => {
                let secs: u64 = value.parse().map_err(|_| {
                    DexError::Config(format!("timeout-secs must be a number, got '{}'", value))
                })?;
                if secs == 0 {
                    return Err(DexError::Config("timeout-secs must be at least 1".into()));
                }
                self.timeout_secs = secs;
            }
            ConfigKey::Retries => {
                self.retries = value.parse().map_err(|_| {
                    DexError::Config(format!("retries must be a number, got '{}'", value))
                })?;
            }
            ConfigKey::CatalogFile => {
                // Later runs may start anywhere; pin relative paths to the cwd now.
                self.catalog_file = if value.is_empty() {
                    None
                } else {
                    Some(std::path::absolute(value).map_err(DexError::Io)?)
                };
            }
        }
        Ok(())
    }
}
