//! Configuration for the Vortex client

use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::{Result, VortexError};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.vortexsoftware.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the Vortex API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without a trailing slash
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load a YAML config file. Missing keys take their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(contents)?;
        let mut config = match file.base_url {
            Some(url) => Self::new(url),
            None => Self::default(),
        };
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(VortexError::InvalidConfig("base_url is empty".to_string()));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| VortexError::InvalidConfig(format!("base_url: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(VortexError::InvalidConfig(format!(
                "base_url cannot be a base: {}",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(VortexError::InvalidConfig("timeout must be > 0".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}
