//! Client configuration, loaded from RON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::service::DEFAULT_ENDPOINT;
use crate::schema::style::StylePreset;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Full URL of the story generation endpoint.
    pub endpoint: String,
    pub style: StylePreset,
    /// `None` waits on the transport's own behaviour.
    pub timeout_secs: Option<u64>,
    /// File whose contents replace the default snippet at startup.
    pub snippet_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            style: StylePreset::default(),
            timeout_secs: None,
            snippet_path: None,
        }
    }
}

impl ClientConfig {
    pub fn parse_ron(source: &str) -> Result<ClientConfig, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load_from_ron(path: &Path) -> Result<ClientConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse_ron(&contents)?;
        tracing::debug!(path = %path.display(), endpoint = %config.endpoint, "Loaded client config");
        Ok(config)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Read the configured snippet file, if any.
    pub fn load_snippet(&self) -> Result<Option<String>, ConfigError> {
        match &self.snippet_path {
            Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }
}
