/*
[INPUT]:  YAML configuration file
[OUTPUT]: API endpoint, timeouts, session location and logging options
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tnt_roster_adapter::{ClientConfig, DEFAULT_BASE_URL, RosterClient};

use crate::session::SessionStore;

/// Top-level configuration for the roster client
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RosterConfig {
    /// Roster server settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where the token and user are remembered; platform config dir when unset
    #[serde(default)]
    pub session_path: Option<PathBuf>,
    /// Token to start with when no session is saved
    #[serde(default)]
    pub token: Option<String>,
    /// Also write logs to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Roster server connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl RosterConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse config yaml")?;
        Ok(config)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    pub fn build_client(&self) -> anyhow::Result<RosterClient> {
        RosterClient::with_config(self.client_config(), &self.api.base_url)
            .with_context(|| format!("create roster client for {}", self.api.base_url))
    }

    /// Configured session file, falling back to the platform default
    pub fn session_store(&self) -> Option<SessionStore> {
        self.session_path
            .clone()
            .or_else(SessionStore::default_path)
            .map(SessionStore::new)
    }
}
