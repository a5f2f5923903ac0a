use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "TODO_CONFIG";

/// Centralized configuration for the todo server and client.
///
/// Every field has a default, so a missing file or a partial file both
/// load cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub client: ClientSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3100)),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    /// Attempts made to open the pool before giving up at startup
    pub connect_attempts: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://todo.db".to_string(),
            max_connections: 5,
            connect_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub api_url: String,
    pub ui_state_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:3100".to_string(),
            ui_state_path: None,
        }
    }
}

impl TodoConfig {
    /// Load config from `$TODO_CONFIG` or ~/.todo/config.toml, then apply
    /// environment overrides (`DATABASE_URL`, `TODO_BIND`, `TODO_API_URL`).
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CoreError::config_parse(path, e))
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::home_dir().join("config.toml"))
    }

    /// Where the client keeps its collapsed-group state
    pub fn ui_state_path(&self) -> PathBuf {
        self.client
            .ui_state_path
            .clone()
            .unwrap_or_else(|| Self::home_dir().join("ui-state.json"))
    }

    fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".todo")
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`TodoConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }

        if let Some(bind) = lookup("TODO_BIND") {
            self.server.bind = bind
                .parse()
                .map_err(|_| CoreError::config(format!("TODO_BIND '{}' is not a socket address", bind)))?;
        }

        if let Some(api_url) = lookup("TODO_API_URL") {
            self.client.api_url = api_url;
        }

        Ok(())
    }
}
