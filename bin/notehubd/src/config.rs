//! Server configuration — a TOML file where every field has a default.
//!
//! ```toml
//! [server]
//! listen = "0.0.0.0:3000"
//!
//! [storage]
//! data_dir = "./data"
//!
//! [session]
//! cookie_name = "notehub_session"
//! ttl_secs = 86400
//! ```

use std::path::Path;

use serde::Deserialize;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    /// Listen address for the HTTP server.
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    /// Directory holding the SQLite database and uploaded files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSection {
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in seconds. Zero disables expiry.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_cookie_name() -> String {
    "notehub_session".to_string()
}

fn default_ttl_secs() -> u64 {
    86400 // 24h
}

impl ServerConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
