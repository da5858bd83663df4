use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fintrack configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FintrackConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Backend server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Override path for the persisted credential cookie
    #[serde(default)]
    pub credential_file: Option<PathBuf>,
}

/// Backend server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the finance backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_timeout() -> u64 {
    30_000
}

impl Default for FintrackConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            credential_file: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout(),
        }
    }
}

impl ServerConfig {
    /// Validate the server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("server.base_url must not be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "server.base_url must be an http(s) URL, got '{}'",
                self.base_url
            ));
        }
        if self.timeout_ms == 0 {
            return Err("server.timeout_ms must be greater than zero".to_string());
        }
        Ok(())
    }
}
