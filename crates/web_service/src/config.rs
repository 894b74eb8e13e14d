//! Configuration for the web service
//!
//! Loaded from environment variables with fallback to defaults.

use std::path::PathBuf;

/// Runtime configuration.
///
/// Environment variables:
/// - `APP_PORT`: listen port (default: 3000)
/// - `FORKCHAT_DATA_DIR`: storage base directory (default: `~/.forkchat`)
/// - `CLIENT_URL`: allowed CORS origin; permissive when unset
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub client_url: Option<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            data_dir: std::env::var("FORKCHAT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_data_dir()),
            client_url: std::env::var("CLIENT_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".forkchat"))
        .unwrap_or_else(|| PathBuf::from(".forkchat"))
}
