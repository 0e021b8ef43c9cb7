//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VOLTBAY_HOST` - Bind address (default: 127.0.0.1)
//! - `VOLTBAY_PORT` - Listen port (default: 3000)
//! - `VOLTBAY_DB_PATH` - Database file (default: db.json)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Record-store server configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path to the JSON database file
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            db_path: PathBuf::from("db.json"),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("VOLTBAY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOLTBAY_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("VOLTBAY_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOLTBAY_PORT".to_owned(), e.to_string()))?;
        let db_path = PathBuf::from(get_env_or_default("VOLTBAY_DB_PATH", "db.json"));

        Ok(Self {
            host,
            port,
            db_path,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_addr() {
        let config = StoreConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_default_db_path() {
        assert_eq!(StoreConfig::default().db_path, PathBuf::from("db.json"));
    }
}
