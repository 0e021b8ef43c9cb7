//! Client configuration.
//!
//! # Environment Variables
//!
//! - `VOLTBAY_API_URL` - Record store base URL (default: http://localhost:3000)

/// Client-side configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the record store, without a trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_owned(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let base_url = std::env::var("VOLTBAY_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_owned());
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(ClientConfig::default().base_url, "http://localhost:3000");
    }
}
