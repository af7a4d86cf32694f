//! Portal configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Portal configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the SehatSathi backend API
    pub api_base_url: String,
    /// Path of the persisted session file
    pub session_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a local-development default, so a plain `from_env()`
    /// works against a backend on localhost with no `.env` file present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("SEHATSATHI_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        // Reject unparseable URLs up front rather than on the first request
        reqwest::Url::parse(&api_base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(api_base_url.clone()))?;

        let session_file = env::var("SEHATSATHI_SESSION_FILE")
            .unwrap_or_else(|_| "sehatsathi_session.json".to_string());

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            session_file: PathBuf::from(session_file),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SEHATSATHI_API_URL: {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: env vars are process-global and tests run in parallel.
    #[test]
    fn test_config_from_env() {
        env::set_var("SEHATSATHI_API_URL", "http://127.0.0.1:9000/");
        env::set_var("SEHATSATHI_SESSION_FILE", "/tmp/test_session.json");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.session_file, PathBuf::from("/tmp/test_session.json"));

        env::set_var("SEHATSATHI_API_URL", "not a url");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));

        env::remove_var("SEHATSATHI_API_URL");
        env::remove_var("SEHATSATHI_SESSION_FILE");
    }
}
