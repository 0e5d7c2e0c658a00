use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_DB_PATH, ENV_TOKEN, ENV_USERNAME,
};
use crate::credentials;
use crate::error::EtlError;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Pipeline configuration file structure
///
/// ```toml
/// token = "..."              # or credential_profile = "personal"
/// username = "my_account"
/// db_path = "played_tracks.sqlite"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EtlConfig {
    /// Bearer token for the Web API
    #[serde(default)]
    pub token: Option<String>,
    /// Credential profile name to look up the token from ~/.config/spotify_etl/credentials.toml
    pub credential_profile: Option<String>,
    /// Account identifier (informational only)
    #[serde(default)]
    pub username: Option<String>,
    /// Path of the SQLite database file
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// Base URL of the Web API (default: https://api.spotify.com/v1)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            token: None,
            credential_profile: None,
            username: None,
            db_path: None,
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl EtlConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, EtlError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file, apply environment overrides and validate it
    pub fn load(path: Option<&Path>) -> Result<Self, EtlError> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    EtlError::Config(format!(
                        "Failed to read config file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.resolve_token()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields with values looked up by environment variable name
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(db_path) = lookup(ENV_DB_PATH) {
            self.db_path = Some(PathBuf::from(db_path));
        }
    }

    /// Fill in the token from the credentials file when only a profile is given
    fn resolve_token(&mut self) -> Result<(), EtlError> {
        if self.token.is_some() {
            return Ok(());
        }
        if let Some(profile) = &self.credential_profile {
            let creds = credentials::load_credentials()?;
            self.token = Some(credentials::get_token(&creds, profile)?);
        }
        Ok(())
    }

    /// Ensure the token and database path are present
    pub fn validate(&self) -> Result<(), EtlError> {
        match &self.token {
            Some(token) if !token.trim().is_empty() => {}
            _ => {
                return Err(EtlError::Config(format!(
                    "token is missing: set it in the config file, via credential_profile or {}",
                    ENV_TOKEN
                )))
            }
        }
        match &self.db_path {
            Some(path) if !path.as_os_str().is_empty() => {}
            _ => {
                return Err(EtlError::Config(format!(
                    "db_path is missing: set it in the config file or via {}",
                    ENV_DB_PATH
                )))
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(EtlError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Token after validation (empty string if absent)
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }

    /// Database path after validation (empty path if absent)
    pub fn db_path(&self) -> &Path {
        self.db_path.as_deref().unwrap_or(Path::new(""))
    }
}
