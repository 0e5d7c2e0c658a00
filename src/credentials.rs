use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::EtlError;

/// Credentials file structure
///
/// Format:
/// ```toml
/// [spotify.profile_name]
/// token = "your_spotify_access_token_here"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Credentials {
    #[serde(default)]
    pub spotify: HashMap<String, CredentialProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredentialProfile {
    pub token: String,
}

/// Get the default credentials file path: ~/.config/spotify_etl/credentials.toml
pub fn get_credentials_path() -> Result<PathBuf, EtlError> {
    let home = std::env::var("HOME")
        .map_err(|_| EtlError::Config("HOME environment variable not set".to_string()))?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("spotify_etl")
        .join("credentials.toml"))
}

/// Load credentials from the default location
/// Returns None if the file doesn't exist
pub fn load_credentials() -> Result<Option<Credentials>, EtlError> {
    let creds_path = get_credentials_path()?;

    if !creds_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&creds_path)?;
    let credentials: Credentials = toml::from_str(&content)?;

    Ok(Some(credentials))
}

/// Get the bearer token for a named profile
pub fn get_token(credentials: &Option<Credentials>, profile: &str) -> Result<String, EtlError> {
    match credentials {
        Some(creds) => creds
            .spotify
            .get(profile)
            .map(|p| p.token.clone())
            .ok_or_else(|| {
                EtlError::Config(format!(
                    "Credential profile '[spotify.{}]' not found in credentials file",
                    profile
                ))
            }),
        None => Err(EtlError::Config(format!(
            "Credentials file not found. Expected at: {}",
            get_credentials_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "~/.config/spotify_etl/credentials.toml".to_string())
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_token_from_profile() {
        let creds: Credentials = toml::from_str(
            r#"
            [spotify.personal]
            token = "abc123"
            "#,
        )
        .unwrap();
        let token = get_token(&Some(creds), "personal").unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn test_get_token_missing_profile() {
        let creds = Credentials::default();
        let err = get_token(&Some(creds), "work").unwrap_err();
        assert!(err.to_string().contains("[spotify.work]"));
    }

    #[test]
    fn test_get_token_without_credentials_file() {
        assert!(get_token(&None, "personal").is_err());
    }
}
