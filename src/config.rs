//! Configuration handling for the registration client

use crate::backend::{MockDelay, ENDPOINT_ENV};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_FILE_NAME: &str = "member-form.log";

/// User configuration, read from `config.json` in the platform config dir
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// External registration URL; the embedded mock server is used when unset
    pub endpoint: Option<String>,
    /// Lower bound of the mock server's processing delay
    pub mock_delay_min_ms: Option<u64>,
    /// Upper bound of the mock server's processing delay
    pub mock_delay_max_ms: Option<u64>,
    /// Log destination
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "member-form", "member-form")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, or defaults if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Endpoint to post to, with `MEMBER_FORM_ENDPOINT` taking precedence
    pub fn resolved_endpoint(&self) -> Option<String> {
        self.endpoint_with_override(std::env::var(ENDPOINT_ENV).ok())
    }

    fn endpoint_with_override(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .or_else(|| self.endpoint.clone())
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
    }

    pub fn mock_delay(&self) -> MockDelay {
        let defaults = MockDelay::default().bounds();
        MockDelay::new(
            self.mock_delay_min_ms.unwrap_or(defaults.0),
            self.mock_delay_max_ms.unwrap_or(defaults.1),
        )
    }

    /// Log file location; `None` means log to stderr
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE_NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("member-form-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.endpoint.is_none());
        assert!(config.mock_delay_min_ms.is_none());
        assert!(config.mock_delay_max_ms.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig {
            endpoint: Some("http://localhost:3000/api/register".to_string()),
            mock_delay_min_ms: Some(100),
            mock_delay_max_ms: Some(200),
            log_file: Some(PathBuf::from("/tmp/member-form.log")),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.endpoint, config.endpoint);
        assert_eq!(parsed.mock_delay_min_ms, Some(100));
        assert_eq!(parsed.mock_delay_max_ms, Some(200));
        assert_eq!(parsed.log_file, config.log_file);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.endpoint.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Unknown fields are ignored
        let json = r#"{"endpoint": "http://x/api/register", "theme": "dark"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.endpoint.as_deref(), Some("http://x/api/register"));
    }

    #[test]
    fn test_load_from_file() {
        let path = scratch_file(r#"{"mock_delay_min_ms": 10, "mock_delay_max_ms": 20}"#);
        let config = AppConfig::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.mock_delay().bounds(), (10, 20));
    }

    #[test]
    fn test_load_from_invalid_file_names_path() {
        let path = scratch_file("not json");
        let err = AppConfig::load_from(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(format!("{err:#}").contains("parsing config"));
    }

    #[test]
    fn test_load_returns_ok() {
        assert!(AppConfig::load().is_ok());
    }

    #[test]
    fn test_env_override_wins() {
        let config = AppConfig {
            endpoint: Some("http://configured/api/register".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint_with_override(Some("http://env/api/register".to_string())),
            Some("http://env/api/register".to_string())
        );
        assert_eq!(
            config.endpoint_with_override(None),
            Some("http://configured/api/register".to_string())
        );
    }

    #[test]
    fn test_blank_endpoint_means_mock() {
        let config = AppConfig {
            endpoint: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint_with_override(None), None);
    }

    #[test]
    fn test_mock_delay_defaults() {
        assert_eq!(AppConfig::default().mock_delay().bounds(), (500, 2500));

        let config = AppConfig {
            mock_delay_max_ms: Some(50),
            ..Default::default()
        };
        // A max below the default min is reordered
        assert_eq!(config.mock_delay().bounds(), (50, 500));
    }

    #[test]
    fn test_log_path_override() {
        let config = AppConfig {
            log_file: Some(PathBuf::from("/tmp/custom.log")),
            ..Default::default()
        };
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/custom.log")));
    }
}
