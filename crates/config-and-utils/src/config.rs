//! Configuration management for movies-sync.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default movie catalogue API URL.
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Default catalogue API key (can be provided at compile time via MOVIES_SYNC_API_KEY).
pub const DEFAULT_API_KEY: Option<&str> = option_env!("MOVIES_SYNC_API_KEY");

/// Default base URL used to assemble poster and backdrop URLs.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Default poster size segment.
pub const DEFAULT_POSTER_SIZE: &str = "w342";

/// Default backdrop size segment.
pub const DEFAULT_BACKDROP_SIZE: &str = "w780";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const ENV_LOG_LEVEL: &str = "MOVIES_SYNC_LOG_LEVEL";
const ENV_API_KEY: &str = "MOVIES_SYNC_API_KEY";

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Movie catalogue API URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Movie catalogue API key.
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,
    /// Response language sent with every catalogue request.
    #[serde(default = "default_language")]
    pub language: String,
    /// Base URL for poster/backdrop images.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Poster size path segment (e.g. `w342`).
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
    /// Backdrop size path segment (e.g. `w780`).
    #[serde(default = "default_backdrop_size")]
    pub backdrop_size: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_api_key() -> Option<String> {
    DEFAULT_API_KEY.map(|s| s.to_string())
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_poster_size() -> String {
    DEFAULT_POSTER_SIZE.to_string()
}

fn default_backdrop_size() -> String {
    DEFAULT_BACKDROP_SIZE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api_url: default_api_url(),
            api_key: default_api_key(),
            language: default_language(),
            image_base_url: default_image_base_url(),
            poster_size: default_poster_size(),
            backdrop_size: default_backdrop_size(),
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the config file, falling back to defaults.
    ///
    /// Environment variables override values from the file.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup (the process environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(log_level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            self.log_level = log_level;
        }
        if let Some(api_key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(api_key);
        }
    }

    /// Get the catalogue API URL as a parsed URL.
    pub fn api_url(&self) -> CoreResult<Url> {
        Url::parse(&self.api_url).map_err(CoreError::from)
    }

    /// Get the API key, failing when none is configured.
    pub fn require_api_key(&self) -> CoreResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "no API key configured (set {} or add \"api_key\" to the config file)",
                    ENV_API_KEY
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poster_size, DEFAULT_POSTER_SIZE);
        assert_eq!(config.backdrop_size, DEFAULT_BACKDROP_SIZE);
        assert_eq!(config.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_config_load_from_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        let config_json = r#"{
            "log_level": "debug",
            "api_key": "secret"
        }"#;
        std::fs::write(&config_path, config_json).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }

    #[test]
    fn test_config_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let mut config = Config::default();
        config.poster_size = "w500".to_string();
        config.language = "es-ES".to_string();
        config.save(&paths).unwrap();

        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded.poster_size, "w500");
        assert_eq!(loaded.language, "es-ES");
    }

    #[test]
    fn test_config_load_nonexistent_uses_defaults() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_config_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, "{ not json").unwrap();

        let result = Config::load_from_file(&config_path);
        assert!(matches!(result, Err(CoreError::Json(_))));
    }

    #[test]
    fn test_overrides_apply_non_empty_values() {
        let env: HashMap<&str, &str> = [(ENV_LOG_LEVEL, "trace"), (ENV_API_KEY, "from-env")]
            .into_iter()
            .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.log_level, "trace");
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let mut config = Config::default();
        config.api_key = Some("kept".to_string());
        config.apply_overrides(|_| Some("  ".to_string()));

        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.api_key.as_deref(), Some("kept"));
    }

    #[test]
    fn test_config_api_url_parse() {
        let config = Config::default();
        let url = config.api_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("api.themoviedb.org"));
    }

    #[test]
    fn test_config_invalid_url() {
        let mut config = Config::default();
        config.api_url = "not a valid url".to_string();

        assert!(config.api_url().is_err());
    }

    #[test]
    fn test_require_api_key() {
        let mut config = Config::default();
        config.api_key = None;
        assert!(matches!(config.require_api_key(), Err(CoreError::Config(_))));

        config.api_key = Some(String::new());
        assert!(config.require_api_key().is_err());

        config.api_key = Some("abc".to_string());
        assert_eq!(config.require_api_key().unwrap(), "abc");
    }
}
