//! Ancillary configuration used when building movies from catalogue data.

use config_and_utils::{Config, DEFAULT_BACKDROP_SIZE, DEFAULT_IMAGE_BASE_URL, DEFAULT_POSTER_SIZE};
use serde::{Deserialize, Serialize};

/// Image URL assembly settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub image_base_url: String,
    pub poster_size: String,
    pub backdrop_size: String,
}

impl Configuration {
    pub fn from_config(config: &Config) -> Self {
        Self {
            image_base_url: config.image_base_url.clone(),
            poster_size: config.poster_size.clone(),
            backdrop_size: config.backdrop_size.clone(),
        }
    }

    pub fn poster_url(&self, path: &str) -> Option<String> {
        self.image_url(&self.poster_size, path)
    }

    pub fn backdrop_url(&self, path: &str) -> Option<String> {
        self.image_url(&self.backdrop_size, path)
    }

    /// `{base}/{size}/{path}`, or `None` for a blank path.
    fn image_url(&self, size: &str, path: &str) -> Option<String> {
        let path = path.trim().trim_start_matches('/');
        if path.is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}/{}",
            self.image_base_url.trim_end_matches('/'),
            size.trim_matches('/'),
            path
        ))
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            poster_size: DEFAULT_POSTER_SIZE.to_string(),
            backdrop_size: DEFAULT_BACKDROP_SIZE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_poster_and_backdrop_urls() {
        let configuration = Configuration::default();
        assert_eq!(
            configuration.poster_url("/alien.jpg").as_deref(),
            Some("https://image.tmdb.org/t/p/w342/alien.jpg")
        );
        assert_eq!(
            configuration.backdrop_url("alien.jpg").as_deref(),
            Some("https://image.tmdb.org/t/p/w780/alien.jpg")
        );
    }

    #[test]
    fn blank_path_has_no_url() {
        assert_eq!(Configuration::default().poster_url("  "), None);
        assert_eq!(Configuration::default().poster_url("/"), None);
    }

    #[test]
    fn follows_config_values() {
        let mut config = Config::new();
        config.image_base_url = "http://images.local/".to_string();
        config.poster_size = "original".to_string();

        let configuration = Configuration::from_config(&config);
        assert_eq!(
            configuration.poster_url("/x.png").as_deref(),
            Some("http://images.local/original/x.png")
        );
    }
}
