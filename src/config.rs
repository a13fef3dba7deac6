//! Scraper configuration.
//!
//! Settings come from an optional YAML file and are then overridden by any
//! command-line flags or environment variables given in [`Cli`](crate::cli::Cli).
//! Every field has a default, so an empty file (or no file) is valid.
//!
//! ```yaml
//! base_url: https://www.thestar.com.my
//! tag_url: https://www.thestar.com.my/news/latest?tag=
//! workers: 5
//! timeout_secs: 10
//! summary_sentences: 3
//! ```

use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};

/// Runtime settings for discovery, fetching and analysis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site origin; the main listing page and the root for relative links.
    pub base_url: String,
    /// Prefix of tag listing pages; the tag is appended verbatim after encoding.
    pub tag_url: String,
    /// Number of article pages fetched at once.
    pub workers: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Sentences kept by the summarizer.
    pub summary_sentences: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.thestar.com.my".to_string(),
            tag_url: "https://www.thestar.com.my/news/latest?tag=".to_string(),
            workers: 5,
            timeout_secs: 10,
            summary_sentences: 3,
        }
    }
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load from `path` if given, else start from the defaults.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&yaml)?;
        info!(path, "Loaded configuration file");
        Ok(config)
    }

    /// Clamp values that would stall the pipeline.
    pub fn sanitized(mut self) -> Self {
        self.workers = self.workers.max(1);
        self.timeout_secs = self.timeout_secs.max(1);
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(config.workers, 5);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.base_url, "https://www.thestar.com.my");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ScraperConfig::from_yaml("workers: 8\ntimeout_secs: 3\n").unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.tag_url, "https://www.thestar.com.my/news/latest?tag=");
        assert_eq!(config.summary_sentences, 3);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ScraperConfig::from_yaml("").unwrap(), ScraperConfig::default());
    }

    #[test]
    fn test_sanitized() {
        let config = ScraperConfig {
            workers: 0,
            timeout_secs: 0,
            base_url: "https://example.com/".to_string(),
            ..ScraperConfig::default()
        }
        .sanitized();
        assert_eq!(config.workers, 1);
        assert_eq!(config.timeout_secs, 1);
        assert_eq!(config.base_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "summary_sentences: 5\n").unwrap();

        let config = ScraperConfig::load(path.to_str()).await.unwrap();
        assert_eq!(config.summary_sentences, 5);
        assert_eq!(config.workers, 5);
    }
}
