//! Application configuration. Storage paths, page size, clock pinning.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Posts shown on the main feed.
pub const POSTS_PER_PAGE: usize = 5;

/// Default directory holding `blog.db`.
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory for the SQLite database. Read from BLOGICUM_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Feed size. Read from BLOGICUM_PAGE_SIZE.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// JSON fixtures loaded at startup. Read from BLOGICUM_FIXTURES_PATH.
    #[serde(default)]
    pub fixtures_path: Option<String>,

    /// RFC 3339 instant the clock is pinned to. Read from BLOGICUM_NOW.
    #[serde(default)]
    pub now: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("BLOGICUM_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the file.
        c = c.add_source(config::Environment::with_prefix("BLOGICUM").try_parsing(true));
        c.build()?.try_deserialize()
    }

    pub fn data_dir_or_default(&self) -> String {
        self.data_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
    }

    /// Returns the feed size. Defaults to POSTS_PER_PAGE if unset or zero.
    pub fn page_size_or_default(&self) -> usize {
        match self.page_size {
            Some(n) if n > 0 => n,
            _ => POSTS_PER_PAGE,
        }
    }

    /// Parsed `now`, if the clock should be pinned.
    pub fn fixed_now(&self) -> Result<Option<DateTime<Utc>>, config::ConfigError> {
        self.now
            .as_deref()
            .map(|s| {
                DateTime::parse_from_rfc3339(s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| config::ConfigError::Message(format!("BLOGICUM_NOW: {}", e)))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.page_size_or_default(), POSTS_PER_PAGE);
        assert_eq!(cfg.data_dir_or_default(), DEFAULT_DATA_DIR);
        assert!(cfg.fixed_now().unwrap().is_none());
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let cfg = AppConfig {
            page_size: Some(0),
            ..AppConfig::default()
        };
        assert_eq!(cfg.page_size_or_default(), POSTS_PER_PAGE);

        let cfg = AppConfig {
            page_size: Some(10),
            ..AppConfig::default()
        };
        assert_eq!(cfg.page_size_or_default(), 10);
    }

    #[test]
    fn test_fixed_now_parsing() {
        let cfg = AppConfig {
            now: Some("2024-03-08T12:00:00+03:00".to_string()),
            ..AppConfig::default()
        };
        let now = cfg.fixed_now().unwrap().unwrap();
        assert_eq!(now.to_rfc3339(), "2024-03-08T09:00:00+00:00");

        let bad = AppConfig {
            now: Some("yesterday".to_string()),
            ..AppConfig::default()
        };
        assert!(bad.fixed_now().is_err());
    }
}
