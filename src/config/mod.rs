//! Configuration module for textconv.
//!
//! Loads configuration from environment variables.

use std::env;

use tracing::warn;

use crate::cache::CacheConfig;

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "textconv=info";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first. Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut cache = CacheConfig::default();

        if let Some(raw) = var("TEXTCONV_NEGATIVE_CAPACITY") {
            match raw.trim().parse::<usize>() {
                Ok(capacity) => cache = cache.negative_capacity(capacity),
                Err(e) => warn!(
                    "Ignoring TEXTCONV_NEGATIVE_CAPACITY={:?}: {}, using {}",
                    raw, e, cache.negative_capacity
                ),
            }
        }

        Self { cache }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_reads_capacity() {
        let config = Config::from_vars(|name| {
            (name == "TEXTCONV_NEGATIVE_CAPACITY").then(|| " 250 ".to_string())
        });
        assert_eq!(config.cache.negative_capacity, 250);
    }

    #[test]
    fn test_from_vars_falls_back() {
        let config = Config::from_vars(|_| Some("lots".to_string()));
        assert_eq!(config, Config::default());

        let config = Config::from_vars(|_| None);
        assert_eq!(config, Config::default());
    }
}
