//! Cache configuration.

use serde::Deserialize;

/// Default bound on remembered misses.
pub const DEFAULT_NEGATIVE_CAPACITY: usize = 1000;

fn default_negative_capacity() -> usize {
    DEFAULT_NEGATIVE_CAPACITY
}

/// Configuration for a [`ResolutionCache`](super::ResolutionCache).
///
/// Only the negative cache is bounded. Found converters are kept for the
/// life of the cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of types remembered as having no converter.
    /// Least recently used entries are evicted past this bound.
    #[serde(default = "default_negative_capacity")]
    pub negative_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            negative_capacity: DEFAULT_NEGATIVE_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a cache config with the given negative cache bound.
    pub fn with_negative_capacity(negative_capacity: usize) -> Self {
        Self { negative_capacity }
    }

    /// Set the negative cache bound (builder pattern).
    #[must_use]
    pub fn negative_capacity(mut self, negative_capacity: usize) -> Self {
        self.negative_capacity = negative_capacity;
        self
    }
}
