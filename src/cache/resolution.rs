//! Resolution cache - remembers which converter applies to which type.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::{CacheConfig, NegativeCache};
use crate::converter::Converter;
use crate::registry::ConverterRegistry;
use crate::types::TypeKey;

/// Point-in-time counters for a [`ResolutionCache`].
///
/// Counters are cumulative and survive [`ResolutionCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub positive_hits: u64,
    pub negative_hits: u64,
    pub registry_queries: u64,
    pub negative_evictions: u64,
}

#[derive(Default)]
struct Counters {
    positive_hits: AtomicU64,
    negative_hits: AtomicU64,
    registry_queries: AtomicU64,
    negative_evictions: AtomicU64,
}

impl Counters {
    #[inline]
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            positive_hits: self.positive_hits.load(Ordering::Relaxed),
            negative_hits: self.negative_hits.load(Ordering::Relaxed),
            registry_queries: self.registry_queries.load(Ordering::Relaxed),
            negative_evictions: self.negative_evictions.load(Ordering::Relaxed),
        }
    }
}

/// Two-tier memo over a [`ConverterRegistry`].
///
/// Found converters go into an unbounded map and stay there until
/// [`clear`](Self::clear). Types with no converter go into a bounded
/// [`NegativeCache`]; an evicted miss only means the registry is asked again.
///
/// The positive map lock is the single resolution lock: the positive
/// re-check, the registry query and the negative insert all happen under it.
/// The negative cache's own lock is only ever taken after it, so the
/// fast-path miss check never waits on a registry query.
pub struct ResolutionCache {
    registry: Arc<dyn ConverterRegistry>,
    positive: Mutex<HashMap<TypeKey, Arc<dyn Converter>>>,
    negative: NegativeCache,
    counters: Counters,
}

impl ResolutionCache {
    /// Create an empty cache over `registry`.
    pub fn new(registry: Arc<dyn ConverterRegistry>, config: CacheConfig) -> Self {
        debug!(
            "Resolution cache created with negative capacity {}",
            config.negative_capacity
        );
        Self {
            registry,
            positive: Mutex::new(HashMap::new()),
            negative: NegativeCache::new(config.negative_capacity),
            counters: Counters::default(),
        }
    }

    /// Find the converter for `key`, asking the registry at most once per
    /// key until the answer is evicted or the cache is cleared.
    ///
    /// Returns `None` when the registry has no converter for the type.
    pub fn resolve(&self, key: &TypeKey) -> Option<Arc<dyn Converter>> {
        if self.negative.contains(key) {
            Counters::bump(&self.counters.negative_hits);
            trace!("No previously found converter for type: {}", key);
            return None;
        }

        let mut positive = self.positive.lock();

        if let Some(converter) = positive.get(key) {
            Counters::bump(&self.counters.positive_hits);
            return Some(Arc::clone(converter));
        }

        // Another caller may have recorded the miss while we waited.
        if self.negative.contains(key) {
            Counters::bump(&self.counters.negative_hits);
            trace!("No previously found converter for type: {}", key);
            return None;
        }

        Counters::bump(&self.counters.registry_queries);
        match self.registry.find_converter(key) {
            Some(converter) => {
                trace!("Found converter for type: {} -> {}", key, converter.name());
                self.negative.remove(key);
                positive.insert(*key, Arc::clone(&converter));
                Some(converter)
            }
            None => {
                trace!("Cannot find converter for type: {}", key);
                if let Some(evicted) = self.negative.insert(*key) {
                    Counters::bump(&self.counters.negative_evictions);
                    trace!("Evicted negative entry for type: {}", evicted);
                }
                None
            }
        }
    }

    /// Empty both caches. The cache stays usable and refills lazily.
    pub fn clear(&self) {
        let mut positive = self.positive.lock();
        let dropped = positive.len() + self.negative.len();
        positive.clear();
        self.negative.clear();
        debug!("Resolution cache cleared ({} entries dropped)", dropped);
    }

    /// True if `key` is cached with a converter.
    pub fn is_resolvable_cached(&self, key: &TypeKey) -> bool {
        self.positive.lock().contains_key(key)
    }

    /// True if `key` is cached as having no converter.
    pub fn is_known_miss(&self, key: &TypeKey) -> bool {
        self.negative.peek(key)
    }

    pub fn positive_len(&self) -> usize {
        self.positive.lock().len()
    }

    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }

    pub fn negative_capacity(&self) -> usize {
        self.negative.capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("positive_len", &self.positive_len())
            .field("negative", &self.negative)
            .field("stats", &self.stats())
            .finish()
    }
}
