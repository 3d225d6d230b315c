//! Bounded LRU set of types known to have no converter.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::types::TypeKey;

/// Presence-only LRU keyed by type.
///
/// This cache is:
/// - Thread-safe (own internal lock, independent of the resolution lock)
/// - Strictly bounded; inserting past capacity evicts the least recently used key
pub struct NegativeCache {
    inner: Mutex<LruCache<TypeKey, ()>>,
}

impl NegativeCache {
    /// Create a negative cache holding at most `capacity` keys.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Check for `key`, marking it as recently used when present.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.inner.lock().get(key).is_some()
    }

    /// Check for `key` without touching its recency.
    pub fn peek(&self, key: &TypeKey) -> bool {
        self.inner.lock().contains(key)
    }

    /// Record `key` as a miss.
    ///
    /// Returns the key evicted to make room, if any.
    pub fn insert(&self, key: TypeKey) -> Option<TypeKey> {
        match self.inner.lock().push(key, ()) {
            Some((old, ())) if old != key => Some(old),
            _ => None,
        }
    }

    /// Forget `key`. Returns `true` if it was present.
    pub fn remove(&self, key: &TypeKey) -> bool {
        self.inner.lock().pop(key).is_some()
    }

    /// Remove all entries from the cache.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }
}

impl std::fmt::Debug for NegativeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("NegativeCache")
            .field("len", &inner.len())
            .field("capacity", &inner.cap())
            .finish()
    }
}
