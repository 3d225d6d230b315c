//! Cache module - memoized converter resolution.
//!
//! ## Architecture
//!
//! - `ResolutionCache` - single entry point, `resolve(&TypeKey)`
//! - positive map - unbounded, type -> converter, never evicted
//! - `NegativeCache` - bounded LRU of types with no converter
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use textconv::cache::{CacheConfig, ResolutionCache};
//! use textconv::{ConverterTable, TypeKey};
//!
//! let cache = ResolutionCache::new(
//!     Arc::new(ConverterTable::with_builtins()),
//!     CacheConfig::default(),
//! );
//! assert!(cache.resolve(&TypeKey::of::<i32>()).is_some());
//! ```

mod config;
mod negative;
mod resolution;

pub use config::{CacheConfig, DEFAULT_NEGATIVE_CAPACITY};
pub use negative::NegativeCache;
pub use resolution::{CacheStats, ResolutionCache};
