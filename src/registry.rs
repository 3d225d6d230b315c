//! Converter registry - the source of truth for type to converter mappings.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::converter::{Converter, FromStrConverter};
use crate::types::{TypeKey, Value};

/// Looks up the converter for a type.
///
/// Lookups may be slow; callers go through
/// [`ResolutionCache`](crate::cache::ResolutionCache) instead of hitting the
/// registry directly. Answers must be stable for a given key while a cache
/// holds on to them.
pub trait ConverterRegistry: Send + Sync {
    fn find_converter(&self, key: &TypeKey) -> Option<Arc<dyn Converter>>;
}

impl<R: ConverterRegistry + ?Sized> ConverterRegistry for Arc<R> {
    fn find_converter(&self, key: &TypeKey) -> Option<Arc<dyn Converter>> {
        (**self).find_converter(key)
    }
}

/// In-memory registry keyed by type.
///
/// Register everything up front; the resolution cache remembers misses, so a
/// converter registered after a type was probed stays invisible until the
/// cache is cleared.
///
/// ## Example
///
/// ```rust
/// use textconv::ConverterTable;
///
/// let table = ConverterTable::with_builtins();
/// table.register_from_str::<std::net::IpAddr>();
/// ```
#[derive(Default)]
pub struct ConverterTable {
    converters: DashMap<TypeKey, Arc<dyn Converter>>,
}

impl ConverterTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with converters for the primitive types.
    pub fn with_builtins() -> Self {
        let table = Self::new();
        table.register_from_str::<i8>();
        table.register_from_str::<i16>();
        table.register_from_str::<i32>();
        table.register_from_str::<i64>();
        table.register_from_str::<i128>();
        table.register_from_str::<isize>();
        table.register_from_str::<u8>();
        table.register_from_str::<u16>();
        table.register_from_str::<u32>();
        table.register_from_str::<u64>();
        table.register_from_str::<u128>();
        table.register_from_str::<usize>();
        table.register_from_str::<f32>();
        table.register_from_str::<f64>();
        table.register_from_str::<bool>();
        table.register_from_str::<char>();
        debug!("Registered {} builtin converters", table.len());
        table
    }

    /// Register `converter` for `T`, returning the converter it replaced.
    pub fn register<T, C>(&self, converter: C) -> Option<Arc<dyn Converter>>
    where
        T: Value,
        C: Converter + 'static,
    {
        let key = TypeKey::of::<T>();
        debug!("Registering converter for type: {} -> {}", key, converter.name());
        self.converters.insert(key, Arc::new(converter))
    }

    /// Register a [`FromStrConverter`] for `T`.
    pub fn register_from_str<T>(&self) -> Option<Arc<dyn Converter>>
    where
        T: Value + FromStr + Display,
        T::Err: Display,
    {
        self.register::<T, _>(FromStrConverter::<T>::new())
    }

    /// Find a registered key by type name.
    ///
    /// Matches the full name (`alloc::string::String`) or the last path
    /// segment (`String`).
    pub fn key_by_name(&self, name: &str) -> Option<TypeKey> {
        self.converters
            .iter()
            .map(|entry| *entry.key())
            .find(|key| key.name() == name || short_name(key.name()) == name)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

fn short_name(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

impl ConverterRegistry for ConverterTable {
    fn find_converter(&self, key: &TypeKey) -> Option<Arc<dyn Converter>> {
        self.converters.get(key).map(|entry| Arc::clone(entry.value()))
    }
}

impl std::fmt::Debug for ConverterTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let types: Vec<_> = self.converters.iter().map(|e| e.key().name()).collect();
        f.debug_struct("ConverterTable")
            .field("converter_count", &types.len())
            .field("types", &types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_builtins_cover_primitives() {
        let table = ConverterTable::with_builtins();
        assert!(table.find_converter(&TypeKey::of::<i32>()).is_some());
        assert!(table.find_converter(&TypeKey::of::<bool>()).is_some());
        assert!(table.find_converter(&TypeKey::text()).is_none());
        assert_eq!(table.len(), 16);
    }

    #[test]
    fn test_register_replaces() {
        let table = ConverterTable::new();
        assert!(table.is_empty());
        assert!(table.register_from_str::<IpAddr>().is_none());
        assert!(table.register_from_str::<IpAddr>().is_some());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_key_by_name() {
        let table = ConverterTable::with_builtins();
        table.register_from_str::<IpAddr>();

        assert_eq!(table.key_by_name("u16"), Some(TypeKey::of::<u16>()));
        assert_eq!(table.key_by_name("IpAddr"), Some(TypeKey::of::<IpAddr>()));
        assert_eq!(
            table.key_by_name(TypeKey::of::<IpAddr>().name()),
            Some(TypeKey::of::<IpAddr>())
        );
        assert_eq!(table.key_by_name("Nope"), None);
    }

    #[test]
    fn test_arc_registry_delegates() {
        let table = Arc::new(ConverterTable::with_builtins());
        let registry: &dyn ConverterRegistry = &table;
        assert!(registry.find_converter(&TypeKey::of::<u8>()).is_some());
    }
}
