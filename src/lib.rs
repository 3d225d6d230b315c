//! textconv - String <-> typed value conversion.
//!
//! Converts values to and from `String` through converters looked up in a
//! type-keyed registry. Lookups are memoized so each type hits the registry
//! once.
//!
//! ## Architecture
//!
//! - `types` - `TypeKey` and the type-erased `Value`
//! - `converter` - the `Converter` capability and `FromStrConverter`
//! - `registry` - `ConverterRegistry` trait and the in-memory `ConverterTable`
//! - `cache` - `ResolutionCache` with positive and bounded negative tiers
//! - `convert` - `TextTypeConverter`, the public entry point
//! - `config` - environment configuration

pub mod cache;
pub mod config;
pub mod convert;
pub mod converter;
pub mod error;
pub mod registry;
pub mod types;

pub use cache::{CacheConfig, CacheStats, ResolutionCache};
pub use convert::{ConversionResult, Service, TextTypeConverter, TypeConverter};
pub use converter::{Converter, FromStrConverter};
pub use error::{ConversionError, FormatError, ParseError};
pub use registry::{ConverterRegistry, ConverterTable};
pub use types::{BoxedValue, TypeKey, Value};
