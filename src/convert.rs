//! Conversion facade: picks a direction and applies the resolved converter.

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{CacheConfig, CacheStats, ResolutionCache};
use crate::error::ConversionError;
use crate::registry::ConverterRegistry;
use crate::types::{BoxedValue, TypeKey, Value, as_text, boxed, flatten};

/// Result of a conversion: `Ok(None)` when no conversion applies.
pub type ConversionResult = Result<Option<BoxedValue>, ConversionError>;

/// Opaque token passed along by richer conversion pipelines.
pub type Context<'a> = Option<&'a dyn Any>;

/// Converts values to a target type.
pub trait TypeConverter: Send + Sync {
    /// Convert `value` to `target`, or `Ok(None)` if no conversion applies.
    fn convert(&self, target: TypeKey, value: Option<BoxedValue>) -> ConversionResult;

    /// Same as [`convert`](Self::convert); the context is accepted and ignored.
    fn convert_with_context(
        &self,
        target: TypeKey,
        _context: Context<'_>,
        value: Option<BoxedValue>,
    ) -> ConversionResult {
        self.convert(target, value)
    }

    /// Like [`convert`](Self::convert), but a missing result is
    /// [`ConversionError::ConversionFailed`].
    fn mandatory_convert(
        &self,
        target: TypeKey,
        value: Option<BoxedValue>,
    ) -> Result<BoxedValue, ConversionError> {
        let value = value.map(flatten);
        let value_type = value.as_deref().map(|v| v.type_key());
        self.convert(target, value)?
            .ok_or_else(|| ConversionError::conversion_failed(value_type, target))
    }

    fn mandatory_convert_with_context(
        &self,
        target: TypeKey,
        _context: Context<'_>,
        value: Option<BoxedValue>,
    ) -> Result<BoxedValue, ConversionError> {
        self.mandatory_convert(target, value)
    }
}

/// Start/stop lifecycle.
pub trait Service {
    fn start(&self);
    fn stop(&self);
}

/// Converts between `String` and any type the registry has a converter for.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use textconv::{ConverterTable, TextTypeConverter};
///
/// let converter = TextTypeConverter::new(Arc::new(ConverterTable::with_builtins()));
/// let n: Option<i32> = converter.convert_to(Box::new(String::from("42"))).unwrap();
/// assert_eq!(n, Some(42));
/// ```
#[derive(Debug)]
pub struct TextTypeConverter {
    cache: ResolutionCache,
}

impl TextTypeConverter {
    /// Create a converter over `registry` with the default cache config.
    pub fn new(registry: Arc<dyn ConverterRegistry>) -> Self {
        Self::with_config(registry, CacheConfig::default())
    }

    pub fn with_config(registry: Arc<dyn ConverterRegistry>, config: CacheConfig) -> Self {
        Self {
            cache: ResolutionCache::new(registry, config),
        }
    }

    /// The underlying resolution cache.
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Convert to `T` and downcast the result.
    pub fn convert_to<T: Value>(&self, value: BoxedValue) -> Result<Option<T>, ConversionError> {
        self.convert(TypeKey::of::<T>(), Some(value))?
            .map(downcast::<T>)
            .transpose()
    }

    /// Convert to `T`, failing with `ConversionFailed` if no conversion applies.
    pub fn mandatory_convert_to<T: Value>(&self, value: BoxedValue) -> Result<T, ConversionError> {
        downcast::<T>(self.mandatory_convert(TypeKey::of::<T>(), Some(value))?)
    }

    /// Convenience for `convert_to::<String>`. Accepts plain or boxed values.
    pub fn to_text<T: Value>(&self, value: T) -> Result<Option<String>, ConversionError> {
        self.convert_to::<String>(boxed(value))
    }

    fn parse(&self, target: TypeKey, text: &str) -> ConversionResult {
        let Some(converter) = self.cache.resolve(&target) else {
            return Ok(None);
        };
        let value = converter.parse(text)?;
        let actual = (*value).type_key();
        if actual != target {
            return Err(ConversionError::UnexpectedType {
                expected: target,
                actual,
            });
        }
        Ok(Some(value))
    }

    fn format(&self, value: &dyn Value) -> ConversionResult {
        let Some(converter) = self.cache.resolve(&value.type_key()) else {
            return Ok(None);
        };
        let text = converter.format(value)?;
        Ok(Some(Box::new(text)))
    }
}

impl TypeConverter for TextTypeConverter {
    fn convert(&self, target: TypeKey, value: Option<BoxedValue>) -> ConversionResult {
        // No value, no type to key a converter on.
        let Some(value) = value else {
            return Ok(None);
        };

        let value = flatten(value);
        let value_type = (*value).type_key();
        if value_type == target {
            return Ok(Some(value));
        }

        match as_text(&*value) {
            Some(text) => self.parse(target, text),
            None if target.is_text() => self.format(&*value),
            None => {
                debug!("No text bridge from {} to {}", value_type, target);
                Ok(None)
            }
        }
    }
}

impl Service for TextTypeConverter {
    fn start(&self) {
        info!(
            "Type converter started (negative cache capacity {})",
            self.cache.negative_capacity()
        );
    }

    fn stop(&self) {
        self.cache.clear();
        info!("Type converter stopped, caches cleared");
    }
}

fn downcast<T: Value>(value: BoxedValue) -> Result<T, ConversionError> {
    let actual = (*value).type_key();
    value
        .into_any()
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| ConversionError::UnexpectedType {
            expected: TypeKey::of::<T>(),
            actual,
        })
}
