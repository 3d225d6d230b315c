//! Converter capability: text to value and back.

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::error::{FormatError, ParseError};
use crate::types::{BoxedValue, TypeKey, Value};

/// Converts one specific type to and from text.
///
/// Converters are handed out by a [`ConverterRegistry`](crate::ConverterRegistry)
/// and shared across threads, so they must be stateless or internally
/// synchronized.
pub trait Converter: Send + Sync {
    /// Parse `text` into a value of the converter's type.
    fn parse(&self, text: &str) -> Result<BoxedValue, ParseError>;

    /// Format a value of the converter's type as text.
    fn format(&self, value: &dyn Value) -> Result<String, FormatError>;

    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Converter for any type with `FromStr` and `Display`.
pub struct FromStrConverter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromStrConverter<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FromStrConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Converter for FromStrConverter<T>
where
    T: Value + FromStr + Display,
    T::Err: Display,
{
    fn parse(&self, text: &str) -> Result<BoxedValue, ParseError> {
        text.parse::<T>()
            .map(|value| Box::new(value) as BoxedValue)
            .map_err(|e| ParseError::new(TypeKey::of::<T>(), text, e.to_string()))
    }

    fn format(&self, value: &dyn Value) -> Result<String, FormatError> {
        match value.as_any().downcast_ref::<T>() {
            Some(value) => Ok(value.to_string()),
            None => Err(FormatError::new(
                value.type_key(),
                format!("expected a value of type {}", TypeKey::of::<T>()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::boxed;

    #[test]
    fn test_from_str_parse() {
        let converter = FromStrConverter::<i32>::new();
        let value = converter.parse("42").unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&42));
    }

    #[test]
    fn test_from_str_parse_error_keeps_input() {
        let converter = FromStrConverter::<u8>::new();
        let err = converter.parse("300").unwrap_err();
        assert_eq!(err.target, TypeKey::of::<u8>());
        assert_eq!(err.input, "300");
    }

    #[test]
    fn test_from_str_format() {
        let converter = FromStrConverter::<f64>::new();
        assert_eq!(converter.format(&2.5f64).unwrap(), "2.5");

        let wrong = boxed(true);
        let err = converter.format(&*wrong).unwrap_err();
        assert_eq!(err.source_type, TypeKey::of::<bool>());
    }
}
