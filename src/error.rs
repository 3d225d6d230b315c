//! Conversion error types

use thiserror::Error;

use crate::types::TypeKey;

/// Raised by a converter that cannot parse its input.
#[derive(Debug, Clone, Error)]
#[error("Cannot parse {input:?} as {target}: {message}")]
pub struct ParseError {
    pub target: TypeKey,
    pub input: String,
    pub message: String,
}

impl ParseError {
    pub fn new(target: TypeKey, input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target,
            input: input.into(),
            message: message.into(),
        }
    }
}

/// Raised by a converter that cannot format a value.
#[derive(Debug, Clone, Error)]
#[error("Cannot format {source_type} as text: {message}")]
pub struct FormatError {
    pub source_type: TypeKey,
    pub message: String,
}

impl FormatError {
    pub fn new(source_type: TypeKey, message: impl Into<String>) -> Self {
        Self {
            source_type,
            message: message.into(),
        }
    }
}

/// Errors surfaced by the conversion facade.
///
/// A missing converter is not an error for the plain entry points; they
/// return `Ok(None)`. Only the mandatory variants report it.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("No conversion from {} to {target}", describe(.value_type))]
    ConversionFailed {
        value_type: Option<TypeKey>,
        target: TypeKey,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Converter produced {actual}, expected {expected}")]
    UnexpectedType { expected: TypeKey, actual: TypeKey },
}

impl ConversionError {
    pub fn conversion_failed(value_type: Option<TypeKey>, target: TypeKey) -> Self {
        Self::ConversionFailed { value_type, target }
    }

    /// True when no converter applied, as opposed to a converter failing.
    pub fn is_conversion_failed(&self) -> bool {
        matches!(self, Self::ConversionFailed { .. })
    }
}

fn describe(value_type: &Option<TypeKey>) -> &'static str {
    value_type.map_or("<no value>", |key| key.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_failed_message() {
        let err = ConversionError::conversion_failed(Some(TypeKey::text()), TypeKey::of::<u8>());
        assert!(err.is_conversion_failed());
        assert_eq!(err.to_string(), "No conversion from alloc::string::String to u8");

        let err = ConversionError::conversion_failed(None, TypeKey::of::<u8>());
        assert_eq!(err.to_string(), "No conversion from <no value> to u8");
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let parse = ParseError::new(TypeKey::of::<i32>(), "x", "invalid digit found in string");
        let expected = parse.to_string();
        let err: ConversionError = parse.into();
        assert!(!err.is_conversion_failed());
        assert_eq!(err.to_string(), expected);
    }
}
