//! Type identity and type-erased values.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies a runtime type for converter lookup.
///
/// Equality and hashing go through the [`TypeId`] only; the name is carried
/// for log output and error messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for the type `T`.
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Key for the textual type, `String`.
    #[inline]
    pub fn text() -> Self {
        Self::of::<String>()
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.id == TypeId::of::<String>()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value that can pass through the converter.
///
/// Implemented for every `'static + Send + Sync + Debug` type. When holding a
/// `Box<dyn Value>`, dereference it (`(*value).type_key()`) so calls dispatch to the
/// boxed value and not to the box itself. A `Box<dyn Value>` boxed a second
/// time is unwrapped again by [`boxed`] and [`flatten`].
///
/// Text is always an owned `String`; a `&'static str` value is an ordinary
/// typed value and does not convert.
pub trait Value: Any + Send + Sync + fmt::Debug {
    /// Key of the concrete runtime type.
    fn type_key(&self) -> TypeKey;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T> Value for T
where
    T: Any + Send + Sync + fmt::Debug,
{
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

impl dyn Value {
    /// Borrow the value as `T` if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Owned, type-erased value.
pub type BoxedValue = Box<dyn Value>;

/// Box a value. Passing an already boxed value does not nest it.
#[inline]
pub fn boxed<T: Value>(value: T) -> BoxedValue {
    flatten(Box::new(value))
}

/// Strip nested `Box<dyn Value>` layers so the value keys on its concrete type.
pub fn flatten(mut value: BoxedValue) -> BoxedValue {
    while (*value).is::<BoxedValue>() {
        value = match value.into_any().downcast::<BoxedValue>() {
            Ok(inner) => *inner,
            Err(_) => unreachable!("checked by is::<BoxedValue>"),
        };
    }
    value
}

/// Borrow the text out of a value, if it is a `String`.
pub fn as_text(value: &dyn Value) -> Option<&str> {
    value.as_any().downcast_ref::<String>().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_type_key_identity() {
        assert_eq!(TypeKey::of::<i32>(), TypeKey::of::<i32>());
        assert_ne!(TypeKey::of::<i32>(), TypeKey::of::<i64>());
        assert!(TypeKey::text().is_text());
        assert!(!TypeKey::of::<&str>().is_text());

        let set: HashSet<_> = [TypeKey::of::<u8>(), TypeKey::of::<u8>(), TypeKey::of::<bool>()]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_boxed_value_reports_inner_type() {
        let value = boxed(42i32);
        assert_eq!((*value).type_key(), TypeKey::of::<i32>());

        let text = boxed(String::from("hi"));
        assert_eq!(as_text(&*text), Some("hi"));
        assert_eq!(as_text(&*value), None);
    }

    #[test]
    fn test_nested_box_keys_on_inner_type() {
        let nested: BoxedValue = Box::new(boxed(42i32));
        assert_eq!((*nested).type_key(), TypeKey::of::<BoxedValue>());

        let flat = flatten(nested);
        assert_eq!((*flat).type_key(), TypeKey::of::<i32>());
        assert_eq!(flat.downcast_ref::<i32>(), Some(&42));

        let twice = boxed(boxed(boxed(String::from("x"))));
        assert_eq!(as_text(&*twice), Some("x"));
    }

    #[test]
    fn test_into_any_downcast() {
        let value = boxed(7u64);
        let any = value.into_any();
        assert_eq!(*any.downcast::<u64>().unwrap(), 7);
    }
}
