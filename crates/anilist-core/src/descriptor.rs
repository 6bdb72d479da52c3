//! Static entity descriptors.
//!
//! A descriptor is the compile-time table that says, for one Rust type,
//! which remote fields exist, what they are called locally, whether they
//! may be null and whether they are composite. Descriptors are normally
//! generated by `#[derive(Entity)]`:
//!
//! ```ignore
//! #[derive(Entity)]
//! struct Media {
//!     id: i32,
//!     #[field(rename = "type")]
//!     media_type: Option<MediaType>,
//!     title: Option<MediaTitle>,
//!     #[field(skip)]
//!     cached_label: String,
//! }
//! ```
//!
//! They can also be written by hand as a `static`, which is how
//! [`PageInfo`](crate::PageInfo) is declared.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::error::{DescriptorError, MappingError};
use crate::mapper::ObjectNode;
use crate::selection::{Selection, selections_for};

/// The structural shape of a field type.
#[derive(Clone, Copy)]
pub enum Shape {
    /// A leaf value: numbers, strings, booleans, enums, dates.
    Scalar,
    /// A composite value with its own descriptor.
    Object(fn() -> &'static EntityDescriptor),
    /// A collection; the function yields the element shape.
    List(fn() -> Shape),
}

impl Shape {
    /// Strip any list wrappers and return the element shape.
    pub fn element(self) -> Shape {
        let mut shape = self;
        while let Shape::List(inner) = shape {
            shape = inner();
        }
        shape
    }

    /// The descriptor of the (element) composite, if any.
    pub fn descriptor(self) -> Option<&'static EntityDescriptor> {
        match self.element() {
            Shape::Object(descriptor) => Some(descriptor()),
            _ => None,
        }
    }

    /// Whether this is a scalar or a list of scalars.
    pub fn is_scalar(self) -> bool {
        matches!(self.element(), Shape::Scalar)
    }

    /// Whether this is a collection.
    pub fn is_list(self) -> bool {
        matches!(self, Shape::List(_))
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "Scalar"),
            Shape::Object(descriptor) => write!(f, "Object({})", descriptor().type_name),
            Shape::List(inner) => write!(f, "List({:?})", inner()),
        }
    }
}

/// Shape used for fields excluded from selection.
pub fn opaque_shape() -> Shape {
    Shape::Scalar
}

/// One field of an [`EntityDescriptor`].
#[derive(Clone, Copy, Debug)]
pub struct FieldDescriptor {
    /// Name of the field in the remote schema (camelCase); empty for
    /// fields that are never selected.
    pub remote_name: &'static str,
    /// Name of the Rust field.
    pub local_name: &'static str,
    /// Rust type of the field, for diagnostics.
    pub type_name: &'static str,
    /// Whether a missing or null value maps to an explicit absent value.
    pub nullable: bool,
    /// Whether the field is part of the default selection.
    pub selectable: bool,
    /// Structural shape of the field type.
    pub shape: fn() -> Shape,
}

/// The statically declared field table of a remote type.
#[derive(Debug)]
pub struct EntityDescriptor {
    /// Name of the type in the remote schema.
    pub type_name: &'static str,
    /// All declared fields, in declaration order.
    pub fields: &'static [FieldDescriptor],
}

impl EntityDescriptor {
    /// Look up a field by its Rust name.
    pub fn field(&self, local_name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.local_name == local_name)
    }

    /// Look up a field by its remote name.
    pub fn remote_field(&self, remote_name: &str) -> Option<&'static FieldDescriptor> {
        self.selectable_fields().find(|f| f.remote_name == remote_name)
    }

    /// Fields that belong to the default selection.
    pub fn selectable_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|f| f.selectable)
    }

    /// Check the uniqueness invariants.
    ///
    /// Derived descriptors are checked at compile time; this is for
    /// descriptors written by hand.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        let mut remote = HashSet::new();
        let mut local = HashSet::new();
        for field in self.fields {
            if field.selectable && !remote.insert(field.remote_name) {
                return Err(DescriptorError::DuplicateRemoteName {
                    type_name: self.type_name,
                    remote_name: field.remote_name,
                });
            }
            if !local.insert(field.local_name) {
                return Err(DescriptorError::DuplicateLocalName {
                    type_name: self.type_name,
                    local_name: field.local_name,
                });
            }
        }
        Ok(())
    }
}

/// A Rust type that can appear as a field of an entity.
pub trait FieldType: Sized {
    /// Whether missing or null remote values are allowed.
    const NULLABLE: bool = false;

    /// Structural shape, used to build selections.
    fn shape() -> Shape;

    /// Convert a present, non-null JSON value.
    fn from_value(value: &Value) -> Result<Self, MappingError>;

    /// The explicit absent value, for nullable types only.
    fn absent() -> Option<Self> {
        None
    }
}

/// A composite remote type with a static descriptor.
pub trait Entity: Sized {
    /// The static descriptor for this type.
    fn descriptor() -> &'static EntityDescriptor;

    /// Build the value from a JSON object checked against the descriptor.
    fn from_node(node: &ObjectNode<'_>) -> Result<Self, MappingError>;

    /// The selection set requested when callers do not override it.
    fn default_selection() -> Vec<Selection> {
        selections_for(Self::descriptor())
    }
}

/// A closed remote enumeration rendered as bare identifier tokens.
pub trait GqlEnum: Sized + Copy + 'static {
    /// Name of the enum in the remote schema.
    const TYPE_NAME: &'static str;
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The identifier token for this variant, e.g. `"ANIME"`.
    fn as_literal(&self) -> &'static str;

    /// Parse an identifier token.
    fn from_literal(literal: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_literal() == literal)
    }
}

/// Coerce a JSON string into a [`GqlEnum`] variant.
pub fn enum_from_value<E: GqlEnum>(value: &Value) -> Result<E, MappingError> {
    value
        .as_str()
        .and_then(E::from_literal)
        .ok_or_else(|| MappingError::unexpected(E::TYPE_NAME, value))
}

macro_rules! integer_field {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldType for $ty {
            fn shape() -> Shape {
                Shape::Scalar
            }

            fn from_value(value: &Value) -> Result<Self, MappingError> {
                value
                    .as_i64()
                    .and_then(|n| <$ty>::try_from(n).ok())
                    .ok_or_else(|| MappingError::unexpected(stringify!($ty), value))
            }
        }
    )*};
}

integer_field!(i32, i64, u16, u32);

impl FieldType for u64 {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        value
            .as_u64()
            .ok_or_else(|| MappingError::unexpected("u64", value))
    }
}

impl FieldType for f64 {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        value
            .as_f64()
            .ok_or_else(|| MappingError::unexpected("Float", value))
    }
}

impl FieldType for f32 {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        value
            .as_f64()
            .map(|n| n as f32)
            .ok_or_else(|| MappingError::unexpected("Float", value))
    }
}

impl FieldType for bool {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        value
            .as_bool()
            .ok_or_else(|| MappingError::unexpected("Boolean", value))
    }
}

impl FieldType for String {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| MappingError::unexpected("String", value))
    }
}

/// Timestamps arrive either as unix seconds or as RFC 3339 strings.
impl FieldType for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        };
        parsed.ok_or_else(|| MappingError::unexpected("timestamp", value))
    }
}

/// Raw JSON, for fields typed as the remote `Json` scalar.
impl FieldType for Value {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        Ok(value.clone())
    }
}

impl<T: FieldType> FieldType for Option<T> {
    const NULLABLE: bool = true;

    fn shape() -> Shape {
        T::shape()
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: FieldType> FieldType for Box<T> {
    const NULLABLE: bool = T::NULLABLE;

    fn shape() -> Shape {
        T::shape()
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        T::from_value(value).map(Box::new)
    }

    fn absent() -> Option<Self> {
        T::absent().map(Box::new)
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn shape() -> Shape {
        Shape::List(T::shape)
    }

    fn from_value(value: &Value) -> Result<Self, MappingError> {
        let items = value
            .as_array()
            .ok_or_else(|| MappingError::unexpected("list", value))?;
        items.iter().map(T::from_value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_range_is_checked() {
        assert_eq!(i32::from_value(&json!(42)), Ok(42));
        assert!(i32::from_value(&json!(i64::MAX)).is_err());
        assert!(u32::from_value(&json!(-1)).is_err());
        assert!(i32::from_value(&json!(1.5)).is_err());
    }

    #[test]
    fn test_option_distinguishes_null_from_zero() {
        assert_eq!(Option::<i32>::from_value(&json!(null)), Ok(None));
        assert_eq!(Option::<i32>::from_value(&json!(0)), Ok(Some(0)));
        assert_eq!(Option::<i32>::absent(), Some(None));
        assert_eq!(i32::absent(), None);
    }

    #[test]
    fn test_vec_fails_on_any_bad_element() {
        assert_eq!(
            Vec::<String>::from_value(&json!(["a", "b"])),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
        assert!(Vec::<String>::from_value(&json!(["a", 1])).is_err());
    }

    #[test]
    fn test_timestamps() {
        let from_secs = DateTime::<Utc>::from_value(&json!(1_700_000_000)).unwrap();
        assert_eq!(from_secs.timestamp(), 1_700_000_000);

        let from_str = DateTime::<Utc>::from_value(&json!("2023-11-14T22:13:20Z")).unwrap();
        assert_eq!(from_str, from_secs);

        assert!(DateTime::<Utc>::from_value(&json!(true)).is_err());
    }

    #[test]
    fn test_shapes() {
        assert!(matches!(<Vec<Vec<i32>>>::shape(), Shape::List(_)));
        assert!(<Vec<Vec<i32>>>::shape().is_scalar());
        assert!(<Option<String>>::shape().descriptor().is_none());
        assert_eq!(format!("{:?}", <Vec<bool>>::shape()), "List(Scalar)");
    }
}
