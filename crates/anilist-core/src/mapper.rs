//! Response mapping.
//!
//! Mapping is driven by the same descriptor that produced the selection, so
//! remote names, nullability and nesting are resolved in one place.

use serde_json::{Map, Value};

use crate::descriptor::{Entity, EntityDescriptor, FieldType};
use crate::error::MappingError;

/// A JSON object viewed through an entity descriptor.
#[derive(Debug, Clone, Copy)]
pub struct ObjectNode<'a> {
    descriptor: &'static EntityDescriptor,
    object: &'a Map<String, Value>,
}

impl<'a> ObjectNode<'a> {
    /// Wrap `value`, which must be a JSON object.
    pub fn new(descriptor: &'static EntityDescriptor, value: &'a Value) -> Result<Self, MappingError> {
        match value {
            Value::Object(object) => Ok(Self { descriptor, object }),
            other => Err(MappingError::unexpected(descriptor.type_name, other)),
        }
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        self.descriptor
    }

    /// The raw value stored under a remote name.
    pub fn raw(&self, remote_name: &str) -> Option<&'a Value> {
        self.object.get(remote_name)
    }

    /// Map the field declared under `local_name`.
    ///
    /// Missing and `null` values map to the type's absent value when it is
    /// nullable and to [`MappingError::MissingField`] otherwise.
    pub fn field<T: FieldType>(&self, local_name: &str) -> Result<T, MappingError> {
        let type_name = self.descriptor.type_name;
        let field = self
            .descriptor
            .field(local_name)
            .ok_or_else(|| MappingError::unknown_field(type_name, local_name))?;

        match self.object.get(field.remote_name) {
            None | Some(Value::Null) => {
                T::absent().ok_or_else(|| MappingError::missing(type_name, field.remote_name))
            }
            Some(value) => {
                T::from_value(value).map_err(|err| err.within(type_name, field.remote_name))
            }
        }
    }
}

/// Map a JSON object onto an entity.
pub fn map<T: Entity>(value: &Value) -> Result<T, MappingError> {
    let node = ObjectNode::new(T::descriptor(), value)?;
    T::from_node(&node)
}

/// Map the named member of a `data` object.
///
/// A missing or `null` member yields `Ok(None)`.
pub fn map_field<T: FieldType>(data: &Value, name: &str) -> Result<Option<T>, MappingError> {
    match data.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::from_value(value)
            .map(Some)
            .map_err(|err| err.within("data", name)),
    }
}

/// Map the named member of a `data` object, failing when it is absent.
pub fn require_field<T: FieldType>(data: &Value, name: &str) -> Result<T, MappingError> {
    map_field(data, name)?.ok_or_else(|| MappingError::missing("data", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_field_treats_null_as_absent() {
        let data = json!({ "Media": null, "count": 3 });
        assert_eq!(map_field::<i32>(&data, "Media"), Ok(None));
        assert_eq!(map_field::<i32>(&data, "missing"), Ok(None));
        assert_eq!(map_field::<i32>(&data, "count"), Ok(Some(3)));
    }

    #[test]
    fn test_require_field() {
        let data = json!({ "deleted": null });
        assert_eq!(
            require_field::<bool>(&data, "deleted"),
            Err(MappingError::missing("data", "deleted"))
        );
    }

    #[test]
    fn test_wrong_top_level_type() {
        let err = map_field::<String>(&json!({ "name": 5 }), "name").unwrap_err();
        assert!(matches!(err, MappingError::InvalidField { .. }));
    }
}
