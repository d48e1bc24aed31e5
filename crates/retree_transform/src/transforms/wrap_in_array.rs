use retree_format::{Error, Value};

use crate::TreeTransform;

/// Lets a list serializer read and write a lone element.
///
/// When deserializing, any node that is not an array is wrapped into a
/// one-element array. When serializing, a one-element array is written as
/// its sole element unless that element is itself an array, which would be
/// read back as the whole list. Other arrays are written unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapInArray;

impl TreeTransform for WrapInArray {
    fn transform_serialize(&self, node: Value) -> Result<Value, Error> {
        match node {
            Value::Array(mut items) if items.len() == 1 && !items[0].is_array() => {
                Ok(items.swap_remove(0))
            }
            other => Ok(other),
        }
    }

    fn transform_deserialize(&self, node: Value) -> Result<Value, Error> {
        match node {
            Value::Array(_) => Ok(node),
            other => Ok(Value::Array(vec![other])),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
