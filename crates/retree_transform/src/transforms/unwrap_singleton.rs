use retree_format::{Error, Value};

use crate::TreeTransform;

/// Accepts a value wrapped in a one-element array.
///
/// When deserializing, a one-element array is replaced by its element and
/// any other node is left untouched. Arrays of any other length are
/// rejected with [`Error::Transform`]. Serialization is not affected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnwrapSingleton;

impl TreeTransform for UnwrapSingleton {
    fn transform_deserialize(&self, node: Value) -> Result<Value, Error> {
        match node {
            Value::Array(mut items) if items.len() == 1 => Ok(items.swap_remove(0)),
            Value::Array(items) => Err(Error::transform(format!(
                "expected a single-element array, found {} elements",
                items.len()
            ))),
            other => Ok(other),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::UnwrapSingleton;
    use crate::TreeTransform;

    #[test]
    fn unwraps_single_element() {
        let node = UnwrapSingleton.transform_deserialize(json!(["str1"])).unwrap();
        assert_eq!(node, json!("str1"));

        let node = UnwrapSingleton.transform_deserialize(json!([{"a": [1]}])).unwrap();
        assert_eq!(node, json!({"a": [1]}));
    }

    #[test]
    fn leaves_other_nodes() {
        for node in [json!("str1"), json!(null), json!({"k": [1, 2]}), json!(3)] {
            assert_eq!(UnwrapSingleton.transform_deserialize(node.clone()).unwrap(), node);
        }
    }

    #[test]
    fn rejects_other_lengths() {
        let err = UnwrapSingleton.transform_deserialize(json!(["a", "b"])).unwrap_err();
        assert!(err.is_transform());
        assert_eq!(err.to_string(), "expected a single-element array, found 2 elements");

        assert!(UnwrapSingleton.transform_deserialize(json!([])).is_err());
    }

    #[test]
    fn serialize_is_identity() {
        let node = json!(["a"]);
        assert_eq!(UnwrapSingleton.transform_serialize(node.clone()).unwrap(), node);
    }
}
