use alloc::borrow::Cow;

use retree_format::{Error, Value};

use crate::TreeTransform;

/// Removes an object key from the output.
///
/// By default the key is always removed. With [`when_equals`] it is only
/// removed while it holds the given default, and the default is put back
/// when an input object lacks the key, so the inner serializer still sees
/// a complete object.
///
/// Nodes that are not objects pass through unchanged.
///
/// # Examples
///
/// ```
/// use retree_format::{SerdeSerializer, from_str, to_string};
/// use retree_transform::TransformingSerializer;
/// use retree_transform::transforms::OmitField;
/// use serde::{Deserialize, Serialize};
/// use serde_json::json;
///
/// #[derive(Serialize, Deserialize, PartialEq, Debug)]
/// struct Project {
///     name: String,
///     language: String,
/// }
///
/// let inner = SerdeSerializer::<Project>::new();
/// let omit = OmitField::new("language").when_equals(json!("Rust"));
/// let serializer = TransformingSerializer::with_transform(&inner, omit);
///
/// let project = Project { name: "retree".into(), language: "Rust".into() };
/// let text = to_string(&serializer, &project).unwrap();
/// assert_eq!(text, r#"{"name":"retree"}"#);
/// assert_eq!(from_str::<Project, _>(&serializer, &text).unwrap(), project);
/// ```
///
/// [`when_equals`]: OmitField::when_equals
#[derive(Debug, Clone, PartialEq)]
pub struct OmitField {
    key: Cow<'static, str>,
    default: Option<Value>,
}

impl OmitField {
    /// Always removes `key`.
    #[inline]
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            default: None,
        }
    }

    /// Only removes the key while it holds `default`, and restores it on input.
    #[inline]
    pub fn when_equals(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl TreeTransform for OmitField {
    fn transform_serialize(&self, node: Value) -> Result<Value, Error> {
        let Value::Object(mut map) = node else {
            return Ok(node);
        };

        let key = self.key();
        let omit = match &self.default {
            None => true,
            Some(default) => map.get(key) == Some(default),
        };
        if omit {
            // Keeps the position of the remaining keys.
            map.retain(|k, _| k.as_str() != key);
        }

        Ok(Value::Object(map))
    }

    fn transform_deserialize(&self, node: Value) -> Result<Value, Error> {
        match (node, &self.default) {
            (Value::Object(mut map), Some(default)) => {
                if !map.contains_key(self.key()) {
                    map.insert(self.key().to_owned(), default.clone());
                }
                Ok(Value::Object(map))
            }
            (node, _) => Ok(node),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::OmitField;
    use crate::TreeTransform;

    #[test]
    fn always_omits() {
        let omit = OmitField::new("secret");
        let node = omit
            .transform_serialize(json!({"a": 1, "secret": "x", "b": 2}))
            .unwrap();
        assert_eq!(node, json!({"a": 1, "b": 2}));

        // Nothing to restore without a default.
        let node = omit.transform_deserialize(json!({"a": 1})).unwrap();
        assert_eq!(node, json!({"a": 1}));
    }

    #[test]
    #[cfg(feature = "preserve_order")]
    fn keeps_order_of_remaining_keys() {
        let omit = OmitField::new("b");
        let node = omit
            .transform_serialize(json!({"c": 1, "b": 2, "a": 3, "d": 4}))
            .unwrap();
        let keys: Vec<&str> = node.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["c", "a", "d"]);
    }

    #[test]
    fn omits_only_default() {
        let omit = OmitField::new("language").when_equals(json!("Rust"));

        let node = omit
            .transform_serialize(json!({"language": "Rust"}))
            .unwrap();
        assert_eq!(node, json!({}));

        let node = omit
            .transform_serialize(json!({"language": "Kotlin"}))
            .unwrap();
        assert_eq!(node, json!({"language": "Kotlin"}));
    }

    #[test]
    fn restores_default() {
        let omit = OmitField::new("language").when_equals(json!("Rust"));

        let node = omit.transform_deserialize(json!({"name": "x"})).unwrap();
        assert_eq!(node, json!({"name": "x", "language": "Rust"}));

        let node = omit
            .transform_deserialize(json!({"language": "Kotlin"}))
            .unwrap();
        assert_eq!(node, json!({"language": "Kotlin"}));
    }

    #[test]
    fn ignores_non_objects() {
        let omit = OmitField::new("a").when_equals(json!(1));
        assert_eq!(omit.transform_serialize(json!([1])).unwrap(), json!([1]));
        assert_eq!(omit.transform_deserialize(json!("a")).unwrap(), json!("a"));
    }
}
