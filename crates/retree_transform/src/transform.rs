use alloc::sync::Arc;

use retree_format::{Descriptor, Error, Value};

// -----------------------------------------------------------------------------
// TreeTransform

/// Hooks applied by a [`TransformingSerializer`] to the tree of a value.
///
/// ## Call Contract
///
/// - [`transform_serialize`] runs exactly once per serialization, after the
///   inner serializer has produced the tree and before the tree is emitted.
/// - [`transform_deserialize`] runs exactly once per deserialization, after
///   the tree was read and before the inner serializer consumes it.
///
/// Both may return a structurally different node. The returned node is not
/// validated: if the inner serializer cannot accept it, its own error is
/// returned. Any error a hook returns aborts the call as is.
///
/// Hooks must not call back into the same serializer with the same node,
/// there is no protection against unbounded recursion.
///
/// ## Default Implementation
///
/// Every method has a default: both hooks are the identity and the
/// descriptor is the inner serializer's own. The trait is implemented for
/// `()` with all defaults.
///
/// # Examples
///
/// ```
/// use retree_format::{Error, SerdeSerializer, Value, to_string};
/// use retree_transform::{TransformingSerializer, TreeTransform};
///
/// struct Upper;
///
/// impl TreeTransform for Upper {
///     fn transform_serialize(&self, node: Value) -> Result<Value, Error> {
///         match node {
///             Value::String(s) => Ok(Value::String(s.to_uppercase())),
///             other => Ok(other),
///         }
///     }
/// }
///
/// let inner = SerdeSerializer::<String>::new();
/// let serializer = TransformingSerializer::with_transform(&inner, Upper);
///
/// assert_eq!(to_string(&serializer, &"abc".to_string()).unwrap(), r#""ABC""#);
/// ```
///
/// [`TransformingSerializer`]: crate::TransformingSerializer
/// [`transform_serialize`]: TreeTransform::transform_serialize
/// [`transform_deserialize`]: TreeTransform::transform_deserialize
pub trait TreeTransform {
    /// Rewrites the tree produced by the inner serializer before it is emitted.
    #[inline]
    fn transform_serialize(&self, node: Value) -> Result<Value, Error> {
        Ok(node)
    }

    /// Rewrites the tree read from the input before the inner serializer sees it.
    #[inline]
    fn transform_deserialize(&self, node: Value) -> Result<Value, Error> {
        Ok(node)
    }

    /// Descriptor advertised by the wrapping serializer.
    ///
    /// Overriding replaces the descriptor entirely. It affects metadata
    /// consumers only, never the conversion itself.
    #[inline]
    fn descriptor(&self, inner: &Arc<Descriptor>) -> Arc<Descriptor> {
        Arc::clone(inner)
    }
}

impl TreeTransform for () {}

impl<X: TreeTransform + ?Sized> TreeTransform for &X {
    #[inline]
    fn transform_serialize(&self, node: Value) -> Result<Value, Error> {
        (**self).transform_serialize(node)
    }

    #[inline]
    fn transform_deserialize(&self, node: Value) -> Result<Value, Error> {
        (**self).transform_deserialize(node)
    }

    #[inline]
    fn descriptor(&self, inner: &Arc<Descriptor>) -> Arc<Descriptor> {
        (**self).descriptor(inner)
    }
}

// -----------------------------------------------------------------------------
// Chain

/// Two transforms applied one after the other.
///
/// Serialization applies `first` then `second`; deserialization undoes them
/// in reverse order, `second` then `first`.
///
/// Created by [`TreeTransformExt::then`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    #[inline]
    pub const fn first(&self) -> &A {
        &self.first
    }

    #[inline]
    pub const fn second(&self) -> &B {
        &self.second
    }
}

impl<A: TreeTransform, B: TreeTransform> TreeTransform for Chain<A, B> {
    fn transform_serialize(&self, node: Value) -> Result<Value, Error> {
        let node = self.first.transform_serialize(node)?;
        self.second.transform_serialize(node)
    }

    fn transform_deserialize(&self, node: Value) -> Result<Value, Error> {
        let node = self.second.transform_deserialize(node)?;
        self.first.transform_deserialize(node)
    }

    fn descriptor(&self, inner: &Arc<Descriptor>) -> Arc<Descriptor> {
        self.second.descriptor(&self.first.descriptor(inner))
    }
}

/// Combinators for [`TreeTransform`].
pub trait TreeTransformExt: TreeTransform + Sized {
    /// Applies `next` after `self` when serializing, before `self` when deserializing.
    #[inline]
    fn then<B: TreeTransform>(self, next: B) -> Chain<Self, B> {
        Chain {
            first: self,
            second: next,
        }
    }
}

impl<X: TreeTransform> TreeTransformExt for X {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use core::cell::RefCell;

    use retree_format::{Descriptor, Error, ShapeKind, Value};
    use serde_json::json;

    use super::{TreeTransform, TreeTransformExt};

    struct Tag<'a> {
        name: &'static str,
        log: &'a RefCell<Vec<&'static str>>,
    }

    impl TreeTransform for Tag<'_> {
        fn transform_serialize(&self, node: Value) -> Result<Value, Error> {
            self.log.borrow_mut().push(self.name);
            Ok(json!({ self.name: node }))
        }

        fn transform_deserialize(&self, node: Value) -> Result<Value, Error> {
            self.log.borrow_mut().push(self.name);
            match node {
                Value::Object(mut map) => map
                    .remove(self.name)
                    .ok_or_else(|| Error::transform(format!("missing `{}`", self.name))),
                _ => Err(Error::transform("expected an object")),
            }
        }
    }

    struct Renamed;

    impl TreeTransform for Renamed {
        fn descriptor(&self, inner: &Arc<Descriptor>) -> Arc<Descriptor> {
            Arc::new(Descriptor::new(
                format!("Renamed<{}>", inner.serial_name()),
                ShapeKind::Object,
            ))
        }
    }

    #[test]
    fn unit_is_identity() {
        let node = json!({"a": [1, null]});
        assert_eq!(().transform_serialize(node.clone()).unwrap(), node);
        assert_eq!(().transform_deserialize(node.clone()).unwrap(), node);

        let desc = Arc::new(Descriptor::any("T"));
        assert!(Arc::ptr_eq(&().descriptor(&desc), &desc));
    }

    #[test]
    fn chain_order() {
        let log = RefCell::new(Vec::new());
        let chain = Tag { name: "a", log: &log }.then(Tag { name: "b", log: &log });

        let out = chain.transform_serialize(json!(1)).unwrap();
        assert_eq!(out, json!({"b": {"a": 1}}));
        assert_eq!(chain.transform_deserialize(out).unwrap(), json!(1));
        assert_eq!(*log.borrow(), ["a", "b", "b", "a"]);
    }

    #[test]
    fn chain_stops_at_first_error() {
        let log = RefCell::new(Vec::new());
        let chain = Tag { name: "a", log: &log }.then(Tag { name: "b", log: &log });

        let err = chain.transform_deserialize(json!({"a": 1})).unwrap_err();
        assert!(err.is_transform());
        assert_eq!(*log.borrow(), ["b"]);
    }

    #[test]
    fn chain_descriptor() {
        let desc = Arc::new(Descriptor::any("T"));
        let chain = ().then(Renamed);
        assert_eq!(chain.descriptor(&desc).serial_name(), "Renamed<T>");

        let nested = Renamed.then(Renamed);
        assert_eq!(nested.descriptor(&desc).serial_name(), "Renamed<Renamed<T>>");

        let by_ref = &Renamed;
        assert_eq!(by_ref.descriptor(&desc).kind(), ShapeKind::Object);
    }
}
