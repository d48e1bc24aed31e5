use alloc::sync::Arc;

use retree_format::context::{Decoder, Encoder};
use retree_format::{Descriptor, Direction, Error, Value, ValueSerializer};
use retree_format::{from_tree, to_tree};

use crate::TreeTransform;

// -----------------------------------------------------------------------------
// TransformingSerializer

/// A serializer that routes conversion through the JSON tree and rewrites
/// the tree with a [`TreeTransform`] in each direction.
///
/// # Conversion Rules
///
/// Serialization:
///
/// 1. Obtains the tree capability of the [`Encoder`]. Fails with
///    [`Error::UnsupportedContext`] if there is none, before the inner
///    serializer is touched.
/// 2. Converts the value into a tree with the inner serializer.
/// 3. Applies [`TreeTransform::transform_serialize`].
/// 4. Emits the resulting tree.
///
/// Deserialization:
///
/// 1. Obtains the tree capability of the [`Decoder`], failing the same way.
/// 2. Reads the next whole tree.
/// 3. Applies [`TreeTransform::transform_deserialize`].
/// 4. Converts the tree into a value with the inner serializer.
///
/// Any failure aborts the call; errors of the inner serializer and of the
/// hooks are returned unchanged. Nothing is emitted when a step before
/// emission fails.
///
/// # Ownership
///
/// The inner serializer is borrowed for `'a` and never mutated. The wrapper
/// holds no other state, so it can be shared between threads whenever the
/// inner serializer and the transform are [`Sync`].
///
/// # Examples
///
/// ```
/// use retree_format::{SerdeSerializer, from_str, to_string};
/// use retree_transform::TransformingSerializer;
/// use retree_transform::transforms::UnwrapSingleton;
///
/// let inner = SerdeSerializer::<String>::new();
/// let serializer = TransformingSerializer::with_transform(&inner, UnwrapSingleton);
///
/// assert_eq!(from_str::<String, _>(&serializer, r#"["str1"]"#).unwrap(), "str1");
/// assert_eq!(from_str::<String, _>(&serializer, r#""str1""#).unwrap(), "str1");
/// assert!(from_str::<String, _>(&serializer, r#"["a","b"]"#).is_err());
///
/// assert_eq!(to_string(&serializer, &"str1".to_string()).unwrap(), r#""str1""#);
/// ```
#[derive(Debug)]
pub struct TransformingSerializer<'a, S: ?Sized, X = ()> {
    inner: &'a S,
    transform: X,
}

impl<S: ?Sized, X: Clone> Clone for TransformingSerializer<'_, S, X> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: self.inner,
            transform: self.transform.clone(),
        }
    }
}

impl<S: ?Sized, X: Copy> Copy for TransformingSerializer<'_, S, X> {}

impl<'a, S: ?Sized> TransformingSerializer<'a, S, ()> {
    /// Creates a wrapper with identity hooks.
    #[inline]
    pub const fn new(inner: &'a S) -> Self {
        Self {
            inner,
            transform: (),
        }
    }
}

impl<'a, S: ?Sized, X> TransformingSerializer<'a, S, X> {
    /// Creates a wrapper applying `transform`.
    #[inline]
    pub const fn with_transform(inner: &'a S, transform: X) -> Self {
        Self { inner, transform }
    }

    #[inline]
    pub const fn inner(&self) -> &'a S {
        self.inner
    }

    #[inline]
    pub const fn transform(&self) -> &X {
        &self.transform
    }
}

impl<S: ?Sized, X: TreeTransform> TransformingSerializer<'_, S, X> {
    /// Converts `value` into its transformed tree, without emitting it.
    pub fn encode_tree<T>(&self, value: &T) -> Result<Value, Error>
    where
        S: ValueSerializer<T>,
    {
        let node = to_tree(self.inner, value)?;
        log::trace!("transform_serialize <- {node}");

        let node = self
            .transform
            .transform_serialize(node)
            .inspect_err(|e| log::debug!("transform_serialize rejected the tree: {e}"))?;
        log::trace!("transform_serialize -> {node}");

        Ok(node)
    }

    /// Materializes a value from an untransformed tree.
    pub fn decode_tree<T>(&self, node: Value) -> Result<T, Error>
    where
        S: ValueSerializer<T>,
    {
        log::trace!("transform_deserialize <- {node}");

        let node = self
            .transform
            .transform_deserialize(node)
            .inspect_err(|e| log::debug!("transform_deserialize rejected the tree: {e}"))?;
        log::trace!("transform_deserialize -> {node}");

        from_tree(self.inner, node)
    }
}

impl<T, S, X> ValueSerializer<T> for TransformingSerializer<'_, S, X>
where
    S: ValueSerializer<T> + ?Sized,
    X: TreeTransform,
{
    #[inline]
    fn descriptor(&self) -> Arc<Descriptor> {
        self.transform.descriptor(&self.inner.descriptor())
    }

    fn serialize(&self, encoder: &mut dyn Encoder, value: &T) -> Result<(), Error> {
        let format = encoder.format_name();
        let Some(output) = encoder.tree_encoder() else {
            log::debug!("format `{format}` has no tree output");
            return Err(Error::UnsupportedContext {
                format,
                direction: Direction::Encode,
            });
        };

        let node = self.encode_tree(value)?;
        output.emit_tree(node)
    }

    fn deserialize(&self, decoder: &mut dyn Decoder) -> Result<T, Error> {
        let format = decoder.format_name();
        let Some(input) = decoder.tree_decoder() else {
            log::debug!("format `{format}` has no tree input");
            return Err(Error::UnsupportedContext {
                format,
                direction: Direction::Decode,
            });
        };

        let node = input.read_tree()?;
        self.decode_tree(node)
    }
}

// -----------------------------------------------------------------------------
// Tests
