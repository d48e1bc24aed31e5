use alloc::sync::Arc;
use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

use serde_core::Serialize;
use serde_core::de::DeserializeOwned;
use serde_json::Value;

use crate::context::{Decoder, Encoder, ValueDecoder, ValueEncoder};
use crate::{Descriptor, Error};

// -----------------------------------------------------------------------------
// ValueSerializer

/// A serializer for values of type `T`.
///
/// This is the contract every serializer fulfills, whether it converts
/// a value directly or wraps another serializer. A serializer is usable
/// anywhere a serializer for `T` is expected, including as the inner
/// serializer of a wrapping one.
pub trait ValueSerializer<T> {
    /// Shape metadata for introspection tooling.
    ///
    /// Implementations hand out a shared [`Arc`] and should return the same
    /// one on every call.
    fn descriptor(&self) -> Arc<Descriptor>;

    fn serialize(&self, encoder: &mut dyn Encoder, value: &T) -> Result<(), Error>;

    fn deserialize(&self, decoder: &mut dyn Decoder) -> Result<T, Error>;
}

impl<T, S: ValueSerializer<T> + ?Sized> ValueSerializer<T> for &S {
    #[inline]
    fn descriptor(&self) -> Arc<Descriptor> {
        (**self).descriptor()
    }

    #[inline]
    fn serialize(&self, encoder: &mut dyn Encoder, value: &T) -> Result<(), Error> {
        (**self).serialize(encoder, value)
    }

    #[inline]
    fn deserialize(&self, decoder: &mut dyn Decoder) -> Result<T, Error> {
        (**self).deserialize(decoder)
    }
}

impl<T, S: ValueSerializer<T> + ?Sized> ValueSerializer<T> for Arc<S> {
    #[inline]
    fn descriptor(&self) -> Arc<Descriptor> {
        (**self).descriptor()
    }

    #[inline]
    fn serialize(&self, encoder: &mut dyn Encoder, value: &T) -> Result<(), Error> {
        (**self).serialize(encoder, value)
    }

    #[inline]
    fn deserialize(&self, decoder: &mut dyn Decoder) -> Result<T, Error> {
        (**self).deserialize(decoder)
    }
}

// -----------------------------------------------------------------------------
// Tree helpers

/// Converts `value` into a tree node through `serializer`.
///
/// # Examples
///
/// ```
/// use retree_format::{SerdeSerializer, to_tree};
/// use serde_json::json;
///
/// let node = to_tree(&SerdeSerializer::new(), &vec![1, 2]).unwrap();
/// assert_eq!(node, json!([1, 2]));
/// ```
pub fn to_tree<T, S>(serializer: &S, value: &T) -> Result<Value, Error>
where
    S: ValueSerializer<T> + ?Sized,
{
    let mut encoder = ValueEncoder::new();
    serializer.serialize(&mut encoder, value)?;
    encoder.into_tree()
}

/// Materializes a value from a tree node through `serializer`.
pub fn from_tree<T, S>(serializer: &S, node: Value) -> Result<T, Error>
where
    S: ValueSerializer<T> + ?Sized,
{
    serializer.deserialize(&mut ValueDecoder::new(node))
}

// -----------------------------------------------------------------------------
// SerdeSerializer

/// A [`ValueSerializer`] backed by the `serde` implementations of `T`.
///
/// It only uses the format-agnostic primitives of the contexts, so it works
/// with every [`Encoder`] and [`Decoder`], tree-capable or not.
///
/// The descriptor is [`Descriptor::any`] named after `T` unless one is
/// supplied with [`with_descriptor`](Self::with_descriptor).
pub struct SerdeSerializer<T> {
    descriptor: Arc<Descriptor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeSerializer<T> {
    #[inline]
    pub fn new() -> Self {
        Self::with_descriptor(Arc::new(Descriptor::any(type_name::<T>())))
    }

    #[inline]
    pub const fn with_descriptor(descriptor: Arc<Descriptor>) -> Self {
        Self {
            descriptor,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeSerializer<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SerdeSerializer<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self::with_descriptor(Arc::clone(&self.descriptor))
    }
}

impl<T> fmt::Debug for SerdeSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerdeSerializer")
            .field("descriptor", &self.descriptor.serial_name())
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> ValueSerializer<T> for SerdeSerializer<T> {
    #[inline]
    fn descriptor(&self) -> Arc<Descriptor> {
        Arc::clone(&self.descriptor)
    }

    #[inline]
    fn serialize(&self, encoder: &mut dyn Encoder, value: &T) -> Result<(), Error> {
        encoder.encode_serde(value)
    }

    fn deserialize(&self, decoder: &mut dyn Decoder) -> Result<T, Error> {
        let mut de = decoder.erased_deserializer()?;
        erased_serde::deserialize::<T>(&mut *de).map_err(Error::codec)
    }
}

// -----------------------------------------------------------------------------
// Tests
