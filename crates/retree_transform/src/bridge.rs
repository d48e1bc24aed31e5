//! Adapters between a [`TransformingSerializer`] and plain `serde`.
//!
//! They let the wrapper take part in any serde data format. The tree is
//! always built in memory: serializing emits the transformed tree into the
//! target [`Serializer`], deserializing requires a self-describing format
//! since the whole tree is read with `deserialize_any`.

use core::marker::PhantomData;

use retree_format::{Value, ValueSerializer};
use serde_core::de::{self, DeserializeSeed};
use serde_core::ser;
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{TransformingSerializer, TreeTransform};

// -----------------------------------------------------------------------------
// SerializeTransformed

/// [`Serialize`] adapter returned by [`TransformingSerializer::serializable`].
pub struct SerializeTransformed<'s, 'a, T, S: ?Sized, X> {
    serializer: &'s TransformingSerializer<'a, S, X>,
    value: &'s T,
}

impl<T, S, X> Serialize for SerializeTransformed<'_, '_, T, S, X>
where
    S: ValueSerializer<T> + ?Sized,
    X: TreeTransform,
{
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        let node = self
            .serializer
            .encode_tree(self.value)
            .map_err(ser::Error::custom)?;
        node.serialize(serializer)
    }
}

// -----------------------------------------------------------------------------
// DeserializeTransformed

/// [`DeserializeSeed`] returned by [`TransformingSerializer::seed`].
pub struct DeserializeTransformed<'s, 'a, T, S: ?Sized, X> {
    serializer: &'s TransformingSerializer<'a, S, X>,
    _marker: PhantomData<fn() -> T>,
}

impl<'de, T, S, X> DeserializeSeed<'de> for DeserializeTransformed<'_, '_, T, S, X>
where
    S: ValueSerializer<T> + ?Sized,
    X: TreeTransform,
{
    type Value = T;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<T, D::Error> {
        let node = Value::deserialize(deserializer)?;
        self.serializer
            .decode_tree(node)
            .map_err(de::Error::custom)
    }
}

// -----------------------------------------------------------------------------
// Constructors

impl<'a, S: ?Sized, X: TreeTransform> TransformingSerializer<'a, S, X> {
    /// Returns a [`Serialize`] view of `value` that goes through this wrapper.
    ///
    /// # Examples
    ///
    /// ```
    /// use retree_format::SerdeSerializer;
    /// use retree_transform::TransformingSerializer;
    /// use retree_transform::transforms::WrapInArray;
    ///
    /// let inner = SerdeSerializer::<Vec<u32>>::new();
    /// let serializer = TransformingSerializer::with_transform(&inner, WrapInArray);
    ///
    /// let text = serde_json::to_string(&serializer.serializable(&vec![7])).unwrap();
    /// assert_eq!(text, "7");
    /// ```
    #[inline]
    pub fn serializable<'s, T>(&'s self, value: &'s T) -> SerializeTransformed<'s, 'a, T, S, X>
    where
        S: ValueSerializer<T>,
    {
        SerializeTransformed {
            serializer: self,
            value,
        }
    }

    /// Returns a [`DeserializeSeed`] that goes through this wrapper.
    #[inline]
    pub fn seed<T>(&self) -> DeserializeTransformed<'_, 'a, T, S, X>
    where
        S: ValueSerializer<T>,
    {
        DeserializeTransformed {
            serializer: self,
            _marker: PhantomData,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
