//! Encode and decode contexts.
//!
//! Every context offers a format-agnostic primitive backed by
//! [`erased_serde`], which is all a plain serde-backed serializer needs.
//!
//! Some contexts can additionally hand over a whole [`Value`] at once.
//! This capability is queried through [`Encoder::tree_encoder`] and
//! [`Decoder::tree_decoder`]; serializers that work on trees must fail with
//! [`Error::UnsupportedContext`] when it is missing.
//!
//! [`Error::UnsupportedContext`]: crate::Error::UnsupportedContext

use alloc::boxed::Box;

use serde_json::Value;

use crate::Error;

// -----------------------------------------------------------------------------
// Modules

mod json;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use json::{JsonDecoder, JsonEncoder};
pub use value::{ValueDecoder, ValueEncoder};

// -----------------------------------------------------------------------------
// Encoding

/// Output side of a serialization.
pub trait Encoder {
    /// A short name of the format, used in error messages.
    fn format_name(&self) -> &'static str;

    /// Writes a value through the format's own serde implementation.
    fn encode_serde(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), Error>;

    /// Returns the tree capability, if the format has one.
    #[inline]
    fn tree_encoder(&mut self) -> Option<&mut dyn TreeEncoder> {
        None
    }
}

/// Capability of accepting a fully built tree node.
pub trait TreeEncoder {
    fn emit_tree(&mut self, node: Value) -> Result<(), Error>;
}

// -----------------------------------------------------------------------------
// Decoding

/// Input side of a deserialization.
pub trait Decoder {
    /// A short name of the format, used in error messages.
    fn format_name(&self) -> &'static str;

    /// Returns a type-erased deserializer positioned at the next value.
    fn erased_deserializer(
        &mut self,
    ) -> Result<Box<dyn erased_serde::Deserializer<'static> + '_>, Error>;

    /// Returns the tree capability, if the format has one.
    #[inline]
    fn tree_decoder(&mut self) -> Option<&mut dyn TreeDecoder> {
        None
    }
}

/// Capability of producing the next value of the input as a whole node.
pub trait TreeDecoder {
    fn read_tree(&mut self) -> Result<Value, Error>;
}
