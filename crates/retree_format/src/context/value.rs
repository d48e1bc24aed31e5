use alloc::boxed::Box;

use serde_json::Value;

use super::{Decoder, Encoder, TreeDecoder, TreeEncoder};
use crate::Error;

const FORMAT_NAME: &str = "tree";

// -----------------------------------------------------------------------------
// ValueEncoder

/// An in-memory sink for a single tree node.
///
/// Holds the most recently emitted node; retrieve it with
/// [`into_tree`](Self::into_tree).
#[derive(Debug, Default)]
pub struct ValueEncoder {
    tree: Option<Value>,
}

impl ValueEncoder {
    #[inline]
    pub const fn new() -> Self {
        Self { tree: None }
    }

    /// Returns the emitted node, or [`Error::EmptyOutput`] if nothing was emitted.
    #[inline]
    pub fn into_tree(self) -> Result<Value, Error> {
        self.tree.ok_or(Error::EmptyOutput)
    }
}

impl Encoder for ValueEncoder {
    #[inline]
    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn encode_serde(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), Error> {
        let node = serde_json::to_value(value).map_err(Error::codec)?;
        self.tree = Some(node);
        Ok(())
    }

    #[inline]
    fn tree_encoder(&mut self) -> Option<&mut dyn TreeEncoder> {
        Some(self)
    }
}

impl TreeEncoder for ValueEncoder {
    #[inline]
    fn emit_tree(&mut self, node: Value) -> Result<(), Error> {
        self.tree = Some(node);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ValueDecoder

/// An in-memory source holding a single tree node.
#[derive(Debug)]
pub struct ValueDecoder {
    tree: Option<Value>,
}

impl ValueDecoder {
    #[inline]
    pub const fn new(node: Value) -> Self {
        Self { tree: Some(node) }
    }

    /// Whether the node was already consumed.
    #[inline]
    pub const fn is_drained(&self) -> bool {
        self.tree.is_none()
    }

    #[inline]
    fn take(&mut self) -> Result<Value, Error> {
        self.tree.take().ok_or(Error::EndOfInput)
    }
}

impl Decoder for ValueDecoder {
    #[inline]
    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn erased_deserializer(
        &mut self,
    ) -> Result<Box<dyn erased_serde::Deserializer<'static> + '_>, Error> {
        let node = self.take()?;
        Ok(Box::new(<dyn erased_serde::Deserializer>::erase(node)))
    }

    #[inline]
    fn tree_decoder(&mut self) -> Option<&mut dyn TreeDecoder> {
        Some(self)
    }
}

impl TreeDecoder for ValueDecoder {
    #[inline]
    fn read_tree(&mut self) -> Result<Value, Error> {
        self.take()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ValueDecoder, ValueEncoder};
    use crate::Error;
    use crate::context::{Decoder, Encoder, TreeDecoder, TreeEncoder};

    #[test]
    fn empty_encoder() {
        assert!(matches!(
            ValueEncoder::new().into_tree(),
            Err(Error::EmptyOutput)
        ));
    }

    #[test]
    fn encoder_keeps_last_node() {
        let mut encoder = ValueEncoder::new();
        encoder.encode_serde(&1u8).unwrap();
        encoder.tree_encoder().unwrap().emit_tree(json!([2])).unwrap();
        assert_eq!(encoder.into_tree().unwrap(), json!([2]));
    }

    #[test]
    fn decoder_yields_node_once() {
        let mut decoder = ValueDecoder::new(json!("str1"));
        assert!(!decoder.is_drained());
        assert_eq!(decoder.read_tree().unwrap(), json!("str1"));
        assert!(decoder.is_drained());
        assert!(matches!(decoder.read_tree(), Err(Error::EndOfInput)));
        assert!(matches!(
            decoder.erased_deserializer().map(|_| ()),
            Err(Error::EndOfInput)
        ));
    }

    #[test]
    fn erased_path_consumes_node() {
        let mut decoder = ValueDecoder::new(json!({"a": [true]}));
        let mut de = decoder.erased_deserializer().unwrap();
        let value: alloc::collections::BTreeMap<String, Vec<bool>> =
            erased_serde::deserialize(&mut *de).unwrap();
        assert_eq!(value["a"], [true]);
    }

    #[test]
    #[cfg(feature = "arbitrary_precision")]
    fn wide_integers_keep_their_value() {
        let wide = u64::MAX as u128 + 1;

        let mut encoder = ValueEncoder::new();
        encoder.encode_serde(&wide).unwrap();
        let node = encoder.into_tree().unwrap();
        assert_eq!(node.to_string(), "18446744073709551616");

        let mut decoder = ValueDecoder::new(node);
        let mut de = decoder.erased_deserializer().unwrap();
        let back: u128 = erased_serde::deserialize(&mut *de).unwrap();
        assert_eq!(back, wide);
    }
}
