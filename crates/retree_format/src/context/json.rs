use alloc::boxed::Box;
use std::io;

use serde_core::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::de::IoRead;

use super::{Decoder, Encoder, TreeDecoder, TreeEncoder};
use crate::Error;

const FORMAT_NAME: &str = "json";

// -----------------------------------------------------------------------------
// JsonEncoder

/// Writes JSON text to an [`io::Write`].
///
/// Successive values are separated by a newline, so that the output can be
/// read back value by value with [`JsonDecoder`].
///
/// # Examples
///
/// ```
/// use retree_format::context::{Encoder, JsonEncoder, TreeEncoder};
/// use serde_json::json;
///
/// let mut encoder = JsonEncoder::new(Vec::new());
/// encoder.tree_encoder().unwrap().emit_tree(json!({"a": [1, 2]})).unwrap();
/// encoder.encode_serde(&"tail").unwrap();
///
/// assert_eq!(encoder.into_inner(), b"{\"a\":[1,2]}\n\"tail\"");
/// ```
pub struct JsonEncoder<W> {
    writer: W,
    pretty: bool,
    emitted: usize,
}

impl<W: io::Write> JsonEncoder<W> {
    /// Creates an encoder writing compact JSON.
    #[inline]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
            emitted: 0,
        }
    }

    /// Creates an encoder writing indented JSON.
    #[inline]
    pub const fn pretty(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
            emitted: 0,
        }
    }

    /// Number of values written so far.
    #[inline]
    pub const fn emitted(&self) -> usize {
        self.emitted
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        if self.emitted > 0 {
            self.writer
                .write_all(b"\n")
                .map_err(|e| Error::Emit(serde_json::Error::io(e)))?;
        }

        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value)
        } else {
            serde_json::to_writer(&mut self.writer, value)
        };
        result.map_err(Error::from_json_write)?;

        self.emitted += 1;
        Ok(())
    }
}

impl<W: io::Write> Encoder for JsonEncoder<W> {
    #[inline]
    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn encode_serde(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), Error> {
        self.write_value(value)
    }

    #[inline]
    fn tree_encoder(&mut self) -> Option<&mut dyn TreeEncoder> {
        Some(self)
    }
}

impl<W: io::Write> TreeEncoder for JsonEncoder<W> {
    fn emit_tree(&mut self, node: Value) -> Result<(), Error> {
        log::trace!("json: emitting {node}");
        self.write_value(&node)
    }
}

// -----------------------------------------------------------------------------
// JsonDecoder

/// Reads JSON text from an [`io::Read`].
///
/// The input may hold several whitespace separated values; each read
/// consumes exactly one. Call [`finish`](Self::finish) to reject trailing
/// input once the expected values are consumed.
pub struct JsonDecoder<R: io::Read> {
    de: serde_json::Deserializer<IoRead<R>>,
}

impl<R: io::Read> JsonDecoder<R> {
    #[inline]
    pub fn new(reader: R) -> Self {
        Self {
            de: serde_json::Deserializer::from_reader(reader),
        }
    }

    /// Ensures that only whitespace remains in the input.
    pub fn finish(mut self) -> Result<(), Error> {
        self.de.end().map_err(Error::Read)
    }
}

impl<R: io::Read> Decoder for JsonDecoder<R> {
    #[inline]
    fn format_name(&self) -> &'static str {
        FORMAT_NAME
    }

    fn erased_deserializer(
        &mut self,
    ) -> Result<Box<dyn erased_serde::Deserializer<'static> + '_>, Error> {
        Ok(Box::new(<dyn erased_serde::Deserializer>::erase(
            &mut self.de,
        )))
    }

    #[inline]
    fn tree_decoder(&mut self) -> Option<&mut dyn TreeDecoder> {
        Some(self)
    }
}

impl<R: io::Read> TreeDecoder for JsonDecoder<R> {
    fn read_tree(&mut self) -> Result<Value, Error> {
        let node = Value::deserialize(&mut self.de).map_err(Error::Read)?;
        log::trace!("json: read {node}");
        Ok(node)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::io;

    use serde_json::json;

    use super::{JsonDecoder, JsonEncoder};
    use crate::Error;
    use crate::context::{Decoder, Encoder, TreeDecoder, TreeEncoder};

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn pretty_output() {
        let mut encoder = JsonEncoder::pretty(Vec::new());
        encoder.emit_tree(json!({"a": 1})).unwrap();
        assert_eq!(encoder.emitted(), 1);
        assert_eq!(
            String::from_utf8(encoder.into_inner()).unwrap(),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn io_failure_is_emit_error() {
        let mut encoder = JsonEncoder::new(BrokenPipe);
        let err = encoder.emit_tree(json!("x")).unwrap_err();
        assert!(matches!(err, Error::Emit(_)));
        assert_eq!(encoder.emitted(), 0);
    }

    #[test]
    fn serde_failure_is_codec_error() {
        use alloc::collections::BTreeMap;

        // JSON object keys must be strings.
        let map = BTreeMap::from([(vec![1u8], 1u8)]);
        let mut encoder = JsonEncoder::new(Vec::new());
        assert!(encoder.encode_serde(&map).unwrap_err().is_codec());
    }

    #[test]
    fn reads_values_in_sequence() {
        let mut decoder = JsonDecoder::new(&b" [\"str1\"]\n{\"k\": null} "[..]);
        assert_eq!(decoder.read_tree().unwrap(), json!(["str1"]));
        assert_eq!(decoder.read_tree().unwrap(), json!({"k": null}));
        decoder.finish().unwrap();
    }

    #[test]
    fn erased_path_reads_next_value() {
        let mut decoder = JsonDecoder::new(&b"7 8"[..]);
        assert_eq!(decoder.format_name(), "json");

        let first: u32 = {
            let mut de = decoder.erased_deserializer().unwrap();
            erased_serde::deserialize(&mut *de).unwrap()
        };
        assert_eq!(first, 7);
        assert_eq!(decoder.read_tree().unwrap(), json!(8));
    }

    #[test]
    fn finish_rejects_trailing_input() {
        let mut decoder = JsonDecoder::new(&b"1 ]"[..]);
        decoder.read_tree().unwrap();
        assert!(matches!(decoder.finish(), Err(Error::Read(_))));
    }

    #[test]
    fn syntax_error_is_read_error() {
        let mut decoder = JsonDecoder::new(&b"{\"a\" 1}"[..]);
        assert!(matches!(decoder.read_tree(), Err(Error::Read(_))));
    }
}
