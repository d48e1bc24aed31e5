use std::io;

use crate::context::{JsonDecoder, JsonEncoder};
use crate::{Error, ValueSerializer};

// -----------------------------------------------------------------------------
// Serialization

/// Serializes `value` as compact JSON into `writer`.
pub fn to_writer<T, S, W>(serializer: &S, writer: W, value: &T) -> Result<(), Error>
where
    S: ValueSerializer<T> + ?Sized,
    W: io::Write,
{
    serializer.serialize(&mut JsonEncoder::new(writer), value)
}

/// Serializes `value` as indented JSON into `writer`.
pub fn to_writer_pretty<T, S, W>(serializer: &S, writer: W, value: &T) -> Result<(), Error>
where
    S: ValueSerializer<T> + ?Sized,
    W: io::Write,
{
    serializer.serialize(&mut JsonEncoder::pretty(writer), value)
}

/// Serializes `value` as a compact JSON string.
///
/// # Examples
///
/// ```
/// use retree_format::{SerdeSerializer, to_string};
///
/// let text = to_string(&SerdeSerializer::new(), &(String::from("a"), 1)).unwrap();
/// assert_eq!(text, r#"["a",1]"#);
/// ```
pub fn to_string<T, S>(serializer: &S, value: &T) -> Result<String, Error>
where
    S: ValueSerializer<T> + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    to_writer(serializer, &mut buf, value)?;
    String::from_utf8(buf).map_err(Error::codec)
}

/// Serializes `value` as an indented JSON string.
pub fn to_string_pretty<T, S>(serializer: &S, value: &T) -> Result<String, Error>
where
    S: ValueSerializer<T> + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    to_writer_pretty(serializer, &mut buf, value)?;
    String::from_utf8(buf).map_err(Error::codec)
}

// -----------------------------------------------------------------------------
// Deserialization

/// Deserializes a single JSON value from `reader`.
///
/// Fails if anything but whitespace follows the value.
pub fn from_reader<T, S, R>(serializer: &S, reader: R) -> Result<T, Error>
where
    S: ValueSerializer<T> + ?Sized,
    R: io::Read,
{
    let mut decoder = JsonDecoder::new(reader);
    let value = serializer.deserialize(&mut decoder)?;
    decoder.finish()?;
    Ok(value)
}

/// Deserializes a single JSON value from `text`.
///
/// # Examples
///
/// ```
/// use retree_format::{SerdeSerializer, from_str};
///
/// let value: Vec<String> = from_str(&SerdeSerializer::new(), r#" ["str1"] "#).unwrap();
/// assert_eq!(value, ["str1"]);
/// ```
pub fn from_str<T, S>(serializer: &S, text: &str) -> Result<T, Error>
where
    S: ValueSerializer<T> + ?Sized,
{
    from_reader(serializer, text.as_bytes())
}

// -----------------------------------------------------------------------------
// Tests
