use alloc::boxed::Box;
use core::{error, fmt};

use thiserror::Error;

/// Boxed error raised by inner serializers and transform hooks.
pub type BoxError = Box<dyn error::Error + Send + Sync>;

// -----------------------------------------------------------------------------
// Direction

/// The side of a conversion on which a context was found lacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encode,
    Decode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => f.write_str("encode"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

// -----------------------------------------------------------------------------
// Error

/// A enumeration of all error outcomes of serializing or deserializing
/// through a [`ValueSerializer`](crate::ValueSerializer).
///
/// Errors raised by an inner serializer or by a transform hook are returned
/// as they were produced: wrapping serializers never re-wrap them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The active context cannot emit or read a whole tree node.
    #[error("format `{format}` cannot {direction} a whole tree node")]
    UnsupportedContext {
        format: &'static str,
        direction: Direction,
    },

    /// Raised by a serializer while converting between a value and a tree.
    #[error("{0}")]
    Codec(#[source] BoxError),

    /// Raised by a transform hook.
    #[error("{0}")]
    Transform(#[source] BoxError),

    /// The JSON output could not be written.
    #[error("failed to emit tree: {0}")]
    Emit(#[source] serde_json::Error),

    /// The JSON input could not be read or parsed.
    #[error("failed to read tree: {0}")]
    Read(#[source] serde_json::Error),

    /// An in-memory encoder finished without receiving a node.
    #[error("encoder finished without emitting a tree node")]
    EmptyOutput,

    /// An in-memory decoder was asked for a node it no longer holds.
    #[error("no tree node left in input")]
    EndOfInput,
}

impl Error {
    /// Creates a [`Error::Codec`] from any error or message.
    #[inline]
    pub fn codec(err: impl Into<BoxError>) -> Self {
        Self::Codec(err.into())
    }

    /// Creates a [`Error::Transform`] from any error or message.
    ///
    /// ```
    /// use retree_format::Error;
    ///
    /// let err = Error::transform("array must hold exactly one element");
    /// assert_eq!(err.to_string(), "array must hold exactly one element");
    /// ```
    #[inline]
    pub fn transform(err: impl Into<BoxError>) -> Self {
        Self::Transform(err.into())
    }

    #[inline]
    pub const fn is_unsupported_context(&self) -> bool {
        matches!(self, Self::UnsupportedContext { .. })
    }

    #[inline]
    pub const fn is_codec(&self) -> bool {
        matches!(self, Self::Codec(_))
    }

    #[inline]
    pub const fn is_transform(&self) -> bool {
        matches!(self, Self::Transform(_))
    }

    /// Classifies a `serde_json` failure produced while writing a value:
    /// I/O failures belong to the output, everything else to the value.
    pub(crate) fn from_json_write(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Emit(err)
        } else {
            Self::Codec(Box::new(err))
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
