#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod api;
mod descriptor;
mod error;
mod serializer;

pub mod context;

// -----------------------------------------------------------------------------
// Top-level exports

pub use api::{from_reader, from_str, to_string, to_string_pretty, to_writer, to_writer_pretty};
pub use descriptor::{Descriptor, Element, ShapeKind};
pub use error::{BoxError, Direction, Error};
pub use serializer::{SerdeSerializer, ValueSerializer, from_tree, to_tree};

pub use erased_serde;
pub use serde_json::Value;
