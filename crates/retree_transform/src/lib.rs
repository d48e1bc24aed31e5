#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bridge;
mod fn_transform;
mod serializer;
mod transform;

pub mod transforms;

// -----------------------------------------------------------------------------
// Exports

pub use bridge::{DeserializeTransformed, SerializeTransformed};
pub use fn_transform::FnTransform;
pub use serializer::TransformingSerializer;
pub use transform::{Chain, TreeTransform, TreeTransformExt};
