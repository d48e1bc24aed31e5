//! Ready-made [`TreeTransform`](crate::TreeTransform) implementations.

// -----------------------------------------------------------------------------
// Modules

mod omit_field;
mod unwrap_singleton;
mod wrap_in_array;

// -----------------------------------------------------------------------------
// Exports

pub use omit_field::OmitField;
pub use unwrap_singleton::UnwrapSingleton;
pub use wrap_in_array::WrapInArray;
