use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use retree_format::{Descriptor, Error, Value};

use crate::TreeTransform;

type Hook = Box<dyn Fn(Value) -> Result<Value, Error> + Send + Sync>;

/// A [`TreeTransform`] built from closures.
///
/// A missing closure means identity; a missing descriptor means the inner
/// serializer's own.
///
/// # Examples
///
/// ```
/// use retree_format::{Error, SerdeSerializer, Value, from_str};
/// use retree_transform::{FnTransform, TransformingSerializer};
///
/// // Accept numbers written as strings.
/// let lenient = FnTransform::new().on_deserialize(|node| match node {
///     Value::String(s) => s
///         .parse::<u64>()
///         .map(Value::from)
///         .map_err(Error::transform),
///     other => Ok(other),
/// });
///
/// let inner = SerdeSerializer::<u64>::new();
/// let serializer = TransformingSerializer::with_transform(&inner, lenient);
///
/// assert_eq!(from_str::<u64, _>(&serializer, r#""42""#).unwrap(), 42);
/// assert_eq!(from_str::<u64, _>(&serializer, "7").unwrap(), 7);
/// ```
#[derive(Default)]
pub struct FnTransform {
    on_serialize: Option<Hook>,
    on_deserialize: Option<Hook>,
    descriptor: Option<Arc<Descriptor>>,
}

impl FnTransform {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hook applied before emission.
    pub fn on_serialize(
        mut self,
        hook: impl Fn(Value) -> Result<Value, Error> + Send + Sync + 'static,
    ) -> Self {
        self.on_serialize = Some(Box::new(hook));
        self
    }

    /// Sets the hook applied before the inner serializer reads the tree.
    pub fn on_deserialize(
        mut self,
        hook: impl Fn(Value) -> Result<Value, Error> + Send + Sync + 'static,
    ) -> Self {
        self.on_deserialize = Some(Box::new(hook));
        self
    }

    /// Replaces the advertised descriptor.
    #[inline]
    pub fn with_descriptor(mut self, descriptor: Arc<Descriptor>) -> Self {
        self.descriptor = Some(descriptor);
        self
    }
}

impl TreeTransform for FnTransform {
    fn transform_serialize(&self, node: Value) -> Result<Value, Error> {
        match &self.on_serialize {
            Some(hook) => hook(node),
            None => Ok(node),
        }
    }

    fn transform_deserialize(&self, node: Value) -> Result<Value, Error> {
        match &self.on_deserialize {
            Some(hook) => hook(node),
            None => Ok(node),
        }
    }

    fn descriptor(&self, inner: &Arc<Descriptor>) -> Arc<Descriptor> {
        Arc::clone(self.descriptor.as_ref().unwrap_or(inner))
    }
}

impl fmt::Debug for FnTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform")
            .field("on_serialize", &self.on_serialize.is_some())
            .field("on_deserialize", &self.on_deserialize.is_some())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
