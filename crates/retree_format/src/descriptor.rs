use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::fmt;

use serde_json::Value;

// -----------------------------------------------------------------------------
// ShapeKind

/// An enumeration of the tree shapes a serializer may advertise.
///
/// `Any` is used when the shape is only known at runtime, which is
/// the default for [`SerdeSerializer`](crate::SerdeSerializer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Any,
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl ShapeKind {
    /// Returns the kind of an actual tree node. Never returns `Any`.
    pub const fn of(node: &Value) -> Self {
        match node {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.pad("Any"),
            Self::Object => f.pad("Object"),
            Self::Array => f.pad("Array"),
            Self::String => f.pad("String"),
            Self::Number => f.pad("Number"),
            Self::Boolean => f.pad("Boolean"),
            Self::Null => f.pad("Null"),
        }
    }
}

// -----------------------------------------------------------------------------
// Element

/// A named child of a [`Descriptor`], e.g. an object key or a list item.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: Cow<'static, str>,
    descriptor: Arc<Descriptor>,
    optional: bool,
}

impl Element {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn descriptor(&self) -> &Arc<Descriptor> {
        &self.descriptor
    }

    /// Whether the element may be absent from the tree.
    #[inline]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }
}

// -----------------------------------------------------------------------------
// Descriptor

/// Shape metadata advertised by a serializer to introspection tooling.
///
/// Descriptors are handed out as shared [`Arc`]s and are never copied by
/// wrapping serializers. They are metadata only: nothing checks an actual
/// tree against the descriptor at runtime.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use retree_format::{Descriptor, ShapeKind};
///
/// let name = Arc::new(Descriptor::new("String", ShapeKind::String));
/// let user = Descriptor::new("User", ShapeKind::Object)
///     .with_element("name", name.clone())
///     .with_optional_element("nickname", name);
///
/// assert_eq!(user.element_count(), 2);
/// assert_eq!(user.element("nickname").map(|e| e.is_optional()), Some(true));
/// assert_eq!(user.element_index("name"), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    serial_name: Cow<'static, str>,
    kind: ShapeKind,
    nullable: bool,
    // In declaration order, the order a serializer writes them.
    elements: Vec<Element>,
}

impl Descriptor {
    /// Creates a descriptor without elements.
    pub fn new(serial_name: impl Into<Cow<'static, str>>, kind: ShapeKind) -> Self {
        Self {
            serial_name: serial_name.into(),
            kind,
            nullable: false,
            elements: Vec::new(),
        }
    }

    /// Creates a descriptor of kind [`ShapeKind::Any`].
    #[inline]
    pub fn any(serial_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(serial_name, ShapeKind::Any)
    }

    /// Marks the described value as accepting `null`.
    #[inline]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Appends a required element.
    pub fn with_element(
        mut self,
        name: impl Into<Cow<'static, str>>,
        descriptor: Arc<Descriptor>,
    ) -> Self {
        self.elements.push(Element {
            name: name.into(),
            descriptor,
            optional: false,
        });
        self
    }

    /// Appends an element that may be absent.
    pub fn with_optional_element(
        mut self,
        name: impl Into<Cow<'static, str>>,
        descriptor: Arc<Descriptor>,
    ) -> Self {
        self.elements.push(Element {
            name: name.into(),
            descriptor,
            optional: true,
        });
        self
    }

    #[inline]
    pub fn serial_name(&self) -> &str {
        &self.serial_name
    }

    #[inline]
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the elements in declaration order.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the [`Element`] with the given `name`, if present.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name() == name)
    }

    /// Returns the declaration index of the element with the given `name`.
    pub fn element_index(&self, name: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.name() == name)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use serde_json::json;

    use super::{Descriptor, ShapeKind};

    #[test]
    fn kind_of_nodes() {
        assert_eq!(ShapeKind::of(&json!(null)), ShapeKind::Null);
        assert_eq!(ShapeKind::of(&json!(true)), ShapeKind::Boolean);
        assert_eq!(ShapeKind::of(&json!(1.5)), ShapeKind::Number);
        assert_eq!(ShapeKind::of(&json!("a")), ShapeKind::String);
        assert_eq!(ShapeKind::of(&json!([1])), ShapeKind::Array);
        assert_eq!(ShapeKind::of(&json!({"a": 1})), ShapeKind::Object);
    }

    #[test]
    fn kind_display_pads() {
        assert_eq!(format!("{:<8}|", ShapeKind::Array), "Array   |");
    }

    #[test]
    fn elements_keep_declaration_order() {
        let leaf = Arc::new(Descriptor::new("u32", ShapeKind::Number));
        let desc = Descriptor::new("Point", ShapeKind::Object)
            .with_element("y", leaf.clone())
            .with_element("x", leaf.clone())
            .nullable();

        let names: Vec<&str> = desc.elements().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["y", "x"]);
        assert!(desc.is_nullable());
        assert!(Arc::ptr_eq(desc.elements()[1].descriptor(), &leaf));
        assert!(desc.element("z").is_none());
    }
}
