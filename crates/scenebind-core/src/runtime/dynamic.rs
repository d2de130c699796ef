//! Runtime value type for script slots.

use std::fmt;

use super::ObjectHandle;

/// A value passed across the scripting boundary.
///
/// Native objects never live inside a `Dynamic`: they are stored in the
/// [`ObjectHeap`](super::ObjectHeap) and referenced through
/// [`Dynamic::Object`]. That keeps `Dynamic` cheap to clone and makes every
/// native reference go through the heap's reference counts.
///
/// An explicit script `nil` is [`Dynamic::Null`]. An argument the caller did
/// not pass at all has no slot; see [`Arg::Missing`](super::Arg::Missing).
#[derive(Clone, PartialEq)]
pub enum Dynamic {
    /// Explicit null/nil
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (all integer widths are stored as i64)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value (owned)
    String(String),
    /// Handle to a heap-allocated native object
    Object(ObjectHandle),
}

impl Dynamic {
    /// Get a human-readable name for this slot's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "nil",
            Dynamic::Bool(_) => "bool",
            Dynamic::Int(_) => "int",
            Dynamic::Float(_) => "float",
            Dynamic::String(_) => "string",
            Dynamic::Object(_) => "object",
        }
    }

    /// The object handle held by this slot, if any.
    pub fn as_object(&self) -> Option<ObjectHandle> {
        match self {
            Dynamic::Object(handle) => Some(*handle),
            _ => None,
        }
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Null => write!(f, "Null"),
            Dynamic::Bool(v) => write!(f, "Bool({})", v),
            Dynamic::Int(v) => write!(f, "Int({})", v),
            Dynamic::Float(v) => write!(f, "Float({})", v),
            Dynamic::String(s) => write!(f, "String({:?})", s),
            Dynamic::Object(h) => write!(f, "Object({}:{})", h.index, h.generation),
        }
    }
}

impl From<ObjectHandle> for Dynamic {
    fn from(handle: ObjectHandle) -> Self {
        Dynamic::Object(handle)
    }
}
