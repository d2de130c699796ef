//! Errors raised inside native adapters.

use thiserror::Error;

/// Errors converting a [`Dynamic`](crate::Dynamic) slot into a Rust value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The slot holds a different kind of value.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer does not fit in the target type.
    #[error("integer overflow: {value} doesn't fit in {target_type}")]
    IntegerOverflow {
        value: i64,
        target_type: &'static str,
    },

    /// A float does not fit in the target type.
    #[error("float {value} cannot be represented as {target_type}")]
    FloatConversion {
        value: f64,
        target_type: &'static str,
    },

    /// A null value was used where an object handle was required.
    #[error("null cannot be converted to {target_type}")]
    NullHandle { target_type: &'static str },
}

/// Errors reported by a native adapter back to the calling script.
///
/// Every variant aborts the current call; adapters check their arguments
/// before touching native state, so no partial mutation is left behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    /// An argument position past the end of the call's arguments.
    #[error("argument #{index} out of bounds ({count} arguments)")]
    ArgumentIndexOutOfBounds { index: usize, count: usize },

    /// An argument is not an instance of the expected class.
    #[error("bad argument #{index}: {expected} expected, got {actual}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        actual: String,
    },

    /// A primitive argument could not be converted.
    #[error("bad argument #{index}: {source}")]
    Conversion {
        index: usize,
        #[source]
        source: ConversionError,
    },

    /// A value that should be an object handle is not one.
    #[error("invalid handle: {0}")]
    InvalidHandle(String),

    /// The handle refers to an object that has already been freed.
    #[error("stale handle: object at index {index} has been freed")]
    StaleHandle { index: u32 },

    /// The runtime's host context is not of the requested type.
    #[error("host context is not a {expected}")]
    HostUnavailable { expected: &'static str },

    /// A native operation rejected the call.
    #[error("{0}")]
    Other(String),
}

impl NativeError {
    /// Build a type mismatch for argument `index`.
    pub fn type_mismatch(index: usize, expected: &'static str, actual: impl Into<String>) -> Self {
        NativeError::TypeMismatch {
            index,
            expected,
            actual: actual.into(),
        }
    }

    /// Build an error carrying a free-form message.
    pub fn other(message: impl Into<String>) -> Self {
        NativeError::Other(message.into())
    }

    /// Check if this error reports a wrong argument type.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            NativeError::TypeMismatch { .. } | NativeError::Conversion { .. }
        )
    }
}
