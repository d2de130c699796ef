//! Registration and dispatch errors.
//!
//! ```text
//! RegistrationError - class registration failures
//! RuntimeError      - construction, dispatch and finalization failures
//!  └── Native       - wraps a NativeError raised inside an adapter
//! ```

use thiserror::Error;

use crate::native_error::NativeError;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while registering a native class.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A referenced class was not found.
    #[error("type not found: {0}")]
    TypeNotFound(String),

    /// The declaration is invalid.
    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),

    /// A lifecycle behavior required by another one is missing.
    #[error("type '{type_name}' is missing its {behavior}")]
    MissingBehavior {
        type_name: String,
        behavior: &'static str,
    },
}

// ============================================================================
// Runtime Errors
// ============================================================================

/// Errors surfaced to the caller of a script-facing operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// No class is registered under this name.
    #[error("unknown class '{0}'")]
    UnknownClass(String),

    /// The class and its bases have no method with this name.
    #[error("class '{class}' has no method '{method}'")]
    UnknownMethod { class: String, method: String },

    /// The class was registered without a constructor.
    #[error("class '{0}' cannot be constructed from script")]
    NotConstructible(String),

    /// The receiver passed to a method call is not an object handle.
    #[error("attempt to call method '{method}' on a {actual} value")]
    InvalidReceiver { method: String, actual: &'static str },

    /// A constructor adapter did not push an object handle.
    #[error("constructor of '{0}' did not produce an instance")]
    InvalidConstructorResult(String),

    /// A native adapter reported an error.
    #[error("{class}.{method}: {source}")]
    Native {
        class: String,
        method: String,
        #[source]
        source: NativeError,
    },

    /// A registration error raised through the runtime.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl RuntimeError {
    /// The adapter error behind this failure, if any.
    pub fn native(&self) -> Option<&NativeError> {
        match self {
            RuntimeError::Native { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Check if this is a type error reported by an adapter.
    pub fn is_type_error(&self) -> bool {
        self.native().is_some_and(NativeError::is_type_mismatch)
    }
}

// ============================================================================
// Tests
// ============================================================================
