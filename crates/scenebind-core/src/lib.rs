//! Core types for the scenebind scripting bridge.
//!
//! This crate holds everything a binder needs to marshal calls between a
//! scripting runtime and native, reference-counted scene objects:
//!
//! - [`TypeHash`]: deterministic identity for classes and their methods
//! - [`Dynamic`]: the value stored in script argument and result slots
//! - [`ObjectHeap`]: generational, reference-counted storage for native objects
//! - [`CallContext`]: 1-based argument access and result pushing for adapters
//! - [`NativeFn`]: a type-erased adapter with a declared result arity
//! - Error types shared by every layer
//!
//! Registration lives in `scenebind-registry`; the runtime that ties the two
//! together lives in the `scenebind` crate.

pub mod convert;
pub mod error;
pub mod native_error;
pub mod runtime;
pub mod type_hash;

pub use convert::{FromDynamic, IntoDynamic};
pub use error::{RegistrationError, RuntimeError};
pub use native_error::{ConversionError, NativeError};
pub use runtime::{
    Arg, CallContext, Dynamic, NativeCallable, NativeClass, NativeFn, NativeObject, ObjectHandle,
    ObjectHeap,
};
pub use type_hash::TypeHash;
