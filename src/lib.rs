//! Script bindings for ref-counted native scene-graph classes.
//!
//! This crate lets an embedded scripting runtime construct, call methods on
//! and finalize native scene objects such as [`Viewport`], a compositing
//! node derived from [`Sprite`].
//!
//! # Crate layout
//!
//! - `scenebind-core`: value model, object heap, call context, errors
//! - `scenebind-registry`: class registration and method resolution
//! - `scenebind-scene`: the native classes being bound
//! - `scenebind`: the [`Runtime`] and the [`binders`]
//!
//! # Example
//!
//! ```ignore
//! use scenebind::{Application, Dynamic, Runtime};
//!
//! let mut rt = Runtime::with_default_classes(Application::default())?;
//! let viewport = rt.construct("Viewport")?;
//! let matrix = rt.construct("Matrix")?;
//!
//! rt.call_method(&matrix, "setScale", &[Dynamic::Float(2.0)])?;
//! rt.call_method(&viewport, "setTransform", &[matrix.to_dynamic()])?;
//! ```

pub mod binders;
mod runtime;

pub use runtime::{Binder, FinalizeError, Runtime, ScriptRef};

pub use scenebind_core::{
    Arg, CallContext, ConversionError, Dynamic, FromDynamic, IntoDynamic, NativeClass,
    NativeError, NativeFn, NativeObject, ObjectHandle, ObjectHeap, RegistrationError,
    RuntimeError, TypeHash,
};
pub use scenebind_registry::{ClassDef, ClassEntry, ClassRegistry};
pub use scenebind_scene::{AppSettings, Application, Matrix, Orientation, ScaleMode, Sprite, Viewport};
