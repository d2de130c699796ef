//! Script bindings for the native scene classes.
//!
//! Each submodule exposes a `class()` function returning the [`ClassDef`]
//! for one class, with its constructor, destructor and method adapters.
//! Base classes must be installed before the classes deriving from them,
//! which [`default_classes`] takes care of.

use scenebind_core::{CallContext, Dynamic, NativeError};
use scenebind_registry::ClassDef;

pub mod matrix;
pub mod sprite;
pub mod viewport;

/// All built-in class definitions, base classes first.
pub fn default_classes() -> Vec<ClassDef> {
    vec![sprite::class(), matrix::class(), viewport::class()]
}

/// Destructor adapter shared by every bound class.
///
/// Gives back the script's reference exactly once. The object is freed by
/// the heap when no other holder remains; this never frees it directly.
pub(crate) fn release(ctx: &mut CallContext) -> Result<(), NativeError> {
    let handle = match ctx.arg_slot(1)? {
        Dynamic::Object(handle) => *handle,
        other => {
            return Err(NativeError::InvalidHandle(format!(
                "expected an object handle, got {}",
                other.type_name()
            )));
        }
    };
    if !ctx.heap().contains(handle) {
        return Err(NativeError::StaleHandle {
            index: handle.index,
        });
    }
    ctx.heap_mut().release(handle);
    Ok(())
}
