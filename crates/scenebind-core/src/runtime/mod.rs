//! Native object storage and call marshaling.
//!
//! ## Key Types
//!
//! - [`Dynamic`]: Runtime value type for argument and result slots
//! - [`NativeObject`] / [`NativeClass`]: What a heap-stored native object implements
//! - [`ObjectHeap`]: Generational arena for reference-counted objects
//! - [`CallContext`]: Bridge between the scripting runtime and an adapter
//! - [`Arg`]: Missing / wrong-type / value view of one argument position
//! - [`NativeFn`]: Type-erased adapter wrapper with a declared result arity

mod call_context;
mod dynamic;
mod native_fn;
mod native_object;
mod object_heap;

pub use call_context::{Arg, CallContext};
pub use dynamic::Dynamic;
pub use native_fn::{NativeCallable, NativeFn};
pub use native_object::{NativeClass, NativeObject};
pub use object_heap::{ObjectHandle, ObjectHeap};
