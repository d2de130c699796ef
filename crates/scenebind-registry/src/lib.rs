//! Class registration for the scenebind runtime.
//!
//! A binder describes a native class with a [`ClassDef`] and hands it to
//! [`ClassRegistry::register_class`]. The registry resolves method calls on
//! the class itself first and then along its base-class chain.

mod class;
mod registry;

pub use class::{ClassDef, ClassEntry};
pub use registry::ClassRegistry;

pub use scenebind_core::{NativeFn, RegistrationError, TypeHash};
