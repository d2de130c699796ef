//! Traits implemented by every native object stored in the heap.

use std::any::Any;

use super::ObjectHandle;

/// A native object that can live in the [`ObjectHeap`](super::ObjectHeap).
///
/// Derived classes expose their base-class part through [`base`] and
/// [`base_mut`]. Typed lookups try the object itself first and then walk
/// these views, so a handle to a derived object resolves as any of its bases.
///
/// [`base`]: NativeObject::base
/// [`base_mut`]: NativeObject::base_mut
pub trait NativeObject: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The base-class part of this object, if the class has a base.
    fn base(&self) -> Option<&(dyn NativeObject + 'static)> {
        None
    }

    fn base_mut(&mut self) -> Option<&mut (dyn NativeObject + 'static)> {
        None
    }

    /// Handles this object holds a counted reference to.
    ///
    /// The heap releases each of them once when this object is freed.
    fn retained_handles(&self) -> Vec<ObjectHandle> {
        self.base()
            .map(|base| base.retained_handles())
            .unwrap_or_default()
    }
}

/// A native object with a registered class name.
pub trait NativeClass: NativeObject + Sized {
    /// Symbolic name the class is registered under.
    const CLASS_NAME: &'static str;
}

impl dyn NativeObject {
    /// Downcast to `T`, looking through base-class parts.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self.as_any().downcast_ref::<T>() {
            Some(value) => Some(value),
            None => self.base()?.downcast_ref::<T>(),
        }
    }

    /// Mutable counterpart of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        if self.as_any().is::<T>() {
            return self.as_any_mut().downcast_mut::<T>();
        }
        self.base_mut()?.downcast_mut::<T>()
    }

    /// Check if this object is a `T` or derives from one.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}
