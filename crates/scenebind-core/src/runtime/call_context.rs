//! Call context bridging the scripting runtime and native adapters.

use std::any::Any;
use std::fmt;

use crate::convert::{FromDynamic, IntoDynamic};
use crate::native_error::NativeError;

use super::{Dynamic, NativeClass, NativeObject, ObjectHandle, ObjectHeap};

/// One argument position as seen by an adapter.
///
/// Scripts distinguish "nothing passed" from "something of the wrong type
/// passed", and adapters with optional parameters treat the two differently.
/// An explicit `nil` is a value like any other, so for a typed lookup it
/// lands in [`Arg::WrongType`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<T> {
    /// The caller passed fewer arguments than this position.
    Missing,
    /// The caller passed a value that does not resolve to `T`.
    WrongType,
    /// The resolved value.
    Value(T),
}

impl<T> Arg<T> {
    /// The value, treating both missing and mismatched arguments as absent.
    pub fn value(self) -> Option<T> {
        match self {
            Arg::Value(value) => Some(value),
            Arg::Missing | Arg::WrongType => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Arg::Missing)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Arg<U> {
        match self {
            Arg::Missing => Arg::Missing,
            Arg::WrongType => Arg::WrongType,
            Arg::Value(value) => Arg::Value(f(value)),
        }
    }
}

/// Context for native adapter calls.
///
/// Arguments are addressed by 1-based position, as on a script call stack:
/// for methods, position 1 is the receiver. Results are pushed in order and
/// the adapter's declared arity is checked by [`NativeFn`](super::NativeFn).
///
/// ```ignore
/// let this = ctx.this_handle::<Sprite>()?;
/// let x: f32 = ctx.arg(2)?;
/// let y: f32 = ctx.arg(3)?;
/// ```
pub struct CallContext<'vm> {
    /// Call arguments, position 1 first
    args: &'vm [Dynamic],
    /// Values pushed back to the caller
    results: &'vm mut Vec<Dynamic>,
    /// Object heap for native instances
    heap: &'vm mut ObjectHeap,
    /// Hosting application, passed explicitly by the runtime
    host: &'vm dyn Any,
}

impl<'vm> CallContext<'vm> {
    /// Create a new call context.
    ///
    /// # Arguments
    ///
    /// * `args` - The call arguments (for methods, the first one is the receiver)
    /// * `results` - Where pushed results go
    /// * `heap` - Object heap holding native instances
    /// * `host` - The hosting application object
    pub fn new(
        args: &'vm [Dynamic],
        results: &'vm mut Vec<Dynamic>,
        heap: &'vm mut ObjectHeap,
        host: &'vm dyn Any,
    ) -> Self {
        Self {
            args,
            results,
            heap,
            host,
        }
    }

    /// Get the number of arguments passed.
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Get the raw slot at a 1-based position.
    pub fn arg_slot(&self, index: usize) -> Result<&Dynamic, NativeError> {
        self.slot(index).ok_or(NativeError::ArgumentIndexOutOfBounds {
            index,
            count: self.arg_count(),
        })
    }

    fn slot(&self, index: usize) -> Option<&Dynamic> {
        index.checked_sub(1).and_then(|i| self.args.get(i))
    }

    /// Check whether the caller passed anything at this position.
    pub fn is_none(&self, index: usize) -> bool {
        self.slot(index).is_none()
    }

    /// Get a typed argument value.
    ///
    /// ```ignore
    /// let x: f32 = ctx.arg(2)?;
    /// let visible: bool = ctx.arg(2)?;
    /// ```
    pub fn arg<T: FromDynamic>(&self, index: usize) -> Result<T, NativeError> {
        let slot = self.arg_slot(index)?;
        T::from_dynamic(slot).map_err(|source| NativeError::Conversion { index, source })
    }

    /// Get a typed optional argument.
    pub fn opt_arg<T: FromDynamic>(&self, index: usize) -> Arg<T> {
        match self.slot(index) {
            None => Arg::Missing,
            Some(slot) => match T::from_dynamic(slot) {
                Ok(value) => Arg::Value(value),
                Err(_) => Arg::WrongType,
            },
        }
    }

    /// Resolve the handle at `index` as an instance of `T` or of a class
    /// derived from it.
    ///
    /// Fails with a type mismatch if nothing was passed, the value is not an
    /// object, the object is not a `T`, or the object has been freed.
    pub fn instance_handle<T: NativeClass>(&self, index: usize) -> Result<ObjectHandle, NativeError> {
        let Some(slot) = self.slot(index) else {
            return Err(NativeError::type_mismatch(index, T::CLASS_NAME, "no value"));
        };
        let Dynamic::Object(handle) = slot else {
            return Err(NativeError::type_mismatch(index, T::CLASS_NAME, slot.type_name()));
        };
        match self.heap.get_object(*handle) {
            Some(object) if object.is::<T>() => Ok(*handle),
            Some(_) => Err(NativeError::type_mismatch(
                index,
                T::CLASS_NAME,
                self.heap.class_name(*handle).unwrap_or("object"),
            )),
            None => Err(NativeError::type_mismatch(index, T::CLASS_NAME, "freed object")),
        }
    }

    /// Resolve the receiver (position 1) as an instance of `T`.
    pub fn this_handle<T: NativeClass>(&self) -> Result<ObjectHandle, NativeError> {
        self.instance_handle::<T>(1)
    }

    /// Borrow the instance at `index` as a `T`.
    pub fn instance<T: NativeClass>(&self, index: usize) -> Result<&T, NativeError> {
        let handle = self.instance_handle::<T>(index)?;
        self.heap
            .get::<T>(handle)
            .ok_or(NativeError::StaleHandle {
                index: handle.index,
            })
    }

    /// Mutably borrow the instance at `index` as a `T`.
    pub fn instance_mut<T: NativeClass>(&mut self, index: usize) -> Result<&mut T, NativeError> {
        let handle = self.instance_handle::<T>(index)?;
        self.heap
            .get_mut::<T>(handle)
            .ok_or(NativeError::StaleHandle {
                index: handle.index,
            })
    }

    /// Borrow an optional instance argument.
    ///
    /// Stale handles count as [`Arg::WrongType`].
    pub fn opt_instance<T: NativeClass>(&self, index: usize) -> Arg<&T> {
        match self.slot(index) {
            None => Arg::Missing,
            Some(Dynamic::Object(handle)) => match self.heap.get::<T>(*handle) {
                Some(value) => Arg::Value(value),
                None => Arg::WrongType,
            },
            Some(_) => Arg::WrongType,
        }
    }

    /// Push a typed result value.
    pub fn push<T: IntoDynamic>(&mut self, value: T) {
        self.results.push(value.into_dynamic());
    }

    /// Allocate `value` on the heap and push its handle.
    ///
    /// The new object starts with one reference, owned by the caller that
    /// receives the pushed handle.
    pub fn push_instance<T: NativeClass>(&mut self, value: T) -> ObjectHandle {
        let handle = self.heap.allocate(value);
        self.results.push(Dynamic::Object(handle));
        handle
    }

    /// Number of results pushed so far.
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// The hosting application, downcast to `H`.
    pub fn host<H: Any>(&self) -> Result<&H, NativeError> {
        self.host
            .downcast_ref::<H>()
            .ok_or(NativeError::HostUnavailable {
                expected: std::any::type_name::<H>(),
            })
    }

    /// Get access to the object heap.
    pub fn heap(&self) -> &ObjectHeap {
        self.heap
    }

    /// Get mutable access to the object heap.
    pub fn heap_mut(&mut self) -> &mut ObjectHeap {
        self.heap
    }

    /// Typed access to an object behind an already-resolved handle.
    pub fn get_mut<T: NativeObject>(&mut self, handle: ObjectHandle) -> Result<&mut T, NativeError> {
        self.heap
            .get_mut::<T>(handle)
            .ok_or(NativeError::StaleHandle {
                index: handle.index,
            })
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("arg_count", &self.arg_count())
            .field("result_count", &self.result_count())
            .finish()
    }
}
