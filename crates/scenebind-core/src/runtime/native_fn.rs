//! Native adapter storage and callable trait.

use std::fmt;
use std::sync::Arc;

use crate::TypeHash;
use crate::native_error::NativeError;

use super::CallContext;

/// Type-erased native adapter.
///
/// This wraps any callable that implements `NativeCallable`, together with
/// the number of results the adapter declares it pushes. [`NativeFn::call`]
/// enforces that arity in debug builds: a successful call must leave exactly
/// `returns` more results than it found. A violation is a defect in the
/// adapter, not a script error, so release builds do not check it.
///
/// The inner callable is wrapped in Arc so registration can clone it cheaply.
pub struct NativeFn {
    /// Unique adapter ID, usually from `TypeHash::from_method`
    pub id: TypeHash,
    returns: usize,
    inner: Arc<dyn NativeCallable + Send + Sync>,
}

impl NativeFn {
    /// Create a new NativeFn that pushes no results.
    pub fn new<F>(id: TypeHash, f: F) -> Self
    where
        F: NativeCallable + Send + Sync + 'static,
    {
        Self {
            id,
            returns: 0,
            inner: Arc::new(f),
        }
    }

    /// Declare how many results the adapter pushes.
    pub fn returning(mut self, returns: usize) -> Self {
        self.returns = returns;
        self
    }

    /// Declared result arity.
    pub fn returns(&self) -> usize {
        self.returns
    }

    /// Call this adapter with the given context.
    pub fn call(&self, ctx: &mut CallContext) -> Result<(), NativeError> {
        let base = ctx.result_count();
        self.inner.call(ctx)?;
        debug_assert_eq!(
            ctx.result_count(),
            base + self.returns,
            "stack imbalance in native function {}: declared {} result(s)",
            self.id,
            self.returns
        );
        Ok(())
    }

    /// Clone this NativeFn, sharing the same underlying callable.
    pub fn clone_arc(&self) -> Self {
        Self {
            id: self.id,
            returns: self.returns,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("id", &self.id)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

impl Clone for NativeFn {
    fn clone(&self) -> Self {
        self.clone_arc()
    }
}

/// Trait for callable native adapters.
///
/// The `call` method receives a `CallContext` that provides access to
/// arguments, the object heap and the host, and collects pushed results.
pub trait NativeCallable {
    /// Call this function with the given context.
    fn call(&self, ctx: &mut CallContext) -> Result<(), NativeError>;
}

impl<F> NativeCallable for F
where
    F: Fn(&mut CallContext) -> Result<(), NativeError>,
{
    fn call(&self, ctx: &mut CallContext) -> Result<(), NativeError> {
        (self)(ctx)
    }
}
