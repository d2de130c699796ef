//! The scripting-side runtime that owns registered classes and live objects.
//!
//! A `Runtime` bundles the three things every adapter call needs: the class
//! registry to dispatch through, the object heap instances live in, and the
//! host [`Application`] handed to adapters through their [`CallContext`].
//!
//! # Example
//!
//! ```ignore
//! use scenebind::{AppSettings, Application, Runtime};
//!
//! let mut rt = Runtime::with_default_classes(Application::new(AppSettings::default()))?;
//!
//! let viewport = rt.construct("Viewport")?;
//! let content = rt.construct("Sprite")?;
//! rt.call_method(&viewport, "setContent", &[content.to_dynamic()])?;
//!
//! rt.finalize(content)?;
//! rt.finalize(viewport)?;
//! ```

use std::iter;

use thiserror::Error;

use scenebind_core::{
    CallContext, Dynamic, NativeFn, NativeObject, ObjectHandle, ObjectHeap, RegistrationError,
    RuntimeError, TypeHash,
};
use scenebind_registry::{ClassDef, ClassRegistry};
use scenebind_scene::{Application, Viewport};

use crate::binders;

/// Something that registers one or more classes into a [`ClassRegistry`].
///
/// Implemented for [`ClassDef`] and for plain functions, so a binder is
/// usually either a prebuilt definition or a `fn(&mut ClassRegistry)`.
pub trait Binder {
    /// Register the binder's classes, returning the hash of the last one.
    fn register(&self, registry: &mut ClassRegistry) -> Result<TypeHash, RegistrationError>;
}

impl Binder for ClassDef {
    fn register(&self, registry: &mut ClassRegistry) -> Result<TypeHash, RegistrationError> {
        registry.register_class(self.clone())
    }
}

impl<F> Binder for F
where
    F: Fn(&mut ClassRegistry) -> Result<TypeHash, RegistrationError>,
{
    fn register(&self, registry: &mut ClassRegistry) -> Result<TypeHash, RegistrationError> {
        (self)(registry)
    }
}

/// The script's owning reference to a bound instance.
///
/// Returned by [`Runtime::construct`] and consumed by [`Runtime::finalize`],
/// which runs the class's destructor. It cannot be cloned, so each
/// construction is finalized at most once. Scripts pass the object around as
/// borrowed [`Dynamic::Object`] values obtained through [`to_dynamic`].
///
/// [`to_dynamic`]: ScriptRef::to_dynamic
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a ScriptRef holds a reference that is only given back by Runtime::finalize"]
pub struct ScriptRef {
    handle: ObjectHandle,
}

impl ScriptRef {
    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    /// Hash of the class this instance was constructed as.
    pub fn class(&self) -> TypeHash {
        self.handle.class
    }

    /// A borrowed argument value referring to this instance.
    pub fn to_dynamic(&self) -> Dynamic {
        Dynamic::Object(self.handle)
    }
}

impl From<&ScriptRef> for Dynamic {
    fn from(script_ref: &ScriptRef) -> Self {
        script_ref.to_dynamic()
    }
}

/// A failed [`Runtime::finalize`].
///
/// The destructor did not run to completion, so the script still owns its
/// reference. It is handed back here and can be finalized again.
#[derive(Debug, PartialEq, Error)]
#[error("{source}")]
pub struct FinalizeError {
    script_ref: ScriptRef,
    #[source]
    source: RuntimeError,
}

impl FinalizeError {
    pub fn script_ref(&self) -> &ScriptRef {
        &self.script_ref
    }

    pub fn error(&self) -> &RuntimeError {
        &self.source
    }

    pub fn into_parts(self) -> (ScriptRef, RuntimeError) {
        (self.script_ref, self.source)
    }
}

impl From<FinalizeError> for RuntimeError {
    fn from(err: FinalizeError) -> Self {
        err.source
    }
}

/// Registry, heap and host for one scripting session.
pub struct Runtime {
    registry: ClassRegistry,
    heap: ObjectHeap,
    application: Application,
}

impl Runtime {
    /// Create a runtime with no classes registered.
    pub fn new(application: Application) -> Self {
        Self {
            registry: ClassRegistry::new(),
            heap: ObjectHeap::new(),
            application,
        }
    }

    /// Create a runtime with `Sprite`, `Matrix` and `Viewport` installed.
    pub fn with_default_classes(application: Application) -> Result<Self, RuntimeError> {
        let mut runtime = Self::new(application);
        for class in binders::default_classes() {
            runtime.install(class)?;
        }
        Ok(runtime)
    }

    /// Run a binder against this runtime's registry.
    ///
    /// Classes that are already registered are left as they are.
    pub fn install<B: Binder>(&mut self, binder: B) -> Result<TypeHash, RuntimeError> {
        Ok(binder.register(&mut self.registry)?)
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn application(&self) -> &Application {
        &self.application
    }

    pub fn heap(&self) -> &ObjectHeap {
        &self.heap
    }

    // ==========================================================================
    // Lifecycle
    // ==========================================================================

    /// Construct an instance of `class` through its constructor adapter.
    ///
    /// The adapter must push exactly one object allocated as `class` itself.
    /// Anything else is rejected and whatever objects it pushed are released.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn construct(&mut self, class: &str) -> Result<ScriptRef, RuntimeError> {
        let entry = self
            .registry
            .get_by_name(class)
            .ok_or_else(|| RuntimeError::UnknownClass(class.to_string()))?;
        let type_hash = entry.type_hash;
        let constructor = entry
            .constructor
            .clone()
            .ok_or_else(|| RuntimeError::NotConstructible(class.to_string()))?;

        let results = self.invoke(class, "new", &constructor, &[])?;
        match results.as_slice() {
            [Dynamic::Object(handle)] if handle.class == type_hash => {
                tracing::trace!(class, index = handle.index, "constructed instance");
                Ok(ScriptRef { handle: *handle })
            }
            _ => {
                for handle in results.iter().filter_map(Dynamic::as_object) {
                    self.heap.release(handle);
                }
                tracing::warn!(class, "constructor did not produce an instance of its class");
                Err(RuntimeError::InvalidConstructorResult(class.to_string()))
            }
        }
    }

    /// Give the script's reference back through the class's destructor.
    ///
    /// The object itself is freed only if nothing else holds a reference.
    /// On failure the reference is returned inside the error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn finalize(&mut self, script_ref: ScriptRef) -> Result<(), FinalizeError> {
        self.destroy(script_ref.handle)
            .map_err(|source| FinalizeError { script_ref, source })
    }

    fn destroy(&mut self, handle: ObjectHandle) -> Result<(), RuntimeError> {
        let entry = self
            .registry
            .get(handle.class)
            .ok_or_else(|| RuntimeError::UnknownClass(handle.class.to_string()))?;
        let class = entry.name.clone();
        let destructor = entry.destructor.clone().ok_or_else(|| {
            RegistrationError::MissingBehavior {
                type_name: class.clone(),
                behavior: "destructor",
            }
        })?;

        self.invoke(&class, "destroy", &destructor, &[Dynamic::Object(handle)])?;
        tracing::trace!(
            class = %class,
            index = handle.index,
            freed = !self.heap.contains(handle),
            "finalized instance"
        );
        Ok(())
    }

    // ==========================================================================
    // Dispatch
    // ==========================================================================

    /// Call `class.method` with `args`, the first of which is the receiver.
    ///
    /// The method is looked up on `class` and then its bases. The receiver is
    /// checked by the adapter itself, so passing an instance of the wrong
    /// class surfaces as a type error.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn call(
        &mut self,
        class: &str,
        method: &str,
        args: &[Dynamic],
    ) -> Result<Vec<Dynamic>, RuntimeError> {
        let hash = self
            .registry
            .get_by_name(class)
            .map(|entry| entry.type_hash)
            .ok_or_else(|| RuntimeError::UnknownClass(class.to_string()))?;
        let (owner, adapter) = self.resolve(hash, method)?;
        self.invoke(&owner, method, &adapter, args)
    }

    /// Call `method` on the receiver's own class, falling back to its bases.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn call_method(
        &mut self,
        receiver: impl Into<Dynamic>,
        method: &str,
        args: &[Dynamic],
    ) -> Result<Vec<Dynamic>, RuntimeError> {
        let receiver = receiver.into();
        let handle = match &receiver {
            Dynamic::Object(handle) => *handle,
            other => {
                return Err(RuntimeError::InvalidReceiver {
                    method: method.to_string(),
                    actual: other.type_name(),
                });
            }
        };
        let (owner, adapter) = self.resolve(handle.class, method)?;
        let args: Vec<Dynamic> = iter::once(receiver).chain(args.iter().cloned()).collect();
        self.invoke(&owner, method, &adapter, &args)
    }

    fn resolve(&self, class: TypeHash, method: &str) -> Result<(String, NativeFn), RuntimeError> {
        let entry = self
            .registry
            .get(class)
            .ok_or_else(|| RuntimeError::UnknownClass(class.to_string()))?;
        self.registry
            .find_method(class, method)
            .map(|(owner, adapter)| (owner.name.clone(), adapter.clone()))
            .ok_or_else(|| RuntimeError::UnknownMethod {
                class: entry.name.clone(),
                method: method.to_string(),
            })
    }

    fn invoke(
        &mut self,
        class: &str,
        method: &str,
        adapter: &NativeFn,
        args: &[Dynamic],
    ) -> Result<Vec<Dynamic>, RuntimeError> {
        let mut results = Vec::with_capacity(adapter.returns());
        let outcome = {
            let mut ctx = CallContext::new(args, &mut results, &mut self.heap, &self.application);
            adapter.call(&mut ctx)
        };

        match outcome {
            Ok(()) => Ok(results),
            Err(source) => {
                tracing::debug!(class, method, error = %source, "native call failed");
                Err(RuntimeError::Native {
                    class: class.to_string(),
                    method: method.to_string(),
                    source,
                })
            }
        }
    }

    // ==========================================================================
    // Inspection
    // ==========================================================================

    /// Current reference count of a script-owned instance.
    pub fn ref_count(&self, script_ref: &ScriptRef) -> Option<u32> {
        self.heap.ref_count(script_ref.handle)
    }

    /// Number of objects alive in the heap.
    pub fn live_objects(&self) -> usize {
        self.heap.live_count()
    }

    /// Check whether a handle still refers to a live object.
    pub fn is_live(&self, handle: ObjectHandle) -> bool {
        self.heap.contains(handle)
    }

    /// Typed view of an instance, or of its `T` base part.
    pub fn get<T: NativeObject>(&self, handle: ObjectHandle) -> Option<&T> {
        self.heap.get::<T>(handle)
    }

    /// The content currently shown by a viewport.
    ///
    /// Returns `None` if no content is set or the content has since been
    /// destroyed.
    pub fn viewport_content(&self, viewport: &ScriptRef) -> Option<ObjectHandle> {
        self.heap
            .get::<Viewport>(viewport.handle)?
            .content()
            .filter(|content| self.heap.contains(*content))
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("registry", &self.registry)
            .field("heap", &self.heap)
            .field("application", &self.application)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenebind_core::NativeError;
    use scenebind_scene::{AppSettings, Sprite};

    fn runtime() -> Runtime {
        Runtime::with_default_classes(Application::new(AppSettings::default())).unwrap()
    }

    #[test]
    fn default_classes_are_registered() {
        let rt = runtime();
        assert!(rt.registry().contains("Sprite"));
        assert!(rt.registry().contains("Matrix"));
        assert!(rt.registry().contains("Viewport"));
        assert_eq!(rt.live_objects(), 0);
    }

    #[test]
    fn construct_and_finalize() {
        let mut rt = runtime();
        let sprite = rt.construct("Sprite").unwrap();
        let handle = sprite.handle();

        assert_eq!(sprite.class(), TypeHash::from_name("Sprite"));
        assert_eq!(rt.ref_count(&sprite), Some(1));
        assert!(rt.get::<Sprite>(handle).is_some());

        rt.finalize(sprite).unwrap();
        assert!(!rt.is_live(handle));
        assert_eq!(rt.live_objects(), 0);
    }

    #[test]
    fn unknown_class() {
        let mut rt = runtime();
        assert_eq!(
            rt.construct("Stage"),
            Err(RuntimeError::UnknownClass("Stage".to_string()))
        );
        assert!(matches!(
            rt.call("Stage", "addChild", &[]),
            Err(RuntimeError::UnknownClass(_))
        ));
    }

    #[test]
    fn class_without_constructor() {
        let mut rt = runtime();
        rt.install(ClassDef::new("Stage").with_base("Sprite")).unwrap();
        assert_eq!(
            rt.construct("Stage"),
            Err(RuntimeError::NotConstructible("Stage".to_string()))
        );
    }

    #[test]
    fn unknown_method() {
        let mut rt = runtime();
        let sprite = rt.construct("Sprite").unwrap();
        let err = rt.call_method(&sprite, "setContent", &[]).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::UnknownMethod {
                class: "Sprite".to_string(),
                method: "setContent".to_string(),
            }
        );
        rt.finalize(sprite).unwrap();
    }

    #[test]
    fn receiver_must_be_an_object() {
        let mut rt = runtime();
        let err = rt.call_method(Dynamic::Int(3), "setPosition", &[]).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::InvalidReceiver {
                method: "setPosition".to_string(),
                actual: "int",
            }
        );
    }

    #[test]
    fn binder_functions_can_be_installed() {
        fn stage(registry: &mut ClassRegistry) -> Result<TypeHash, RegistrationError> {
            registry.register_class(ClassDef::new("Stage").with_base("Sprite"))
        }

        let mut rt = runtime();
        let hash = rt.install(stage).unwrap();
        assert_eq!(hash, TypeHash::from_name("Stage"));
    }

    #[test]
    fn install_reports_registration_errors() {
        let mut rt = Runtime::new(Application::default());
        let err = rt.install(binders::viewport::class()).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Registration(RegistrationError::TypeNotFound("Sprite".to_string()))
        );
    }

    #[test]
    fn constructor_must_produce_an_instance() {
        fn bad_constructor(ctx: &mut CallContext) -> Result<(), NativeError> {
            ctx.push(1);
            Ok(())
        }
        fn noop(_: &mut CallContext) -> Result<(), NativeError> {
            Ok(())
        }

        let mut rt = runtime();
        rt.install(
            ClassDef::new("Broken")
                .with_constructor(bad_constructor)
                .with_destructor(noop),
        )
        .unwrap();
        assert_eq!(
            rt.construct("Broken"),
            Err(RuntimeError::InvalidConstructorResult("Broken".to_string()))
        );
    }

    #[test]
    fn constructor_must_allocate_its_own_class() {
        fn create_sprite(ctx: &mut CallContext) -> Result<(), NativeError> {
            ctx.push_instance(Sprite::new());
            Ok(())
        }
        fn hello(ctx: &mut CallContext) -> Result<(), NativeError> {
            ctx.push("hello");
            Ok(())
        }

        let mut rt = runtime();
        rt.install(
            ClassDef::new("Stage")
                .with_base("Sprite")
                .with_constructor(create_sprite)
                .with_destructor(binders::release)
                .with_method("hello", 1, hello),
        )
        .unwrap();

        assert_eq!(
            rt.construct("Stage"),
            Err(RuntimeError::InvalidConstructorResult("Stage".to_string()))
        );
        // The mistagged object is not leaked.
        assert_eq!(rt.live_objects(), 0);
    }

    #[test]
    fn failed_finalize_returns_the_reference() {
        fn create(ctx: &mut CallContext) -> Result<(), NativeError> {
            ctx.push_instance(Sprite::new());
            Ok(())
        }
        fn refuse(_: &mut CallContext) -> Result<(), NativeError> {
            Err(NativeError::other("sprite is still on stage"))
        }

        let mut rt = Runtime::new(Application::default());
        rt.install(
            ClassDef::new("Sprite")
                .with_constructor(create)
                .with_destructor(refuse),
        )
        .unwrap();

        let sprite = rt.construct("Sprite").unwrap();
        let handle = sprite.handle();
        let err = rt.finalize(sprite).unwrap_err();
        assert_eq!(
            err.error().native(),
            Some(&NativeError::other("sprite is still on stage"))
        );
        assert_eq!(err.to_string(), "Sprite.destroy: sprite is still on stage");

        let (sprite, _) = err.into_parts();
        assert_eq!(sprite.handle(), handle);
        assert_eq!(rt.ref_count(&sprite), Some(1));
    }

    #[test]
    fn debug_impl_summarizes_state() {
        let rt = runtime();
        let text = format!("{rt:?}");
        assert!(text.starts_with("Runtime { registry: ClassRegistry { classes: 3 }"));
    }
}
