//! ClassRegistry - the per-runtime table of bound native classes.
//!
//! # Storage Model
//!
//! Classes are stored by [`TypeHash`], which is computed from the class name,
//! so an [`ObjectHandle`](scenebind_core::ObjectHandle) carrying a class hash
//! can find its entry without a name lookup.
//!
//! # Thread Safety
//!
//! `ClassRegistry` is not synchronized. Registration and dispatch both happen
//! on the single thread that drives the scripting runtime; a multi-threaded
//! host would have to wrap the registry itself.

use rustc_hash::{FxHashMap, FxHashSet};
use scenebind_core::{NativeFn, RegistrationError, TypeHash};

use crate::class::{ClassDef, ClassEntry};

/// Table of registered native classes.
#[derive(Default)]
pub struct ClassRegistry {
    classes: FxHashMap<TypeHash, ClassEntry>,
}

impl ClassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a native class.
    ///
    /// Registration is idempotent: a class that is already registered under
    /// the same name is left untouched and its hash is returned. The base
    /// class, if any, must be registered first.
    pub fn register_class(&mut self, def: ClassDef) -> Result<TypeHash, RegistrationError> {
        if def.name.is_empty() {
            return Err(RegistrationError::InvalidDeclaration(
                "class name cannot be empty".to_string(),
            ));
        }

        let hash = TypeHash::from_name(&def.name);
        if self.classes.contains_key(&hash) {
            tracing::debug!(class = %def.name, "class already registered, skipping");
            return Ok(hash);
        }

        let base_class = match &def.base {
            Some(base) => {
                let base_hash = TypeHash::from_name(base);
                if !self.classes.contains_key(&base_hash) {
                    return Err(RegistrationError::TypeNotFound(base.clone()));
                }
                Some(base_hash)
            }
            None => None,
        };

        Self::validate(&def)?;

        tracing::debug!(
            class = %def.name,
            base = def.base.as_deref().unwrap_or("-"),
            methods = def.methods.len(),
            "registered class"
        );
        self.classes.insert(hash, ClassEntry::new(def, base_class));
        Ok(hash)
    }

    fn validate(def: &ClassDef) -> Result<(), RegistrationError> {
        if def.constructor.is_some() && def.destructor.is_none() {
            return Err(RegistrationError::MissingBehavior {
                type_name: def.name.clone(),
                behavior: "destructor",
            });
        }

        let mut seen = FxHashSet::default();
        for (name, _) in &def.methods {
            if name.is_empty() {
                return Err(RegistrationError::InvalidDeclaration(format!(
                    "class '{}' declares a method with an empty name",
                    def.name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(RegistrationError::InvalidDeclaration(format!(
                    "class '{}' declares method '{}' twice",
                    def.name, name
                )));
            }
        }
        Ok(())
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a class by hash.
    pub fn get(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.classes.get(&hash)
    }

    /// Get a class by name.
    pub fn get_by_name(&self, name: &str) -> Option<&ClassEntry> {
        self.get(TypeHash::from_name(name))
    }

    /// Check if a class exists by name.
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(&TypeHash::from_name(name))
    }

    /// Iterate over all class entries.
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry> {
        self.classes.values()
    }

    /// Get the number of registered classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    // ==========================================================================
    // Inheritance Helpers
    // ==========================================================================

    /// Get the inheritance chain for a class (excluding the class itself).
    ///
    /// Returns base classes from immediate parent to root.
    pub fn base_class_chain(&self, hash: TypeHash) -> Vec<&ClassEntry> {
        let mut chain = Vec::new();
        let mut current = hash;

        while let Some(class) = self.get(current)
            && let Some(base) = class.base_class
            && let Some(base_class) = self.get(base)
        {
            chain.push(base_class);
            current = base;
        }

        chain
    }

    /// Check whether `class` is `ancestor` or derives from it.
    pub fn is_a(&self, class: TypeHash, ancestor: TypeHash) -> bool {
        if !self.classes.contains_key(&class) {
            return false;
        }
        class == ancestor
            || self
                .base_class_chain(class)
                .iter()
                .any(|base| base.type_hash == ancestor)
    }

    /// Resolve a method on a class, falling back along its base chain.
    ///
    /// Returns the class that declares the method together with the adapter.
    /// A method declared on a derived class hides the base one.
    pub fn find_method(&self, class: TypeHash, name: &str) -> Option<(&ClassEntry, &NativeFn)> {
        let own = self.get(class)?;
        std::iter::once(own)
            .chain(self.base_class_chain(class))
            .find_map(|entry| entry.find_method(name).map(|method| (entry, method)))
    }
}

impl std::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassRegistry")
            .field("classes", &self.classes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenebind_core::{CallContext, NativeError};

    fn noop(_: &mut CallContext) -> Result<(), NativeError> {
        Ok(())
    }

    fn class(name: &str) -> ClassDef {
        ClassDef::new(name)
            .with_constructor(noop)
            .with_destructor(noop)
    }

    fn method_id(class: &str, method: &str) -> TypeHash {
        TypeHash::from_method(TypeHash::from_name(class), method)
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = ClassRegistry::new();
        assert_eq!(registry.class_count(), 0);
        assert!(!registry.contains("Sprite"));
    }

    #[test]
    fn register_class() {
        let mut registry = ClassRegistry::new();
        let hash = registry.register_class(class("Sprite")).unwrap();

        assert_eq!(hash, TypeHash::from_name("Sprite"));
        assert!(registry.contains("Sprite"));
        assert_eq!(registry.get_by_name("Sprite").unwrap().name, "Sprite");
    }

    #[test]
    fn registration_is_idempotent() {
        let mut registry = ClassRegistry::new();
        registry
            .register_class(class("Sprite").with_method("setPosition", 0, noop))
            .unwrap();

        // A second registration under the same name keeps the original entry.
        let hash = registry
            .register_class(class("Sprite").with_method("other", 0, noop))
            .unwrap();

        assert_eq!(hash, TypeHash::from_name("Sprite"));
        assert_eq!(registry.class_count(), 1);
        let entry = registry.get(hash).unwrap();
        assert!(entry.find_method("setPosition").is_some());
        assert!(entry.find_method("other").is_none());
    }

    #[test]
    fn missing_base_is_an_error() {
        let mut registry = ClassRegistry::new();
        let result = registry.register_class(class("Viewport").with_base("Sprite"));

        assert_eq!(result, Err(RegistrationError::TypeNotFound("Sprite".to_string())));
        assert!(!registry.contains("Viewport"));
    }

    #[test]
    fn constructor_requires_destructor() {
        let mut registry = ClassRegistry::new();
        let result = registry.register_class(ClassDef::new("Leaky").with_constructor(noop));

        assert!(matches!(
            result,
            Err(RegistrationError::MissingBehavior {
                behavior: "destructor",
                ..
            })
        ));
    }

    #[test]
    fn class_without_constructor_is_allowed() {
        let mut registry = ClassRegistry::new();
        registry
            .register_class(ClassDef::new("Stage").with_method("getWidth", 1, noop))
            .unwrap();
        assert!(!registry.get_by_name("Stage").unwrap().is_constructible());
    }

    #[test]
    fn invalid_declarations() {
        let mut registry = ClassRegistry::new();

        assert!(matches!(
            registry.register_class(class("")),
            Err(RegistrationError::InvalidDeclaration(_))
        ));
        assert!(matches!(
            registry.register_class(class("Sprite").with_method("", 0, noop)),
            Err(RegistrationError::InvalidDeclaration(_))
        ));
        assert!(matches!(
            registry.register_class(
                class("Sprite")
                    .with_method("setX", 0, noop)
                    .with_method("setX", 0, noop)
            ),
            Err(RegistrationError::InvalidDeclaration(_))
        ));
        assert_eq!(registry.class_count(), 0);
    }

    #[test]
    fn inheritance_chain() {
        let mut registry = ClassRegistry::new();
        let dispatcher = registry.register_class(class("EventDispatcher")).unwrap();
        let sprite = registry
            .register_class(class("Sprite").with_base("EventDispatcher"))
            .unwrap();
        let viewport = registry
            .register_class(class("Viewport").with_base("Sprite"))
            .unwrap();

        let chain = registry.base_class_chain(viewport);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].name, "Sprite");
        assert_eq!(chain[1].name, "EventDispatcher");

        assert!(registry.is_a(viewport, sprite));
        assert!(registry.is_a(viewport, dispatcher));
        assert!(registry.is_a(viewport, viewport));
        assert!(!registry.is_a(sprite, viewport));
        assert!(!registry.is_a(TypeHash::from_name("Nope"), TypeHash::from_name("Nope")));
    }

    #[test]
    fn method_resolution_falls_back_to_base() {
        let mut registry = ClassRegistry::new();
        registry
            .register_class(
                class("Sprite")
                    .with_method("setPosition", 0, noop)
                    .with_method("getPosition", 2, noop),
            )
            .unwrap();
        let viewport = registry
            .register_class(
                class("Viewport")
                    .with_base("Sprite")
                    .with_method("setContent", 0, noop),
            )
            .unwrap();

        let (owner, method) = registry.find_method(viewport, "setPosition").unwrap();
        assert_eq!(owner.name, "Sprite");
        assert_eq!(method.id, method_id("Sprite", "setPosition"));

        let (owner, _) = registry.find_method(viewport, "setContent").unwrap();
        assert_eq!(owner.name, "Viewport");

        assert!(registry.find_method(viewport, "missing").is_none());
        assert!(
            registry
                .find_method(TypeHash::from_name("Sprite"), "setContent")
                .is_none()
        );
    }

    #[test]
    fn derived_method_overrides_base() {
        let mut registry = ClassRegistry::new();
        registry
            .register_class(class("Sprite").with_method("getPosition", 2, noop))
            .unwrap();
        let viewport = registry
            .register_class(
                class("Viewport")
                    .with_base("Sprite")
                    .with_method("getPosition", 2, noop),
            )
            .unwrap();

        let (owner, method) = registry.find_method(viewport, "getPosition").unwrap();
        assert_eq!(owner.name, "Viewport");
        assert_eq!(method.id, method_id("Viewport", "getPosition"));
    }

    #[test]
    fn debug_impl() {
        let registry = ClassRegistry::new();
        assert_eq!(format!("{registry:?}"), "ClassRegistry { classes: 0 }");
    }
}
