//! Class definitions and registry entries.

use rustc_hash::FxHashMap;
use scenebind_core::{CallContext, NativeCallable, NativeError, NativeFn, TypeHash};

/// Registration record for a native class.
///
/// Built by a binder and consumed by
/// [`ClassRegistry::register_class`](crate::ClassRegistry::register_class).
///
/// ```ignore
/// let def = ClassDef::new("Viewport")
///     .with_base("Sprite")
///     .with_constructor(create)
///     .with_destructor(destruct)
///     .with_method("setContent", 0, set_content);
/// ```
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    pub base: Option<String>,
    pub constructor: Option<NativeFn>,
    pub destructor: Option<NativeFn>,
    pub methods: Vec<(String, NativeFn)>,
}

impl ClassDef {
    /// Start a definition for `name` with no base and no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            constructor: None,
            destructor: None,
            methods: Vec::new(),
        }
    }

    fn type_hash(&self) -> TypeHash {
        TypeHash::from_name(&self.name)
    }

    // === Builder Methods ===

    /// Set the base class by name.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Set the constructor adapter. It must push exactly one instance.
    pub fn with_constructor<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut CallContext) -> Result<(), NativeError> + Send + Sync + 'static,
    {
        let id = TypeHash::from_constructor(self.type_hash());
        self.constructor = Some(NativeFn::new(id, f).returning(1));
        self
    }

    /// Set the destructor adapter, called once when a script handle is finalized.
    pub fn with_destructor<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut CallContext) -> Result<(), NativeError> + Send + Sync + 'static,
    {
        let id = TypeHash::from_destructor(self.type_hash());
        self.destructor = Some(NativeFn::new(id, f));
        self
    }

    /// Add a method adapter that pushes `returns` results.
    pub fn with_method<F>(mut self, name: impl Into<String>, returns: usize, f: F) -> Self
    where
        F: NativeCallable + Send + Sync + 'static,
    {
        let name = name.into();
        let id = TypeHash::from_method(self.type_hash(), &name);
        self.methods.push((name, NativeFn::new(id, f).returning(returns)));
        self
    }
}

/// Registry entry for a native class.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    /// Symbolic class name.
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Base class type hash (single inheritance).
    pub base_class: Option<TypeHash>,
    /// Constructor adapter, if scripts may create instances.
    pub constructor: Option<NativeFn>,
    /// Destructor adapter releasing the script's reference.
    pub destructor: Option<NativeFn>,
    /// Methods declared on this class (not including inherited ones).
    pub methods: FxHashMap<String, NativeFn>,
}

impl ClassEntry {
    pub(crate) fn new(def: ClassDef, base_class: Option<TypeHash>) -> Self {
        Self {
            type_hash: TypeHash::from_name(&def.name),
            name: def.name,
            base_class,
            constructor: def.constructor,
            destructor: def.destructor,
            methods: def.methods.into_iter().collect(),
        }
    }

    /// Find a method declared directly on this class.
    pub fn find_method(&self, name: &str) -> Option<&NativeFn> {
        self.methods.get(name)
    }

    /// Check if scripts can construct this class.
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Names of the methods declared on this class.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut CallContext) -> Result<(), NativeError> {
        Ok(())
    }

    #[test]
    fn builder_assigns_lifecycle_ids() {
        let def = ClassDef::new("Sprite")
            .with_constructor(noop)
            .with_destructor(noop);
        let owner = TypeHash::from_name("Sprite");

        let ctor = def.constructor.as_ref().unwrap();
        assert_eq!(ctor.id, TypeHash::from_constructor(owner));
        assert_eq!(ctor.returns(), 1);

        let dtor = def.destructor.as_ref().unwrap();
        assert_eq!(dtor.id, TypeHash::from_destructor(owner));
        assert_eq!(dtor.returns(), 0);
    }

    #[test]
    fn builder_assigns_method_ids() {
        let def = ClassDef::new("Sprite")
            .with_method("getPosition", 2, noop)
            .with_base("EventDispatcher");

        assert_eq!(def.base.as_deref(), Some("EventDispatcher"));
        let (name, method) = &def.methods[0];
        assert_eq!(name, "getPosition");
        assert_eq!(method.returns(), 2);
        assert_eq!(
            method.id,
            TypeHash::from_method(TypeHash::from_name("Sprite"), "getPosition")
        );
    }

    #[test]
    fn entry_from_def() {
        let def = ClassDef::new("Matrix")
            .with_constructor(noop)
            .with_destructor(noop)
            .with_method("setScale", 0, noop);
        let entry = ClassEntry::new(def, None);

        assert_eq!(entry.type_hash, TypeHash::from_name("Matrix"));
        assert!(entry.is_constructible());
        assert!(entry.find_method("setScale").is_some());
        assert!(entry.find_method("setContent").is_none());
        assert_eq!(entry.method_names().collect::<Vec<_>>(), vec!["setScale"]);
    }
}
