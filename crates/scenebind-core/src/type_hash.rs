//! Deterministic hash-based class identity.
//!
//! [`TypeHash`] is a 64-bit hash computed from a class name, or from a class
//! and a member name. The same name always produces the same hash, so a
//! binder can refer to a base class before looking it up and an
//! [`ObjectHandle`](crate::ObjectHandle) can carry its class identity without
//! a registry in hand.
//!
//! # Examples
//!
//! ```
//! use scenebind_core::TypeHash;
//!
//! let sprite = TypeHash::from_name("Sprite");
//! assert_eq!(sprite, TypeHash::from_name("Sprite"));
//!
//! let set_position = TypeHash::from_method(sprite, "setPosition");
//! assert_ne!(set_position, TypeHash::from_method(sprite, "getPosition"));
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
///
/// These keep a class named `foo` from colliding with a method named `foo`.
pub mod hash_constants {
    /// Domain marker for class hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for method hashes
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for constructor hashes
    pub const CONSTRUCTOR: u64 = 0x9a7f3d5e2b8c4601;

    /// Domain marker for destructor hashes
    pub const DESTRUCTOR: u64 = 0x3e9f5d2a8c7b1403;
}

/// A deterministic 64-bit hash identifying a class or one of its members.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Create a class hash from its symbolic name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a method hash from the owning class and the method name.
    ///
    /// Methods are keyed by name only: the scripting side has no overloads.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str) -> Self {
        TypeHash(hash_constants::METHOD ^ owner.0.rotate_left(17) ^ xxh64(name.as_bytes(), 0))
    }

    /// Create the constructor hash for a class.
    #[inline]
    pub fn from_constructor(owner: TypeHash) -> Self {
        TypeHash(hash_constants::CONSTRUCTOR ^ owner.0)
    }

    /// Create the destructor hash for a class.
    #[inline]
    pub fn from_destructor(owner: TypeHash) -> Self {
        TypeHash(hash_constants::DESTRUCTOR ^ owner.0)
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
