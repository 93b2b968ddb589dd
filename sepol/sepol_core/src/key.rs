//! Typed record keys.
//!
//! A key is the minimal owned identifier of a record: its name. Each entity
//! kind has its own key type, a thin wrapper around the name with a phantom
//! kind parameter, so a class key can never be used to look up a type.
//!
//! # Examples
//!
//! ```
//! use sepol_core::key::{ClassKey, TypeKey};
//!
//! let key = ClassKey::new("file");
//! assert_eq!(key.name(), "file");
//!
//! // Keys order lexicographically by name.
//! assert!(TypeKey::new("a_t") < TypeKey::new("b_t"));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A name-based key for one entity kind.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key<T> {
    name: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Key<T> {
    /// Create a key from a name. The name is copied.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }

    /// The name this key addresses.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consume the key, returning its name.
    pub fn into_name(self) -> String {
        self.name
    }
}

// Manual impls keep the bounds off `T`, which is only a marker.

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

impl<T> fmt::Display for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Key<T> {}

impl<T> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl<T> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T> From<&str> for Key<T> {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl<T> From<String> for Key<T> {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Marker for security class keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {}

/// Marker for role keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {}

/// Marker for type keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {}

/// Marker for user keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserKind {}

/// Key of a security class.
pub type ClassKey = Key<ClassKind>;

/// Key of a role.
pub type RoleKey = Key<RoleKind>;

/// Key of a type, attribute or alias.
pub type TypeKey = Key<TypeKind>;

/// Key of a user.
pub type UserKey = Key<UserKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_unpack() {
        let key = RoleKey::new("object_r");
        assert_eq!(key.name(), "object_r");
        assert_eq!(key.to_string(), "object_r");
        assert_eq!(key.clone().into_name(), "object_r");
    }

    #[test]
    fn test_key_ordering() {
        let a = UserKey::new("USER1");
        let b = UserKey::new("USER2");
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&a), Ordering::Greater);
        assert_eq!(a.cmp(&UserKey::from("USER1")), Ordering::Equal);
    }

    #[test]
    fn test_key_hash() {
        let keys: HashSet<TypeKey> = ["t1", "t2", "t1"].into_iter().map(TypeKey::from).collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_key_serialization() {
        let key = ClassKey::new("file");
        let serialized = serde_json::to_string(&key).unwrap();
        assert_eq!(serialized, "\"file\"");
        let deserialized: ClassKey = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, key);
    }
}
