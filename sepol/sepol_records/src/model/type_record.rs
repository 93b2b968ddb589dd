//! Type records.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use sepol_core::{StringSet, TypeKey};

/// Kind of entry in the type namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFlavor {
    /// A concrete type.
    #[default]
    Type,
    /// A named group of types.
    Attribute,
    /// Another name for a concrete type.
    Alias,
}

impl TypeFlavor {
    /// Public numeric code.
    pub fn as_raw(&self) -> u32 {
        match self {
            Self::Type => 0,
            Self::Attribute => 1,
            Self::Alias => 2,
        }
    }

    /// Parse a public numeric code.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Type),
            1 => Some(Self::Attribute),
            2 => Some(Self::Alias),
            _ => None,
        }
    }
}

bitflags! {
    /// Type flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TypeFlags: u32 {
        /// Violations are logged, not denied.
        const PERMISSIVE = 1;
        /// Attribute must be expanded.
        const EXPAND_ATTR_TRUE = 1 << 1;
        /// Attribute must not be expanded.
        const EXPAND_ATTR_FALSE = 1 << 2;
    }
}

impl Default for TypeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A type, attribute or alias.
///
/// `subtypes` holds the relation as seen from this entry: for an attribute
/// its member types, for a type the attributes it belongs to when the
/// database records that direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    name: String,
    flavor: TypeFlavor,
    subtypes: StringSet,
    flags: TypeFlags,
    alias_of: Option<String>,
    bounds: Option<String>,
}

impl Type {
    /// Create an empty type record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The key addressing this type.
    pub fn key(&self) -> TypeKey {
        TypeKey::new(self.name.as_str())
    }

    /// Compare this type's name with a key.
    pub fn compare(&self, key: &TypeKey) -> Ordering {
        self.name.as_str().cmp(key.name())
    }

    /// Compare two types by name.
    pub fn compare2(&self, other: &Type) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// The type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the type name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The flavor.
    pub fn flavor(&self) -> TypeFlavor {
        self.flavor
    }

    /// Set the flavor.
    pub fn set_flavor(&mut self, flavor: TypeFlavor) {
        self.flavor = flavor;
    }

    /// Whether `subtype` is listed.
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.contains(subtype)
    }

    /// Snapshot of the subtypes.
    pub fn subtypes(&self) -> Vec<&str> {
        self.subtypes.snapshot()
    }

    /// Add a subtype. Returns `false` if already listed.
    pub fn add_subtype(&mut self, subtype: impl Into<String>) -> bool {
        self.subtypes.add(subtype)
    }

    /// Remove a subtype. Returns whether it was listed.
    pub fn remove_subtype(&mut self, subtype: &str) -> bool {
        self.subtypes.remove(subtype)
    }

    pub(crate) fn subtypes_mut(&mut self) -> &mut StringSet {
        &mut self.subtypes
    }

    /// All flags.
    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// Whether every flag in `flag` is set.
    pub fn has_flag(&self, flag: TypeFlags) -> bool {
        !flag.is_empty() && self.flags.contains(flag)
    }

    /// Set flags.
    pub fn set_flag(&mut self, flag: TypeFlags) {
        self.flags.insert(flag);
    }

    /// Clear flags.
    pub fn unset_flag(&mut self, flag: TypeFlags) {
        self.flags.remove(flag);
    }

    /// The aliased type, for aliases.
    pub fn alias_of(&self) -> Option<&str> {
        self.alias_of.as_deref()
    }

    /// Set or clear the aliased type.
    pub fn set_alias_of(&mut self, alias_of: Option<&str>) {
        self.alias_of = alias_of.map(str::to_owned);
    }

    /// The bounding type, if any.
    pub fn bounds(&self) -> Option<&str> {
        self.bounds.as_deref()
    }

    /// Set or clear the bounding type.
    pub fn set_bounds(&mut self, bounds: Option<&str>) {
        self.bounds = bounds.map(str::to_owned);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut t = Type::new();
        assert!(!t.has_flag(TypeFlags::PERMISSIVE));
        t.set_flag(TypeFlags::PERMISSIVE | TypeFlags::EXPAND_ATTR_TRUE);
        assert!(t.has_flag(TypeFlags::PERMISSIVE));
        assert!(t.has_flag(TypeFlags::EXPAND_ATTR_TRUE));
        t.unset_flag(TypeFlags::PERMISSIVE);
        assert!(!t.has_flag(TypeFlags::PERMISSIVE));
        assert_eq!(t.flags(), TypeFlags::EXPAND_ATTR_TRUE);
    }

    #[test]
    fn test_subtypes_are_unique() {
        let mut t = Type::new();
        t.set_flavor(TypeFlavor::Attribute);
        assert!(t.add_subtype("TYPE2"));
        assert!(t.add_subtype("TYPE3"));
        assert!(!t.add_subtype("TYPE2"));
        assert_eq!(t.subtypes(), vec!["TYPE2", "TYPE3"]);
        assert!(t.remove_subtype("TYPE2"));
        assert!(!t.has_subtype("TYPE2"));
    }

    #[test]
    fn test_flavor_codes() {
        for raw in 0..=2 {
            assert_eq!(TypeFlavor::from_raw(raw).unwrap().as_raw(), raw);
        }
        assert_eq!(TypeFlavor::from_raw(3), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut t = Type::new();
        t.set_name("ALIAS1");
        t.set_flavor(TypeFlavor::Alias);
        t.set_alias_of(Some("TYPE1"));
        t.set_bounds(Some("TYPE0"));

        let mut copy = t.clone();
        assert_eq!(copy, t);
        copy.set_alias_of(None);
        assert_eq!(t.alias_of(), Some("TYPE1"));
        assert_eq!(t.bounds(), Some("TYPE0"));
        assert_eq!(t.compare(&TypeKey::new("ALIAS1")), Ordering::Equal);
    }
}
