//! Role records.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use sepol_core::{RoleKey, StringSet};

/// Kind of entry in the role namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleFlavor {
    /// A role.
    #[default]
    Role,
    /// A named group of roles.
    Attribute,
}

impl RoleFlavor {
    /// Public numeric code.
    pub fn as_raw(&self) -> u32 {
        match self {
            Self::Role => 0,
            Self::Attribute => 1,
        }
    }

    /// Parse a public numeric code.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Role),
            1 => Some(Self::Attribute),
            _ => None,
        }
    }
}

/// A role or role attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    name: String,
    types: StringSet,
    bounds: Option<String>,
    flavor: RoleFlavor,
    subroles: StringSet,
}

impl Role {
    /// Create an empty role record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The key addressing this role.
    pub fn key(&self) -> RoleKey {
        RoleKey::new(self.name.as_str())
    }

    /// Compare this role's name with a key.
    pub fn compare(&self, key: &RoleKey) -> Ordering {
        self.name.as_str().cmp(key.name())
    }

    /// Compare two roles by name.
    pub fn compare2(&self, other: &Role) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// The role name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the role name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the role is authorized for `type_`.
    pub fn has_type(&self, type_: &str) -> bool {
        self.types.contains(type_)
    }

    /// Snapshot of the authorized types.
    pub fn types(&self) -> Vec<&str> {
        self.types.snapshot()
    }

    /// Authorize a type. Returns `false` if already authorized.
    pub fn add_type(&mut self, type_: impl Into<String>) -> bool {
        self.types.add(type_)
    }

    /// Revoke a type. Returns whether it was authorized.
    pub fn remove_type(&mut self, type_: &str) -> bool {
        self.types.remove(type_)
    }

    pub(crate) fn types_mut(&mut self) -> &mut StringSet {
        &mut self.types
    }

    /// The bounding role, if any.
    pub fn bounds(&self) -> Option<&str> {
        self.bounds.as_deref()
    }

    /// Set or clear the bounding role.
    pub fn set_bounds(&mut self, bounds: Option<&str>) {
        self.bounds = bounds.map(str::to_owned);
    }

    /// The flavor.
    pub fn flavor(&self) -> RoleFlavor {
        self.flavor
    }

    /// Set the flavor.
    pub fn set_flavor(&mut self, flavor: RoleFlavor) {
        self.flavor = flavor;
    }

    /// Whether `role` is a member of this attribute.
    pub fn has_subrole(&self, role: &str) -> bool {
        self.subroles.contains(role)
    }

    /// Snapshot of the member roles.
    pub fn subroles(&self) -> Vec<&str> {
        self.subroles.snapshot()
    }

    /// Add a member role. Returns `false` if already a member.
    pub fn add_subrole(&mut self, role: impl Into<String>) -> bool {
        self.subroles.add(role)
    }

    /// Remove a member role. Returns whether it was a member.
    pub fn remove_subrole(&mut self, role: &str) -> bool {
        self.subroles.remove(role)
    }

    pub(crate) fn subroles_mut(&mut self) -> &mut StringSet {
        &mut self.subroles
    }
}
