//! User records.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use sepol_core::{StringSet, UserKey};

/// A user.
///
/// The MLS fields are rendered strings such as `s0` and `s0-s0:c0.c3`.
/// They are `None` when the database has no MLS support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    name: String,
    mls_level: Option<String>,
    mls_range: Option<String>,
    roles: StringSet,
}

impl User {
    /// Create an empty user record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The key addressing this user.
    pub fn key(&self) -> UserKey {
        UserKey::new(self.name.as_str())
    }

    /// Compare this user's name with a key.
    pub fn compare(&self, key: &UserKey) -> Ordering {
        self.name.as_str().cmp(key.name())
    }

    /// Compare two users by name.
    pub fn compare2(&self, other: &User) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// The user name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the user name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The default level.
    pub fn mls_level(&self) -> Option<&str> {
        self.mls_level.as_deref()
    }

    /// Set or clear the default level.
    pub fn set_mls_level(&mut self, level: Option<&str>) {
        self.mls_level = level.map(str::to_owned);
    }

    /// The allowed range.
    pub fn mls_range(&self) -> Option<&str> {
        self.mls_range.as_deref()
    }

    /// Set or clear the allowed range.
    pub fn set_mls_range(&mut self, range: Option<&str>) {
        self.mls_range = range.map(str::to_owned);
    }

    /// Whether the user is authorized for `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Snapshot of the authorized roles.
    pub fn roles(&self) -> Vec<&str> {
        self.roles.snapshot()
    }

    /// Authorize a role. Returns `false` if already authorized.
    pub fn add_role(&mut self, role: impl Into<String>) -> bool {
        self.roles.add(role)
    }

    /// Revoke a role. Returns whether it was authorized.
    pub fn remove_role(&mut self, role: &str) -> bool {
        self.roles.remove(role)
    }

    /// Replace the authorized roles.
    pub fn set_roles<I, S>(&mut self, roles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().collect();
    }

    pub(crate) fn roles_mut(&mut self) -> &mut StringSet {
        &mut self.roles
    }
}
