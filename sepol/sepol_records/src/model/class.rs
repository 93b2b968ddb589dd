//! Security class records.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use sepol_core::{ClassKey, StringSet};

use super::constraint::{remove_all_equal, Constraint};

/// Where a new context takes its user, role or type from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefaultObject {
    /// No class-specific rule.
    #[default]
    Unset,
    /// From the source context.
    Source,
    /// From the target context.
    Target,
}

impl DefaultObject {
    /// Public numeric code; `Unset` is 0.
    pub fn as_raw(&self) -> u8 {
        match self {
            Self::Unset => 0,
            Self::Source => 1,
            Self::Target => 2,
        }
    }

    /// Parse a public numeric code.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Unset),
            1 => Some(Self::Source),
            2 => Some(Self::Target),
            _ => None,
        }
    }
}

/// Where a new context takes its MLS range from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefaultRange {
    /// No class-specific rule.
    #[default]
    Unset,
    /// Source low level.
    SourceLow,
    /// Source high level.
    SourceHigh,
    /// Source range.
    SourceLowHigh,
    /// Target low level.
    TargetLow,
    /// Target high level.
    TargetHigh,
    /// Target range.
    TargetLowHigh,
    /// Greatest lower bound of source and target.
    Glblub,
}

impl DefaultRange {
    /// Public numeric code; `Unset` is 0.
    pub fn as_raw(&self) -> u8 {
        match self {
            Self::Unset => 0,
            Self::SourceLow => 1,
            Self::SourceHigh => 2,
            Self::SourceLowHigh => 3,
            Self::TargetLow => 4,
            Self::TargetHigh => 5,
            Self::TargetLowHigh => 6,
            Self::Glblub => 7,
        }
    }

    /// Parse a public numeric code.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Unset),
            1 => Some(Self::SourceLow),
            2 => Some(Self::SourceHigh),
            3 => Some(Self::SourceLowHigh),
            4 => Some(Self::TargetLow),
            5 => Some(Self::TargetHigh),
            6 => Some(Self::TargetLowHigh),
            7 => Some(Self::Glblub),
            _ => None,
        }
    }
}

/// A security class.
///
/// Permissions inherited from the class's common are listed first, then the
/// class's own. Two classes are equal only if their constraints match in
/// both expressions and gated permissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Class {
    name: String,
    common: Option<String>,
    permissions: StringSet,
    constraints: Vec<Constraint>,
    validatetrans: Vec<Constraint>,
    default_user: DefaultObject,
    default_role: DefaultObject,
    default_type: DefaultObject,
    default_range: DefaultRange,
}

impl Class {
    /// Create an empty class record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The key addressing this class.
    pub fn key(&self) -> ClassKey {
        ClassKey::new(self.name.as_str())
    }

    /// Compare this class's name with a key.
    pub fn compare(&self, key: &ClassKey) -> Ordering {
        self.name.as_str().cmp(key.name())
    }

    /// Compare two classes by name.
    pub fn compare2(&self, other: &Class) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the class name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The inherited common, if any.
    pub fn common(&self) -> Option<&str> {
        self.common.as_deref()
    }

    /// Set or clear the inherited common.
    pub fn set_common(&mut self, common: Option<&str>) {
        self.common = common.map(str::to_owned);
    }

    /// Whether the class grants `perm`, directly or through its common.
    pub fn has_permission(&self, perm: &str) -> bool {
        self.permissions.contains(perm)
    }

    /// Snapshot of the permissions.
    pub fn permissions(&self) -> Vec<&str> {
        self.permissions.snapshot()
    }

    /// Add a permission. Returns `false` if already present.
    pub fn add_permission(&mut self, perm: impl Into<String>) -> bool {
        self.permissions.add(perm)
    }

    /// Remove a permission. Returns whether it was present.
    pub fn remove_permission(&mut self, perm: &str) -> bool {
        self.permissions.remove(perm)
    }

    pub(crate) fn permissions_mut(&mut self) -> &mut StringSet {
        &mut self.permissions
    }

    /// Snapshot of the access constraints.
    pub fn constraints(&self) -> Vec<&Constraint> {
        self.constraints.iter().collect()
    }

    /// Append an access constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Remove every access constraint equal to `constraint`. The order of
    /// the remaining constraints is not kept. Returns how many were removed.
    pub fn remove_constraint(&mut self, constraint: &Constraint) -> usize {
        remove_all_equal(&mut self.constraints, constraint)
    }

    /// Snapshot of the validate-transition rules.
    pub fn validatetrans(&self) -> Vec<&Constraint> {
        self.validatetrans.iter().collect()
    }

    /// Append a validate-transition rule.
    pub fn add_validatetrans(&mut self, constraint: Constraint) {
        self.validatetrans.push(constraint);
    }

    /// Remove every validate-transition rule equal to `constraint`.
    pub fn remove_validatetrans(&mut self, constraint: &Constraint) -> usize {
        remove_all_equal(&mut self.validatetrans, constraint)
    }

    pub(crate) fn try_reserve_rules(
        &mut self,
        constraints: usize,
        validatetrans: usize,
    ) -> Result<(), std::collections::TryReserveError> {
        self.constraints.try_reserve(constraints)?;
        self.validatetrans.try_reserve(validatetrans)
    }

    /// Default user rule.
    pub fn default_user(&self) -> DefaultObject {
        self.default_user
    }

    /// Set the default user rule.
    pub fn set_default_user(&mut self, value: DefaultObject) {
        self.default_user = value;
    }

    /// Default role rule.
    pub fn default_role(&self) -> DefaultObject {
        self.default_role
    }

    /// Set the default role rule.
    pub fn set_default_role(&mut self, value: DefaultObject) {
        self.default_role = value;
    }

    /// Default type rule.
    pub fn default_type(&self) -> DefaultObject {
        self.default_type
    }

    /// Set the default type rule.
    pub fn set_default_type(&mut self, value: DefaultObject) {
        self.default_type = value;
    }

    /// Default range rule.
    pub fn default_range(&self) -> DefaultRange {
        self.default_range
    }

    /// Set the default range rule.
    pub fn set_default_range(&mut self, value: DefaultRange) {
        self.default_range = value;
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.common == other.common
            && self.permissions == other.permissions
            && same_constraints(&self.constraints, &other.constraints)
            && same_constraints(&self.validatetrans, &other.validatetrans)
            && self.default_user == other.default_user
            && self.default_role == other.default_role
            && self.default_type == other.default_type
            && self.default_range == other.default_range
    }
}

impl Eq for Class {}

fn same_constraints(a: &[Constraint], b: &[Constraint]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| x == y && x.same_permissions(y))
}
