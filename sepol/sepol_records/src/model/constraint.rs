//! Constraint records.

use serde::{Deserialize, Serialize};

use sepol_core::error::PolicyError;
use sepol_core::StringSet;

use super::expr::ConstraintExpr;

/// A set of permissions gated by one or more expression roots.
///
/// Access constraints normally carry a single root; the list form allows
/// building a constraint step by step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Constraint {
    permissions: StringSet,
    exprs: Vec<ConstraintExpr>,
}

impl Constraint {
    /// Create an empty constraint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the constraint gates `perm`.
    pub fn has_permission(&self, perm: &str) -> bool {
        self.permissions.contains(perm)
    }

    /// Snapshot of the gated permissions.
    pub fn permissions(&self) -> Vec<&str> {
        self.permissions.snapshot()
    }

    /// Gate another permission. Returns `false` if already gated.
    pub fn add_permission(&mut self, perm: impl Into<String>) -> bool {
        self.permissions.add(perm)
    }

    /// Stop gating a permission. Returns whether it was gated.
    pub fn remove_permission(&mut self, perm: &str) -> bool {
        self.permissions.remove(perm)
    }

    /// Whether both constraints gate the same permissions, in any order.
    pub fn same_permissions(&self, other: &Constraint) -> bool {
        self.permissions.same_members(&other.permissions)
    }

    pub(crate) fn permissions_mut(&mut self) -> &mut StringSet {
        &mut self.permissions
    }

    /// Snapshot of the expression roots.
    pub fn exprs(&self) -> Vec<&ConstraintExpr> {
        self.exprs.iter().collect()
    }

    /// Number of expression roots.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Append an expression root.
    pub fn add_expr(&mut self, expr: ConstraintExpr) {
        self.exprs.push(expr);
    }

    /// Insert an expression root at `index`, shifting later roots right.
    pub fn insert_expr(&mut self, index: usize, expr: ConstraintExpr) -> Result<(), PolicyError> {
        if index > self.exprs.len() {
            return Err(PolicyError::IndexOutOfRange {
                index,
                len: self.exprs.len(),
            });
        }
        self.exprs.insert(index, expr);
        Ok(())
    }

    /// Remove the expression root at `index`, shifting later roots left.
    pub fn remove_expr(&mut self, index: usize) -> Result<ConstraintExpr, PolicyError> {
        if index >= self.exprs.len() {
            return Err(PolicyError::IndexOutOfRange {
                index,
                len: self.exprs.len(),
            });
        }
        Ok(self.exprs.remove(index))
    }
}

/// Two constraints are equal when their expression lists are pairwise
/// equal. Gated permissions do not take part.
impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.exprs.len() == other.exprs.len()
            && self.exprs.iter().zip(&other.exprs).all(|(a, b)| a == b)
    }
}

impl Eq for Constraint {}

/// Remove every element equal to `target`, filling each hole with the last
/// element. The filled slot is examined again before moving on.
pub(crate) fn remove_all_equal(list: &mut Vec<Constraint>, target: &Constraint) -> usize {
    let mut removed = 0;
    let mut i = 0;
    while i < list.len() {
        if list[i] == *target {
            list.swap_remove(i);
            removed += 1;
        } else {
            i += 1;
        }
    }
    removed
}
