//! Role queries.

use sepol_core::{Handle, Result, RoleKey};
use sepol_policydb::{PolicyDb, RoleDatum};

use super::{drive, IterateControl, RecordIter};
use crate::model::Role;
use crate::translate::role_to_record;

/// Iterator over every role of a database.
pub type RoleIter<'a> = RecordIter<'a, RoleDatum, Role>;

/// Number of roles, role attributes included.
pub fn count(_handle: &Handle, db: &PolicyDb) -> usize {
    db.p_roles.len()
}

/// Whether `key` names a role.
pub fn exists(_handle: &Handle, db: &PolicyDb, key: &RoleKey) -> bool {
    db.p_roles.contains(key.name())
}

/// The role `key` names, if any.
pub fn query(handle: &Handle, db: &PolicyDb, key: &RoleKey) -> Result<Option<Role>> {
    db.p_roles
        .search(key.name())
        .map(|datum| role_to_record(handle, db, key.name(), datum))
        .transpose()
}

/// Iterate over all roles in name order.
pub fn iter<'a>(handle: &'a Handle, db: &'a PolicyDb) -> RoleIter<'a> {
    RecordIter::new(handle, db, db.p_roles.iter(), role_to_record)
}

/// Hand every role to `callback` until it returns `Stop` or an error.
pub fn iterate<F>(handle: &Handle, db: &PolicyDb, callback: F) -> Result<()>
where
    F: FnMut(Role) -> Result<IterateControl>,
{
    drive(iter(handle, db), callback)
}
