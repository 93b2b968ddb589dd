//! User queries and updates.

use sepol_core::error::PolicyError;
use sepol_core::utils::LogLevel;
use sepol_core::{log_event, try_report, Handle, Result, UserKey};
use sepol_policydb::{Ebitmap, MlsRange, NameTable, PolicyDb, UserDatum};

use super::{drive, IterateControl, RecordIter};
use crate::model::User;
use crate::translate::{parse_level, parse_range, user_to_record};

/// Iterator over every user of a database.
pub type UserIter<'a> = RecordIter<'a, UserDatum, User>;

/// Number of users.
pub fn count(_handle: &Handle, db: &PolicyDb) -> usize {
    db.p_users.len()
}

/// Whether `key` names a user.
pub fn exists(_handle: &Handle, db: &PolicyDb, key: &UserKey) -> bool {
    db.p_users.contains(key.name())
}

/// The user `key` names, if any.
pub fn query(handle: &Handle, db: &PolicyDb, key: &UserKey) -> Result<Option<User>> {
    db.p_users
        .search(key.name())
        .map(|datum| user_to_record(handle, db, key.name(), datum))
        .transpose()
}

/// Iterate over all users in name order.
pub fn iter<'a>(handle: &'a Handle, db: &'a PolicyDb) -> UserIter<'a> {
    RecordIter::new(handle, db, db.p_users.iter(), user_to_record)
}

/// Hand every user to `callback` until it returns `Stop` or an error.
pub fn iterate<F>(handle: &Handle, db: &PolicyDb, callback: F) -> Result<()>
where
    F: FnMut(User) -> Result<IterateControl>,
{
    drive(iter(handle, db), callback)
}

/// Insert or replace the user named by `record`.
///
/// Roles are resolved by name. With MLS enabled the level and range
/// strings are parsed; a missing string keeps the stored value, or the
/// lowest level for a new user. Without MLS both strings are ignored.
///
/// On failure `db` is left unchanged.
pub fn modify(handle: &Handle, db: &mut PolicyDb, record: &User) -> Result<()> {
    let mut staged = db.clone();
    try_report!(
        handle,
        apply(&mut staged, record),
        format!("could not modify user {}", record.name())
    );
    try_report!(handle, staged.reindex());
    *db = staged;

    log_event!(LogLevel::Debug, "modified user",
        name => record.name(),
        roles => record.roles().len(),
    );
    Ok(())
}

fn apply(db: &mut PolicyDb, record: &User) -> Result<()> {
    let name = record.name();
    if name.is_empty() {
        return Err(PolicyError::MissingField("name").into());
    }

    let mut roles = Ebitmap::new();
    for role in record.roles() {
        let value = db
            .name_to_val(NameTable::Role, role)
            .ok_or_else(|| PolicyError::UnknownName {
                kind: "role",
                name: role.to_string(),
            })?;
        roles.set(value - 1);
    }

    let mut datum = match db.p_users.search(name) {
        Some(datum) => datum.clone(),
        None => UserDatum {
            value: db.p_users.next_value(),
            ..UserDatum::default()
        },
    };
    datum.roles = roles;

    if db.mls {
        if let Some(level) = record.mls_level() {
            datum.dfltlevel = parse_level(db, level)?;
        }
        if let Some(range) = record.mls_range() {
            datum.range = parse_range(db, range)?;
        }
        if datum.dfltlevel.sens == 0 {
            datum.dfltlevel.sens = lowest_sensitivity(db, name)?;
        }
        if datum.range.low.sens == 0 {
            let low = datum.dfltlevel.clone();
            datum.range = MlsRange {
                low: low.clone(),
                high: low,
            };
        }
    }

    db.p_users.replace(name, datum);
    Ok(())
}

fn lowest_sensitivity(db: &PolicyDb, user: &str) -> std::result::Result<u32, PolicyError> {
    if db.p_levels.is_empty() {
        return Err(PolicyError::MissingField("sensitivity"));
    }
    log_event!(LogLevel::Debug, "user has no level, using the lowest sensitivity",
        user => user,
    );
    Ok(1)
}
