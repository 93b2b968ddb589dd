//! User datum translation.

use sepol_core::utils::LogLevel;
use sepol_core::{log_event, try_report, Handle, Result};
use sepol_policydb::{NameTable, PolicyDb, UserDatum};

use super::collect_names;
use super::mls::{render_level, render_range};
use crate::model::User;

/// Build a user record for the entry `name`. The MLS fields are filled only
/// when the database has MLS enabled.
pub fn user_to_record(handle: &Handle, db: &PolicyDb, name: &str, datum: &UserDatum) -> Result<User> {
    let record = try_report!(
        handle,
        build_user(db, name, datum),
        format!("could not translate user {}", name)
    );
    log_event!(LogLevel::Debug, "translated user", name => record.name());
    Ok(record)
}

fn build_user(db: &PolicyDb, name: &str, datum: &UserDatum) -> Result<User> {
    let mut record = User::new();
    record.set_name(name);
    collect_names(db, NameTable::Role, &datum.roles, None, record.roles_mut())?;

    if db.mls {
        let level = render_level(db, &datum.dfltlevel)?;
        let range = render_range(db, &datum.range)?;
        record.set_mls_level(Some(level.as_str()));
        record.set_mls_range(Some(range.as_str()));
    }
    Ok(record)
}
