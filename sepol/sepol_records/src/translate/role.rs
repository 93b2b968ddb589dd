//! Role datum translation.

use sepol_core::error::TranslationError;
use sepol_core::utils::LogLevel;
use sepol_core::{log_event, try_report, Handle, Result};
use sepol_policydb::consts::role_flavor;
use sepol_policydb::{NameTable, PolicyDb, RoleDatum};

use super::{bounds_name, collect_names};
use crate::model::{Role, RoleFlavor};

/// Build a role record for the entry `name`.
pub fn role_to_record(handle: &Handle, db: &PolicyDb, name: &str, datum: &RoleDatum) -> Result<Role> {
    let record = try_report!(
        handle,
        build_role(db, name, datum),
        format!("could not translate role {}", name)
    );
    log_event!(LogLevel::Debug, "translated role", name => record.name());
    Ok(record)
}

fn build_role(db: &PolicyDb, name: &str, datum: &RoleDatum) -> Result<Role> {
    let mut record = Role::new();
    record.set_name(name);
    record.set_flavor(match datum.flavor {
        role_flavor::ROLE => RoleFlavor::Role,
        role_flavor::ATTRIB => RoleFlavor::Attribute,
        other => return Err(TranslationError::UnknownFlavor(other).into()),
    });

    collect_names(db, NameTable::Type, &datum.types.types, None, record.types_mut())?;
    // A plain role's bitmap holds the roles it dominates, not members.
    if datum.flavor == role_flavor::ATTRIB {
        collect_names(
            db,
            NameTable::Role,
            &datum.roles,
            datum.value.checked_sub(1),
            record.subroles_mut(),
        )?;
    }

    record.set_bounds(bounds_name(db, NameTable::Role, datum.bounds)?);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sepol_core::Error;
    use sepol_policydb::{PolicyDbBuilder, PolicyType};

    fn db() -> PolicyDb {
        let mut builder = PolicyDbBuilder::new(PolicyType::Kernel, false);
        builder.type_("TYPE1").unwrap();
        builder.type_("TYPE2").unwrap();
        builder.role("ROLE1").unwrap();
        builder.role("ROLE2").unwrap();
        builder.role_attribute("ATTR_ROLE1").unwrap();
        builder.role_type("ROLE1", "TYPE1").unwrap();
        builder.role_type("ROLE2", "TYPE2").unwrap();
        builder.role_type("ROLE2", "TYPE1").unwrap();
        builder.role_member("ATTR_ROLE1", "ROLE1").unwrap();
        builder.role_member("ATTR_ROLE1", "ROLE2").unwrap();
        builder.role_bounds("ROLE2", "ROLE1").unwrap();
        builder.build().unwrap()
    }

    fn translate(db: &PolicyDb, name: &str) -> Role {
        let datum = db.p_roles.search(name).unwrap();
        role_to_record(&Handle::new(), db, name, datum).unwrap()
    }

    #[test]
    fn test_role_types_follow_value_order() {
        let db = db();
        let role = translate(&db, "ROLE2");
        assert_eq!(role.flavor(), RoleFlavor::Role);
        assert_eq!(role.types(), vec!["TYPE1", "TYPE2"]);
        assert_eq!(role.bounds(), Some("ROLE1"));
        assert!(role.subroles().is_empty());
    }

    #[test]
    fn test_role_attribute() {
        let db = db();
        let attr = translate(&db, "ATTR_ROLE1");
        assert_eq!(attr.flavor(), RoleFlavor::Attribute);
        assert_eq!(attr.subroles(), vec!["ROLE1", "ROLE2"]);
        assert!(attr.types().is_empty());
        assert_eq!(attr.bounds(), None);
    }

    #[test]
    fn test_own_bit_skipped() {
        let mut db = db();
        if let Some(attr) = db.p_roles.search_mut("ATTR_ROLE1") {
            attr.roles.set(2);
        }
        let attr = translate(&db, "ATTR_ROLE1");
        assert!(!attr.has_subrole("ATTR_ROLE1"));
    }

    #[test]
    fn test_plain_role_has_no_subroles() {
        let mut db = db();
        if let Some(role) = db.p_roles.search_mut("ROLE1") {
            role.roles.set(0);
            role.roles.set(1);
        }
        let role = translate(&db, "ROLE1");
        assert_eq!(role.flavor(), RoleFlavor::Role);
        assert!(role.subroles().is_empty());
    }

    #[test]
    fn test_bad_datums() {
        let db = db();
        let mut datum = db.p_roles.search("ROLE1").unwrap().clone();
        datum.flavor = 5;
        assert!(matches!(
            role_to_record(&Handle::new(), &db, "ROLE1", &datum),
            Err(Error::Translation(TranslationError::UnknownFlavor(5)))
        ));

        let mut datum = db.p_roles.search("ROLE1").unwrap().clone();
        datum.types.types.set(40);
        assert!(matches!(
            role_to_record(&Handle::new(), &db, "ROLE1", &datum),
            Err(Error::Translation(TranslationError::UnknownValue { table: "type", value: 41 }))
        ));
    }
}
