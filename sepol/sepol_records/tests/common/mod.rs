//! Shared "iter" policy fixture.

#![allow(dead_code)]

use sepol_policydb::consts::cexpr;
use sepol_policydb::{PolicyDb, PolicyDbBuilder, PolicyType};

pub const CLASSES: [&str; 7] = [
    "CLASS01", "CLASS02", "CLASS03", "CLASS04", "CLASS05", "CLASS06", "CLASS1",
];
pub const TYPES: [&str; 6] = ["ALIAS1", "ALIAS2", "ATTR1", "TYPE1", "TYPE2", "TYPE3"];
pub const ROLES: [&str; 4] = ["ATTR_ROLE1", "ROLE1", "ROLE2", "object_r"];
pub const USERS: [&str; 1] = ["USER1"];

pub fn iter_policy(policy_type: PolicyType, mls: bool) -> PolicyDb {
    let mut builder = PolicyDbBuilder::new(policy_type, mls);

    builder.common("COMMON1", &["PERM1"]).unwrap();
    builder.class("CLASS1", Some("COMMON1"), &[]).unwrap();
    for n in 1..=6 {
        let perm = format!("PERM0{}", n);
        builder
            .class(&format!("CLASS0{}", n), None, &[perm.as_str()])
            .unwrap();
    }

    builder.type_("TYPE1").unwrap();
    builder.type_("TYPE2").unwrap();
    builder.type_("TYPE3").unwrap();
    builder.attribute("ATTR1").unwrap();
    builder.attribute_member("ATTR1", "TYPE2").unwrap();
    builder.attribute_member("ATTR1", "TYPE3").unwrap();
    builder.alias("ALIAS1", "TYPE1").unwrap();
    builder.alias("ALIAS2", "TYPE3").unwrap();
    builder.permissive("TYPE1").unwrap();

    let leaf = builder.names_expr(cexpr::TYPE, cexpr::EQ, &["TYPE1"]).unwrap();
    builder.constraint("CLASS1", &["PERM1"], vec![leaf]).unwrap();

    builder.role("object_r").unwrap();
    builder.role("ROLE1").unwrap();
    builder.role("ROLE2").unwrap();
    builder.role_attribute("ATTR_ROLE1").unwrap();
    builder.role_type("ROLE1", "TYPE1").unwrap();
    builder.role_type("ROLE2", "TYPE2").unwrap();
    builder.role_member("ATTR_ROLE1", "ROLE1").unwrap();
    builder.role_member("ATTR_ROLE1", "ROLE2").unwrap();

    builder.user("USER1", &["ROLE1"]).unwrap();
    if mls {
        builder.sensitivity("s0").unwrap();
        for cat in ["c0", "c1", "c2", "c3"] {
            builder.category(cat).unwrap();
        }
        builder.user_level("USER1", ("s0", &[])).unwrap();
        builder
            .user_range("USER1", ("s0", &[]), ("s0", &["c0", "c1", "c2", "c3"]))
            .unwrap();
    }

    builder.build().unwrap()
}

/// Every form of the fixture: kernel and base, with and without MLS.
pub fn all_forms() -> Vec<PolicyDb> {
    let mut dbs = Vec::new();
    for policy_type in [PolicyType::Kernel, PolicyType::Base] {
        for mls in [false, true] {
            dbs.push(iter_policy(policy_type, mls));
        }
    }
    dbs
}

pub fn empty_policy(policy_type: PolicyType) -> PolicyDb {
    PolicyDbBuilder::new(policy_type, false).build().unwrap()
}
