use sepol_policydb::consts::{cexpr, type_flavor};
use sepol_policydb::{NameTable, PolicyDb, PolicyDbBuilder, PolicyType};

fn build(policy_type: PolicyType) -> PolicyDb {
    let mut builder = PolicyDbBuilder::new(policy_type, true);
    builder.common("COMMON1", &["PERM1"]).unwrap();
    builder.class("CLASS1", Some("COMMON1"), &[]).unwrap();

    builder.type_("TYPE1").unwrap();
    builder.type_("TYPE2").unwrap();
    builder.type_("TYPE3").unwrap();
    builder.attribute("ATTR1").unwrap();
    builder.attribute_member("ATTR1", "TYPE2").unwrap();
    builder.attribute_member("ATTR1", "TYPE3").unwrap();
    builder.alias("ALIAS1", "TYPE1").unwrap();
    builder.permissive("TYPE1").unwrap();

    let leaf = builder
        .names_expr(cexpr::TYPE, cexpr::EQ, &["TYPE1"])
        .unwrap();
    builder.constraint("CLASS1", &["PERM1"], vec![leaf]).unwrap();

    builder.role("ROLE1").unwrap();
    builder.role_type("ROLE1", "TYPE1").unwrap();
    builder.sensitivity("s0").unwrap();
    builder.category("c0").unwrap();
    builder.user("USER1", &["ROLE1"]).unwrap();
    builder.user_level("USER1", ("s0", &[])).unwrap();
    builder.build().unwrap()
}

#[test]
fn test_kernel_form_maps() {
    let db = build(PolicyType::Kernel);
    assert!(db.is_kernel());

    let attr = db.name_to_val(NameTable::Type, "ATTR1").unwrap();
    let members: Vec<u32> = db.attr_type_map[attr as usize - 1].iter().collect();
    assert_eq!(members, vec![1, 2, 3]);

    let type2 = db.name_to_val(NameTable::Type, "TYPE2").unwrap();
    let attrs: Vec<u32> = db.type_attr_map[type2 as usize - 1].iter().collect();
    assert_eq!(attrs, vec![1, 3]);

    assert!(db.permissive_map.get(1));
    let alias = db.p_types.search("ALIAS1").unwrap();
    assert_eq!(alias.flavor, type_flavor::TYPE);
    assert_eq!(alias.primary, 0);
}

#[test]
fn test_base_form_datums() {
    let db = build(PolicyType::Base);
    assert!(!db.is_kernel());
    assert!(db.attr_type_map.is_empty());

    let alias = db.p_types.search("ALIAS1").unwrap();
    assert_eq!(alias.flavor, type_flavor::ALIAS);
    assert_eq!(alias.primary, 1);

    let type1 = db.p_types.search("TYPE1").unwrap();
    assert_eq!(type1.flags & type_flavor::FLAGS_PERMISSIVE, type_flavor::FLAGS_PERMISSIVE);
}

#[test]
fn test_value_tables() {
    let db = build(PolicyType::Base);
    assert_eq!(db.val_to_name(NameTable::Class, 1).unwrap(), "CLASS1");
    assert_eq!(db.val_to_name(NameTable::Role, 1).unwrap(), "ROLE1");
    assert_eq!(db.val_to_name(NameTable::User, 1).unwrap(), "USER1");
    assert_eq!(db.val_to_name(NameTable::Sensitivity, 1).unwrap(), "s0");
    assert_eq!(db.val_to_name(NameTable::Category, 1).unwrap(), "c0");
    assert_eq!(db.p_type_val_to_name.len(), 4);
}

#[test]
fn test_empty_database() {
    let db = PolicyDbBuilder::new(PolicyType::Base, false).build().unwrap();
    assert!(db.p_classes.is_empty());
    assert!(db.p_types.is_empty());
    assert!(db.val_to_name(NameTable::Type, 1).is_err());
}

#[test]
fn test_serde_round_trip() {
    let db = build(PolicyType::Kernel);
    let json = serde_json::to_string(&db).unwrap();
    let restored: PolicyDb = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.policy_type, PolicyType::Kernel);
    assert_eq!(restored.p_type_val_to_name, db.p_type_val_to_name);
    assert_eq!(restored.attr_type_map, db.attr_type_map);
    assert_eq!(
        restored.p_classes.search("CLASS1").unwrap().constraints,
        db.p_classes.search("CLASS1").unwrap().constraints
    );
}
