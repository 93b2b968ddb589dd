//! Incremental construction of a [`PolicyDb`].
//!
//! Loaders and tests declare symbols by name; the builder hands out values,
//! resolves references and fills the value-indexed structures. Declarations
//! must come before references, as in a policy source file.

use sepol_core::error::PolicyError;
use sepol_core::log_event;
use sepol_core::utils::LogLevel;

use crate::consts::{cexpr, role_flavor, type_flavor, MAX_PERMS_PER_CLASS};
use crate::datum::{
    CatDatum, ClassDatum, CommonDatum, ConstraintExprDatum, ConstraintNode, MlsLevel, MlsRange,
    PermDatum, RoleDatum, SensDatum, TypeDatum, TypeSet, UserDatum,
};
use crate::ebitmap::Ebitmap;
use crate::policydb::{NameTable, PolicyDb, PolicyType};
use crate::symtab::SymTab;

type Result<T> = std::result::Result<T, PolicyError>;

/// A security level given by name: a sensitivity plus categories.
pub type LevelSpec<'a> = (&'a str, &'a [&'a str]);

/// Builder for a [`PolicyDb`].
#[derive(Debug, Clone)]
pub struct PolicyDbBuilder {
    db: PolicyDb,
}

impl PolicyDbBuilder {
    /// Start an empty database of the given form.
    pub fn new(policy_type: PolicyType, mls: bool) -> Self {
        Self {
            db: PolicyDb::new(policy_type, mls),
        }
    }

    /// Declare a common with its permissions.
    pub fn common(&mut self, name: &str, perms: &[&str]) -> Result<u32> {
        if self.db.p_commons.contains(name) {
            return Err(duplicate("common", name));
        }
        let mut permissions = SymTab::new();
        add_permissions(name, &mut permissions, perms)?;
        let value = self.db.p_commons.next_value();
        let datum = CommonDatum { value, permissions };
        self.db
            .p_commons
            .insert(name, datum)
            .map_err(|_| duplicate("common", name))?;
        Ok(value)
    }

    /// Declare a class, optionally inheriting a common.
    ///
    /// The class's own permission values follow the common's.
    pub fn class(&mut self, name: &str, common: Option<&str>, perms: &[&str]) -> Result<u32> {
        if self.db.p_classes.contains(name) {
            return Err(duplicate("class", name));
        }
        let mut permissions = SymTab::new();
        if let Some(common) = common {
            let datum = self
                .db
                .p_commons
                .search(common)
                .ok_or_else(|| unknown("common", common))?;
            for _ in 0..datum.permissions.nprim() {
                permissions.next_value();
            }
            for perm in perms {
                if datum.permissions.contains(perm) {
                    return Err(duplicate("permission", perm));
                }
            }
        }
        add_permissions(name, &mut permissions, perms)?;

        let value = self.db.p_classes.next_value();
        let datum = ClassDatum {
            value,
            comkey: common.map(str::to_owned),
            permissions,
            ..ClassDatum::default()
        };
        self.db
            .p_classes
            .insert(name, datum)
            .map_err(|_| duplicate("class", name))?;
        Ok(value)
    }

    /// Append a constraint gating `perms` of `class` on a postfix expression.
    pub fn constraint(
        &mut self,
        class: &str,
        perms: &[&str],
        expr: Vec<ConstraintExprDatum>,
    ) -> Result<()> {
        let permissions = self.permission_mask(class, perms)?;
        self.class_mut(class)?
            .constraints
            .push(ConstraintNode { permissions, expr });
        Ok(())
    }

    /// Append a validate-transition rule to `class`.
    pub fn validatetrans(&mut self, class: &str, expr: Vec<ConstraintExprDatum>) -> Result<()> {
        self.class_mut(class)?.validatetrans.push(ConstraintNode {
            permissions: 0,
            expr,
        });
        Ok(())
    }

    /// Set the raw default rules of `class` (`consts::default_rule`).
    pub fn class_defaults(&mut self, class: &str, user: u8, role: u8, type_: u8, range: u8) -> Result<()> {
        let datum = self.class_mut(class)?;
        datum.default_user = user;
        datum.default_role = role;
        datum.default_type = type_;
        datum.default_range = range;
        Ok(())
    }

    /// Declare a regular type.
    pub fn type_(&mut self, name: &str) -> Result<u32> {
        self.declare_type(name, TypeDatum::primary_type)
    }

    /// Declare a type attribute.
    pub fn attribute(&mut self, name: &str) -> Result<u32> {
        self.declare_type(name, TypeDatum::attribute)
    }

    /// Declare `alias` as another name for the regular type `target`.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<()> {
        if self.db.p_types.contains(alias) {
            return Err(duplicate("type", alias));
        }
        let target_datum = self
            .db
            .p_types
            .search(target)
            .ok_or_else(|| unknown("type", target))?;
        if target_datum.flavor != type_flavor::TYPE || !target_datum.is_primary() {
            return Err(wrong_flavor(target, "type"));
        }
        let value = target_datum.value;
        let datum = match self.db.policy_type {
            PolicyType::Kernel => TypeDatum {
                value,
                primary: 0,
                flavor: type_flavor::TYPE,
                ..TypeDatum::default()
            },
            PolicyType::Base => TypeDatum {
                value,
                primary: value,
                flavor: type_flavor::ALIAS,
                ..TypeDatum::default()
            },
        };
        self.db
            .p_types
            .insert(alias, datum)
            .map_err(|_| duplicate("type", alias))
    }

    /// Make `member` a member of the attribute `attr`.
    pub fn attribute_member(&mut self, attr: &str, member: &str) -> Result<()> {
        let bit = self.type_value(member)? - 1;
        let datum = self
            .db
            .p_types
            .search_mut(attr)
            .ok_or_else(|| unknown("type", attr))?;
        if datum.flavor != type_flavor::ATTRIB {
            return Err(wrong_flavor(attr, "attribute"));
        }
        datum.types.set(bit);
        Ok(())
    }

    /// Bound `type_` by `bound`.
    pub fn type_bounds(&mut self, type_: &str, bound: &str) -> Result<()> {
        let bound = self.type_value(bound)?;
        let datum = self
            .db
            .p_types
            .search_mut(type_)
            .ok_or_else(|| unknown("type", type_))?;
        datum.bounds = bound;
        Ok(())
    }

    /// Mark a type permissive.
    ///
    /// Kernel form records it in the global permissive map, base form in
    /// the datum flags.
    pub fn permissive(&mut self, type_: &str) -> Result<()> {
        let value = self.type_value(type_)?;
        match self.db.policy_type {
            PolicyType::Kernel => self.db.permissive_map.set(value),
            PolicyType::Base => {
                if let Some(datum) = self.db.p_types.search_mut(type_) {
                    datum.flags |= type_flavor::FLAGS_PERMISSIVE;
                }
            }
        }
        Ok(())
    }

    /// Declare a role.
    pub fn role(&mut self, name: &str) -> Result<u32> {
        self.declare_role(name, RoleDatum::role)
    }

    /// Declare a role attribute.
    pub fn role_attribute(&mut self, name: &str) -> Result<u32> {
        self.declare_role(name, RoleDatum::attribute)
    }

    /// Authorize `role` for `type_`.
    pub fn role_type(&mut self, role: &str, type_: &str) -> Result<()> {
        let bit = self.type_value(type_)? - 1;
        self.role_mut(role)?.types.types.set(bit);
        Ok(())
    }

    /// Make `member` a member of the role attribute `attr`.
    pub fn role_member(&mut self, attr: &str, member: &str) -> Result<()> {
        let bit = self.role_value(member)? - 1;
        let datum = self.role_mut(attr)?;
        if datum.flavor != role_flavor::ATTRIB {
            return Err(wrong_flavor(attr, "role attribute"));
        }
        datum.roles.set(bit);
        Ok(())
    }

    /// Bound `role` by `bound`.
    pub fn role_bounds(&mut self, role: &str, bound: &str) -> Result<()> {
        let bound = self.role_value(bound)?;
        self.role_mut(role)?.bounds = bound;
        Ok(())
    }

    /// Declare a sensitivity. Declaration order is dominance order.
    pub fn sensitivity(&mut self, name: &str) -> Result<u32> {
        if self.db.p_levels.contains(name) {
            return Err(duplicate("sensitivity", name));
        }
        let value = self.db.p_levels.next_value();
        self.db
            .p_levels
            .insert(name, SensDatum { value })
            .map_err(|_| duplicate("sensitivity", name))?;
        Ok(value)
    }

    /// Declare a category.
    pub fn category(&mut self, name: &str) -> Result<u32> {
        if self.db.p_cats.contains(name) {
            return Err(duplicate("category", name));
        }
        let value = self.db.p_cats.next_value();
        self.db
            .p_cats
            .insert(name, CatDatum { value })
            .map_err(|_| duplicate("category", name))?;
        Ok(value)
    }

    /// Declare a user authorized for `roles`.
    pub fn user(&mut self, name: &str, roles: &[&str]) -> Result<u32> {
        if self.db.p_users.contains(name) {
            return Err(duplicate("user", name));
        }
        let mut bitmap = Ebitmap::new();
        for role in roles {
            bitmap.set(self.role_value(role)? - 1);
        }
        let value = self.db.p_users.next_value();
        let datum = UserDatum {
            value,
            roles: bitmap,
            ..UserDatum::default()
        };
        self.db
            .p_users
            .insert(name, datum)
            .map_err(|_| duplicate("user", name))?;
        Ok(value)
    }

    /// Set the default level of `user`.
    pub fn user_level(&mut self, user: &str, level: LevelSpec<'_>) -> Result<()> {
        let level = self.level(level)?;
        self.user_mut(user)?.dfltlevel = level;
        Ok(())
    }

    /// Set the allowed range of `user`.
    pub fn user_range(&mut self, user: &str, low: LevelSpec<'_>, high: LevelSpec<'_>) -> Result<()> {
        let range = MlsRange {
            low: self.level(low)?,
            high: self.level(high)?,
        };
        self.user_mut(user)?.range = range;
        Ok(())
    }

    /// Build a names leaf, resolving `names` in the table selected by
    /// `attr`. Type names go to `type_names` in base form.
    pub fn names_expr(&self, attr: u32, op: u32, names: &[&str]) -> Result<ConstraintExprDatum> {
        let table = if attr & cexpr::USER != 0 {
            NameTable::User
        } else if attr & cexpr::ROLE != 0 {
            NameTable::Role
        } else if attr & cexpr::TYPE != 0 {
            NameTable::Type
        } else {
            return Err(PolicyError::MissingField("user, role or type attribute"));
        };

        let mut bitmap = Ebitmap::new();
        for name in names {
            let value = self
                .db
                .name_to_val(table, name)
                .ok_or_else(|| unknown(table.as_str(), name))?;
            bitmap.set(value - 1);
        }

        if table == NameTable::Type && self.db.policy_type == PolicyType::Base {
            Ok(ConstraintExprDatum::type_names(attr, op, TypeSet::from_types(bitmap)))
        } else {
            Ok(ConstraintExprDatum::names(attr, op, bitmap))
        }
    }

    /// Finish the database: fill the value→name tables and the kernel-form
    /// attribute maps.
    ///
    /// With MLS enabled, a user declared without a default level gets the
    /// lowest sensitivity, and one without a range gets its default level
    /// as both ends. This fails if no sensitivity was declared.
    pub fn build(mut self) -> Result<PolicyDb> {
        if self.db.mls {
            self.default_user_levels()?;
        }
        self.db.reindex()?;
        log_event!(LogLevel::Debug, "built policy database",
            policy_type => format!("{:?}", self.db.policy_type),
            mls => self.db.mls,
        );
        Ok(self.db)
    }

    fn default_user_levels(&mut self) -> Result<()> {
        let has_levels = !self.db.p_levels.is_empty();
        for (name, user) in self.db.p_users.iter_mut() {
            if user.dfltlevel.sens == 0 {
                if !has_levels {
                    return Err(PolicyError::MissingField("sensitivity"));
                }
                log_event!(LogLevel::Debug, "user has no level, using the lowest sensitivity",
                    user => name,
                );
                user.dfltlevel = MlsLevel {
                    sens: 1,
                    cat: Ebitmap::new(),
                };
            }
            if user.range.low.sens == 0 {
                user.range = MlsRange {
                    low: user.dfltlevel.clone(),
                    high: user.dfltlevel.clone(),
                };
            }
        }
        Ok(())
    }

    fn declare_type(&mut self, name: &str, make: fn(u32) -> TypeDatum) -> Result<u32> {
        if self.db.p_types.contains(name) {
            return Err(duplicate("type", name));
        }
        let value = self.db.p_types.next_value();
        self.db
            .p_types
            .insert(name, make(value))
            .map_err(|_| duplicate("type", name))?;
        Ok(value)
    }

    fn declare_role(&mut self, name: &str, make: fn(u32) -> RoleDatum) -> Result<u32> {
        if self.db.p_roles.contains(name) {
            return Err(duplicate("role", name));
        }
        let value = self.db.p_roles.next_value();
        self.db
            .p_roles
            .insert(name, make(value))
            .map_err(|_| duplicate("role", name))?;
        Ok(value)
    }

    fn permission_mask(&self, class: &str, perms: &[&str]) -> Result<u32> {
        let datum = self
            .db
            .p_classes
            .search(class)
            .ok_or_else(|| unknown("class", class))?;
        let common = datum
            .comkey
            .as_deref()
            .and_then(|key| self.db.p_commons.search(key));

        let mut mask = 0u32;
        for perm in perms {
            let value = datum
                .permissions
                .search(perm)
                .or_else(|| common.and_then(|c| c.permissions.search(perm)))
                .map(|p| p.value)
                .ok_or_else(|| unknown("permission", perm))?;
            mask |= 1 << (value - 1);
        }
        Ok(mask)
    }

    fn level(&self, (sens, cats): LevelSpec<'_>) -> Result<MlsLevel> {
        let sens = self
            .db
            .p_levels
            .search(sens)
            .ok_or_else(|| unknown("sensitivity", sens))?
            .value;
        let mut cat = Ebitmap::new();
        for name in cats {
            let value = self
                .db
                .p_cats
                .search(name)
                .ok_or_else(|| unknown("category", name))?
                .value;
            cat.set(value - 1);
        }
        Ok(MlsLevel { sens, cat })
    }

    fn type_value(&self, name: &str) -> Result<u32> {
        self.db
            .p_types
            .search(name)
            .map(|d| d.value)
            .ok_or_else(|| unknown("type", name))
    }

    fn role_value(&self, name: &str) -> Result<u32> {
        self.db
            .p_roles
            .search(name)
            .map(|d| d.value)
            .ok_or_else(|| unknown("role", name))
    }

    fn class_mut(&mut self, name: &str) -> Result<&mut ClassDatum> {
        self.db
            .p_classes
            .search_mut(name)
            .ok_or_else(|| unknown("class", name))
    }

    fn role_mut(&mut self, name: &str) -> Result<&mut RoleDatum> {
        self.db
            .p_roles
            .search_mut(name)
            .ok_or_else(|| unknown("role", name))
    }

    fn user_mut(&mut self, name: &str) -> Result<&mut UserDatum> {
        self.db
            .p_users
            .search_mut(name)
            .ok_or_else(|| unknown("user", name))
    }
}

fn add_permissions(owner: &str, table: &mut SymTab<PermDatum>, perms: &[&str]) -> Result<()> {
    for perm in perms {
        if table.nprim() >= MAX_PERMS_PER_CLASS {
            return Err(PolicyError::TooManyPermissions {
                class: owner.to_string(),
                max: MAX_PERMS_PER_CLASS,
            });
        }
        if table.contains(perm) {
            return Err(duplicate("permission", perm));
        }
        let value = table.next_value();
        table
            .insert(*perm, PermDatum { value })
            .map_err(|_| duplicate("permission", perm))?;
    }
    Ok(())
}

fn duplicate(kind: &'static str, name: &str) -> PolicyError {
    PolicyError::Duplicate {
        kind,
        name: name.to_string(),
    }
}

fn unknown(kind: &'static str, name: &str) -> PolicyError {
    PolicyError::UnknownName {
        kind,
        name: name.to_string(),
    }
}

fn wrong_flavor(name: &str, expected: &'static str) -> PolicyError {
    PolicyError::WrongFlavor {
        name: name.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_permissions_follow_common() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Base, false);
        builder.common("COMMON1", &["PERM1", "PERM2"]).unwrap();
        builder.class("CLASS1", Some("COMMON1"), &["PERM3"]).unwrap();
        let db = builder.build().unwrap();

        let class = db.p_classes.search("CLASS1").unwrap();
        assert_eq!(class.comkey.as_deref(), Some("COMMON1"));
        assert_eq!(class.permissions.search("PERM3").unwrap().value, 3);
        assert_eq!(class.permissions.len(), 1);
    }

    #[test]
    fn test_class_rejects_unknown_common_and_shadowing() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Base, false);
        assert!(matches!(
            builder.class("CLASS1", Some("NOPE"), &[]),
            Err(PolicyError::UnknownName { kind: "common", .. })
        ));
        builder.common("COMMON1", &["PERM1"]).unwrap();
        assert!(matches!(
            builder.class("CLASS1", Some("COMMON1"), &["PERM1"]),
            Err(PolicyError::Duplicate { kind: "permission", .. })
        ));
    }

    #[test]
    fn test_too_many_permissions() {
        let names: Vec<String> = (0..=MAX_PERMS_PER_CLASS).map(|i| format!("p{}", i)).collect();
        let perms: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut builder = PolicyDbBuilder::new(PolicyType::Base, false);
        assert!(matches!(
            builder.class("big", None, &perms),
            Err(PolicyError::TooManyPermissions { max: 32, .. })
        ));
        assert!(builder.class("fits", None, &perms[..32]).is_ok());
    }

    #[test]
    fn test_constraint_mask() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Base, false);
        builder.common("COMMON1", &["PERM1"]).unwrap();
        builder.class("CLASS1", Some("COMMON1"), &["PERM2"]).unwrap();
        builder.type_("TYPE1").unwrap();
        let leaf = builder
            .names_expr(cexpr::TYPE, cexpr::EQ, &["TYPE1"])
            .unwrap();
        builder
            .constraint("CLASS1", &["PERM1", "PERM2"], vec![leaf])
            .unwrap();
        assert!(matches!(
            builder.constraint("CLASS1", &["PERM9"], vec![]),
            Err(PolicyError::UnknownName { kind: "permission", .. })
        ));

        let db = builder.build().unwrap();
        let class = db.p_classes.search("CLASS1").unwrap();
        assert_eq!(class.constraints.len(), 1);
        assert_eq!(class.constraints[0].permissions, 0b11);
        let expr = &class.constraints[0].expr[0];
        assert_eq!(expr.expr_type, cexpr::NAMES);
        assert!(expr.names.is_empty());
        assert_eq!(
            expr.type_names.as_ref().unwrap().types.iter().collect::<Vec<_>>(),
            vec![0]
        );
    }

    #[test]
    fn test_kernel_type_names_use_bitmap() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Kernel, false);
        builder.type_("TYPE1").unwrap();
        let leaf = builder
            .names_expr(cexpr::TYPE | cexpr::TARGET, cexpr::NEQ, &["TYPE1"])
            .unwrap();
        assert!(leaf.type_names.is_none());
        assert!(leaf.names.get(0));

        assert!(matches!(
            builder.names_expr(cexpr::L1L2, cexpr::DOM, &["TYPE1"]),
            Err(PolicyError::MissingField(_))
        ));
    }

    #[test]
    fn test_alias_forms() {
        for policy_type in [PolicyType::Kernel, PolicyType::Base] {
            let mut builder = PolicyDbBuilder::new(policy_type, false);
            builder.type_("TYPE1").unwrap();
            builder.attribute("ATTR1").unwrap();
            builder.alias("ALIAS1", "TYPE1").unwrap();
            assert!(matches!(
                builder.alias("ALIAS2", "ATTR1"),
                Err(PolicyError::WrongFlavor { .. })
            ));
            assert!(matches!(
                builder.alias("ALIAS1", "TYPE1"),
                Err(PolicyError::Duplicate { .. })
            ));
            let db = builder.build().unwrap();
            let alias = db.p_types.search("ALIAS1").unwrap();
            assert_eq!(alias.value, 1);
            assert!(!alias.is_primary());
            assert_eq!(db.p_type_val_to_name, vec!["TYPE1", "ATTR1"]);
        }
    }

    #[test]
    fn test_permissive_placement() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Kernel, false);
        builder.type_("TYPE1").unwrap();
        builder.permissive("TYPE1").unwrap();
        let db = builder.build().unwrap();
        assert!(db.permissive_map.get(1));
        assert_eq!(db.p_types.search("TYPE1").unwrap().flags, 0);

        let mut builder = PolicyDbBuilder::new(PolicyType::Base, false);
        builder.type_("TYPE1").unwrap();
        builder.permissive("TYPE1").unwrap();
        let db = builder.build().unwrap();
        assert!(db.permissive_map.is_empty());
        assert_eq!(
            db.p_types.search("TYPE1").unwrap().flags,
            type_flavor::FLAGS_PERMISSIVE
        );
    }

    #[test]
    fn test_roles() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Base, false);
        builder.type_("TYPE1").unwrap();
        builder.role("ROLE1").unwrap();
        builder.role("ROLE2").unwrap();
        builder.role_attribute("ATTR_ROLE1").unwrap();
        builder.role_type("ROLE1", "TYPE1").unwrap();
        builder.role_member("ATTR_ROLE1", "ROLE2").unwrap();
        builder.role_bounds("ROLE2", "ROLE1").unwrap();
        assert!(matches!(
            builder.role_member("ROLE1", "ROLE2"),
            Err(PolicyError::WrongFlavor { .. })
        ));

        let db = builder.build().unwrap();
        assert!(db.p_roles.search("ROLE1").unwrap().types.types.get(0));
        assert!(db.p_roles.search("ATTR_ROLE1").unwrap().roles.get(1));
        assert_eq!(db.p_roles.search("ROLE2").unwrap().bounds, 1);
    }

    #[test]
    fn test_user_levels() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Base, true);
        builder.role("ROLE1").unwrap();
        builder.sensitivity("s0").unwrap();
        builder.category("c0").unwrap();
        builder.category("c1").unwrap();
        builder.user("USER1", &["ROLE1"]).unwrap();
        builder.user_level("USER1", ("s0", &[])).unwrap();
        builder
            .user_range("USER1", ("s0", &[]), ("s0", &["c0", "c1"]))
            .unwrap();
        assert!(matches!(
            builder.user_level("USER1", ("s9", &[])),
            Err(PolicyError::UnknownName { kind: "sensitivity", .. })
        ));
        assert!(matches!(
            builder.user("USER2", &["ROLE9"]),
            Err(PolicyError::UnknownName { kind: "role", .. })
        ));

        let db = builder.build().unwrap();
        let user = db.p_users.search("USER1").unwrap();
        assert_eq!(user.dfltlevel.sens, 1);
        assert_eq!(user.range.high.cat.iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(db.p_cat_val_to_name, vec!["c0", "c1"]);
    }

    #[test]
    fn test_mls_user_without_level_gets_lowest_sensitivity() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Kernel, true);
        builder.role("ROLE1").unwrap();
        builder.sensitivity("s0").unwrap();
        builder.sensitivity("s1").unwrap();
        builder.user("USER1", &["ROLE1"]).unwrap();
        builder.user("USER2", &["ROLE1"]).unwrap();
        builder.user_level("USER2", ("s1", &[])).unwrap();
        let db = builder.build().unwrap();

        let user1 = db.p_users.search("USER1").unwrap();
        assert_eq!(user1.dfltlevel.sens, 1);
        assert_eq!(user1.range.low, user1.dfltlevel);
        assert_eq!(user1.range.high, user1.dfltlevel);

        let user2 = db.p_users.search("USER2").unwrap();
        assert_eq!(user2.dfltlevel.sens, 2);
        assert_eq!(user2.range.low.sens, 2);
    }

    #[test]
    fn test_mls_user_without_sensitivities_is_rejected() {
        let mut builder = PolicyDbBuilder::new(PolicyType::Base, true);
        builder.role("ROLE1").unwrap();
        builder.user("USER1", &["ROLE1"]).unwrap();
        assert!(matches!(
            builder.build(),
            Err(PolicyError::MissingField("sensitivity"))
        ));

        let mut builder = PolicyDbBuilder::new(PolicyType::Base, false);
        builder.role("ROLE1").unwrap();
        builder.user("USER1", &["ROLE1"]).unwrap();
        let db = builder.build().unwrap();
        assert_eq!(db.p_users.search("USER1").unwrap().dfltlevel.sens, 0);
    }
}
