//! Class datum translation.

use sepol_core::error::TranslationError;
use sepol_core::utils::LogLevel;
use sepol_core::{log_event, try_report, Handle, Result};
use sepol_policydb::consts::default_rule;
use sepol_policydb::{ClassDatum, CommonDatum, ConstraintNode, NameTable, PolicyDb};

use super::expr::exprs_from_postfix;
use crate::model::{Class, Constraint, DefaultObject, DefaultRange};

/// Map a raw user/role/type default rule. Unknown rules become `Unset`.
pub fn default_object(raw: u8) -> DefaultObject {
    match raw {
        default_rule::SOURCE => DefaultObject::Source,
        default_rule::TARGET => DefaultObject::Target,
        _ => DefaultObject::Unset,
    }
}

/// Map a raw range default rule. Unknown rules become `Unset`.
pub fn default_range(raw: u8) -> DefaultRange {
    match raw {
        default_rule::SOURCE_LOW => DefaultRange::SourceLow,
        default_rule::SOURCE_HIGH => DefaultRange::SourceHigh,
        default_rule::SOURCE_LOW_HIGH => DefaultRange::SourceLowHigh,
        default_rule::TARGET_LOW => DefaultRange::TargetLow,
        default_rule::TARGET_HIGH => DefaultRange::TargetHigh,
        default_rule::TARGET_LOW_HIGH => DefaultRange::TargetLowHigh,
        default_rule::GLBLUB => DefaultRange::Glblub,
        _ => DefaultRange::Unset,
    }
}

/// Build a class record from its datum.
pub fn class_to_record(handle: &Handle, db: &PolicyDb, datum: &ClassDatum) -> Result<Class> {
    let class = try_report!(
        handle,
        build_class(db, datum),
        format!("could not translate class {}", datum.value)
    );
    log_event!(LogLevel::Debug, "translated class", name => class.name());
    Ok(class)
}

fn build_class(db: &PolicyDb, datum: &ClassDatum) -> Result<Class> {
    let mut class = Class::new();
    class.set_name(db.val_to_name(NameTable::Class, datum.value)?);

    let common = match datum.comkey.as_deref() {
        Some(key) => Some(
            db.p_commons
                .search(key)
                .ok_or_else(|| TranslationError::MissingCommon(key.to_string()))?,
        ),
        None => None,
    };
    class.set_common(datum.comkey.as_deref());

    let perms = permissions_by_value(common, datum);
    class.permissions_mut().try_reserve(perms.len())?;
    for (_, name) in &perms {
        class.add_permission(*name);
    }

    class.try_reserve_rules(datum.constraints.len(), datum.validatetrans.len())?;
    for node in &datum.constraints {
        class.add_constraint(constraint_from_node(db, &perms, node)?);
    }
    for node in &datum.validatetrans {
        class.add_validatetrans(constraint_from_node(db, &perms, node)?);
    }

    class.set_default_user(default_object(datum.default_user));
    class.set_default_role(default_object(datum.default_role));
    class.set_default_type(default_object(datum.default_type));
    class.set_default_range(default_range(datum.default_range));
    Ok(class)
}

// Common permissions come first; their values precede the class's own.
fn permissions_by_value<'a>(
    common: Option<&'a CommonDatum>,
    datum: &'a ClassDatum,
) -> Vec<(u32, &'a str)> {
    let mut perms: Vec<(u32, &str)> = common
        .into_iter()
        .flat_map(|c| c.permissions.iter())
        .chain(datum.permissions.iter())
        .map(|(name, perm)| (perm.value, name.as_str()))
        .collect();
    perms.sort_by_key(|(value, _)| *value);
    perms
}

fn constraint_from_node(
    db: &PolicyDb,
    perms: &[(u32, &str)],
    node: &ConstraintNode,
) -> Result<Constraint> {
    let mut constraint = Constraint::new();
    for (value, name) in perms {
        let bit = value
            .checked_sub(1)
            .and_then(|shift| 1u32.checked_shl(shift))
            .unwrap_or(0);
        if node.permissions & bit != 0 {
            constraint.permissions_mut().add(*name);
        }
    }
    for expr in exprs_from_postfix(db, &node.expr)? {
        constraint.add_expr(expr);
    }
    Ok(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sepol_core::Error;
    use sepol_policydb::consts::cexpr;
    use sepol_policydb::{ConstraintExprDatum, PolicyDbBuilder, PolicyType};

    use crate::model::{ConstraintExpr, ExprAttr, ExprOp};

    fn db(policy_type: PolicyType) -> PolicyDb {
        let mut builder = PolicyDbBuilder::new(policy_type, false);
        builder.common("COMMON1", &["PERM1"]).unwrap();
        builder.class("CLASS1", Some("COMMON1"), &["PERM2", "PERM3"]).unwrap();
        builder.type_("TYPE1").unwrap();
        let leaf = builder.names_expr(cexpr::TYPE, cexpr::EQ, &["TYPE1"]).unwrap();
        builder.constraint("CLASS1", &["PERM1", "PERM3"], vec![leaf]).unwrap();
        builder
            .validatetrans(
                "CLASS1",
                vec![
                    ConstraintExprDatum::attr(cexpr::USER, cexpr::EQ),
                    ConstraintExprDatum::attr(cexpr::ROLE | cexpr::XTARGET, cexpr::EQ),
                    ConstraintExprDatum::or(),
                ],
            )
            .unwrap();
        builder
            .class_defaults("CLASS1", default_rule::SOURCE, 0, default_rule::TARGET, default_rule::GLBLUB)
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_default_mapping() {
        assert_eq!(default_object(0), DefaultObject::Unset);
        assert_eq!(default_object(default_rule::SOURCE), DefaultObject::Source);
        assert_eq!(default_object(default_rule::TARGET), DefaultObject::Target);
        assert_eq!(default_object(99), DefaultObject::Unset);
        assert_eq!(default_range(default_rule::TARGET_LOW_HIGH), DefaultRange::TargetLowHigh);
        assert_eq!(default_range(default_rule::GLBLUB), DefaultRange::Glblub);
        assert_eq!(default_range(42), DefaultRange::Unset);
    }

    #[test]
    fn test_class_translation() {
        for policy_type in [PolicyType::Kernel, PolicyType::Base] {
            let db = db(policy_type);
            let datum = db.p_classes.search("CLASS1").unwrap();
            let class = class_to_record(&Handle::new(), &db, datum).unwrap();

            assert_eq!(class.name(), "CLASS1");
            assert_eq!(class.common(), Some("COMMON1"));
            assert_eq!(class.permissions(), vec!["PERM1", "PERM2", "PERM3"]);

            let constraints = class.constraints();
            assert_eq!(constraints.len(), 1);
            assert_eq!(constraints[0].permissions(), vec!["PERM1", "PERM3"]);
            assert_eq!(
                constraints[0].exprs(),
                vec![&ConstraintExpr::names(ExprAttr::TYPE, ExprOp::Eq, ["TYPE1"])]
            );

            let validatetrans = class.validatetrans();
            assert_eq!(validatetrans.len(), 1);
            assert!(validatetrans[0].permissions().is_empty());
            assert_eq!(validatetrans[0].exprs()[0].kind().as_raw(), 3);

            assert_eq!(class.default_user(), DefaultObject::Source);
            assert_eq!(class.default_role(), DefaultObject::Unset);
            assert_eq!(class.default_type(), DefaultObject::Target);
            assert_eq!(class.default_range(), DefaultRange::Glblub);
        }
    }

    #[test]
    fn test_missing_common() {
        let mut db = db(PolicyType::Base);
        let mut datum = db.p_classes.search("CLASS1").unwrap().clone();
        datum.comkey = Some("GONE".to_string());
        db.p_classes.replace("CLASS1", datum.clone());
        assert!(matches!(
            class_to_record(&Handle::new(), &db, &datum),
            Err(Error::Translation(TranslationError::MissingCommon(_)))
        ));
    }

    #[test]
    fn test_unknown_class_value() {
        let db = db(PolicyType::Base);
        let mut datum = db.p_classes.search("CLASS1").unwrap().clone();
        datum.value = 7;
        assert!(matches!(
            class_to_record(&Handle::new(), &db, &datum),
            Err(Error::Translation(TranslationError::UnknownValue { table: "class", value: 7 }))
        ));
    }
}
