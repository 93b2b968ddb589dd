//! Rebuilding expression trees from postfix datums.
//!
//! The database stores a constraint expression as a postfix list. Leaves
//! push a node; `not` pops one operand, `and` and `or` pop two. Whatever is
//! left on the stack afterwards becomes the list of roots, bottom first.

use sepol_core::error::TranslationError;
use sepol_core::log_event;
use sepol_core::utils::LogLevel;
use sepol_core::{Result, StringSet};
use sepol_policydb::consts::cexpr;
use sepol_policydb::{ConstraintExprDatum, NameTable, PolicyDb};

use super::collect_names;
use crate::model::{ConstraintExpr, ExprAttr, ExprOp};

const ATTR_FLAGS: [(u32, ExprAttr); 11] = [
    (cexpr::USER, ExprAttr::USER),
    (cexpr::ROLE, ExprAttr::ROLE),
    (cexpr::TYPE, ExprAttr::TYPE),
    (cexpr::TARGET, ExprAttr::TARGET),
    (cexpr::XTARGET, ExprAttr::XTARGET),
    (cexpr::L1L2, ExprAttr::L1L2),
    (cexpr::L1H2, ExprAttr::L1H2),
    (cexpr::H1L2, ExprAttr::H1L2),
    (cexpr::H1H2, ExprAttr::H1H2),
    (cexpr::L1H1, ExprAttr::L1H1),
    (cexpr::L2H2, ExprAttr::L2H2),
];

/// Map a raw attribute mask to public flags. Unknown bits are dropped.
pub fn expr_attr(raw: u32) -> ExprAttr {
    ATTR_FLAGS
        .iter()
        .filter(|(bit, _)| raw & bit != 0)
        .fold(ExprAttr::empty(), |acc, (_, flag)| acc | *flag)
}

/// Map a raw operator to the public one.
pub fn expr_op(raw: u32) -> std::result::Result<ExprOp, TranslationError> {
    match raw {
        cexpr::EQ => Ok(ExprOp::Eq),
        cexpr::NEQ => Ok(ExprOp::Neq),
        cexpr::DOM => Ok(ExprOp::Dom),
        cexpr::DOMBY => Ok(ExprOp::Domby),
        cexpr::INCOMP => Ok(ExprOp::Incomp),
        other => Err(TranslationError::UnknownOperator(other)),
    }
}

/// Rebuild the expression roots of one constraint.
pub fn exprs_from_postfix(db: &PolicyDb, nodes: &[ConstraintExprDatum]) -> Result<Vec<ConstraintExpr>> {
    if nodes.is_empty() {
        return Err(TranslationError::MalformedExpression("empty expression".to_string()).into());
    }

    let mut stack: Vec<ConstraintExpr> = Vec::new();
    stack.try_reserve(nodes.len())?;

    for node in nodes {
        let expr = match node.expr_type {
            cexpr::NOT => ConstraintExpr::not(pop(&mut stack, "not")?),
            cexpr::AND => {
                let right = pop(&mut stack, "and")?;
                let left = pop(&mut stack, "and")?;
                ConstraintExpr::and(left, right)
            }
            cexpr::OR => {
                let right = pop(&mut stack, "or")?;
                let left = pop(&mut stack, "or")?;
                ConstraintExpr::or(left, right)
            }
            cexpr::ATTR => ConstraintExpr::attr(expr_attr(node.attr), leaf_op(node)?),
            cexpr::NAMES => names_leaf(db, node)?,
            other => return Err(TranslationError::UnknownExprType(other).into()),
        };
        stack.push(expr);
    }

    if stack.len() > 1 {
        log_event!(LogLevel::Debug, "constraint has several expression roots",
            roots => stack.len(),
        );
    }
    Ok(stack)
}

fn pop(stack: &mut Vec<ConstraintExpr>, operator: &str) -> std::result::Result<ConstraintExpr, TranslationError> {
    stack
        .pop()
        .ok_or_else(|| TranslationError::MalformedExpression(format!("{} is missing an operand", operator)))
}

fn leaf_op(node: &ConstraintExprDatum) -> std::result::Result<ExprOp, TranslationError> {
    let op = expr_op(node.op)?;
    if op.is_ordering() && !expr_attr(node.attr).is_level_pair() {
        log_event!(LogLevel::Warning, "ordering operator on a non-level attribute",
            op => op,
            attr => format!("{:#x}", node.attr),
        );
    }
    Ok(op)
}

fn names_leaf(db: &PolicyDb, node: &ConstraintExprDatum) -> Result<ConstraintExpr> {
    let (table, bitmap) = if node.attr & cexpr::USER != 0 {
        (NameTable::User, &node.names)
    } else if node.attr & cexpr::ROLE != 0 {
        (NameTable::Role, &node.names)
    } else if node.attr & cexpr::TYPE != 0 {
        let bitmap = node
            .type_names
            .as_ref()
            .map(|set| &set.types)
            .unwrap_or(&node.names);
        (NameTable::Type, bitmap)
    } else {
        return Err(TranslationError::NoNameTable { attr: node.attr }.into());
    };

    let mut names = StringSet::new();
    collect_names(db, table, bitmap, None, &mut names)?;
    Ok(ConstraintExpr::Names {
        attr: expr_attr(node.attr),
        op: leaf_op(node)?,
        names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sepol_core::Error;
    use sepol_policydb::{PolicyDbBuilder, PolicyType};

    fn db(policy_type: PolicyType) -> PolicyDb {
        let mut builder = PolicyDbBuilder::new(policy_type, false);
        builder.type_("TYPE1").unwrap();
        builder.type_("TYPE2").unwrap();
        builder.role("ROLE1").unwrap();
        builder.user("USER1", &["ROLE1"]).unwrap();
        builder.build().unwrap()
    }

    fn type_leaf(policy_type: PolicyType, names: &[&str]) -> ConstraintExprDatum {
        let mut builder = PolicyDbBuilder::new(policy_type, false);
        builder.type_("TYPE1").unwrap();
        builder.type_("TYPE2").unwrap();
        builder.names_expr(cexpr::TYPE, cexpr::EQ, names).unwrap()
    }

    #[test]
    fn test_attr_mapping() {
        let raw = cexpr::ROLE | cexpr::TARGET | cexpr::L2H2;
        let attr = expr_attr(raw);
        assert_eq!(attr, ExprAttr::ROLE | ExprAttr::TARGET | ExprAttr::L2H2);
        assert_eq!(expr_attr(1 << 20), ExprAttr::empty());
    }

    #[test]
    fn test_single_leaf() {
        for policy_type in [PolicyType::Kernel, PolicyType::Base] {
            let db = db(policy_type);
            let exprs = exprs_from_postfix(&db, &[type_leaf(policy_type, &["TYPE1"])]).unwrap();
            assert_eq!(exprs.len(), 1);
            assert_eq!(
                exprs[0],
                ConstraintExpr::names(ExprAttr::TYPE, ExprOp::Eq, ["TYPE1"])
            );
        }
    }

    #[test]
    fn test_tree_shape() {
        let db = db(PolicyType::Base);
        // (user1 == user2) and not (role1 != role2)
        let nodes = vec![
            ConstraintExprDatum::attr(cexpr::USER, cexpr::EQ),
            ConstraintExprDatum::attr(cexpr::ROLE, cexpr::NEQ),
            ConstraintExprDatum::not(),
            ConstraintExprDatum::and(),
        ];
        let exprs = exprs_from_postfix(&db, &nodes).unwrap();
        assert_eq!(exprs.len(), 1);
        let expected = ConstraintExpr::and(
            ConstraintExpr::attr(ExprAttr::USER, ExprOp::Eq),
            ConstraintExpr::not(ConstraintExpr::attr(ExprAttr::ROLE, ExprOp::Neq)),
        );
        assert_eq!(exprs[0], expected);
    }

    #[test]
    fn test_leftover_roots_keep_order() {
        let db = db(PolicyType::Base);
        let nodes = vec![
            ConstraintExprDatum::attr(cexpr::USER, cexpr::EQ),
            ConstraintExprDatum::attr(cexpr::L1H2, cexpr::DOM),
        ];
        let exprs = exprs_from_postfix(&db, &nodes).unwrap();
        assert_eq!(exprs.len(), 2);
        assert!(exprs[0].has_attr(ExprAttr::USER));
        assert_eq!(exprs[1].op(), Some(ExprOp::Dom));
    }

    #[test]
    fn test_names_tables() {
        let db = db(PolicyType::Kernel);
        let mut users = ConstraintExprDatum::names(cexpr::USER, cexpr::EQ, Default::default());
        users.names.set(0);
        let mut roles = ConstraintExprDatum::names(cexpr::ROLE | cexpr::TARGET, cexpr::NEQ, Default::default());
        roles.names.set(0);
        let exprs = exprs_from_postfix(&db, &[users, roles, ConstraintExprDatum::or()]).unwrap();
        let children = exprs[0].children();
        assert_eq!(children[0].names_list(), vec!["USER1"]);
        assert_eq!(children[1].names_list(), vec!["ROLE1"]);
        assert!(children[1].has_attr(ExprAttr::TARGET));
    }

    #[test]
    fn test_malformed() {
        let db = db(PolicyType::Base);
        assert!(matches!(
            exprs_from_postfix(&db, &[]),
            Err(Error::Translation(TranslationError::MalformedExpression(_)))
        ));
        assert!(matches!(
            exprs_from_postfix(&db, &[ConstraintExprDatum::not()]),
            Err(Error::Translation(TranslationError::MalformedExpression(_)))
        ));
        let nodes = vec![
            ConstraintExprDatum::attr(cexpr::USER, cexpr::EQ),
            ConstraintExprDatum::or(),
        ];
        assert!(matches!(
            exprs_from_postfix(&db, &nodes),
            Err(Error::Translation(TranslationError::MalformedExpression(_)))
        ));
    }

    #[test]
    fn test_unknown_tags() {
        let db = db(PolicyType::Base);
        let mut bad_type = ConstraintExprDatum::attr(cexpr::USER, cexpr::EQ);
        bad_type.expr_type = 9;
        assert!(matches!(
            exprs_from_postfix(&db, &[bad_type]),
            Err(Error::Translation(TranslationError::UnknownExprType(9)))
        ));

        let bad_op = ConstraintExprDatum::attr(cexpr::USER, 42);
        assert!(matches!(
            exprs_from_postfix(&db, &[bad_op]),
            Err(Error::Translation(TranslationError::UnknownOperator(42)))
        ));

        let no_table = ConstraintExprDatum::names(cexpr::L1L2, cexpr::EQ, Default::default());
        assert!(matches!(
            exprs_from_postfix(&db, &[no_table]),
            Err(Error::Translation(TranslationError::NoNameTable { attr: 32 }))
        ));
    }
}
