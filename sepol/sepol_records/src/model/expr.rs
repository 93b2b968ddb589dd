//! Constraint expression trees.
//!
//! A constraint expression is a boolean formula over comparisons of
//! security-context fields. Leaves compare two context fields to each
//! other (`Attr`) or one field against a set of names (`Names`); inner
//! nodes combine them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use sepol_core::StringSet;

bitflags! {
    /// Selects the context fields a leaf compares.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ExprAttr: u32 {
        /// User identity.
        const USER = 1;
        /// Role.
        const ROLE = 1 << 1;
        /// Type.
        const TYPE = 1 << 2;
        /// Target context instead of source.
        const TARGET = 1 << 3;
        /// Third context of a validate-transition rule.
        const XTARGET = 1 << 4;
        /// Low level of context 1 vs. low level of context 2.
        const L1L2 = 1 << 5;
        /// Low level of context 1 vs. high level of context 2.
        const L1H2 = 1 << 6;
        /// High level of context 1 vs. low level of context 2.
        const H1L2 = 1 << 7;
        /// High level of context 1 vs. high level of context 2.
        const H1H2 = 1 << 8;
        /// Low vs. high level of context 1.
        const L1H1 = 1 << 9;
        /// Low vs. high level of context 2.
        const L2H2 = 1 << 10;
    }
}

impl ExprAttr {
    /// All level-pair selectors.
    pub const LEVEL_PAIRS: ExprAttr = ExprAttr::L1L2
        .union(ExprAttr::L1H2)
        .union(ExprAttr::H1L2)
        .union(ExprAttr::H1H2)
        .union(ExprAttr::L1H1)
        .union(ExprAttr::L2H2);

    /// Whether the comparison is over security levels.
    pub fn is_level_pair(&self) -> bool {
        self.intersects(Self::LEVEL_PAIRS)
    }
}

impl fmt::Display for ExprAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        f.write_str(&names.join("|"))
    }
}

/// Node kind of a constraint expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprKind {
    /// Negation.
    Not,
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
    /// Field compared to field.
    Attr,
    /// Field compared to a name set.
    Names,
}

impl ExprKind {
    /// Public numeric code.
    pub fn as_raw(&self) -> u32 {
        match self {
            Self::Not => 1,
            Self::And => 2,
            Self::Or => 3,
            Self::Attr => 4,
            Self::Names => 5,
        }
    }

    /// Parse a public numeric code.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Not),
            2 => Some(Self::And),
            3 => Some(Self::Or),
            4 => Some(Self::Attr),
            5 => Some(Self::Names),
            _ => None,
        }
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::Attr => "attr",
            Self::Names => "names",
        };
        f.write_str(s)
    }
}

/// Comparison operator of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprOp {
    /// Equal.
    Eq,
    /// Not equal.
    Neq,
    /// Dominates.
    Dom,
    /// Dominated by.
    Domby,
    /// Incomparable.
    Incomp,
}

impl ExprOp {
    /// Public numeric code.
    pub fn as_raw(&self) -> u32 {
        match self {
            Self::Eq => 1,
            Self::Neq => 2,
            Self::Dom => 3,
            Self::Domby => 4,
            Self::Incomp => 5,
        }
    }

    /// Parse a public numeric code.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Eq),
            2 => Some(Self::Neq),
            3 => Some(Self::Dom),
            4 => Some(Self::Domby),
            5 => Some(Self::Incomp),
            _ => None,
        }
    }

    /// Whether this is an MLS partial-order operator. These only apply to
    /// level-pair selectors.
    pub fn is_ordering(&self) -> bool {
        matches!(self, Self::Dom | Self::Domby | Self::Incomp)
    }
}

impl fmt::Display for ExprOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Dom => "dom",
            Self::Domby => "domby",
            Self::Incomp => "incomp",
        };
        f.write_str(s)
    }
}

/// A node of a constraint expression tree. Each node owns its children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConstraintExpr {
    /// `not e`.
    Not(Box<ConstraintExpr>),
    /// `l and r`.
    And(Box<ConstraintExpr>, Box<ConstraintExpr>),
    /// `l or r`.
    Or(Box<ConstraintExpr>, Box<ConstraintExpr>),
    /// Two context fields compared to each other.
    Attr {
        /// Fields compared.
        attr: ExprAttr,
        /// Operator.
        op: ExprOp,
    },
    /// A context field compared against a set of names.
    Names {
        /// Field compared.
        attr: ExprAttr,
        /// Operator.
        op: ExprOp,
        /// Names, unique.
        names: StringSet,
    },
}

impl ConstraintExpr {
    /// `not expr`.
    pub fn not(expr: ConstraintExpr) -> Self {
        Self::Not(Box::new(expr))
    }

    /// `left and right`.
    pub fn and(left: ConstraintExpr, right: ConstraintExpr) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// `left or right`.
    pub fn or(left: ConstraintExpr, right: ConstraintExpr) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// A field-to-field leaf.
    pub fn attr(attr: ExprAttr, op: ExprOp) -> Self {
        Self::Attr { attr, op }
    }

    /// A field-to-names leaf. Duplicate names collapse.
    pub fn names<I, S>(attr: ExprAttr, op: ExprOp, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names {
            attr,
            op,
            names: names.into_iter().collect(),
        }
    }

    /// The node kind.
    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Not(_) => ExprKind::Not,
            Self::And(..) => ExprKind::And,
            Self::Or(..) => ExprKind::Or,
            Self::Attr { .. } => ExprKind::Attr,
            Self::Names { .. } => ExprKind::Names,
        }
    }

    /// The attribute flags of a leaf; empty for combinators.
    pub fn attr_flags(&self) -> ExprAttr {
        match self {
            Self::Attr { attr, .. } | Self::Names { attr, .. } => *attr,
            _ => ExprAttr::empty(),
        }
    }

    /// Whether every flag in `attr` is set on this leaf.
    pub fn has_attr(&self, attr: ExprAttr) -> bool {
        !attr.is_empty() && self.attr_flags().contains(attr)
    }

    /// Set flags on a leaf. Returns `false` on a combinator.
    pub fn set_attr(&mut self, flags: ExprAttr) -> bool {
        match self.attr_mut() {
            Some(attr) => {
                attr.insert(flags);
                true
            }
            None => false,
        }
    }

    /// Clear flags on a leaf. Returns `false` on a combinator.
    pub fn unset_attr(&mut self, flags: ExprAttr) -> bool {
        match self.attr_mut() {
            Some(attr) => {
                attr.remove(flags);
                true
            }
            None => false,
        }
    }

    /// Clear every flag on a leaf. Returns `false` on a combinator.
    pub fn clear_attr(&mut self) -> bool {
        match self.attr_mut() {
            Some(attr) => {
                *attr = ExprAttr::empty();
                true
            }
            None => false,
        }
    }

    /// The operator of a leaf.
    pub fn op(&self) -> Option<ExprOp> {
        match self {
            Self::Attr { op, .. } | Self::Names { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Replace the operator of a leaf. Returns `false` on a combinator.
    pub fn set_op(&mut self, new_op: ExprOp) -> bool {
        match self {
            Self::Attr { op, .. } | Self::Names { op, .. } => {
                *op = new_op;
                true
            }
            _ => false,
        }
    }

    /// Whether a names leaf contains `name`.
    pub fn has_name(&self, name: &str) -> bool {
        match self {
            Self::Names { names, .. } => names.contains(name),
            _ => false,
        }
    }

    /// Snapshot of the names of a names leaf; empty for other nodes.
    pub fn names_list(&self) -> Vec<&str> {
        match self {
            Self::Names { names, .. } => names.snapshot(),
            _ => Vec::new(),
        }
    }

    /// Add a name to a names leaf. Returns `false` if the name was already
    /// present or this is not a names leaf.
    pub fn add_name(&mut self, name: impl Into<String>) -> bool {
        match self {
            Self::Names { names, .. } => names.add(name),
            _ => false,
        }
    }

    /// Remove a name from a names leaf. Returns whether it was present.
    pub fn remove_name(&mut self, name: &str) -> bool {
        match self {
            Self::Names { names, .. } => names.remove(name),
            _ => false,
        }
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Vec<&ConstraintExpr> {
        match self {
            Self::Not(expr) => vec![expr.as_ref()],
            Self::And(left, right) | Self::Or(left, right) => vec![left.as_ref(), right.as_ref()],
            _ => Vec::new(),
        }
    }

    /// Number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(ConstraintExpr::node_count)
            .sum::<usize>()
    }

    fn attr_mut(&mut self) -> Option<&mut ExprAttr> {
        match self {
            Self::Attr { attr, .. } | Self::Names { attr, .. } => Some(attr),
            _ => None,
        }
    }
}

/// Name sets compare ignoring order; combinators compare their children.
impl PartialEq for ConstraintExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Not(a), Self::Not(b)) => a == b,
            (Self::And(al, ar), Self::And(bl, br)) | (Self::Or(al, ar), Self::Or(bl, br)) => {
                al == bl && ar == br
            }
            (Self::Attr { attr: aa, op: ao }, Self::Attr { attr: ba, op: bo }) => {
                aa == ba && ao == bo
            }
            (
                Self::Names {
                    attr: aa,
                    op: ao,
                    names: an,
                },
                Self::Names {
                    attr: ba,
                    op: bo,
                    names: bn,
                },
            ) => aa == ba && ao == bo && an.same_members(bn),
            _ => false,
        }
    }
}

impl Eq for ConstraintExpr {}

impl fmt::Display for ConstraintExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not(expr) => write!(f, "not ({})", expr),
            Self::And(left, right) => write!(f, "({}) and ({})", left, right),
            Self::Or(left, right) => write!(f, "({}) or ({})", left, right),
            Self::Attr { attr, op } => write!(f, "{} {}", attr, op),
            Self::Names { attr, op, names } => {
                write!(f, "{} {} {{ {} }}", attr, op, names.snapshot().join(" "))
            }
        }
    }
}
