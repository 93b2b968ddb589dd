//! Datums: the value-indexed internal form of each policy entity.
//!
//! Datums never hold names of other symbols. Every cross reference is a
//! 1-based value, or a bitmap whose bit `n` stands for value `n + 1`.

use serde::{Deserialize, Serialize};

use crate::consts::{cexpr, role_flavor, type_flavor};
use crate::ebitmap::Ebitmap;
use crate::symtab::SymTab;

/// A permission of a class or common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermDatum {
    /// 1-based value, unique within the owning class (commons come first).
    pub value: u32,
}

/// A common permission set shared by several classes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonDatum {
    /// 1-based value.
    pub value: u32,
    /// Permissions declared by the common.
    pub permissions: SymTab<PermDatum>,
}

/// A security class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDatum {
    /// 1-based value.
    pub value: u32,
    /// Name of the inherited common, if any.
    pub comkey: Option<String>,
    /// Permissions declared by the class itself.
    pub permissions: SymTab<PermDatum>,
    /// Access constraints, in declaration order.
    pub constraints: Vec<ConstraintNode>,
    /// Validate-transition rules, in declaration order.
    pub validatetrans: Vec<ConstraintNode>,
    /// Raw default user rule.
    pub default_user: u8,
    /// Raw default role rule.
    pub default_role: u8,
    /// Raw default type rule.
    pub default_type: u8,
    /// Raw default range rule.
    pub default_range: u8,
}

/// One constraint or validatetrans rule of a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintNode {
    /// Gated permissions; bit `n` is the permission with value `n + 1`.
    pub permissions: u32,
    /// Expression in postfix order.
    pub expr: Vec<ConstraintExprDatum>,
}

/// A set of types as written in source policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSet {
    /// Positive types.
    pub types: Ebitmap,
    /// Negated types.
    pub negset: Ebitmap,
    /// Star/complement flags.
    pub flags: u32,
}

impl TypeSet {
    /// A type set holding exactly the given bitmap.
    pub fn from_types(types: Ebitmap) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }
}

/// One node of a postfix constraint expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintExprDatum {
    /// Raw node type (`cexpr::NOT` ..= `cexpr::NAMES`).
    pub expr_type: u32,
    /// Raw attribute mask.
    pub attr: u32,
    /// Raw operator.
    pub op: u32,
    /// Names for user/role leaves, and for type leaves in kernel form.
    pub names: Ebitmap,
    /// Types for type leaves in base form.
    pub type_names: Option<TypeSet>,
}

impl ConstraintExprDatum {
    /// A `not` node.
    pub fn not() -> Self {
        Self {
            expr_type: cexpr::NOT,
            ..Self::default()
        }
    }

    /// An `and` node.
    pub fn and() -> Self {
        Self {
            expr_type: cexpr::AND,
            ..Self::default()
        }
    }

    /// An `or` node.
    pub fn or() -> Self {
        Self {
            expr_type: cexpr::OR,
            ..Self::default()
        }
    }

    /// A leaf comparing two context attributes.
    pub fn attr(attr: u32, op: u32) -> Self {
        Self {
            expr_type: cexpr::ATTR,
            attr,
            op,
            ..Self::default()
        }
    }

    /// A leaf comparing a context attribute against a bitmap of names.
    pub fn names(attr: u32, op: u32, names: Ebitmap) -> Self {
        Self {
            expr_type: cexpr::NAMES,
            attr,
            op,
            names,
            type_names: None,
        }
    }

    /// A type leaf in base form, where the names live in a type set.
    pub fn type_names(attr: u32, op: u32, types: TypeSet) -> Self {
        Self {
            expr_type: cexpr::NAMES,
            attr,
            op,
            names: Ebitmap::new(),
            type_names: Some(types),
        }
    }
}

/// A type, attribute or alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDatum {
    /// 1-based value; aliases carry the value of their primary.
    pub value: u32,
    /// For regular types, non-zero when this entry is the primary name.
    /// For source-form aliases, the value of the aliased type.
    pub primary: u32,
    /// Raw flavor (`type_flavor::*`).
    pub flavor: u32,
    /// Members of an attribute.
    pub types: Ebitmap,
    /// Raw flags (`type_flavor::FLAGS_*`).
    pub flags: u32,
    /// Value of the bounding type, or zero.
    pub bounds: u32,
}

impl TypeDatum {
    /// A primary regular type.
    pub fn primary_type(value: u32) -> Self {
        Self {
            value,
            primary: 1,
            flavor: type_flavor::TYPE,
            ..Self::default()
        }
    }

    /// An attribute.
    pub fn attribute(value: u32) -> Self {
        Self {
            value,
            primary: 1,
            flavor: type_flavor::ATTRIB,
            ..Self::default()
        }
    }

    /// Whether this entry owns its value (it is not an alias of any kind).
    pub fn is_primary(&self) -> bool {
        match self.flavor {
            type_flavor::ALIAS => false,
            type_flavor::TYPE => self.primary != 0,
            _ => true,
        }
    }
}

/// A role or role attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDatum {
    /// 1-based value.
    pub value: u32,
    /// Authorized types.
    pub types: TypeSet,
    /// Value of the bounding role, or zero.
    pub bounds: u32,
    /// Raw flavor (`role_flavor::*`).
    pub flavor: u32,
    /// Member roles of a role attribute.
    pub roles: Ebitmap,
}

impl RoleDatum {
    /// A regular role.
    pub fn role(value: u32) -> Self {
        Self {
            value,
            flavor: role_flavor::ROLE,
            ..Self::default()
        }
    }

    /// A role attribute.
    pub fn attribute(value: u32) -> Self {
        Self {
            value,
            flavor: role_flavor::ATTRIB,
            ..Self::default()
        }
    }
}

/// A security level: one sensitivity plus a category set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlsLevel {
    /// 1-based sensitivity value.
    pub sens: u32,
    /// Categories; bit `n` is the category with value `n + 1`.
    pub cat: Ebitmap,
}

/// A low/high pair of levels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlsRange {
    /// Low level.
    pub low: MlsLevel,
    /// High level.
    pub high: MlsLevel,
}

/// A user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDatum {
    /// 1-based value.
    pub value: u32,
    /// Authorized roles.
    pub roles: Ebitmap,
    /// Allowed range (MLS only).
    pub range: MlsRange,
    /// Default level (MLS only).
    pub dfltlevel: MlsLevel,
    /// Value of the bounding user, or zero.
    pub bounds: u32,
}

/// A sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensDatum {
    /// 1-based value; also its position in the dominance order.
    pub value: u32,
}

/// A category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatDatum {
    /// 1-based value.
    pub value: u32,
}
