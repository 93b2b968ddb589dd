//! Raw tags used inside the database.
//!
//! These are the values stored in datums. The record layer exposes its own
//! enums and converts through explicit tables, so the two sets of numbers
//! are free to diverge.

/// Constraint expression node types.
pub mod cexpr {
    /// `not expr`.
    pub const NOT: u32 = 1;
    /// `expr and expr`.
    pub const AND: u32 = 2;
    /// `expr or expr`.
    pub const OR: u32 = 3;
    /// `attr op attr`.
    pub const ATTR: u32 = 4;
    /// `attr op names`.
    pub const NAMES: u32 = 5;

    /// User identity.
    pub const USER: u32 = 1;
    /// Role.
    pub const ROLE: u32 = 2;
    /// Type.
    pub const TYPE: u32 = 4;
    /// Target context if set, source otherwise.
    pub const TARGET: u32 = 8;
    /// Third context of a validatetrans rule.
    pub const XTARGET: u32 = 16;
    /// Low level 1 vs. low level 2.
    pub const L1L2: u32 = 32;
    /// Low level 1 vs. high level 2.
    pub const L1H2: u32 = 64;
    /// High level 1 vs. low level 2.
    pub const H1L2: u32 = 128;
    /// High level 1 vs. high level 2.
    pub const H1H2: u32 = 256;
    /// Low level 1 vs. high level 1.
    pub const L1H1: u32 = 512;
    /// Low level 2 vs. high level 2.
    pub const L2H2: u32 = 1024;

    /// `==` or `eq`.
    pub const EQ: u32 = 1;
    /// `!=`.
    pub const NEQ: u32 = 2;
    /// `dom`.
    pub const DOM: u32 = 3;
    /// `domby`.
    pub const DOMBY: u32 = 4;
    /// `incomp`.
    pub const INCOMP: u32 = 5;
}

/// Type datum flavors and flags.
pub mod type_flavor {
    /// Regular type (or, when not primary, a kernel alias).
    pub const TYPE: u32 = 0;
    /// Attribute.
    pub const ATTRIB: u32 = 1;
    /// Alias (source form).
    pub const ALIAS: u32 = 2;

    /// Permissive type.
    pub const FLAGS_PERMISSIVE: u32 = 1 << 0;
    /// Attribute must be expanded.
    pub const FLAGS_EXPAND_ATTR_TRUE: u32 = 1 << 1;
    /// Attribute must not be expanded.
    pub const FLAGS_EXPAND_ATTR_FALSE: u32 = 1 << 2;
}

/// Role datum flavors.
pub mod role_flavor {
    /// Regular role.
    pub const ROLE: u32 = 0;
    /// Role attribute.
    pub const ATTRIB: u32 = 1;
}

/// Class default placement rules.
pub mod default_rule {
    /// Take the field from the source context.
    pub const SOURCE: u8 = 1;
    /// Take the field from the target context.
    pub const TARGET: u8 = 2;

    /// Source low level.
    pub const SOURCE_LOW: u8 = 1;
    /// Source high level.
    pub const SOURCE_HIGH: u8 = 2;
    /// Source low-high range.
    pub const SOURCE_LOW_HIGH: u8 = 3;
    /// Target low level.
    pub const TARGET_LOW: u8 = 4;
    /// Target high level.
    pub const TARGET_HIGH: u8 = 5;
    /// Target low-high range.
    pub const TARGET_LOW_HIGH: u8 = 6;
    /// Greatest lower bound of source and target.
    pub const GLBLUB: u8 = 7;
}

/// Number of permissions a constraint mask can address.
pub const MAX_PERMS_PER_CLASS: u32 = 32;
