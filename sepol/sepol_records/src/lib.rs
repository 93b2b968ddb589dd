//! # Sepol Records
//!
//! `sepol_records` exposes the entities of a policy database as owned,
//! name-addressed records: classes with their constraints, types, roles
//! and users.
//!
//! Key concepts:
//!
//! 1. **Record**: a self-contained copy of one entity. Every cross
//!    reference is a name, never an internal value.
//!
//! 2. **Constraint expression**: a boolean tree over security context
//!    attributes, rebuilt from the database's postfix form.
//!
//! 3. **Translation**: turning a datum into a record. It either succeeds
//!    completely or fails with the error reported through the `Handle`.
//!
//! 4. **Query**: count, existence, lookup by key and iteration, per entity
//!    kind, plus `modify` for types and users.
//!
//! # Examples
//!
//! ```
//! use sepol_core::{ClassKey, Handle};
//! use sepol_policydb::{PolicyDbBuilder, PolicyType};
//! use sepol_records::query::classes;
//!
//! let mut builder = PolicyDbBuilder::new(PolicyType::Kernel, false);
//! builder.common("COMMON1", &["PERM1"]).unwrap();
//! builder.class("CLASS1", Some("COMMON1"), &["PERM2"]).unwrap();
//! let db = builder.build().unwrap();
//!
//! let handle = Handle::new();
//! let class = classes::query(&handle, &db, &ClassKey::new("CLASS1"))
//!     .unwrap()
//!     .unwrap();
//! assert!(class.has_permission("PERM1"));
//! assert!(class.has_permission("PERM2"));
//! ```

pub mod model;
pub mod query;
pub mod translate;

// Re-export key types for convenience
pub use model::{
    Class, Constraint, ConstraintExpr, DefaultObject, DefaultRange, ExprAttr, ExprKind, ExprOp,
    Role, RoleFlavor, Type, TypeFlags, TypeFlavor, User,
};
pub use query::{IterateControl, RecordIter};
