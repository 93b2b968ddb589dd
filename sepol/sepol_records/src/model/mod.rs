//! Owned, name-addressed records.
//!
//! Records never refer back into a database. Cloning a record is a deep
//! copy, and dropping one frees everything it owns.

pub mod class;
pub mod constraint;
pub mod expr;
pub mod role;
pub mod type_record;
pub mod user;

pub use class::{Class, DefaultObject, DefaultRange};
pub use constraint::Constraint;
pub use expr::{ConstraintExpr, ExprAttr, ExprKind, ExprOp};
pub use role::{Role, RoleFlavor};
pub use type_record::{Type, TypeFlags, TypeFlavor};
pub use user::User;
