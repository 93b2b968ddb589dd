//! # Sepol PolicyDb
//!
//! `sepol_policydb` holds the value-indexed internal policy database that
//! the record layer translates from.
//!
//! Key concepts:
//!
//! 1. **Value**: every symbol gets a dense 1-based value. Cross references
//!    between datums are values, and sets of symbols are bitmaps whose bit
//!    `n` stands for value `n + 1`.
//!
//! 2. **Symbol table**: a name-keyed table of datums per symbol kind.
//!
//! 3. **Policy form**: kernel policies keep attribute membership and
//!    permissive types in global maps; base policies keep them in the
//!    datums.

pub mod builder;
pub mod consts;
pub mod datum;
pub mod ebitmap;
pub mod policydb;
pub mod symtab;

// Re-export key types for convenience
pub use builder::{LevelSpec, PolicyDbBuilder};
pub use datum::{
    CatDatum, ClassDatum, CommonDatum, ConstraintExprDatum, ConstraintNode, MlsLevel, MlsRange,
    PermDatum, RoleDatum, SensDatum, TypeDatum, TypeSet, UserDatum,
};
pub use ebitmap::Ebitmap;
pub use policydb::{NameTable, PolicyDb, PolicyType};
pub use symtab::SymTab;
