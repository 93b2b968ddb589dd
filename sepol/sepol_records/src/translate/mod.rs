//! Datum→record translation.
//!
//! Each translator reads one datum plus the tables of the database it came
//! from and builds a fully owned record, resolving every value to a name.
//! A record is returned only when every step succeeded; on failure the
//! error is reported through the handle and the partial record is dropped.

pub mod class;
pub mod expr;
pub mod mls;
pub mod role;
pub mod type_;
pub mod user;

pub use class::class_to_record;
pub use mls::{parse_level, parse_range, render_level, render_range};
pub use role::role_to_record;
pub use type_::type_to_record;
pub use user::user_to_record;

use sepol_core::{Result, StringSet};
use sepol_policydb::{Ebitmap, NameTable, PolicyDb};

/// Add the name of every bit in `bitmap` to `set`, skipping `skip_bit`.
pub(crate) fn collect_names(
    db: &PolicyDb,
    table: NameTable,
    bitmap: &Ebitmap,
    skip_bit: Option<u32>,
    set: &mut StringSet,
) -> Result<()> {
    set.try_reserve(bitmap.cardinality())?;
    for bit in bitmap.iter().filter(|bit| Some(*bit) != skip_bit) {
        set.add(db.bit_to_name(table, bit)?);
    }
    Ok(())
}

/// Resolve an optional bounds value; zero means unbounded.
pub(crate) fn bounds_name(db: &PolicyDb, table: NameTable, value: u32) -> Result<Option<&str>> {
    if value == 0 {
        return Ok(None);
    }
    Ok(Some(db.val_to_name(table, value)?))
}
