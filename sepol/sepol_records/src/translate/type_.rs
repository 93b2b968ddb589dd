//! Type datum translation.
//!
//! Kernel policies hold attribute membership in two global maps, one per
//! direction: an attribute reads its members from `attr_type_map`, any other
//! entry reads the attributes it belongs to from `type_attr_map`. Base
//! policies only record membership on the attribute itself. Either way an
//! entry never lists itself.

use sepol_core::error::TranslationError;
use sepol_core::utils::LogLevel;
use sepol_core::{log_event, try_report, Handle, Result};
use sepol_policydb::consts::type_flavor;
use sepol_policydb::{Ebitmap, NameTable, PolicyDb, TypeDatum};

use super::{bounds_name, collect_names};
use crate::model::{Type, TypeFlags, TypeFlavor};

/// Build a type record for the entry `name`.
pub fn type_to_record(handle: &Handle, db: &PolicyDb, name: &str, datum: &TypeDatum) -> Result<Type> {
    let record = try_report!(
        handle,
        build_type(db, name, datum),
        format!("could not translate type {}", name)
    );
    log_event!(LogLevel::Debug, "translated type",
        name => record.name(),
        flavor => format!("{:?}", record.flavor()),
    );
    Ok(record)
}

/// Whether `datum` is a kernel-form alias: a regular type that does not
/// own its value.
pub fn is_kernel_alias(datum: &TypeDatum) -> bool {
    datum.flavor == type_flavor::TYPE && datum.primary == 0
}

fn build_type(db: &PolicyDb, name: &str, datum: &TypeDatum) -> Result<Type> {
    let mut record = Type::new();
    record.set_name(name);

    let (flavor, alias_of) = match datum.flavor {
        type_flavor::TYPE if datum.primary == 0 => (
            TypeFlavor::Alias,
            Some(db.val_to_name(NameTable::Type, datum.value)?),
        ),
        type_flavor::TYPE => (TypeFlavor::Type, None),
        type_flavor::ATTRIB => (TypeFlavor::Attribute, None),
        type_flavor::ALIAS => (
            TypeFlavor::Alias,
            Some(db.val_to_name(NameTable::Type, datum.primary)?),
        ),
        other => return Err(TranslationError::UnknownFlavor(other).into()),
    };
    record.set_flavor(flavor);
    record.set_alias_of(alias_of);

    let own_bit = datum.value.checked_sub(1);
    collect_names(
        db,
        NameTable::Type,
        subtype_bitmap(db, datum)?,
        own_bit,
        record.subtypes_mut(),
    )?;

    let permissive = datum.flags & type_flavor::FLAGS_PERMISSIVE != 0
        || (db.is_kernel() && db.permissive_map.get(datum.value));
    if permissive {
        record.set_flag(TypeFlags::PERMISSIVE);
    }
    if datum.flags & type_flavor::FLAGS_EXPAND_ATTR_TRUE != 0 {
        record.set_flag(TypeFlags::EXPAND_ATTR_TRUE);
    }
    if datum.flags & type_flavor::FLAGS_EXPAND_ATTR_FALSE != 0 {
        record.set_flag(TypeFlags::EXPAND_ATTR_FALSE);
    }

    record.set_bounds(bounds_name(db, NameTable::Type, datum.bounds)?);
    Ok(record)
}

fn subtype_bitmap<'a>(
    db: &'a PolicyDb,
    datum: &'a TypeDatum,
) -> std::result::Result<&'a Ebitmap, TranslationError> {
    if !db.is_kernel() {
        return Ok(&datum.types);
    }
    let map = if datum.flavor == type_flavor::ATTRIB {
        &db.attr_type_map
    } else {
        &db.type_attr_map
    };
    datum
        .value
        .checked_sub(1)
        .and_then(|index| map.get(index as usize))
        .ok_or(TranslationError::UnknownValue {
            table: "type",
            value: datum.value,
        })
}
