//! Type queries and updates.
//!
//! Kernel-form aliases are regular type entries that do not own their
//! value. When the handle is configured to hide them, `iter` and `iterate`
//! skip those entries; `count`, `exists` and `query` still see them.

use sepol_core::error::PolicyError;
use sepol_core::utils::LogLevel;
use sepol_core::{log_event, try_report, Handle, Result, TypeKey};
use sepol_policydb::consts::type_flavor;
use sepol_policydb::{Ebitmap, NameTable, PolicyDb, TypeDatum};

use super::{drive, IterateControl, RecordIter};
use crate::model::{Type, TypeFlags, TypeFlavor};
use crate::translate::type_::is_kernel_alias;
use crate::translate::type_to_record;

/// Iterator over the types of a database.
pub type TypeIter<'a> = RecordIter<'a, TypeDatum, Type>;

/// Number of entries in the type namespace: types, attributes and aliases.
pub fn count(_handle: &Handle, db: &PolicyDb) -> usize {
    db.p_types.len()
}

/// Whether `key` names a type, attribute or alias.
pub fn exists(_handle: &Handle, db: &PolicyDb, key: &TypeKey) -> bool {
    db.p_types.contains(key.name())
}

/// The type `key` names, if any.
pub fn query(handle: &Handle, db: &PolicyDb, key: &TypeKey) -> Result<Option<Type>> {
    db.p_types
        .search(key.name())
        .map(|datum| type_to_record(handle, db, key.name(), datum))
        .transpose()
}

/// Iterate over all types in name order.
pub fn iter<'a>(handle: &'a Handle, db: &'a PolicyDb) -> TypeIter<'a> {
    let iter = RecordIter::new(handle, db, db.p_types.iter(), type_to_record);
    if handle.hide_kernel_aliases() {
        iter.skipping(is_kernel_alias)
    } else {
        iter
    }
}

/// Hand every type to `callback` until it returns `Stop` or an error.
pub fn iterate<F>(handle: &Handle, db: &PolicyDb, callback: F) -> Result<()>
where
    F: FnMut(Type) -> Result<IterateControl>,
{
    drive(iter(handle, db), callback)
}

/// Insert or replace the entry named by `record`.
///
/// Every name in the record is resolved against `db`. A new type or
/// attribute gets the next free value; an existing one keeps its value and
/// cannot change flavor. An alias records only its target.
///
/// On failure `db` is left unchanged.
pub fn modify(handle: &Handle, db: &mut PolicyDb, record: &Type) -> Result<()> {
    let mut staged = db.clone();
    try_report!(
        handle,
        apply(&mut staged, record),
        format!("could not modify type {}", record.name())
    );
    try_report!(handle, staged.reindex());
    *db = staged;

    log_event!(LogLevel::Debug, "modified type",
        name => record.name(),
        flavor => format!("{:?}", record.flavor()),
    );
    Ok(())
}

fn apply(db: &mut PolicyDb, record: &Type) -> Result<()> {
    let name = record.name();
    if name.is_empty() {
        return Err(PolicyError::MissingField("name").into());
    }
    let existing = db.p_types.search(name).cloned();

    if record.flavor() == TypeFlavor::Alias {
        if let Some(datum) = &existing {
            if datum.is_primary() {
                return Err(wrong_flavor(name, "alias").into());
            }
        }
        let datum = alias_datum(db, record)?;
        db.p_types.replace(name, datum);
        return Ok(());
    }

    let raw_flavor = match record.flavor() {
        TypeFlavor::Attribute => type_flavor::ATTRIB,
        _ => type_flavor::TYPE,
    };
    let mut datum = match existing {
        Some(datum) if !datum.is_primary() => return Err(wrong_flavor(name, "type or attribute").into()),
        Some(datum) if datum.flavor != raw_flavor => {
            let expected = if raw_flavor == type_flavor::ATTRIB { "attribute" } else { "type" };
            return Err(wrong_flavor(name, expected).into());
        }
        Some(datum) => datum,
        None if raw_flavor == type_flavor::ATTRIB => TypeDatum::attribute(db.p_types.next_value()),
        None => TypeDatum::primary_type(db.p_types.next_value()),
    };
    let value = datum.value;

    datum.bounds = match record.bounds() {
        Some(bounds) => type_value(db, bounds)?,
        None => 0,
    };

    datum.flags = 0;
    if record.has_flag(TypeFlags::EXPAND_ATTR_TRUE) {
        datum.flags |= type_flavor::FLAGS_EXPAND_ATTR_TRUE;
    }
    if record.has_flag(TypeFlags::EXPAND_ATTR_FALSE) {
        datum.flags |= type_flavor::FLAGS_EXPAND_ATTR_FALSE;
    }
    let permissive = record.has_flag(TypeFlags::PERMISSIVE);
    if db.is_kernel() {
        db.permissive_map.set_bit(value, permissive);
    } else if permissive {
        datum.flags |= type_flavor::FLAGS_PERMISSIVE;
    }

    let mut members = Ebitmap::new();
    for subtype in record.subtypes() {
        let member = type_value(db, subtype)?;
        if member != value {
            members.set(member - 1);
        }
    }

    if raw_flavor == type_flavor::TYPE && db.is_kernel() {
        set_attribute_membership(db, name, value, &members)?;
        datum.types.clear();
    } else {
        datum.types = members;
    }

    db.p_types.replace(name, datum);
    Ok(())
}

fn alias_datum(db: &PolicyDb, record: &Type) -> Result<TypeDatum> {
    let target = record.alias_of().ok_or(PolicyError::MissingField("alias_of"))?;
    let target_datum = db.p_types.search(target).ok_or_else(|| unknown(target))?;
    if target_datum.flavor != type_flavor::TYPE || !target_datum.is_primary() {
        return Err(wrong_flavor(target, "type").into());
    }
    let value = target_datum.value;
    Ok(if db.is_kernel() {
        TypeDatum {
            value,
            primary: 0,
            flavor: type_flavor::TYPE,
            ..TypeDatum::default()
        }
    } else {
        TypeDatum {
            value,
            primary: value,
            flavor: type_flavor::ALIAS,
            ..TypeDatum::default()
        }
    })
}

// Kernel form keeps a type's attributes only on the attributes themselves:
// every listed attribute gains the type, every other one loses it.
fn set_attribute_membership(db: &mut PolicyDb, name: &str, value: u32, attrs: &Ebitmap) -> Result<()> {
    let mut attribute_names = Vec::new();
    for (attr_name, datum) in db.p_types.iter() {
        if datum.flavor == type_flavor::ATTRIB {
            attribute_names.try_reserve(1)?;
            attribute_names.push((attr_name.clone(), datum.value));
        }
    }

    for bit in attrs.iter() {
        if !attribute_names.iter().any(|(_, v)| *v == bit + 1) {
            let listed = db.val_to_name(NameTable::Type, bit + 1)?;
            return Err(PolicyError::WrongFlavor {
                name: format!("{} (subtype of {})", listed, name),
                expected: "attribute",
            }
            .into());
        }
    }

    for (attr_name, attr_value) in attribute_names {
        if let Some(attr) = db.p_types.search_mut(&attr_name) {
            attr.types.set_bit(value - 1, attrs.get(attr_value - 1));
        }
    }
    Ok(())
}

fn type_value(db: &PolicyDb, name: &str) -> std::result::Result<u32, PolicyError> {
    db.p_types
        .search(name)
        .map(|datum| datum.value)
        .ok_or_else(|| unknown(name))
}

fn unknown(name: &str) -> PolicyError {
    PolicyError::UnknownName {
        kind: "type",
        name: name.to_string(),
    }
}

fn wrong_flavor(name: &str, expected: &'static str) -> PolicyError {
    PolicyError::WrongFlavor {
        name: name.to_string(),
        expected,
    }
}
