//! Class queries.

use sepol_core::{ClassKey, Handle, Result};
use sepol_policydb::{ClassDatum, PolicyDb};

use super::{drive, IterateControl, RecordIter};
use crate::model::Class;
use crate::translate::class_to_record;

/// Iterator over every class of a database.
pub type ClassIter<'a> = RecordIter<'a, ClassDatum, Class>;

fn translate(handle: &Handle, db: &PolicyDb, _name: &str, datum: &ClassDatum) -> Result<Class> {
    class_to_record(handle, db, datum)
}

/// Number of classes.
pub fn count(_handle: &Handle, db: &PolicyDb) -> usize {
    db.p_classes.len()
}

/// Whether `key` names a class.
pub fn exists(_handle: &Handle, db: &PolicyDb, key: &ClassKey) -> bool {
    db.p_classes.contains(key.name())
}

/// The class `key` names, if any.
pub fn query(handle: &Handle, db: &PolicyDb, key: &ClassKey) -> Result<Option<Class>> {
    db.p_classes
        .search(key.name())
        .map(|datum| class_to_record(handle, db, datum))
        .transpose()
}

/// Iterate over all classes in name order.
pub fn iter<'a>(handle: &'a Handle, db: &'a PolicyDb) -> ClassIter<'a> {
    RecordIter::new(handle, db, db.p_classes.iter(), translate)
}

/// Hand every class to `callback` until it returns `Stop` or an error.
pub fn iterate<F>(handle: &Handle, db: &PolicyDb, callback: F) -> Result<()>
where
    F: FnMut(Class) -> Result<IterateControl>,
{
    drive(iter(handle, db), callback)
}
