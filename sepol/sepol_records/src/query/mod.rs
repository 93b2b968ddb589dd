//! Query facade over a policy database.
//!
//! One module per entity kind, each offering the same operations:
//!
//! - `count`: number of entries in the kind's symbol table
//! - `exists`: whether a key names an entry
//! - `query`: translate the entry a key names, `Ok(None)` if there is none
//! - `iter`: a lazy iterator translating one entry per step
//! - `iterate`: drive a callback over every record until it asks to stop
//!
//! Records come back fully owned. Nothing returned here borrows from the
//! database except the iterators themselves.

pub mod classes;
pub mod roles;
pub mod types;
pub mod users;

use std::collections::btree_map;
use std::fmt;

use sepol_core::{Handle, Result};
use sepol_policydb::PolicyDb;

/// Translator from a named datum to its record.
pub type Translator<D, R> = fn(&Handle, &PolicyDb, &str, &D) -> Result<R>;

/// What an `iterate` callback wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterateControl {
    /// Hand over the next record.
    Continue,
    /// Stop without visiting the remaining records.
    Stop,
}

/// Lazily translating iterator over one symbol table.
///
/// Entries come in the table's name order. Once the table is exhausted, or
/// a translation has failed, every further step yields nothing.
pub struct RecordIter<'a, D, R> {
    handle: &'a Handle,
    db: &'a PolicyDb,
    entries: btree_map::Iter<'a, String, D>,
    translate: Translator<D, R>,
    skip: Option<fn(&D) -> bool>,
    done: bool,
}

impl<'a, D, R> RecordIter<'a, D, R> {
    pub(crate) fn new(
        handle: &'a Handle,
        db: &'a PolicyDb,
        entries: btree_map::Iter<'a, String, D>,
        translate: Translator<D, R>,
    ) -> Self {
        Self {
            handle,
            db,
            entries,
            translate,
            skip: None,
            done: false,
        }
    }

    pub(crate) fn skipping(mut self, skip: fn(&D) -> bool) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Translate the next entry. Returns `Ok(None)` once the table is
    /// exhausted, and keeps doing so on every later call.
    pub fn next_record(&mut self) -> Result<Option<R>> {
        if self.done {
            return Ok(None);
        }
        loop {
            let Some((name, datum)) = self.entries.next() else {
                self.done = true;
                return Ok(None);
            };
            if self.skip.is_some_and(|skip| skip(datum)) {
                continue;
            }
            return match (self.translate)(self.handle, self.db, name, datum) {
                Ok(record) => Ok(Some(record)),
                Err(err) => {
                    self.done = true;
                    Err(err)
                }
            };
        }
    }

    /// Whether the iterator has nothing more to yield.
    pub fn is_exhausted(&self) -> bool {
        self.done
    }
}

impl<D, R> Iterator for RecordIter<'_, D, R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

impl<D, R> std::iter::FusedIterator for RecordIter<'_, D, R> {}

impl<D, R> fmt::Debug for RecordIter<'_, D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordIter")
            .field("remaining", &self.entries.len())
            .field("done", &self.done)
            .finish()
    }
}

// Shared body of every `iterate`.
fn drive<D, R, F>(mut iter: RecordIter<'_, D, R>, mut callback: F) -> Result<()>
where
    F: FnMut(R) -> Result<IterateControl>,
{
    while let Some(record) = iter.next_record()? {
        if callback(record)? == IterateControl::Stop {
            break;
        }
    }
    Ok(())
}
