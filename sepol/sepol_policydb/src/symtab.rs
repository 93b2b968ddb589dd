//! Name-keyed symbol tables.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// A table from symbol name to datum.
///
/// Iteration order is lexicographic on the name, so it is stable for an
/// unmodified table. `nprim` counts the values handed out, which is not
/// always the number of entries: aliases share their primary's value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymTab<D> {
    table: BTreeMap<String, D>,
    nprim: u32,
}

impl<D> Default for SymTab<D> {
    fn default() -> Self {
        Self {
            table: BTreeMap::new(),
            nprim: 0,
        }
    }
}

impl<D> SymTab<D> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a symbol up by name.
    pub fn search(&self, name: &str) -> Option<&D> {
        self.table.get(name)
    }

    /// Look a symbol up by name for modification.
    pub fn search_mut(&mut self, name: &str) -> Option<&mut D> {
        self.table.get_mut(name)
    }

    /// Whether a symbol exists.
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Insert a symbol. Returns the datum back if the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, datum: D) -> Result<(), D> {
        match self.table.entry(name.into()) {
            btree_map::Entry::Occupied(_) => Err(datum),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(datum);
                Ok(())
            }
        }
    }

    /// Insert or replace a symbol, returning the previous datum.
    pub fn replace(&mut self, name: impl Into<String>, datum: D) -> Option<D> {
        self.table.insert(name.into(), datum)
    }

    /// Hand out the next value.
    pub fn next_value(&mut self) -> u32 {
        self.nprim += 1;
        self.nprim
    }

    /// Number of values handed out.
    pub fn nprim(&self) -> u32 {
        self.nprim
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over the entries in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, D> {
        self.table.iter()
    }

    /// Iterate over the entries in name order for modification.
    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, D> {
        self.table.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_search() {
        let mut table = SymTab::new();
        let value = table.next_value();
        table.insert("file", value).unwrap();
        assert_eq!(table.search("file"), Some(&1));
        assert_eq!(table.search("dir"), None);
        assert_eq!(table.insert("file", 7), Err(7));
        assert_eq!(table.len(), 1);
        assert_eq!(table.nprim(), 1);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut table = SymTab::new();
        for name in ["b", "c", "a"] {
            let value = table.next_value();
            table.insert(name, value).unwrap();
        }
        let names: Vec<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_replace() {
        let mut table = SymTab::new();
        assert_eq!(table.replace("x", 1), None);
        assert_eq!(table.replace("x", 2), Some(1));
        *table.search_mut("x").unwrap() += 1;
        assert_eq!(table.search("x"), Some(&3));
    }
}
