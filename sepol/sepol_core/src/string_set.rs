//! Insertion-ordered set of unique strings.
//!
//! Every record stores its multi-valued name lists (permissions, subtypes,
//! authorized types, subroles, constraint names) in a `StringSet`. Readers
//! get a fresh snapshot of borrowed names; the strings themselves stay owned
//! by the set.
//!
//! A sorted side index keeps membership tests logarithmic, at the cost of
//! holding each name twice.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, TryReserveError};

/// Ordered set of unique strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StringSet {
    items: Vec<String>,
    #[serde(skip)]
    index: BTreeSet<String>,
}

impl StringSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name. Returns `false` and leaves the set unchanged if the name
    /// is already present.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.index.contains(&name) {
            return false;
        }
        self.index.insert(name.clone());
        self.items.push(name);
        true
    }

    /// Remove a name, keeping the remaining names in order. Returns whether
    /// the name was present.
    pub fn remove(&mut self, name: &str) -> bool {
        if !self.index.remove(name) {
            return false;
        }
        match self.items.iter().position(|item| item == name) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the set contains a name.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// A freshly allocated list of the names, in insertion order.
    pub fn snapshot(&self) -> Vec<&str> {
        self.items.iter().map(String::as_str).collect()
    }

    /// A freshly allocated list of the names, sorted.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names = self.snapshot();
        names.sort_unstable();
        names
    }

    /// Whether both sets hold the same names, regardless of order.
    pub fn same_members(&self, other: &StringSet) -> bool {
        self.index == other.index
    }

    /// Iterate over the names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(String::as_str)
    }

    /// Reserve room for `additional` more names without aborting on
    /// allocation failure.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.items.try_reserve(additional)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every name.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for StringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for StringSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.add(name);
        }
    }
}

impl<'a> IntoIterator for &'a StringSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

// Deserialization goes through `add` so duplicate names collapse.
impl<'de> Deserialize<'de> for StringSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.into_iter().collect())
    }
}
