// file: src/models/address_set.rs
// description: insertion-ordered set of address strings
// reference: internal data model

use std::collections::HashSet;

/// Set of address strings with exact-equality deduplication.
///
/// First-seen order is preserved so repeated extractions over the same
/// document produce identical output. Empty strings are rejected on insert.
#[derive(Debug, Default, Clone)]
pub struct AddressSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl AddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an address, returning true if it was not already present.
    /// Empty values are dropped silently and report false.
    pub fn insert(&mut self, address: impl Into<String>) -> bool {
        let address = address.into();
        if address.is_empty() {
            return false;
        }
        if self.seen.insert(address.clone()) {
            self.ordered.push(address);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, address: &str) -> bool {
        self.seen.contains(address)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl IntoIterator for AddressSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}
