//! Full entry collection plus the filtered view shown in the list.

use serde::{Deserialize, Serialize};

use crate::state::Entry;

/// The fetched entries and the indices of those matching the current search term.
///
/// The filtered view stores positions into `entries`, so rows are never copied and
/// always appear in fetch order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<Entry>,
    filtered: Vec<usize>,
    term: String,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        let mut catalog = Self::default();
        catalog.set_full_collection(entries);
        catalog
    }

    /// Replaces the collection and resets the view to every entry.
    pub fn set_full_collection(&mut self, entries: Vec<Entry>) {
        self.filtered = (0..entries.len()).collect();
        self.entries = entries;
        self.term.clear();
    }

    pub fn apply_filter(&mut self, term: &str) -> &[usize] {
        self.filtered = filter_entries(&self.entries, term);
        self.term = term.to_string();
        &self.filtered
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn row_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn row(&self, index: usize) -> Option<&Entry> {
        self.filtered
            .get(index)
            .and_then(|idx| self.entries.get(*idx))
    }

    pub fn rows(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.filtered
            .iter()
            .filter_map(|idx| self.entries.get(*idx))
    }
}

/// Positions of the entries whose display name starts with `term`, ignoring case.
pub fn filter_entries(entries: &[Entry], term: &str) -> Vec<usize> {
    let needle = term.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches_prefix(&entry.display_name, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

fn matches_prefix(name: &str, lowered_term: &str) -> bool {
    lowered_term.is_empty() || name.to_lowercase().starts_with(lowered_term)
}
