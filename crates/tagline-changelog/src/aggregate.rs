//! Grouping of classified entries by category

use std::collections::BTreeMap;

use serde::Serialize;

use tagline_core::types::{ChangeCategory, ChangelogEntry};

/// Entries grouped by [`ChangeCategory`].
///
/// Only non-empty categories are present. Iteration follows changelog display
/// order and each group keeps the order entries were added in. The
/// ungrouped input order stays available through
/// [`in_history_order`](GroupedEntries::in_history_order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedEntries {
    groups: BTreeMap<ChangeCategory, Vec<ChangelogEntry>>,
    #[serde(skip)]
    history: Vec<(ChangeCategory, usize)>,
}

impl GroupedEntries {
    /// Create an empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its category
    pub fn push(&mut self, entry: ChangelogEntry) {
        let category = entry.category;
        let group = self.groups.entry(category).or_default();
        self.history.push((category, group.len()));
        group.push(entry);
    }

    /// Entries of a category, `None` when the category has none
    pub fn get(&self, category: ChangeCategory) -> Option<&[ChangelogEntry]> {
        self.groups.get(&category).map(Vec::as_slice)
    }

    /// Non-empty categories with their entries, in display order
    pub fn iter(&self) -> impl Iterator<Item = (ChangeCategory, &[ChangelogEntry])> {
        self.groups.iter().map(|(c, e)| (*c, e.as_slice()))
    }

    /// All entries, category by category
    pub fn entries(&self) -> impl Iterator<Item = &ChangelogEntry> {
        self.groups.values().flatten()
    }

    /// All entries in the order they were added, across categories
    pub fn in_history_order(&self) -> impl Iterator<Item = &ChangelogEntry> {
        self.history
            .iter()
            .filter_map(|(category, index)| self.groups.get(category)?.get(*index))
    }

    /// Categories that have entries
    pub fn categories(&self) -> Vec<ChangeCategory> {
        self.groups.keys().copied().collect()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether there are no entries at all
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<ChangelogEntry> for GroupedEntries {
    fn from_iter<I: IntoIterator<Item = ChangelogEntry>>(iter: I) -> Self {
        let mut grouped = Self::new();
        for entry in iter {
            grouped.push(entry);
        }
        grouped
    }
}

/// Group entries by category, keeping input order within each group
pub fn aggregate(entries: impl IntoIterator<Item = ChangelogEntry>) -> GroupedEntries {
    entries.into_iter().collect()
}
