//! Bibliography database model for the SDK

use super::entry::BibliographyEntry;
use super::entry_type::EntryTypeDefinition;
use super::group::GroupNode;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A complete bibliography: entry types, entries and the group tree
///
/// Entry types keep their declaration order, which becomes the scan order
/// for field collection and the row order of the `entry_types` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BibliographyDatabase {
    #[serde(default)]
    pub entry_types: Vec<EntryTypeDefinition>,
    #[serde(default)]
    pub entries: Vec<BibliographyEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<GroupNode>,
}

impl BibliographyDatabase {
    pub fn new(entry_types: Vec<EntryTypeDefinition>) -> Self {
        Self {
            entry_types,
            entries: Vec::new(),
            groups: None,
        }
    }

    /// Look up an entry type by case-insensitive name
    ///
    /// Names are compared lowercased, the same way entry rows reference
    /// `entry_types.label`.
    pub fn entry_type(&self, name: &str) -> Option<&EntryTypeDefinition> {
        let wanted = name.to_lowercase();
        self.entry_types
            .iter()
            .find(|t| t.normalized_name() == wanted)
    }

    pub fn entry(&self, id: &str) -> Option<&BibliographyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries selected for export, sorted by cite key then id
    ///
    /// With `selection = None` every entry is returned. Entries without a
    /// cite key sort after all keyed entries.
    pub fn sorted_entries(&self, selection: Option<&HashSet<String>>) -> Vec<&BibliographyEntry> {
        let mut selected: Vec<&BibliographyEntry> = self
            .entries
            .iter()
            .filter(|e| selection.is_none_or(|ids| ids.contains(&e.id)))
            .collect();
        selected.sort_by(|a, b| compare_cite_keys(a, b).then_with(|| a.id.cmp(&b.id)));
        selected
    }
}

fn compare_cite_keys(a: &BibliographyEntry, b: &BibliographyEntry) -> Ordering {
    match (&a.cite_key, &b.cite_key) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
