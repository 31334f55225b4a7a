//! Field list derivation
//!
//! The union of all fields declared by the entry types, in first-seen order,
//! defines the per-field columns of both `entry_types` and `entries`. Every
//! row emitter walks the same [`FieldList`] so values line up with columns.

use crate::models::{EntryTypeDefinition, FieldRole};

/// Ordered, duplicate-free list of field names
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldList {
    names: Vec<String>,
}

impl FieldList {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column position of a field, if it is part of the list
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Comma separated names for INSERT column lists
    pub fn joined(&self) -> String {
        self.names.join(", ")
    }

    fn push_unique(&mut self, name: &str) {
        if !self.names.iter().any(|n| n == name) {
            self.names.push(name.to_string());
        }
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Collect the fields used by at least one entry type
///
/// Types are scanned in the given order; within a type the required,
/// optional, general and utility lists are scanned in that order.
pub fn collect_fields(entry_types: &[EntryTypeDefinition]) -> FieldList {
    let mut fields = FieldList::default();
    for entry_type in entry_types {
        for role in FieldRole::SWEEP_ORDER {
            for name in entry_type.fields_for(role) {
                fields.push_unique(name);
            }
        }
    }
    fields
}
