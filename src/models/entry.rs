//! Bibliography entry model for the SDK

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single bibliography entry
///
/// `entry_type` names an [`EntryTypeDefinition`](super::EntryTypeDefinition);
/// the match is case-insensitive. A field missing from `fields` is absent
/// and exported as `NULL`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BibliographyEntry {
    /// Identifier unique within one export run
    pub id: String,
    pub entry_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cite_key: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

impl BibliographyEntry {
    pub fn new(id: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entry_type: entry_type.into(),
            cite_key: None,
            fields: HashMap::new(),
        }
    }

    pub fn with_cite_key(mut self, key: impl Into<String>) -> Self {
        self.cite_key = Some(key.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
