//! Library validation functionality
//!
//! Reports inputs the MySQL export passes through silently but that are
//! likely to produce a surprising or unusable script. Validation never
//! changes the export; it only collects warnings.

use crate::export::sql::FieldList;
use crate::models::BibliographyDatabase;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

static PLAIN_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationWarning {
    #[error("Entry {entry_id} uses undefined entry type '{entry_type}'")]
    UndefinedEntryType { entry_id: String, entry_type: String },
    #[error("Entry id {entry_id} is used more than once")]
    DuplicateEntryId { entry_id: String },
    #[error("Entry {entry_id} has field '{field}' which no entry type declares; it will not be exported")]
    UndeclaredField { entry_id: String, field: String },
    #[error("Group '{group}' lists unknown entry {entry_id}")]
    UnknownGroupMember { group: String, entry_id: String },
    #[error("Field name '{field}' is not a plain SQL identifier")]
    InvalidFieldName { field: String },
    #[error("{location} contains characters that are not escaped (backslash or control character)")]
    UnescapedCharacters { location: String },
}

/// Result of library validation
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    fn push(&mut self, warning: ValidationWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

fn needs_escaping(value: &str) -> bool {
    value.chars().any(|c| c == '\\' || c.is_control())
}

/// Validate a library against the field list it will be exported with
pub fn validate_database(db: &BibliographyDatabase, fields: &FieldList) -> ValidationReport {
    let mut report = ValidationReport::default();

    for field in fields {
        if !PLAIN_IDENTIFIER.is_match(field) {
            report.push(ValidationWarning::InvalidFieldName {
                field: field.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for entry in &db.entries {
        if !seen.insert(entry.id.as_str()) {
            report.push(ValidationWarning::DuplicateEntryId {
                entry_id: entry.id.clone(),
            });
        }
        if db.entry_type(&entry.entry_type).is_none() {
            report.push(ValidationWarning::UndefinedEntryType {
                entry_id: entry.id.clone(),
                entry_type: entry.entry_type.clone(),
            });
        }
        if entry.cite_key.as_deref().is_some_and(needs_escaping) {
            report.push(ValidationWarning::UnescapedCharacters {
                location: format!("Cite key of entry {}", entry.id),
            });
        }

        // sorted for stable report order
        let mut names: Vec<&String> = entry.fields.keys().collect();
        names.sort();
        for name in names {
            if fields.position(name).is_none() {
                report.push(ValidationWarning::UndeclaredField {
                    entry_id: entry.id.clone(),
                    field: name.clone(),
                });
            } else if needs_escaping(&entry.fields[name]) {
                report.push(ValidationWarning::UnescapedCharacters {
                    location: format!("Field '{}' of entry {}", name, entry.id),
                });
            }
        }
    }

    if let Some(root) = &db.groups {
        for group in root.iter() {
            if needs_escaping(&group.name) {
                report.push(ValidationWarning::UnescapedCharacters {
                    location: format!("Label of group '{}'", group.name),
                });
            }
            for member in group.members().unwrap_or_default() {
                if !seen.contains(member.as_str()) {
                    report.push(ValidationWarning::UnknownGroupMember {
                        group: group.name.clone(),
                        entry_id: member.clone(),
                    });
                }
            }
        }
    }

    report
}
