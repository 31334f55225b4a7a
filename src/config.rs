//! Export configuration
//!
//! Options controlling column widths, group numbering and statement layout.
//! Every option has a default matching the legacy MySQL export, so an empty
//! configuration file reproduces it exactly.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Which table names the generated foreign keys reference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyNaming {
    /// `entries` references `entry_type` and `entry_group` references
    /// `entry_fields`, neither of which is created by the schema
    #[default]
    Legacy,
    /// References point at the tables the schema actually creates
    Consistent,
}

impl ForeignKeyNaming {
    pub fn entry_types_target(self) -> &'static str {
        match self {
            ForeignKeyNaming::Legacy => "entry_type",
            ForeignKeyNaming::Consistent => "entry_types",
        }
    }

    pub fn entries_target(self) -> &'static str {
        match self {
            ForeignKeyNaming::Legacy => "entry_fields",
            ForeignKeyNaming::Consistent => "entries",
        }
    }
}

/// How CREATE TABLE statements are laid out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatementLayout {
    /// One complete statement per line
    #[default]
    SingleLine,
    /// One column definition per line, blank line between tables
    Expanded,
}

/// Options for [`MySQLExporter`](crate::export::MySQLExporter)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportOptions {
    /// Width of the `entries.jabref_eid` column
    pub id_column_width: usize,
    /// Width of the `entries.cite_key` column
    pub cite_key_width: usize,
    /// Width of the `groups.label` column
    pub group_label_width: usize,
    /// Surrogate id given to the root group; zero is rejected when parsing
    pub root_group_id: NonZeroU32,
    /// Parent id written for the root group (the root is its own parent by default)
    pub root_parent_id: u32,
    pub foreign_keys: ForeignKeyNaming,
    pub layout: StatementLayout,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            id_column_width: 8,
            cite_key_width: 30,
            group_label_width: 100,
            root_group_id: NonZeroU32::MIN,
            root_parent_id: 1,
            foreign_keys: ForeignKeyNaming::Legacy,
            layout: StatementLayout::SingleLine,
        }
    }
}

/// Error loading export options
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "cli")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(feature = "cli")]
impl ExportOptions {
    /// Parse options from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read options from a TOML file
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
