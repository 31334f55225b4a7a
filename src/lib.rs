//! bibsql - Bibliography to MySQL export library
//!
//! Provides unified interfaces for:
//! - Bibliography models (entry types, entries, group trees)
//! - Library loading (YAML / JSON)
//! - MySQL schema and insert statement export
//! - Advisory validation of libraries before export
//! - Export configuration

pub mod config;
pub mod export;
pub mod model;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, ExportOptions, ForeignKeyNaming, StatementLayout};
pub use export::{ExportError, ExportResult, ExportSummary, FieldList, MySQLExporter};
pub use model::{LibraryFormat, LibraryLoader, LoaderError};
pub use validation::{ValidationReport, ValidationWarning, validate_database};

// Re-export models
pub use models::{
    BibliographyDatabase, BibliographyEntry, EntryTypeDefinition, FieldRole, GroupKind, GroupNode,
    standard_entry_types,
};
