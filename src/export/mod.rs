//! Export functionality
//!
//! Provides exporters for relational targets:
//! - MySQL (schema + insert statements)

pub mod sql;

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
///
/// Writer failures are carried unchanged so callers can report the
/// underlying cause verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Group numbering error: {0}")]
    GroupIds(#[from] sql::GroupIdError),
}

// Re-export for convenience
pub use sql::{ExportSummary, FieldList, MySQLExporter};
