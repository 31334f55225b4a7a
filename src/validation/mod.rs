//! Validation functionality
//!
//! Provides advisory checks run before an export:
//! - Library validation (undefined types, dangling group members, identifiers, escaping gaps)

pub mod library;

pub use library::{ValidationReport, ValidationWarning, validate_database};
