//! Models module for the SDK
//!
//! Defines the bibliographic data structures consumed by the exporters.
//! All of them are read-only inputs to an export.

pub mod database;
pub mod entry;
pub mod entry_type;
pub mod group;
pub mod standard_types;

pub use database::BibliographyDatabase;
pub use entry::BibliographyEntry;
pub use entry_type::{EntryTypeDefinition, FieldRole};
pub use group::{GroupKind, GroupNode, Nodes};
pub use standard_types::standard_entry_types;
