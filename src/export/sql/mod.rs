//! MySQL exporter for bibliography databases.
//!
//! Produces a script that drops and recreates four tables and fills them:
//!
//! 1. drop/create `entry_types`, `entries`, `groups`, `entry_group`
//! 2. one `entry_types` row per entry type
//! 3. one `entries` row per exported entry
//! 4. one `groups` row per group tree node (pre-order)
//! 5. one `entry_group` row per explicit group member (pre-order)
//!
//! # Escaping
//!
//! String literals are double-quoted and only `"` is escaped (as `\"`).
//! Backslashes and control characters are written unchanged; see
//! [`crate::validation`] for an advisory check that reports such values.

pub mod entries;
pub mod entry_types;
pub mod fields;
pub mod groups;
pub mod literal;
pub mod schema;

pub use fields::{FieldList, collect_fields};
pub use groups::{GroupIdError, PreOrder, SurrogateId};

use crate::config::ExportOptions;
use crate::export::{ExportError, ExportResult};
use crate::models::{BibliographyDatabase, BibliographyEntry, EntryTypeDefinition, GroupNode};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Row counts of a finished export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub fields: usize,
    pub entry_types: usize,
    pub entries: usize,
    pub groups: usize,
}

/// Exporter for MySQL schema and insert statements.
///
/// # Example
///
/// ```rust
/// use bibsql::export::sql::MySQLExporter;
/// use bibsql::models::{BibliographyDatabase, BibliographyEntry, EntryTypeDefinition};
///
/// let mut db = BibliographyDatabase::new(vec![
///     EntryTypeDefinition::new("Article").with_required(["author", "title"]),
/// ]);
/// db.entries.push(BibliographyEntry::new("1", "Article").with_field("author", "Doe"));
///
/// let result = MySQLExporter::default().export_database(&db, None).unwrap();
/// assert_eq!(result.format, "mysql");
/// assert!(result.content.starts_with("DROP TABLE IF EXISTS entry_types;"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MySQLExporter {
    options: ExportOptions,
}

impl MySQLExporter {
    /// File extension of exported scripts
    pub const EXTENSION: &'static str = ".sql";

    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Write the full script for explicit inputs.
    ///
    /// # Arguments
    ///
    /// * `types` - Entry type definitions, in scan order
    /// * `selected` - Entries to export, already sorted
    /// * `group_root` - Root of the group tree, if the library has one
    /// * `out` - Sink receiving the statements
    ///
    /// Any write failure aborts the export and is returned unchanged; the
    /// sink may then hold a partial script. A group tree that does not fit
    /// in the id range starting at `root_group_id` fails before anything is
    /// written.
    pub fn write<'a, W, I>(
        &self,
        types: &[EntryTypeDefinition],
        selected: I,
        group_root: Option<&GroupNode>,
        out: &mut W,
    ) -> Result<ExportSummary, ExportError>
    where
        W: Write,
        I: IntoIterator<Item = &'a BibliographyEntry>,
    {
        let group_ids = group_root
            .map(|root| groups::id_range(root, self.options.root_group_id.get()))
            .transpose()?;

        let fields = collect_fields(types);
        debug!("Collected {} fields from {} entry types", fields.len(), types.len());

        schema::write_schema(out, &fields, &self.options)?;
        entry_types::write_entry_type_rows(out, types, &fields)?;
        let entry_count = entries::write_entry_rows(out, selected, &fields)?;
        debug!("Wrote {} entry rows", entry_count);

        let mut group_count = 0;
        if let (Some(root), Some(ids)) = (group_root, group_ids) {
            let start = *ids.start();
            let next = groups::flatten_groups(out, root, start, self.options.root_parent_id)?;
            let membership_next = groups::write_memberships(out, root, start)?;
            debug_assert_eq!(next, membership_next);
            group_count = (ids.end() - start) as usize + 1;
            debug!("Wrote {} group rows with ids {:?}", group_count, ids);
        }
        out.flush()?;

        let summary = ExportSummary {
            fields: fields.len(),
            entry_types: types.len(),
            entries: entry_count,
            groups: group_count,
        };
        info!(
            "Exported {} entries, {} entry types and {} groups ({} field columns)",
            summary.entries, summary.entry_types, summary.groups, summary.fields
        );
        Ok(summary)
    }

    /// Write the script for a database, restricted to `selection` if given.
    ///
    /// Entries are sorted with [`BibliographyDatabase::sorted_entries`].
    pub fn write_database<W: Write>(
        &self,
        db: &BibliographyDatabase,
        selection: Option<&HashSet<String>>,
        out: &mut W,
    ) -> Result<ExportSummary, ExportError> {
        let entries = db.sorted_entries(selection);
        self.write(&db.entry_types, entries, db.groups.as_ref(), out)
    }

    /// Export a database to a string (SDK interface).
    pub fn export_database(
        &self,
        db: &BibliographyDatabase,
        selection: Option<&HashSet<String>>,
    ) -> Result<ExportResult, ExportError> {
        let mut buffer = Vec::new();
        self.write_database(db, selection, &mut buffer)?;
        let content = String::from_utf8(buffer)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(ExportResult {
            content,
            format: "mysql".to_string(),
        })
    }

    /// Export a database to a file, replacing any existing file.
    pub fn export_to_file(
        &self,
        db: &BibliographyDatabase,
        selection: Option<&HashSet<String>>,
        path: impl AsRef<Path>,
    ) -> Result<ExportSummary, ExportError> {
        let path = path.as_ref();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        let summary = self.write_database(db, selection, &mut file)?;
        info!("Saved MySQL export to {}", path.display());
        Ok(summary)
    }
}
