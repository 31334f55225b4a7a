//! Table definitions for the exported schema
//!
//! Four tables are created, each preceded by an unconditional
//! `DROP TABLE IF EXISTS` so the script can be replayed against the same
//! target:
//! - `entry_types`: one role-code column per field
//! - `entries`: one text column per field
//! - `groups`: adjacency list of the group tree
//! - `entry_group`: entry to group membership

use super::fields::FieldList;
use crate::config::{ExportOptions, StatementLayout};
use std::io::{self, Write};

pub const ENTRY_TYPES_TABLE: &str = "entry_types";
pub const ENTRIES_TABLE: &str = "entries";
pub const GROUPS_TABLE: &str = "groups";
pub const ENTRY_GROUP_TABLE: &str = "entry_group";

/// Column type of the per-field role-code columns
const ROLE_CODE_TYPE: &str = "VARCHAR(3) DEFAULT NULL";
/// Column type of the per-field value columns
const FIELD_VALUE_TYPE: &str = "TEXT DEFAULT NULL";

/// A table name with its column and key definitions, in order
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: &'static str,
    pub columns: Vec<String>,
}

impl TableDefinition {
    /// Render the CREATE TABLE statement in the requested layout
    pub fn create_statement(&self, layout: StatementLayout) -> String {
        match layout {
            StatementLayout::SingleLine => {
                format!("CREATE TABLE {} ({});", self.name, self.columns.join(", "))
            }
            StatementLayout::Expanded => {
                format!(
                    "CREATE TABLE {}\n(\n{}\n);",
                    self.name,
                    self.columns.join(",\n")
                )
            }
        }
    }

    pub fn drop_statement(&self) -> String {
        format!("DROP TABLE IF EXISTS {};", self.name)
    }
}

fn field_columns(fields: &FieldList, column_type: &str) -> impl Iterator<Item = String> {
    fields.iter().map(move |name| format!("{} {}", name, column_type))
}

/// Build the four table definitions for the given field list
///
/// Per-field columns follow `fields` order exactly. An empty field list
/// contributes no columns.
pub fn table_definitions(fields: &FieldList, options: &ExportOptions) -> Vec<TableDefinition> {
    let mut entry_types = vec![
        "entry_types_id INT UNSIGNED NOT NULL AUTO_INCREMENT".to_string(),
        "label TEXT".to_string(),
    ];
    entry_types.extend(field_columns(fields, ROLE_CODE_TYPE));
    entry_types.push("PRIMARY KEY (entry_types_id)".to_string());

    let mut entries = vec![
        "entries_id INTEGER NOT NULL AUTO_INCREMENT".to_string(),
        format!("jabref_eid VARCHAR({}) DEFAULT NULL", options.id_column_width),
        "entry_types_id INTEGER DEFAULT NULL".to_string(),
        format!("cite_key VARCHAR({}) DEFAULT NULL", options.cite_key_width),
    ];
    entries.extend(field_columns(fields, FIELD_VALUE_TYPE));
    entries.push("PRIMARY KEY (entries_id)".to_string());
    entries.push(format!(
        "FOREIGN KEY (entry_types_id) REFERENCES {}(entry_types_id)",
        options.foreign_keys.entry_types_target()
    ));

    let groups = vec![
        "groups_id INTEGER NOT NULL AUTO_INCREMENT".to_string(),
        format!("label VARCHAR({}) DEFAULT NULL", options.group_label_width),
        "parent_id INTEGER DEFAULT NULL".to_string(),
        "PRIMARY KEY (groups_id)".to_string(),
    ];

    let entry_group = vec![
        "entries_id INTEGER NOT NULL AUTO_INCREMENT".to_string(),
        "groups_id INTEGER DEFAULT NULL".to_string(),
        format!(
            "FOREIGN KEY (entries_id) REFERENCES {}(entries_id)",
            options.foreign_keys.entries_target()
        ),
        format!("FOREIGN KEY (groups_id) REFERENCES {}(groups_id)", GROUPS_TABLE),
    ];

    vec![
        TableDefinition {
            name: ENTRY_TYPES_TABLE,
            columns: entry_types,
        },
        TableDefinition {
            name: ENTRIES_TABLE,
            columns: entries,
        },
        TableDefinition {
            name: GROUPS_TABLE,
            columns: groups,
        },
        TableDefinition {
            name: ENTRY_GROUP_TABLE,
            columns: entry_group,
        },
    ]
}

/// Write drop and create statements for all four tables
pub fn write_schema<W: Write>(
    out: &mut W,
    fields: &FieldList,
    options: &ExportOptions,
) -> io::Result<()> {
    for table in table_definitions(fields, options) {
        writeln!(out, "{}", table.drop_statement())?;
        writeln!(out, "{}", table.create_statement(options.layout))?;
        if options.layout == StatementLayout::Expanded {
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ForeignKeyNaming;
    use crate::export::sql::fields::collect_fields;
    use crate::models::EntryTypeDefinition;

    fn fields() -> FieldList {
        collect_fields(&[
            EntryTypeDefinition::new("Article").with_required(["author", "title"]),
            EntryTypeDefinition::new("Book")
                .with_required(["title"])
                .with_optional(["editor"]),
        ])
    }

    fn render(fields: &FieldList, options: &ExportOptions) -> String {
        let mut out = Vec::new();
        write_schema(&mut out, fields, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_drop_precedes_each_create() {
        let sql = render(&fields(), &ExportOptions::default());
        let lines: Vec<&str> = sql.lines().collect();
        assert_eq!(lines.len(), 8);
        for (pair, table) in lines.chunks(2).zip([
            ENTRY_TYPES_TABLE,
            ENTRIES_TABLE,
            GROUPS_TABLE,
            ENTRY_GROUP_TABLE,
        ]) {
            assert_eq!(pair[0], format!("DROP TABLE IF EXISTS {};", table));
            assert!(pair[1].starts_with(&format!("CREATE TABLE {} (", table)));
            assert!(pair[1].ends_with(");"));
        }
    }

    #[test]
    fn test_field_columns_follow_field_order() {
        let sql = render(&fields(), &ExportOptions::default());
        assert!(sql.contains(
            "label TEXT, author VARCHAR(3) DEFAULT NULL, title VARCHAR(3) DEFAULT NULL, \
             editor VARCHAR(3) DEFAULT NULL, PRIMARY KEY (entry_types_id)"
        ));
        assert!(sql.contains(
            "cite_key VARCHAR(30) DEFAULT NULL, author TEXT DEFAULT NULL, \
             title TEXT DEFAULT NULL, editor TEXT DEFAULT NULL, PRIMARY KEY (entries_id)"
        ));
    }

    #[test]
    fn test_legacy_foreign_key_targets() {
        let sql = render(&fields(), &ExportOptions::default());
        assert!(sql.contains("REFERENCES entry_type(entry_types_id)"));
        assert!(sql.contains("REFERENCES entry_fields(entries_id)"));
        assert!(sql.contains("REFERENCES groups(groups_id)"));
    }

    #[test]
    fn test_consistent_foreign_key_targets() {
        let options = ExportOptions {
            foreign_keys: ForeignKeyNaming::Consistent,
            ..Default::default()
        };
        let sql = render(&fields(), &options);
        assert!(sql.contains("REFERENCES entry_types(entry_types_id)"));
        assert!(sql.contains("REFERENCES entries(entries_id)"));
    }

    #[test]
    fn test_empty_field_list_has_no_dangling_comma() {
        let sql = render(&FieldList::default(), &ExportOptions::default());
        assert!(sql.contains(
            "CREATE TABLE entry_types (entry_types_id INT UNSIGNED NOT NULL AUTO_INCREMENT, \
             label TEXT, PRIMARY KEY (entry_types_id));"
        ));
        assert!(!sql.contains(", ,"));
    }

    #[test]
    fn test_column_widths_from_options() {
        let options = ExportOptions {
            id_column_width: 12,
            group_label_width: 255,
            ..Default::default()
        };
        let sql = render(&fields(), &options);
        assert!(sql.contains("jabref_eid VARCHAR(12) DEFAULT NULL"));
        assert!(sql.contains("label VARCHAR(255) DEFAULT NULL"));
    }

    #[test]
    fn test_expanded_layout() {
        let options = ExportOptions {
            layout: StatementLayout::Expanded,
            ..Default::default()
        };
        let sql = render(&FieldList::default(), &options);
        assert!(sql.starts_with(
            "DROP TABLE IF EXISTS entry_types;\nCREATE TABLE entry_types\n(\n\
             entry_types_id INT UNSIGNED NOT NULL AUTO_INCREMENT,\nlabel TEXT,\n\
             PRIMARY KEY (entry_types_id)\n);\n\n"
        ));
    }
}
