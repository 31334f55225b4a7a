//! `entries` population rows

use super::fields::FieldList;
use super::literal;
use super::schema::{ENTRIES_TABLE, ENTRY_TYPES_TABLE};
use crate::models::BibliographyEntry;
use std::io::{self, Write};

/// Sub-select resolving an entry type label to its surrogate id
fn entry_type_lookup(entry_type: &str) -> String {
    format!(
        "(SELECT entry_types_id FROM {} WHERE label={})",
        ENTRY_TYPES_TABLE,
        literal::quote(&entry_type.to_lowercase())
    )
}

/// INSERT statement for one entry
///
/// Values follow `fields` order; a field the entry does not carry is `NULL`.
pub fn entry_row(entry: &BibliographyEntry, fields: &FieldList) -> String {
    let mut values = vec![
        literal::quote(&entry.id),
        entry_type_lookup(&entry.entry_type),
        literal::quote_or_null(entry.cite_key.as_deref()),
    ];
    values.extend(
        fields
            .iter()
            .map(|name| literal::quote_or_null(entry.field(name))),
    );

    let mut columns = vec![
        "jabref_eid".to_string(),
        "entry_types_id".to_string(),
        "cite_key".to_string(),
    ];
    columns.extend(fields.iter().cloned());

    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        ENTRIES_TABLE,
        columns.join(", "),
        values.join(", ")
    )
}

/// Write one row per entry, in the order given
///
/// Entries are expected to be sorted already; no reordering happens here.
pub fn write_entry_rows<'a, W, I>(out: &mut W, entries: I, fields: &FieldList) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a BibliographyEntry>,
{
    let mut count = 0;
    for entry in entries {
        writeln!(out, "{}", entry_row(entry, fields))?;
        count += 1;
    }
    Ok(count)
}
