//! `entry_types` population rows
//!
//! Each entry type becomes one row holding, per field column, the code of the
//! role that field plays for the type. Roles are applied in the fixed order
//! required, optional, general, utility and each assignment overwrites the
//! previous one, so a field listed under several roles keeps the last.

use super::fields::FieldList;
use super::literal;
use super::schema::ENTRY_TYPES_TABLE;
use crate::models::{EntryTypeDefinition, FieldRole};
use std::io::{self, Write};

/// Role code per field column for one entry type
///
/// The result always has `fields.len()` slots. Fields named by a role list
/// but missing from `fields` are ignored.
pub fn role_slots(entry_type: &EntryTypeDefinition, fields: &FieldList) -> Vec<Option<FieldRole>> {
    let mut slots = vec![None; fields.len()];
    for role in FieldRole::SWEEP_ORDER {
        for name in entry_type.fields_for(role) {
            if let Some(index) = fields.position(name) {
                slots[index] = Some(role);
            }
        }
    }
    slots
}

/// INSERT statement for one entry type
pub fn entry_type_row(entry_type: &EntryTypeDefinition, fields: &FieldList) -> String {
    let mut values = vec![literal::quote(&entry_type.normalized_name())];
    values.extend(
        role_slots(entry_type, fields)
            .into_iter()
            .map(|slot| literal::quote_or_null(slot.map(FieldRole::code))),
    );

    let mut columns = vec!["label".to_string()];
    columns.extend(fields.iter().cloned());

    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        ENTRY_TYPES_TABLE,
        columns.join(", "),
        values.join(", ")
    )
}

/// Write one row per entry type, in the given order
pub fn write_entry_type_rows<W: Write>(
    out: &mut W,
    entry_types: &[EntryTypeDefinition],
    fields: &FieldList,
) -> io::Result<()> {
    for entry_type in entry_types {
        writeln!(out, "{}", entry_type_row(entry_type, fields))?;
    }
    Ok(())
}
