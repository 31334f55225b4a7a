//! Built-in BibTeX entry types

use super::entry_type::EntryTypeDefinition;

const GENERAL_FIELDS: [&str; 8] = [
    "crossref",
    "keywords",
    "doi",
    "url",
    "citeseerurl",
    "pdf",
    "abstract",
    "comment",
];

const UTILITY_FIELDS: [&str; 1] = ["search"];

fn standard(name: &str, required: &[&str], optional: &[&str]) -> EntryTypeDefinition {
    EntryTypeDefinition::new(name)
        .with_required(required.iter().copied())
        .with_optional(optional.iter().copied())
        .with_general(GENERAL_FIELDS)
        .with_utility(UTILITY_FIELDS)
}

/// The classic BibTeX entry types, sorted by name
///
/// Every type shares the same general and utility fields.
pub fn standard_entry_types() -> Vec<EntryTypeDefinition> {
    let mut types = vec![
        standard(
            "Article",
            &["author", "title", "journal", "year"],
            &["volume", "number", "pages", "month", "note"],
        ),
        standard(
            "Book",
            &["title", "publisher", "year", "editor", "author"],
            &["volume", "number", "series", "address", "edition", "month", "note"],
        ),
        standard(
            "Booklet",
            &["title"],
            &["author", "howpublished", "address", "month", "year", "note"],
        ),
        standard(
            "InBook",
            &["chapter", "pages", "title", "publisher", "year", "editor", "author"],
            &["volume", "number", "series", "type", "address", "edition", "month", "note"],
        ),
        standard(
            "InCollection",
            &["author", "title", "booktitle", "publisher", "year"],
            &[
                "editor", "volume", "number", "series", "type", "chapter", "pages", "address",
                "edition", "month", "note",
            ],
        ),
        standard(
            "InProceedings",
            &["author", "title", "booktitle", "year"],
            &[
                "editor",
                "volume",
                "number",
                "series",
                "pages",
                "address",
                "month",
                "organization",
                "publisher",
                "note",
            ],
        ),
        standard(
            "Manual",
            &["title"],
            &["author", "organization", "address", "edition", "month", "year", "note"],
        ),
        standard(
            "MastersThesis",
            &["author", "title", "school", "year"],
            &["type", "address", "month", "note"],
        ),
        standard(
            "Misc",
            &[],
            &["author", "title", "howpublished", "month", "year", "note"],
        ),
        standard(
            "PhdThesis",
            &["author", "title", "school", "year"],
            &["type", "address", "month", "note"],
        ),
        standard(
            "Proceedings",
            &["title", "year"],
            &[
                "editor",
                "volume",
                "number",
                "series",
                "address",
                "publisher",
                "note",
                "month",
                "organization",
            ],
        ),
        standard(
            "TechReport",
            &["author", "title", "institution", "year"],
            &["type", "number", "address", "month", "note"],
        ),
        standard("Unpublished", &["author", "title", "note"], &["month", "year"]),
    ];
    types.sort_by_key(EntryTypeDefinition::normalized_name);
    types
}
