//! Library loading tests

use bibsql::{GroupKind, LibraryLoader, LoaderError, MySQLExporter};
use std::io::Write;

const LIBRARY_YAML: &str = r#"
entry_types:
  - name: Article
    required: [author, title]
    utility: [search]
  - name: Book
    required: [title]
    optional: [editor]
entries:
  - id: "0000002"
    entry_type: book
    cite_key: knuth1968
    fields:
      title: The Art of Computer Programming
  - id: "0000001"
    entry_type: article
    cite_key: codd1970
    fields:
      author: E. F. Codd
      title: A Relational Model of Data for Large Shared Data Banks
groups:
  name: All Entries
  kind:
    type: all_entries
  children:
    - name: Databases
      kind:
        type: explicit
        members: ["0000001"]
    - name: Classics
      kind:
        type: keyword
        field: keywords
        keyword: classic
"#;

mod yaml_loader_tests {
    use super::*;

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(LIBRARY_YAML.as_bytes()).unwrap();

        let db = LibraryLoader::new().load_file(file.path()).unwrap();
        assert_eq!(db.entry_types.len(), 2);
        assert_eq!(db.entries.len(), 2);
        assert_eq!(db.entries[1].field("author"), Some("E. F. Codd"));

        let root = db.groups.as_ref().unwrap();
        assert_eq!(root.kind, GroupKind::AllEntries);
        assert_eq!(root.children.len(), 2);
        assert_eq!(
            root.children[0].members(),
            Some(&["0000001".to_string()][..])
        );
    }

    #[test]
    fn test_loaded_library_exports() {
        let db = LibraryLoader::new()
            .load_str(LIBRARY_YAML, bibsql::LibraryFormat::Yaml)
            .unwrap();
        let result = MySQLExporter::default().export_database(&db, None).unwrap();

        assert!(result.content.contains(
            r#"INSERT INTO entry_types (label, author, title, search, editor) VALUES ("article", "req", "req", "uti", NULL);"#
        ));
        // codd1970 sorts before knuth1968
        let codd = result.content.find("VALUES (\"0000001\"").unwrap();
        let knuth = result.content.find("VALUES (\"0000002\"").unwrap();
        assert!(codd < knuth);
        assert!(result.content.contains("VALUES (2, \"Databases\", 1);"));
        assert!(result.content.contains("VALUES (3, \"Classics\", 1);"));
        assert_eq!(result.content.matches("INSERT INTO entry_group").count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LibraryLoader::new()
            .load_file(dir.path().join("absent.yaml"))
            .unwrap_err();
        match err {
            LoaderError::Io(path, _) => assert!(path.ends_with("absent.yaml")),
            other => panic!("Expected IO error, got {:?}", other),
        }
    }
}

mod json_loader_tests {
    use super::*;

    #[test]
    fn test_load_json_round_trip_through_serde() {
        let db = LibraryLoader::new()
            .load_str(LIBRARY_YAML, bibsql::LibraryFormat::Yaml)
            .unwrap();
        let json = serde_json::to_string(&db).unwrap();
        let reloaded = LibraryLoader::new()
            .load_str(&json, bibsql::LibraryFormat::Json)
            .unwrap();
        assert_eq!(db, reloaded);
    }
}
