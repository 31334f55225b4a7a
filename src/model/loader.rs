//! Library loading functionality
//!
//! Loads a [`BibliographyDatabase`] from YAML or JSON documents.

use crate::models::{BibliographyDatabase, standard_entry_types};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Serialization format of a library document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryFormat {
    Yaml,
    Json,
}

impl LibraryFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Some(LibraryFormat::Yaml),
            Some("json") => Some(LibraryFormat::Json),
            _ => None,
        }
    }
}

/// Error loading a library
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("Failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported library format: {0}")]
    UnsupportedFormat(String),
}

/// Loads bibliography libraries from disk or memory
#[derive(Debug, Clone, Default)]
pub struct LibraryLoader {
    standard_types_fallback: bool,
}

impl LibraryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the built-in BibTeX types when a library declares none
    pub fn with_standard_types_fallback(mut self, enabled: bool) -> Self {
        self.standard_types_fallback = enabled;
        self
    }

    /// Parse a library from a string
    pub fn load_str(
        &self,
        content: &str,
        format: LibraryFormat,
    ) -> Result<BibliographyDatabase, LoaderError> {
        let mut db: BibliographyDatabase = match format {
            LibraryFormat::Yaml => serde_yaml::from_str(content)?,
            LibraryFormat::Json => serde_json::from_str(content)?,
        };

        if db.entry_types.is_empty() {
            if self.standard_types_fallback {
                db.entry_types = standard_entry_types();
            } else {
                warn!("Library declares no entry types; no field columns will be exported");
            }
        }

        info!(
            "Loaded {} entry types and {} entries",
            db.entry_types.len(),
            db.entries.len()
        );
        Ok(db)
    }

    /// Read a library file, picking the format from its extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<BibliographyDatabase, LoaderError> {
        let path = path.as_ref();
        let format = LibraryFormat::from_path(path)
            .ok_or_else(|| LoaderError::UnsupportedFormat(path.display().to_string()))?;
        let content =
            std::fs::read_to_string(path).map_err(|e| LoaderError::Io(path.to_path_buf(), e))?;
        self.load_str(&content, format)
    }
}
