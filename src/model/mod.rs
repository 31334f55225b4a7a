//! Library loading functionality
//!
//! Provides high-level operations for reading bibliography libraries
//! before they are handed to an exporter.

pub mod loader;

pub use loader::{LibraryFormat, LibraryLoader, LoaderError};
