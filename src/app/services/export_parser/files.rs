//! In-memory set of export tables
//!
//! Tables are keyed by lower-cased file name so exports written by different
//! logger firmware versions (`PANELS.CSV`, `Panels.csv`) are found alike.

use crate::constants::tables;
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// The CSV tables of one PocketGauger export
#[derive(Debug, Clone, Default)]
pub struct PocketGaugerFiles {
    /// Table contents keyed by lower-cased file name
    tables: HashMap<String, String>,

    /// Directory the tables were read from, if any
    source: Option<PathBuf>,
}

impl PocketGaugerFiles {
    /// Create an empty table set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a table
    pub fn with_table(mut self, name: &str, content: impl Into<String>) -> Self {
        self.tables.insert(name.to_ascii_lowercase(), content.into());
        self
    }

    /// Read the recognised tables from an export directory (non-recursive)
    pub fn from_directory(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::export_format(
                path.display().to_string(),
                "export directory not found",
            ));
        }

        let known: Vec<String> = tables::ALL.iter().map(|t| t.to_ascii_lowercase()).collect();
        let mut files = Self {
            tables: HashMap::new(),
            source: Some(path.to_path_buf()),
        };

        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                Error::directory_traversal(
                    format!("Failed to list export directory {}", path.display()),
                    e,
                )
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_ascii_lowercase();
            if !known.contains(&file_name) {
                debug!("Ignoring unrecognised export file {}", entry.path().display());
                continue;
            }

            let content = std::fs::read_to_string(entry.path()).map_err(|e| {
                Error::io(
                    format!("Failed to read export table {}", entry.path().display()),
                    e,
                )
            })?;
            debug!("Loaded export table {}", entry.path().display());
            files.tables.insert(file_name, content);
        }

        Ok(files)
    }

    /// Contents of a table, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tables.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Check if a table is present
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(&name.to_ascii_lowercase())
    }

    /// Number of tables held
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Directory the tables were read from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Human-readable label for log and error messages
    pub fn label(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "<in-memory export>".to_string(),
        }
    }
}
