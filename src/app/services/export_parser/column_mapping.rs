//! Column mapping for export table headers
//!
//! Export tables are addressed by header name rather than position, since
//! logger firmware versions differ in column order and optional columns.

use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Header name to column index mapping for one table
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Table the mapping was built from
    pub table: String,
}

impl ColumnMapping {
    /// Build the mapping from a header record
    pub fn analyze(table: &str, headers: &StringRecord) -> Self {
        let name_to_index = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (header.trim().to_string(), index))
            .collect();

        ColumnMapping {
            name_to_index,
            table: table.to_string(),
        }
    }

    /// Fail if any of the required columns is absent
    pub fn require(&self, columns: &[&str]) -> Result<()> {
        let missing: Vec<&str> = columns
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::export_format(
                &self.table,
                format!("missing required columns: {}", missing.join(", ")),
            ))
        }
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.name_to_index.contains_key(column_name)
    }

    /// Number of mapped columns
    pub fn column_count(&self) -> usize {
        self.name_to_index.len()
    }
}
