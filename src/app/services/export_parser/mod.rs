//! Parser for PocketGauger export tables
//!
//! A PocketGauger export is a small set of CSV tables: gauging summaries,
//! cross-section panels, velocity sub-observations, meter details and meter
//! calibrations. This module reads those tables into the intermediate DTOs of
//! [`crate::app::models::dtos`], attaching panels to gaugings and
//! sub-observations to panels in file order.
//!
//! ## Architecture
//!
//! - [`files`] - In-memory table set, loadable from an export directory
//! - [`parser`] - Table reading orchestration and record assembly
//! - [`column_mapping`] - Header name to column index mapping
//! - [`record_parser`] - One function per table row type
//! - [`field_parsers`] - Typed field extraction with validation
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use pocket_gauger::app::services::export_parser::{ExportParser, PocketGaugerFiles};
//! use pocket_gauger::config::ParserConfig;
//!
//! # fn example() -> pocket_gauger::Result<()> {
//! let files = PocketGaugerFiles::from_directory(std::path::Path::new("export"))?;
//! let result = ExportParser::new(&ParserConfig::default()).parse(&files)?;
//!
//! println!("Parsed {} gaugings from {} records",
//!          result.gaugings.len(),
//!          result.stats.total_records);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod files;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMapping;
pub use files::PocketGaugerFiles;
pub use parser::ExportParser;
pub use stats::{ParseResult, ParseStats};
