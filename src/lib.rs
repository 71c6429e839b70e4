//! PocketGauger Plugin Library
//!
//! A Rust library for converting PocketGauger field gauging exports into the
//! canonical discharge-activity model used by hydrological field-data hosts.
//!
//! This library provides tools for:
//! - Parsing the CSV tables of a PocketGauger export into intermediate DTOs
//! - Joining meter details with their calibration records for O(1) lookups
//! - Mapping meter details onto calibration equations
//! - Computing mid-section verticals and segments from cross-section panels
//! - Assembling discharge activities with location-aware timestamps
//! - Comprehensive error handling with table and record context

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod calibration_mapper;
        pub mod discharge_mapper;
        pub mod export_parser;
        pub mod meter_registry;
        pub mod plugin;
        pub mod vertical_calculator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DischargeActivity, GaugingSummaryItem, PanelItem, Vertical};
pub use app::services::plugin::PocketGaugerPlugin;
pub use config::PluginConfig;

/// Result type alias for the PocketGauger plugin
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PocketGauger parsing and mapping operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Export table structure error
    #[error("Export format error in file '{file}': {message}")]
    ExportFormat { file: String, message: String },

    /// A required export table is absent
    #[error("Required export table not found: {table}")]
    MissingTable { table: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Meter calibration could not be mapped
    #[error("Calibration mapping failed for meter '{meter_id}': {message}")]
    CalibrationMapping { meter_id: String, message: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an export format error
    pub fn export_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExportFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a missing table error
    pub fn missing_table(table: impl Into<String>) -> Self {
        Self::MissingTable {
            table: table.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a calibration mapping error
    pub fn calibration_mapping(meter_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CalibrationMapping {
            meter_id: meter_id.into(),
            message: message.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
