//! Parsing statistics and result structures for export processing
//!
//! This module provides types for tracking parsing success rates and
//! organizing parsed records for the mappers.

use crate::app::models::{GaugingSummaryItem, MeterCalibrationItem, MeterDetailsItem};
use serde::{Deserialize, Serialize};

/// Parsing result with assembled gaugings, meter records and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Gaugings with their panels and sub-observations attached, in file order
    pub gaugings: Vec<GaugingSummaryItem>,

    /// Meter identity records, calibrations not yet joined
    pub meter_details: Vec<MeterDetailsItem>,

    /// Meter calibration ranges
    pub meter_calibrations: Vec<MeterCalibrationItem>,

    /// Parsing statistics across all tables
    pub stats: ParseStats,
}

/// Parsing statistics across the tables of one or more exports
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of data records encountered
    pub total_records: usize,

    /// Number of records successfully parsed
    pub records_parsed: usize,

    /// Number of records skipped due to errors
    pub records_skipped: usize,

    /// Parsed records whose parent gauging or panel does not exist
    pub orphan_records: usize,

    /// List of parsing errors for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_records as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }

    /// Record a skipped row
    pub fn record_skip(&mut self, message: String) {
        self.records_skipped += 1;
        self.errors.push(message);
    }
}
