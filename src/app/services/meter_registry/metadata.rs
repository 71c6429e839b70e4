//! Meter registry metadata and statistics tracking
//!
//! This module defines the data structures for tracking how the meter
//! registry was built.

use std::time::Duration;

/// Statistics about building the meter registry
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Number of meter identity rows processed
    pub details_processed: usize,

    /// Number of calibration rows processed
    pub calibrations_processed: usize,

    /// Number of distinct meters loaded
    pub meters_loaded: usize,

    /// Number of calibration rows joined to a meter
    pub calibrations_joined: usize,

    /// Calibration rows naming a meter that does not exist
    pub orphan_calibrations: usize,

    /// Meter identity rows replaced by a later row with the same ID
    pub duplicate_meters: usize,

    /// Time taken to build the registry
    pub load_duration: Duration,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any rows were dropped or replaced
    pub fn has_warnings(&self) -> bool {
        self.orphan_calibrations > 0 || self.duplicate_meters > 0
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Loaded {} meters with {} calibration ranges ({} orphaned, {} duplicate meters) in {:.3}s",
            self.meters_loaded,
            self.calibrations_joined,
            self.orphan_calibrations,
            self.duplicate_meters,
            self.load_duration.as_secs_f64()
        )
    }
}

/// Metadata about the meter registry
#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    /// Total number of meters in registry
    pub meter_count: usize,

    /// Total number of calibration ranges across all meters
    pub calibration_count: usize,

    /// Meters without any calibration range
    pub uncalibrated_meters: usize,

    /// Statistics from building the registry
    pub load_stats: LoadStats,
}

impl RegistryMetadata {
    /// Get a summary string of the registry
    pub fn summary(&self) -> String {
        format!(
            "Registry with {} meters, {} calibration ranges, {} uncalibrated",
            self.meter_count, self.calibration_count, self.uncalibrated_meters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_stats_new() {
        let stats = LoadStats::new();
        assert_eq!(stats.meters_loaded, 0);
        assert!(!stats.has_warnings());
    }

    #[test]
    fn test_load_stats_warnings() {
        let mut stats = LoadStats::new();
        stats.calibrations_processed = 8;
        stats.calibrations_joined = 6;
        stats.orphan_calibrations = 2;

        assert!(stats.has_warnings());
    }

    #[test]
    fn test_load_stats_summary() {
        let mut stats = LoadStats::new();
        stats.meters_loaded = 3;
        stats.calibrations_joined = 7;
        stats.orphan_calibrations = 1;
        stats.load_duration = Duration::from_millis(1500);

        let summary = stats.summary();
        assert!(summary.contains("3 meters"));
        assert!(summary.contains("7 calibration ranges"));
        assert!(summary.contains("1 orphaned"));
        assert!(summary.contains("1.500s"));
    }

    #[test]
    fn test_registry_metadata_summary() {
        let metadata = RegistryMetadata {
            meter_count: 2,
            calibration_count: 5,
            uncalibrated_meters: 1,
            load_stats: LoadStats::new(),
        };

        let summary = metadata.summary();
        assert!(summary.contains("2 meters"));
        assert!(summary.contains("5 calibration ranges"));
        assert!(summary.contains("1 uncalibrated"));
    }
}
