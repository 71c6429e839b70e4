//! Meter registry service for O(1) current meter lookups
//!
//! This module joins parsed meter identity records with their calibration
//! ranges and indexes the result by meter ID, so every gauging in an export
//! can be resolved to the meter it was measured with.

use crate::app::models::MeterDetailsItem;
use std::collections::HashMap;

pub mod loader;
pub mod metadata;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use metadata::{LoadStats, RegistryMetadata};

/// Meter registry providing O(1) meter lookups by meter ID
#[derive(Debug, Clone)]
pub struct MeterRegistry {
    /// Meters with joined calibrations, indexed by meter ID
    pub(crate) meters: HashMap<String, MeterDetailsItem>,

    /// Statistics from the join
    pub(crate) load_stats: LoadStats,
}

impl Default for MeterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MeterRegistry {
    /// Create a new empty meter registry
    pub fn new() -> Self {
        Self {
            meters: HashMap::new(),
            load_stats: LoadStats::new(),
        }
    }

    /// Get a meter by ID (O(1) lookup)
    pub fn get_meter(&self, meter_id: &str) -> Option<&MeterDetailsItem> {
        self.meters.get(meter_id)
    }

    /// Check if a meter exists in the registry
    pub fn contains_meter(&self, meter_id: &str) -> bool {
        self.meters.contains_key(meter_id)
    }

    /// Get the total number of meters in the registry
    pub fn meter_count(&self) -> usize {
        self.meters.len()
    }

    /// Statistics from building the registry
    pub fn load_stats(&self) -> &LoadStats {
        &self.load_stats
    }

    /// Get registry metadata
    pub fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            meter_count: self.meters.len(),
            calibration_count: self.meters.values().map(|m| m.calibrations.len()).sum(),
            uncalibrated_meters: self
                .meters
                .values()
                .filter(|m| m.calibrations.is_empty())
                .count(),
            load_stats: self.load_stats.clone(),
        }
    }
}
