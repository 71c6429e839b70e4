//! Meter registry construction
//!
//! Joins meter identity rows with calibration rows by meter ID.

use super::{LoadStats, MeterRegistry};
use crate::app::models::{MeterCalibrationItem, MeterDetailsItem};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

impl MeterRegistry {
    /// Build a registry from parsed meter details and calibration rows
    ///
    /// Calibrations keep their export order. When a meter ID is defined more
    /// than once the last definition wins. Calibration rows naming an unknown
    /// meter are counted as orphans and dropped.
    pub fn from_items(
        details: Vec<MeterDetailsItem>,
        calibrations: Vec<MeterCalibrationItem>,
    ) -> Self {
        let start_time = Instant::now();
        let mut stats = LoadStats::new();
        let mut meters: HashMap<String, MeterDetailsItem> = HashMap::with_capacity(details.len());

        for mut meter in details {
            stats.details_processed += 1;
            meter.calibrations.clear();

            if let Some(previous) = meters.insert(meter.meter_id.clone(), meter) {
                warn!(
                    "Meter {} defined more than once, keeping the last definition",
                    previous.meter_id
                );
                stats.duplicate_meters += 1;
            }
        }

        for calibration in calibrations {
            stats.calibrations_processed += 1;

            match meters.get_mut(&calibration.meter_id) {
                Some(meter) => {
                    meter.calibrations.push(calibration);
                    stats.calibrations_joined += 1;
                }
                None => {
                    warn!(
                        "Calibration for unknown meter {} ignored",
                        calibration.meter_id
                    );
                    stats.orphan_calibrations += 1;
                }
            }
        }

        for meter in meters.values() {
            debug!(
                "Meter {}: {} calibration ranges",
                meter.meter_id,
                meter.calibrations.len()
            );
        }

        stats.meters_loaded = meters.len();
        stats.load_duration = start_time.elapsed();
        info!("{}", stats.summary());

        Self {
            meters,
            load_stats: stats,
        }
    }
}
