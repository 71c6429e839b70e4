//! Meter lookup and gauging enrichment

use super::MeterRegistry;
use crate::app::models::{GaugingSummaryItem, MeterDetailsItem};
use tracing::warn;

impl MeterRegistry {
    /// Get all meters, sorted by meter ID
    pub fn meters(&self) -> Vec<&MeterDetailsItem> {
        let mut meters: Vec<&MeterDetailsItem> = self.meters.values().collect();
        meters.sort_by(|a, b| a.meter_id.cmp(&b.meter_id));
        meters
    }

    /// Attach meter details to each gauging by its meter ID
    ///
    /// Returns the number of gaugings whose meter is not in the registry;
    /// those keep `meter_details` as `None`.
    pub fn attach_to(&self, gaugings: &mut [GaugingSummaryItem]) -> usize {
        let mut unresolved = 0;

        for gauging in gaugings.iter_mut() {
            gauging.meter_details = self.get_meter(&gauging.meter_id).cloned();

            if gauging.meter_details.is_none() {
                warn!(
                    "Gauging {} uses unknown meter {}",
                    gauging.gauging_id, gauging.meter_id
                );
                unresolved += 1;
            }
        }

        unresolved
    }
}
