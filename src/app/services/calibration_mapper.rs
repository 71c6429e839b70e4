//! Meter calibration resolution
//!
//! Turns the meter details joined from the export into the calibration
//! record attached to velocity observations. The vertical calculator receives
//! a [`MeterCalibrationResolver`] per call and embeds whatever it returns.

use crate::app::models::{MeterCalibration, MeterCalibrationEquation, MeterDetailsItem};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// Lookup from meter details to a shared calibration record
pub trait MeterCalibrationResolver {
    fn resolve(&self, meter: &MeterDetailsItem) -> Result<Arc<MeterCalibration>>;
}

impl<F> MeterCalibrationResolver for F
where
    F: Fn(&MeterDetailsItem) -> Result<Arc<MeterCalibration>>,
{
    fn resolve(&self, meter: &MeterDetailsItem) -> Result<Arc<MeterCalibration>> {
        self(meter)
    }
}

/// Maps meter details and calibration ranges onto calibration equations
#[derive(Debug, Clone, Copy, Default)]
pub struct MeterCalibrationMapper;

impl MeterCalibrationMapper {
    pub fn new() -> Self {
        Self
    }

    /// Build the calibration record for a meter
    ///
    /// Equations are ordered by range start. A range whose minimum rotation
    /// speed exceeds its maximum is rejected.
    pub fn map(&self, meter: &MeterDetailsItem) -> Result<MeterCalibration> {
        if meter.calibrations.is_empty() {
            warn!("Meter {} has no calibration records", meter.meter_id);
        }

        let mut equations = meter
            .calibrations
            .iter()
            .map(|item| {
                if item.min_rotation_speed > item.max_rotation_speed {
                    return Err(Error::calibration_mapping(
                        &meter.meter_id,
                        format!(
                            "rotation speed range {}..{} is inverted",
                            item.min_rotation_speed, item.max_rotation_speed
                        ),
                    ));
                }

                Ok(MeterCalibrationEquation {
                    range_start: item.min_rotation_speed,
                    range_end: item.max_rotation_speed,
                    slope: item.factor,
                    intercept: item.constant,
                    interval: None,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        equations.sort_by(|a, b| a.range_start.total_cmp(&b.range_start));

        debug!(
            "Mapped meter {} with {} calibration equations",
            meter.meter_id,
            equations.len()
        );

        Ok(MeterCalibration {
            meter_id: meter.meter_id.clone(),
            manufacturer: meter.manufacturer.clone(),
            model: meter.model.clone(),
            serial_number: meter.serial_number.clone(),
            firmware_version: None,
            equations,
        })
    }
}

impl MeterCalibrationResolver for MeterCalibrationMapper {
    fn resolve(&self, meter: &MeterDetailsItem) -> Result<Arc<MeterCalibration>> {
        self.map(meter).map(Arc::new)
    }
}
