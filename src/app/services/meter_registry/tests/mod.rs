//! Shared test utilities and fixtures for meter registry tests

use crate::app::models::{MeterCalibrationItem, MeterDetailsItem};

pub mod query_tests;

/// Create a meter identity record without calibrations
pub fn create_test_meter(meter_id: &str, manufacturer: &str) -> MeterDetailsItem {
    MeterDetailsItem {
        meter_id: meter_id.to_string(),
        manufacturer: manufacturer.to_string(),
        model: "Type A".to_string(),
        serial_number: format!("SN-{}", meter_id),
        impeller_number: None,
        description: None,
        calibrations: Vec::new(),
    }
}

/// Create a calibration range for a meter
pub fn create_test_calibration(meter_id: &str, min: f64, max: f64) -> MeterCalibrationItem {
    MeterCalibrationItem {
        meter_id: meter_id.to_string(),
        calibration_date: None,
        min_rotation_speed: min,
        max_rotation_speed: max,
        factor: 0.25,
        constant: 0.01,
    }
}
