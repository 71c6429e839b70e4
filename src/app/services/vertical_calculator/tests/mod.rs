//! Test utilities for vertical calculation
//!
//! Builders for panel items and sub-observations plus a counting resolver
//! used across the calculator and classification tests.

use std::cell::Cell;
use std::sync::Arc;

use crate::Result;
use crate::app::models::{
    MeterCalibration, MeterCalibrationItem, MeterDetailsItem, PanelItem, VerticalItem,
};
use crate::app::services::calibration_mapper::{MeterCalibrationMapper, MeterCalibrationResolver};

// Test modules
mod calculator_tests;

/// Resolver that records how often it was asked
#[derive(Debug, Default)]
pub struct CountingResolver {
    pub calls: Cell<usize>,
}

impl MeterCalibrationResolver for CountingResolver {
    fn resolve(&self, meter: &MeterDetailsItem) -> Result<Arc<MeterCalibration>> {
        self.calls.set(self.calls.get() + 1);
        MeterCalibrationMapper::new().resolve(meter)
    }
}

/// Create a sub-observation at the given sample position
pub fn create_vertical_item(sample_position: f64) -> VerticalItem {
    VerticalItem {
        sample_position,
        depth: 0.42,
        revs: 37.6,
        exposure_time: 40.0,
        velocity: 0.31,
    }
}

/// Create `count` sub-observations spread over the depth
pub fn create_vertical_items(count: usize) -> Vec<VerticalItem> {
    (0..count)
        .map(|i| create_vertical_item(0.2 + i as f64 * 0.05))
        .collect()
}

/// Create a panel with a two-point observation
pub fn create_panel(vertical_number: i32, distance: f64, flow: f64) -> PanelItem {
    PanelItem {
        vertical_number,
        distance,
        depth: 0.8 + vertical_number as f64 * 0.1,
        mean_velocity: 0.25 + vertical_number as f64 * 0.01,
        area: 0.4 + vertical_number as f64 * 0.05,
        flow,
        verticals: create_vertical_items(2),
    }
}

/// Create panels at the given distances with unit discharge
pub fn create_panels_at(distances: &[f64]) -> Vec<PanelItem> {
    distances
        .iter()
        .enumerate()
        .map(|(i, &distance)| create_panel(i as i32 + 1, distance, 1.0))
        .collect()
}

/// Create panels with the given discharges at one-metre spacing
pub fn create_panels_with_flows(flows: &[f64]) -> Vec<PanelItem> {
    flows
        .iter()
        .enumerate()
        .map(|(i, &flow)| create_panel(i as i32 + 1, i as f64 + 1.0, flow))
        .collect()
}

/// Create a calibrated test meter
pub fn create_test_meter() -> MeterDetailsItem {
    MeterDetailsItem {
        meter_id: "M-0412".to_string(),
        manufacturer: "Valeport".to_string(),
        model: "801".to_string(),
        serial_number: "0412".to_string(),
        impeller_number: None,
        description: Some("Rod-mounted impeller".to_string()),
        calibrations: vec![MeterCalibrationItem {
            meter_id: "M-0412".to_string(),
            calibration_date: None,
            min_rotation_speed: 0.0,
            max_rotation_speed: 12.0,
            factor: 0.2543,
            constant: 0.0087,
        }],
    }
}

/// Assert two floats agree to within a tight tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
