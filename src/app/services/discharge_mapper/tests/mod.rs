//! Test utilities for discharge activity mapping

use chrono::{NaiveDate, NaiveDateTime};

use crate::app::models::{FlowCalculationMethod, GaugingSummaryItem, LocationInfo};
use crate::app::services::discharge_mapper::DischargeActivityMapper;
use crate::app::services::vertical_calculator::tests::{create_panels_at, create_test_meter};
use crate::config::PluginConfig;


pub const LOCATION_UTC_OFFSET: f64 = -8.5;

/// Local date-time on the test day
pub fn local_time(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 14)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Location with the test offset and no channels
pub fn create_location() -> LocationInfo {
    LocationInfo::new("Thames at Kingston", "39001", LOCATION_UTC_OFFSET)
}

/// Mapper with default configuration
pub fn create_mapper() -> DischargeActivityMapper {
    DischargeActivityMapper::from_config(&PluginConfig::default())
}

/// A mid-section gauging with three panels and a calibrated meter
pub fn create_gauging() -> GaugingSummaryItem {
    GaugingSummaryItem {
        gauging_id: "G1".to_string(),
        gauge_id: "39001".to_string(),
        gauge_name: "Thames at Kingston".to_string(),
        observers_name: "A. Hydrographer".to_string(),
        start_date: local_time(9, 15),
        end_date: local_time(10, 5),
        flow_calculation_method: FlowCalculationMethod::Mid,
        meter_id: "M-0412".to_string(),
        flow: 3.0,
        area: 6.4,
        mean_velocity: 0.47,
        start_stage: Some(1.10),
        end_stage: Some(1.14),
        mean_stage: None,
        comments: Some("Clear conditions".to_string()),
        panel_items: create_panels_at(&[0.5, 1.5, 2.5]),
        meter_details: Some(create_test_meter()),
    }
}
