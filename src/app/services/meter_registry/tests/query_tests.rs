//! Tests for meter lookup and gauging enrichment

use super::*;
use crate::app::models::{FlowCalculationMethod, GaugingSummaryItem};
use crate::app::services::meter_registry::MeterRegistry;
use chrono::NaiveDateTime;

fn create_test_registry() -> MeterRegistry {
    MeterRegistry::from_items(
        vec![
            create_test_meter("M3", "Valeport"),
            create_test_meter("M1", "OTT"),
            create_test_meter("M2", "valeport"),
        ],
        vec![create_test_calibration("M1", 0.0, 1.0)],
    )
}

fn create_gauging(gauging_id: &str, meter_id: &str) -> GaugingSummaryItem {
    GaugingSummaryItem {
        gauging_id: gauging_id.to_string(),
        gauge_id: "39001".to_string(),
        gauge_name: "Kingston".to_string(),
        observers_name: "A. Hydrographer".to_string(),
        start_date: NaiveDateTime::default(),
        end_date: NaiveDateTime::default(),
        flow_calculation_method: FlowCalculationMethod::Mid,
        meter_id: meter_id.to_string(),
        flow: 0.0,
        area: 0.0,
        mean_velocity: 0.0,
        start_stage: None,
        end_stage: None,
        mean_stage: None,
        comments: None,
        panel_items: Vec::new(),
        meter_details: None,
    }
}

#[test]
fn test_meters_sorted_by_id() {
    let registry = create_test_registry();

    let ids: Vec<&str> = registry.meters().iter().map(|m| m.meter_id.as_str()).collect();
    assert_eq!(ids, vec!["M1", "M2", "M3"]);
}

#[test]
fn test_attach_to_gaugings() {
    let registry = create_test_registry();
    let mut gaugings = vec![create_gauging("G1", "M1"), create_gauging("G2", "M7")];

    let unresolved = registry.attach_to(&mut gaugings);

    assert_eq!(unresolved, 1);
    let attached = gaugings[0].meter_details.as_ref().unwrap();
    assert_eq!(attached.meter_id, "M1");
    assert_eq!(attached.calibrations.len(), 1);
    assert!(gaugings[1].meter_details.is_none());
}
