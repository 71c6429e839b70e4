//! Tests for vertical construction, widths, edges and discharge portions

use super::*;
use crate::Error;
use crate::app::models::{
    ChannelMeasurementContext, DeploymentMethod, FlowDirection, MeasurementCondition,
    VerticalType,
};
use crate::app::services::vertical_calculator::compute;

fn wading() -> ChannelMeasurementContext {
    ChannelMeasurementContext::new(DeploymentMethod::Wading)
}

#[test]
fn test_compute_preserves_length_and_order() {
    let panels = create_panels_at(&[0.5, 1.5, 2.5, 3.5, 4.5]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert_eq!(verticals.len(), panels.len());
    for (vertical, panel) in verticals.iter().zip(&panels) {
        assert_eq!(vertical.sequence_number, panel.vertical_number);
    }
}

#[test]
fn test_compute_copies_vertical_geometry() {
    let panels = create_panels_at(&[1.0, 2.0, 3.0]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    for (vertical, panel) in verticals.iter().zip(&panels) {
        assert_eq!(vertical.measurement_condition, MeasurementCondition::OpenWater);
        assert_eq!(vertical.flow_direction, FlowDirection::Normal);
        assert_eq!(vertical.tagline_position, panel.distance);
        assert_eq!(vertical.sounded_depth, panel.depth);
        assert!(!vertical.is_sounded_depth_estimated);
        assert_eq!(vertical.effective_depth, panel.depth);
    }
}

#[test]
fn test_compute_empty_input() {
    let resolver = CountingResolver::default();
    let meter = create_test_meter();

    let verticals = compute(&[], Some(&meter), &wading(), &resolver).unwrap();

    assert!(verticals.is_empty());
    assert_eq!(resolver.calls.get(), 0);
}

// =============================================================================
// Vertical Types
// =============================================================================

#[test]
fn test_first_and_last_verticals_are_edges() {
    let panels = create_panels_at(&[0.0, 1.0, 2.0, 3.0]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert_eq!(verticals[0].vertical_type, VerticalType::StartEdgeNoWaterBefore);
    assert!(
        verticals[1..verticals.len() - 1]
            .iter()
            .all(|v| v.vertical_type == VerticalType::MidRiver)
    );
    assert_eq!(
        verticals.last().unwrap().vertical_type,
        VerticalType::EndEdgeNoWaterAfter
    );
}

#[test]
fn test_two_verticals_are_both_edges() {
    let panels = create_panels_at(&[0.0, 4.0]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert_eq!(verticals[0].vertical_type, VerticalType::StartEdgeNoWaterBefore);
    assert_eq!(verticals[1].vertical_type, VerticalType::EndEdgeNoWaterAfter);
}

#[test]
fn test_single_vertical_is_end_edge() {
    let panels = create_panels_at(&[3.0]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert_eq!(verticals.len(), 1);
    assert_eq!(verticals[0].vertical_type, VerticalType::EndEdgeNoWaterAfter);
}

// =============================================================================
// Segments
// =============================================================================

#[test]
fn test_compute_copies_segment_values() {
    let panels = create_panels_with_flows(&[0.12, 0.34, 0.56]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    for (vertical, panel) in verticals.iter().zip(&panels) {
        assert_eq!(vertical.segment.area, panel.area);
        assert_eq!(vertical.segment.velocity, panel.mean_velocity);
        assert_eq!(vertical.segment.discharge, panel.flow);
        assert!(!vertical.segment.is_discharge_estimated);
    }
}

#[test]
fn test_segment_widths() {
    let cases: [(&[f64], &[f64]); 3] = [
        (&[2.0, 3.0, 4.0], &[2.0, 1.0, 1.0]),
        (&[400.0, 600.0, 1100.0], &[400.0, 200.0, 500.0]),
        (&[50.23, 55.5, 60.1111], &[50.23, 5.27, 4.6111]),
    ];

    for (distances, expected_widths) in cases {
        let panels = create_panels_at(distances);

        let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

        for (vertical, &expected) in verticals.iter().zip(expected_widths) {
            assert_close(vertical.segment.width, expected);
        }
    }
}

#[test]
fn test_non_monotonic_distances_give_negative_width() {
    // Distances that step backwards are passed through as negative widths
    let panels = create_panels_at(&[1.0, 3.0, 2.5]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert_close(verticals[2].segment.width, -0.5);
}

#[test]
fn test_total_discharge_portions() {
    let cases: [(&[f64], &[f64]); 3] = [
        (
            &[2.0, 3.0, 4.0],
            &[22.22222222222222, 33.33333333333333, 44.44444444444444],
        ),
        (
            &[400.0, 600.0, 1100.0],
            &[19.047619047619047, 28.57142857142857, 52.38095238095239],
        ),
        (
            &[50.23, 55.5, 60.1111],
            &[30.288028721468923, 33.465769341857964, 36.246201936673124],
        ),
    ];

    for (flows, expected_portions) in cases {
        let panels = create_panels_with_flows(flows);

        let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

        for (vertical, &expected) in verticals.iter().zip(expected_portions) {
            assert_close(vertical.segment.total_discharge_portion.unwrap(), expected);
        }

        let total: f64 = verticals
            .iter()
            .filter_map(|v| v.segment.total_discharge_portion)
            .sum();
        assert_close(total, 100.0);
    }
}

#[test]
fn test_zero_total_discharge_leaves_portions_unset() {
    let panels = create_panels_with_flows(&[0.0, 0.0, 0.0]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert!(
        verticals
            .iter()
            .all(|v| v.segment.total_discharge_portion.is_none())
    );
}

#[test]
fn test_cancelling_discharges_leave_portions_unset() {
    let panels = create_panels_with_flows(&[1.5, -1.5]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert!(
        verticals
            .iter()
            .all(|v| v.segment.total_discharge_portion.is_none())
    );
}

// =============================================================================
// Velocity Observations
// =============================================================================

#[test]
fn test_velocity_observation_properties() {
    let panels = create_panels_at(&[0.0, 1.0, 2.0]);
    let context = ChannelMeasurementContext::new(DeploymentMethod::Bridge);

    let verticals = compute(&panels, None, &context, &CountingResolver::default()).unwrap();

    for (vertical, panel) in verticals.iter().zip(&panels) {
        let observation = &vertical.velocity_observation;
        assert_eq!(observation.deployment_method, DeploymentMethod::Bridge);
        assert_eq!(observation.mean_velocity, panel.mean_velocity);
        assert!(observation.meter_calibration.is_none());
    }
}

#[test]
fn test_calibration_resolved_once_and_shared() {
    let panels = create_panels_at(&[0.0, 1.0, 2.0, 3.0]);
    let meter = create_test_meter();
    let resolver = CountingResolver::default();

    let verticals = compute(&panels, Some(&meter), &wading(), &resolver).unwrap();

    assert_eq!(resolver.calls.get(), 1);
    let first = verticals[0]
        .velocity_observation
        .meter_calibration
        .as_ref()
        .unwrap();
    assert_eq!(first.meter_id, meter.meter_id);
    for vertical in &verticals[1..] {
        let calibration = vertical.velocity_observation.meter_calibration.as_ref().unwrap();
        assert!(Arc::ptr_eq(first, calibration));
    }
}

#[test]
fn test_resolver_not_called_without_meter() {
    let panels = create_panels_at(&[0.0, 1.0]);
    let resolver = CountingResolver::default();

    compute(&panels, None, &wading(), &resolver).unwrap();

    assert_eq!(resolver.calls.get(), 0);
}

#[test]
fn test_resolver_error_propagates() {
    let panels = create_panels_at(&[0.0, 1.0]);
    let meter = create_test_meter();
    let failing = |meter: &MeterDetailsItem| -> Result<Arc<MeterCalibration>> {
        Err(Error::calibration_mapping(&meter.meter_id, "lookup unavailable"))
    };

    let result = compute(&panels, Some(&meter), &wading(), &failing);

    match result {
        Err(Error::CalibrationMapping { meter_id, message }) => {
            assert_eq!(meter_id, "M-0412");
            assert_eq!(message, "lookup unavailable");
        }
        other => panic!("Expected resolver error, got {:?}", other),
    }
}

#[test]
fn test_velocity_depth_observations_copied() {
    let panels = create_panels_at(&[0.0, 1.0, 2.0]);

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    for (vertical, panel) in verticals.iter().zip(&panels) {
        let observations = &vertical.velocity_observation.observations;
        assert_eq!(observations.len(), panel.verticals.len());

        for (observation, item) in observations.iter().zip(&panel.verticals) {
            assert_eq!(observation.depth, item.depth);
            assert_eq!(observation.revolution_count, item.revs as i32);
            assert_eq!(observation.observation_interval, item.exposure_time);
            assert_eq!(observation.velocity, item.velocity);
            assert_eq!(observation.depth_multiplier, 1.0);
            assert_eq!(observation.weighting, 1.0);
        }
    }
}

#[test]
fn test_revolution_count_truncates() {
    let mut panels = create_panels_at(&[0.0]);
    panels[0].verticals = vec![VerticalItem {
        revs: 4.9,
        ..create_vertical_item(0.6)
    }];

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert_eq!(
        verticals[0].velocity_observation.observations[0].revolution_count,
        4
    );
}

#[test]
fn test_empty_sub_observations() {
    let mut panels = create_panels_at(&[0.0, 1.0]);
    panels[1].verticals.clear();

    let verticals = compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert!(verticals[1].velocity_observation.observations.is_empty());
    assert_eq!(
        verticals[1].velocity_observation.velocity_observation_method,
        crate::app::models::VelocityObservationMethod::Unclassified
    );
}

#[test]
fn test_compute_does_not_mutate_input() {
    let panels = create_panels_with_flows(&[1.0, 2.0, 3.0]);
    let snapshot = panels.clone();

    compute(&panels, None, &wading(), &CountingResolver::default()).unwrap();

    assert_eq!(panels, snapshot);
}
