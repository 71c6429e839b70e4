//! Vertical and segment construction
//!
//! Verticals are built in one pass over the panel items, then two passes over
//! the finished list flag the bank edges and normalise discharge portions.
//! The calculation is total over its inputs: odd geometry (non-increasing
//! distances) shows up as negative widths, never as an error. The only
//! failure path is the calibration resolver's, which propagates unchanged.

use crate::Result;
use crate::app::models::{
    ChannelMeasurementContext, FlowDirection, MeasurementCondition, MeterCalibration,
    MeterDetailsItem, PanelItem, Segment, VelocityDepthObservation, VelocityObservation, Vertical,
    VerticalItem, VerticalType,
};
use crate::app::services::calibration_mapper::MeterCalibrationResolver;
use crate::constants::is_equal;
use std::sync::Arc;
use tracing::debug;

use super::classification::classify_observation_method;

/// Compute the verticals of a gauging from its ordered panel items
///
/// The resolver is consulted at most once: never for an empty panel list or
/// when no meter is given. The calibration it returns is shared by every
/// vertical.
///
/// # Arguments
///
/// * `panel_items` - Cross-section panels in tagline order
/// * `meter` - Meter used for the gauging, if known
/// * `channel` - Channel-level settings (deployment method)
/// * `resolver` - Calibration lookup for the meter
///
/// # Returns
///
/// One vertical per panel item, in input order
pub fn compute<R>(
    panel_items: &[PanelItem],
    meter: Option<&MeterDetailsItem>,
    channel: &ChannelMeasurementContext,
    resolver: &R,
) -> Result<Vec<Vertical>>
where
    R: MeterCalibrationResolver + ?Sized,
{
    if panel_items.is_empty() {
        debug!("No panel items; no verticals computed");
        return Ok(Vec::new());
    }

    let calibration = meter.map(|meter| resolver.resolve(meter)).transpose()?;

    let mut previous: Option<&PanelItem> = None;
    let mut verticals = Vec::with_capacity(panel_items.len());
    for panel_item in panel_items {
        verticals.push(create_vertical(
            panel_item,
            previous,
            channel,
            calibration.clone(),
        ));
        previous = Some(panel_item);
    }

    set_vertical_type_for_first_and_last(&mut verticals);
    set_total_discharge_portion(&mut verticals);

    debug!("Computed {} verticals", verticals.len());
    Ok(verticals)
}

/// Width of the segment attributed to a panel
///
/// The first panel's width is its own distance; every other width is the
/// difference to the previous panel's distance.
pub fn segment_width(panel_item: &PanelItem, previous: Option<&PanelItem>) -> f64 {
    match previous {
        None => panel_item.distance,
        Some(previous) => panel_item.distance - previous.distance,
    }
}

fn create_vertical(
    panel_item: &PanelItem,
    previous: Option<&PanelItem>,
    channel: &ChannelMeasurementContext,
    calibration: Option<Arc<MeterCalibration>>,
) -> Vertical {
    Vertical {
        sequence_number: panel_item.vertical_number,
        vertical_type: VerticalType::MidRiver,
        measurement_condition: MeasurementCondition::OpenWater,
        flow_direction: FlowDirection::Normal,
        tagline_position: panel_item.distance,
        sounded_depth: panel_item.depth,
        is_sounded_depth_estimated: false,
        effective_depth: panel_item.depth,
        segment: create_segment(panel_item, previous),
        velocity_observation: create_velocity_observation(panel_item, channel, calibration),
    }
}

fn create_segment(panel_item: &PanelItem, previous: Option<&PanelItem>) -> Segment {
    Segment {
        width: segment_width(panel_item, previous),
        area: panel_item.area,
        velocity: panel_item.mean_velocity,
        discharge: panel_item.flow,
        is_discharge_estimated: false,
        total_discharge_portion: None,
    }
}

fn create_velocity_observation(
    panel_item: &PanelItem,
    channel: &ChannelMeasurementContext,
    calibration: Option<Arc<MeterCalibration>>,
) -> VelocityObservation {
    VelocityObservation {
        deployment_method: channel.deployment_method,
        mean_velocity: panel_item.mean_velocity,
        meter_calibration: calibration,
        velocity_observation_method: classify_observation_method(&panel_item.verticals),
        observations: panel_item
            .verticals
            .iter()
            .map(create_velocity_depth_observation)
            .collect(),
    }
}

/// Copy a raw sub-observation, truncating fractional revolutions
pub fn create_velocity_depth_observation(vertical_item: &VerticalItem) -> VelocityDepthObservation {
    VelocityDepthObservation {
        depth: vertical_item.depth,
        revolution_count: vertical_item.revs as i32,
        observation_interval: vertical_item.exposure_time,
        velocity: vertical_item.velocity,
        depth_multiplier: 1.0,
        weighting: 1.0,
    }
}

// A lone vertical ends up as the end edge: the last assignment wins.
fn set_vertical_type_for_first_and_last(verticals: &mut [Vertical]) {
    if let Some(first) = verticals.first_mut() {
        first.vertical_type = VerticalType::StartEdgeNoWaterBefore;
    }
    if let Some(last) = verticals.last_mut() {
        last.vertical_type = VerticalType::EndEdgeNoWaterAfter;
    }
}

fn set_total_discharge_portion(verticals: &mut [Vertical]) {
    let total_discharge: f64 = verticals.iter().map(|v| v.segment.discharge).sum();
    if is_equal(total_discharge, 0.0) {
        debug!("Total discharge is zero; discharge portions left unset");
        return;
    }

    for vertical in verticals.iter_mut() {
        vertical.segment.total_discharge_portion =
            Some(vertical.segment.discharge / total_discharge * 100.0);
    }
}
