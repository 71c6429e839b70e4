//! Record parsing for individual export table rows
//!
//! One function per table. Each returns the parsed DTO together with the
//! keys needed to attach it to its parent record.

use super::column_mapping::ColumnMapping;
use super::field_parsers::*;
use crate::Result;
use crate::app::models::{
    FlowCalculationMethod, GaugingSummaryItem, MeterCalibrationItem, MeterDetailsItem, PanelItem,
    VerticalItem,
};
use crate::constants::columns;
use csv::StringRecord;

/// Required columns of the gauging summary table
pub const GAUGING_SUMMARY_COLUMNS: &[&str] = &[
    columns::GAUGING_ID,
    columns::GAUGE_ID,
    columns::GAUGE_NAME,
    columns::OBSERVERS_NAME,
    columns::START_DATE,
    columns::END_DATE,
    columns::FLOW_CALCULATION_METHOD,
    columns::METER_ID,
    columns::FLOW,
    columns::AREA,
    columns::MEAN_VELOCITY,
];

/// Required columns of the panels table
pub const PANEL_COLUMNS: &[&str] = &[
    columns::GAUGING_ID,
    columns::VERTICAL_NUMBER,
    columns::DISTANCE,
    columns::DEPTH,
    columns::MEAN_VELOCITY,
    columns::AREA,
    columns::FLOW,
];

/// Required columns of the verticals table
pub const VERTICAL_COLUMNS: &[&str] = &[
    columns::GAUGING_ID,
    columns::VERTICAL_NUMBER,
    columns::SAMPLE_POSITION,
    columns::DEPTH,
    columns::REVS,
    columns::EXPOSURE_TIME,
    columns::VELOCITY,
];

/// Required columns of the meter details table
pub const METER_DETAILS_COLUMNS: &[&str] = &[
    columns::METER_ID,
    columns::MANUFACTURER,
    columns::MODEL,
    columns::SERIAL_NUMBER,
];

/// Required columns of the meter calibration table
pub const METER_CALIBRATION_COLUMNS: &[&str] = &[
    columns::METER_ID,
    columns::MIN_ROTATION_SPEED,
    columns::MAX_ROTATION_SPEED,
    columns::FACTOR,
    columns::CONSTANT,
];

/// A panel row keyed by its gauging
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRecord {
    pub gauging_id: String,
    pub panel: PanelItem,
}

/// A sub-observation row keyed by its gauging and vertical number
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalRecord {
    pub gauging_id: String,
    pub vertical_number: i32,
    pub item: VerticalItem,
}

/// Parse a gauging summary row; panels and meter details start empty
pub fn parse_gauging_summary_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
) -> Result<GaugingSummaryItem> {
    // A blank method is kept as an unknown method, not a malformed row
    let method =
        parse_optional_string(record, mapping, columns::FLOW_CALCULATION_METHOD).unwrap_or_default();

    Ok(GaugingSummaryItem {
        gauging_id: parse_required_string(record, mapping, columns::GAUGING_ID)?,
        gauge_id: parse_required_string(record, mapping, columns::GAUGE_ID)?,
        gauge_name: parse_required_string(record, mapping, columns::GAUGE_NAME)?,
        observers_name: parse_required_string(record, mapping, columns::OBSERVERS_NAME)?,
        start_date: parse_required_datetime(record, mapping, columns::START_DATE)?,
        end_date: parse_required_datetime(record, mapping, columns::END_DATE)?,
        flow_calculation_method: FlowCalculationMethod::from_export(&method),
        meter_id: parse_required_string(record, mapping, columns::METER_ID)?,
        flow: parse_required_f64(record, mapping, columns::FLOW)?,
        area: parse_required_f64(record, mapping, columns::AREA)?,
        mean_velocity: parse_required_f64(record, mapping, columns::MEAN_VELOCITY)?,
        start_stage: parse_optional_f64(record, mapping, columns::START_STAGE)?,
        end_stage: parse_optional_f64(record, mapping, columns::END_STAGE)?,
        mean_stage: parse_optional_f64(record, mapping, columns::MEAN_STAGE)?,
        comments: parse_optional_string(record, mapping, columns::COMMENTS),
        panel_items: Vec::new(),
        meter_details: None,
    })
}

/// Parse a panel row
pub fn parse_panel_record(record: &StringRecord, mapping: &ColumnMapping) -> Result<PanelRecord> {
    Ok(PanelRecord {
        gauging_id: parse_required_string(record, mapping, columns::GAUGING_ID)?,
        panel: PanelItem {
            vertical_number: parse_required_i32(record, mapping, columns::VERTICAL_NUMBER)?,
            distance: parse_required_f64(record, mapping, columns::DISTANCE)?,
            depth: parse_required_f64(record, mapping, columns::DEPTH)?,
            mean_velocity: parse_required_f64(record, mapping, columns::MEAN_VELOCITY)?,
            area: parse_required_f64(record, mapping, columns::AREA)?,
            flow: parse_required_f64(record, mapping, columns::FLOW)?,
            verticals: Vec::new(),
        },
    })
}

/// Parse a velocity sub-observation row
pub fn parse_vertical_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
) -> Result<VerticalRecord> {
    Ok(VerticalRecord {
        gauging_id: parse_required_string(record, mapping, columns::GAUGING_ID)?,
        vertical_number: parse_required_i32(record, mapping, columns::VERTICAL_NUMBER)?,
        item: VerticalItem {
            sample_position: parse_required_f64(record, mapping, columns::SAMPLE_POSITION)?,
            depth: parse_required_f64(record, mapping, columns::DEPTH)?,
            revs: parse_required_f64(record, mapping, columns::REVS)?,
            exposure_time: parse_required_f64(record, mapping, columns::EXPOSURE_TIME)?,
            velocity: parse_required_f64(record, mapping, columns::VELOCITY)?,
        },
    })
}

/// Parse a meter identity row; calibrations start empty
pub fn parse_meter_details_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
) -> Result<MeterDetailsItem> {
    Ok(MeterDetailsItem {
        meter_id: parse_required_string(record, mapping, columns::METER_ID)?,
        manufacturer: parse_required_string(record, mapping, columns::MANUFACTURER)?,
        model: parse_required_string(record, mapping, columns::MODEL)?,
        serial_number: parse_required_string(record, mapping, columns::SERIAL_NUMBER)?,
        impeller_number: parse_optional_string(record, mapping, columns::IMPELLER_NUMBER),
        description: parse_optional_string(record, mapping, columns::DESCRIPTION),
        calibrations: Vec::new(),
    })
}

/// Parse a meter calibration row
pub fn parse_meter_calibration_record(
    record: &StringRecord,
    mapping: &ColumnMapping,
) -> Result<MeterCalibrationItem> {
    Ok(MeterCalibrationItem {
        meter_id: parse_required_string(record, mapping, columns::METER_ID)?,
        calibration_date: parse_optional_datetime(record, mapping, columns::CALIBRATION_DATE)?,
        min_rotation_speed: parse_required_f64(record, mapping, columns::MIN_ROTATION_SPEED)?,
        max_rotation_speed: parse_required_f64(record, mapping, columns::MAX_ROTATION_SPEED)?,
        factor: parse_required_f64(record, mapping, columns::FACTOR)?,
        constant: parse_required_f64(record, mapping, columns::CONSTANT)?,
    })
}
