//! Intermediate records parsed from PocketGauger export tables
//!
//! These structures mirror the export closely. They carry no derived values;
//! the mappers turn them into the canonical model in [`super::discharge`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Panel and Sub-observation Records
// =============================================================================

/// One raw velocity sub-observation taken at a vertical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalItem {
    /// Sample position as a fraction of depth (e.g. 0.6)
    pub sample_position: f64,

    /// Depth of the meter below the surface
    pub depth: f64,

    /// Revolution count reported by the meter (may be fractional)
    pub revs: f64,

    /// Exposure time in seconds
    pub exposure_time: f64,

    /// Point velocity
    pub velocity: f64,
}

/// One cross-section measurement station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelItem {
    /// Sequence number of the vertical within the gauging
    pub vertical_number: i32,

    /// Distance from the starting bank along the tagline
    pub distance: f64,

    /// Sounded depth
    pub depth: f64,

    /// Mean velocity in the vertical
    pub mean_velocity: f64,

    /// Panel area
    pub area: f64,

    /// Panel discharge
    pub flow: f64,

    /// Raw sub-observations in export order
    pub verticals: Vec<VerticalItem>,
}

impl PanelItem {
    /// Number of velocity sub-observations at this panel
    pub fn observation_count(&self) -> usize {
        self.verticals.len()
    }
}

// =============================================================================
// Meter Records
// =============================================================================

/// One calibration range for a current meter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterCalibrationItem {
    /// Meter this calibration belongs to
    pub meter_id: String,

    /// Date of calibration, if recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration_date: Option<NaiveDateTime>,

    /// Lower bound of the rotation speed range
    pub min_rotation_speed: f64,

    /// Upper bound of the rotation speed range
    pub max_rotation_speed: f64,

    /// Slope of the rating (velocity per rotation speed)
    pub factor: f64,

    /// Intercept of the rating
    pub constant: f64,
}

/// Identity of a current meter together with its calibrations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterDetailsItem {
    pub meter_id: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub impeller_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Calibration ranges joined from the calibration table
    pub calibrations: Vec<MeterCalibrationItem>,
}

// =============================================================================
// Gauging Summary
// =============================================================================

/// Discharge calculation method recorded by the field logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowCalculationMethod {
    Mean,
    Mid,
    /// Any other value, kept verbatim
    Unknown(String),
}

impl FlowCalculationMethod {
    /// Interpret the free-text method column (case-insensitive)
    pub fn from_export(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "mean" => FlowCalculationMethod::Mean,
            "mid" => FlowCalculationMethod::Mid,
            _ => FlowCalculationMethod::Unknown(value.trim().to_string()),
        }
    }
}

impl fmt::Display for FlowCalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowCalculationMethod::Mean => write!(f, "Mean"),
            FlowCalculationMethod::Mid => write!(f, "Mid"),
            FlowCalculationMethod::Unknown(value) => write!(f, "{}", value),
        }
    }
}

/// One gauging (discharge measurement) with its panels and meter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugingSummaryItem {
    /// Identifier linking panels and verticals to this gauging
    pub gauging_id: String,

    /// Gauging station identifier
    pub gauge_id: String,

    /// Gauging station name
    pub gauge_name: String,

    /// Field party
    pub observers_name: String,

    /// Local start time (no offset recorded by the logger)
    pub start_date: NaiveDateTime,

    /// Local end time
    pub end_date: NaiveDateTime,

    pub flow_calculation_method: FlowCalculationMethod,

    /// Meter used for the gauging
    pub meter_id: String,

    /// Total discharge computed by the logger
    pub flow: f64,

    /// Total cross-section area
    pub area: f64,

    /// Mean velocity over the cross-section
    pub mean_velocity: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_stage: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_stage: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_stage: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// Cross-section panels in export order
    pub panel_items: Vec<PanelItem>,

    /// Meter details resolved from the meter registry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter_details: Option<MeterDetailsItem>,
}

impl GaugingSummaryItem {
    /// Mean stage, falling back to the average of start and end stage
    pub fn effective_mean_stage(&self) -> Option<f64> {
        match (self.mean_stage, self.start_stage, self.end_stage) {
            (Some(mean), _, _) => Some(mean),
            (None, Some(start), Some(end)) => Some((start + end) / 2.0),
            (None, Some(stage), None) | (None, None, Some(stage)) => Some(stage),
            (None, None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_calculation_method_from_export() {
        assert_eq!(
            FlowCalculationMethod::from_export("Mean"),
            FlowCalculationMethod::Mean
        );
        assert_eq!(
            FlowCalculationMethod::from_export(" MID "),
            FlowCalculationMethod::Mid
        );
        assert_eq!(
            FlowCalculationMethod::from_export("Velocity-Area"),
            FlowCalculationMethod::Unknown("Velocity-Area".to_string())
        );
        assert_eq!(
            FlowCalculationMethod::from_export("Velocity-Area").to_string(),
            "Velocity-Area"
        );
    }

    #[test]
    fn test_effective_mean_stage() {
        let mut item = GaugingSummaryItem {
            gauging_id: "G1".to_string(),
            gauge_id: "39001".to_string(),
            gauge_name: "Kingston".to_string(),
            observers_name: "A. Hydrographer".to_string(),
            start_date: NaiveDateTime::default(),
            end_date: NaiveDateTime::default(),
            flow_calculation_method: FlowCalculationMethod::Mid,
            meter_id: "M1".to_string(),
            flow: 0.0,
            area: 0.0,
            mean_velocity: 0.0,
            start_stage: Some(1.0),
            end_stage: Some(1.2),
            mean_stage: None,
            comments: None,
            panel_items: Vec::new(),
            meter_details: None,
        };

        assert!((item.effective_mean_stage().unwrap() - 1.1).abs() < 1e-12);

        item.mean_stage = Some(1.15);
        assert_eq!(item.effective_mean_stage(), Some(1.15));

        item.mean_stage = None;
        item.end_stage = None;
        assert_eq!(item.effective_mean_stage(), Some(1.0));

        item.start_stage = None;
        assert_eq!(item.effective_mean_stage(), None);
    }
}
