//! Canonical discharge-activity model
//!
//! The structures the host consumes: a discharge activity holding one
//! point-velocity sub-activity, whose verticals each carry a segment and a
//! velocity observation. Every value here is created fresh per mapping call
//! and owned by the caller; meter calibrations are shared through [`Arc`].

use crate::{Error, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// =============================================================================
// Enumerations
// =============================================================================

/// Position of a vertical within the cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalType {
    StartEdgeNoWaterBefore,
    MidRiver,
    EndEdgeNoWaterAfter,
}

impl VerticalType {
    /// True for either bank edge
    pub fn is_edge(&self) -> bool {
        !matches!(self, VerticalType::MidRiver)
    }
}

/// Measurement condition at a vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementCondition {
    OpenWater,
}

/// Flow direction at a vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    Normal,
}

/// How the current meter was deployed across the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentMethod {
    Wading,
    Bridge,
    Cableway,
    Boat,
    Ice,
    Unspecified,
}

impl FromStr for DeploymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wading" => Ok(DeploymentMethod::Wading),
            "bridge" => Ok(DeploymentMethod::Bridge),
            "cableway" => Ok(DeploymentMethod::Cableway),
            "boat" => Ok(DeploymentMethod::Boat),
            "ice" => Ok(DeploymentMethod::Ice),
            "unspecified" => Ok(DeploymentMethod::Unspecified),
            other => Err(Error::data_validation(format!(
                "Unknown deployment method '{}'. Expected one of: wading, bridge, cableway, boat, ice, unspecified",
                other
            ))),
        }
    }
}

impl fmt::Display for DeploymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentMethod::Wading => "wading",
            DeploymentMethod::Bridge => "bridge",
            DeploymentMethod::Cableway => "cableway",
            DeploymentMethod::Boat => "boat",
            DeploymentMethod::Ice => "ice",
            DeploymentMethod::Unspecified => "unspecified",
        };
        write!(f, "{}", name)
    }
}

/// Which depths were sampled to obtain the velocity at a vertical
///
/// `Unclassified` is an explicit state for observation counts that match no
/// standard method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VelocityObservationMethod {
    OneAtPointFive,
    OneAtPointSix,
    Surface,
    OneAtPointTwoAndPointEight,
    OneAtPointTwoPointSixAndPointEight,
    FivePoint,
    SixPoint,
    ElevenPoint,
    Unclassified,
}

impl VelocityObservationMethod {
    /// Host-facing method name
    pub fn as_str(&self) -> &'static str {
        match self {
            VelocityObservationMethod::OneAtPointFive => "one-at-point-five",
            VelocityObservationMethod::OneAtPointSix => "one-at-point-six",
            VelocityObservationMethod::Surface => "surface",
            VelocityObservationMethod::OneAtPointTwoAndPointEight => "one-at-.2-and-.8",
            VelocityObservationMethod::OneAtPointTwoPointSixAndPointEight => "one-at-.2/.6/.8",
            VelocityObservationMethod::FivePoint => "five-point",
            VelocityObservationMethod::SixPoint => "six-point",
            VelocityObservationMethod::ElevenPoint => "eleven-point",
            VelocityObservationMethod::Unclassified => "unclassified",
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, VelocityObservationMethod::Unclassified)
    }
}

impl fmt::Display for VelocityObservationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Meter Calibration
// =============================================================================

/// Linear rating valid over one rotation speed range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterCalibrationEquation {
    /// Lower bound of the rotation speed range
    pub range_start: f64,

    /// Upper bound of the rotation speed range
    pub range_end: f64,

    /// Velocity per unit rotation speed
    pub slope: f64,

    /// Velocity at zero rotation speed
    pub intercept: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
}

impl MeterCalibrationEquation {
    /// True when the rotation speed falls within this range (inclusive)
    pub fn covers(&self, rotation_speed: f64) -> bool {
        rotation_speed >= self.range_start && rotation_speed <= self.range_end
    }

    /// Velocity for a rotation speed under this rating
    pub fn velocity(&self, rotation_speed: f64) -> f64 {
        self.slope * rotation_speed + self.intercept
    }
}

/// Calibration of the current meter used for a gauging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterCalibration {
    pub meter_id: String,
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,

    /// Ratings ordered by range start
    pub equations: Vec<MeterCalibrationEquation>,
}

impl MeterCalibration {
    /// Velocity for a rotation speed using the first rating whose range covers it
    pub fn velocity_for(&self, rotation_speed: f64) -> Option<f64> {
        self.equations
            .iter()
            .find(|equation| equation.covers(rotation_speed))
            .map(|equation| equation.velocity(rotation_speed))
    }
}

// =============================================================================
// Verticals
// =============================================================================

/// Velocity measured at one depth of a vertical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityDepthObservation {
    pub depth: f64,

    /// Whole revolutions (fractional revolutions truncated)
    pub revolution_count: i32,

    /// Exposure time in seconds
    pub observation_interval: f64,

    pub velocity: f64,
    pub depth_multiplier: f64,
    pub weighting: f64,
}

/// Velocity measurement block of a vertical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityObservation {
    pub deployment_method: DeploymentMethod,
    pub mean_velocity: f64,

    /// Shared calibration of the meter; absent when the gauging names no known meter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter_calibration: Option<Arc<MeterCalibration>>,

    pub velocity_observation_method: VelocityObservationMethod,
    pub observations: Vec<VelocityDepthObservation>,
}

/// Slice of the cross-section attributed to one vertical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub width: f64,
    pub area: f64,
    pub velocity: f64,
    pub discharge: f64,
    pub is_discharge_estimated: bool,

    /// Percentage of the total discharge; unset when the total is zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_discharge_portion: Option<f64>,
}

/// Mapped record for one panel of the cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertical {
    pub sequence_number: i32,
    pub vertical_type: VerticalType,
    pub measurement_condition: MeasurementCondition,
    pub flow_direction: FlowDirection,
    pub tagline_position: f64,
    pub sounded_depth: f64,
    pub is_sounded_depth_estimated: bool,
    pub effective_depth: f64,
    pub segment: Segment,
    pub velocity_observation: VelocityObservation,
}

// =============================================================================
// Discharge Activity
// =============================================================================

/// Channel-level summary of a point-velocity measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMeasurement {
    pub channel_name: String,
    pub deployment_method: DeploymentMethod,
    pub distance_to_meter_unit: String,
    pub area_unit: String,
    pub velocity_unit: String,
    pub width_unit: String,
    pub area: f64,
    pub velocity: f64,
    pub discharge: f64,
    pub width: f64,
}

/// Point-velocity (mid/mean-section) sub-activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointVelocityDischarge {
    pub channel_measurement: ChannelMeasurement,

    /// Monitoring method code of the computation
    pub discharge_method_code: String,

    /// Method shared by every vertical, or `Unclassified` when they differ
    pub velocity_observation_method: VelocityObservationMethod,

    pub verticals: Vec<Vertical>,
}

/// A complete discharge measurement as delivered to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeActivity {
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,

    /// Midpoint of start and end time
    pub measurement_time: DateTime<FixedOffset>,

    pub party: String,

    /// Monitoring method code
    pub discharge_method: String,

    pub discharge: f64,
    pub discharge_unit: String,
    pub gage_height_unit: String,
    pub gage_height_method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_gage_height: Option<f64>,

    pub mean_index_velocity: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    pub discharge_sub_activities: Vec<PointVelocityDischarge>,
}

impl DischargeActivity {
    /// Total number of verticals across all sub-activities
    pub fn vertical_count(&self) -> usize {
        self.discharge_sub_activities
            .iter()
            .map(|sub_activity| sub_activity.verticals.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_method_parsing() {
        assert_eq!(
            "Wading".parse::<DeploymentMethod>().unwrap(),
            DeploymentMethod::Wading
        );
        assert_eq!(
            " cableway ".parse::<DeploymentMethod>().unwrap(),
            DeploymentMethod::Cableway
        );
        assert!("helicopter".parse::<DeploymentMethod>().is_err());
    }

    #[test]
    fn test_deployment_method_display_roundtrip() {
        for method in [
            DeploymentMethod::Wading,
            DeploymentMethod::Bridge,
            DeploymentMethod::Cableway,
            DeploymentMethod::Boat,
            DeploymentMethod::Ice,
            DeploymentMethod::Unspecified,
        ] {
            assert_eq!(method.to_string().parse::<DeploymentMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_velocity_observation_method_names() {
        assert_eq!(
            VelocityObservationMethod::OneAtPointFive.as_str(),
            "one-at-point-five"
        );
        assert_eq!(
            VelocityObservationMethod::OneAtPointTwoPointSixAndPointEight.to_string(),
            "one-at-.2/.6/.8"
        );
        assert!(!VelocityObservationMethod::Unclassified.is_classified());
        assert!(VelocityObservationMethod::Surface.is_classified());
    }

    #[test]
    fn test_vertical_type_edges() {
        assert!(VerticalType::StartEdgeNoWaterBefore.is_edge());
        assert!(VerticalType::EndEdgeNoWaterAfter.is_edge());
        assert!(!VerticalType::MidRiver.is_edge());
    }

    #[test]
    fn test_calibration_velocity_lookup() {
        let calibration = MeterCalibration {
            meter_id: "M1".to_string(),
            manufacturer: "Valeport".to_string(),
            model: "801".to_string(),
            serial_number: "SN-1".to_string(),
            firmware_version: None,
            equations: vec![
                MeterCalibrationEquation {
                    range_start: 0.0,
                    range_end: 1.0,
                    slope: 0.25,
                    intercept: 0.01,
                    interval: None,
                },
                MeterCalibrationEquation {
                    range_start: 1.0,
                    range_end: 10.0,
                    slope: 0.24,
                    intercept: 0.02,
                    interval: None,
                },
            ],
        };

        assert!((calibration.velocity_for(0.5).unwrap() - 0.135).abs() < 1e-12);
        assert!((calibration.velocity_for(2.0).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(calibration.velocity_for(11.0), None);
    }
}
