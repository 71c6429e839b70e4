//! Application constants for the PocketGauger plugin
//!
//! This module contains export table names, column names, default units and
//! monitoring method codes used throughout the plugin.

// =============================================================================
// Export Tables
// =============================================================================

/// Export table file names (matched case-insensitively)
pub mod tables {
    /// Gauging summaries, one row per gauging (required)
    pub const GAUGING_SUMMARY: &str = "GaugingSummary.csv";

    /// Cross-section panels, one row per vertical
    pub const PANELS: &str = "Panels.csv";

    /// Raw velocity sub-observations, one row per sampled depth
    pub const VERTICALS: &str = "Verticals.csv";

    /// Current meter identity records
    pub const METER_DETAILS: &str = "MeterDetails.csv";

    /// Current meter calibration ranges
    pub const METER_CALIBRATIONS: &str = "MeterCal.csv";

    /// All table names recognised in an export directory
    pub const ALL: &[&str] = &[
        GAUGING_SUMMARY,
        PANELS,
        VERTICALS,
        METER_DETAILS,
        METER_CALIBRATIONS,
    ];
}

/// Column names used across the export tables
pub mod columns {
    pub const GAUGING_ID: &str = "GaugingId";
    pub const GAUGE_ID: &str = "GaugeId";
    pub const GAUGE_NAME: &str = "GaugeName";
    pub const OBSERVERS_NAME: &str = "ObserversName";
    pub const START_DATE: &str = "StartDate";
    pub const END_DATE: &str = "EndDate";
    pub const FLOW_CALCULATION_METHOD: &str = "FlowCalculationMethod";
    pub const METER_ID: &str = "MeterId";
    pub const FLOW: &str = "Flow";
    pub const AREA: &str = "Area";
    pub const MEAN_VELOCITY: &str = "MeanVelocity";
    pub const START_STAGE: &str = "StartStage";
    pub const END_STAGE: &str = "EndStage";
    pub const MEAN_STAGE: &str = "MeanStage";
    pub const COMMENTS: &str = "Comments";

    pub const VERTICAL_NUMBER: &str = "VerticalNumber";
    pub const DISTANCE: &str = "Distance";
    pub const DEPTH: &str = "Depth";

    pub const SAMPLE_POSITION: &str = "SamplePosition";
    pub const REVS: &str = "Revs";
    pub const EXPOSURE_TIME: &str = "ExposureTime";
    pub const VELOCITY: &str = "Velocity";

    pub const MANUFACTURER: &str = "Manufacturer";
    pub const MODEL: &str = "Model";
    pub const SERIAL_NUMBER: &str = "SerialNumber";
    pub const IMPELLER_NUMBER: &str = "ImpellerNumber";
    pub const DESCRIPTION: &str = "Description";

    pub const CALIBRATION_DATE: &str = "CalibrationDate";
    pub const MIN_ROTATION_SPEED: &str = "MinRotationSpeed";
    pub const MAX_ROTATION_SPEED: &str = "MaxRotationSpeed";
    pub const FACTOR: &str = "Factor";
    pub const CONSTANT: &str = "Constant";
}

/// Date/time layouts accepted in export date columns, tried in order
pub const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

// =============================================================================
// Host Defaults
// =============================================================================

/// Monitoring method codes understood by the host
pub mod monitoring_methods {
    /// Used when the export does not state a recognised calculation method
    pub const DEFAULT: &str = "DefaultNone";

    /// Mean-section discharge computation
    pub const MEAN_SECTION: &str = "MeanSection";

    /// Mid-section discharge computation
    pub const MID_SECTION: &str = "MidSection";
}

/// Default unit identifiers
pub mod units {
    pub const DISCHARGE: &str = "m^3/s";
    pub const GAGE_HEIGHT: &str = "m";
    pub const AREA: &str = "m^2";
    pub const VELOCITY: &str = "m/s";
    pub const DISTANCE: &str = "m";
}

/// Channel name used when the location does not list any channels
pub const DEFAULT_CHANNEL_NAME: &str = "Main";

// =============================================================================
// Numerics
// =============================================================================

/// Smallest positive subnormal f64; comparisons against it are exact equality
pub const EXACT_EPSILON: f64 = 5e-324;

/// Sample position of a single observation taken at 0.5 of depth
pub const POINT_FIVE_DEPTH: f64 = 0.5;

/// Sample position of a single observation taken at 0.6 of depth
pub const POINT_SIX_DEPTH: f64 = 0.6;

/// Returns true when two values differ by less than [`EXACT_EPSILON`]
pub fn is_equal(value: f64, other: f64) -> bool {
    (value - other).abs() < EXACT_EPSILON
}
