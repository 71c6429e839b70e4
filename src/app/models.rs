//! Data models for PocketGauger processing
//!
//! This module contains the intermediate records parsed from a PocketGauger
//! export, the canonical discharge-activity model produced for the host, and
//! the context the host supplies for each conversion.
//!
//! - [`dtos`] - Records as they appear in the export tables
//! - [`discharge`] - Discharge activities, verticals, segments and calibrations
//! - [`context`] - Parse context and location metadata supplied by the host

pub mod context;
pub mod discharge;
pub mod dtos;

pub use context::{ChannelInfo, ChannelMeasurementContext, LocationInfo, ParseContext};
pub use discharge::{
    ChannelMeasurement, DeploymentMethod, DischargeActivity, FlowDirection, MeasurementCondition,
    MeterCalibration, MeterCalibrationEquation, PointVelocityDischarge, Segment, VelocityDepthObservation,
    VelocityObservation, VelocityObservationMethod, Vertical, VerticalType,
};
pub use dtos::{
    FlowCalculationMethod, GaugingSummaryItem, MeterCalibrationItem, MeterDetailsItem, PanelItem,
    VerticalItem,
};
