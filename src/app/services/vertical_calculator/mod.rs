//! Mid-section vertical and segment calculation
//!
//! Turns the ordered panel items of a gauging into verticals annotated with
//! segment geometry, velocity observations and edge markers.
//!
//! ## Architecture
//!
//! - [`calculator`] - The single-pass build plus the edge and discharge-portion passes
//! - [`classification`] - Velocity observation method classification
//!
//! ## Usage
//!
//! ```rust
//! use pocket_gauger::app::models::{ChannelMeasurementContext, DeploymentMethod};
//! use pocket_gauger::app::services::calibration_mapper::MeterCalibrationMapper;
//! use pocket_gauger::app::services::vertical_calculator::compute;
//!
//! # fn example(panels: Vec<pocket_gauger::PanelItem>) -> pocket_gauger::Result<()> {
//! let context = ChannelMeasurementContext::new(DeploymentMethod::Wading);
//! let verticals = compute(&panels, None, &context, &MeterCalibrationMapper::new())?;
//! assert_eq!(verticals.len(), panels.len());
//! # Ok(())
//! # }
//! ```

pub mod calculator;
pub mod classification;

#[cfg(test)]
pub mod tests;

pub use calculator::compute;
pub use classification::classify_observation_method;
