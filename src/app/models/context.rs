//! Context supplied by the host for each conversion
//!
//! The host hands the plugin a parse context (units and monitoring method
//! codes) and the metadata of the location being visited. The calculator
//! only needs the deployment method, carried by [`ChannelMeasurementContext`].

use crate::app::models::DeploymentMethod;
use crate::config::PluginConfig;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Units and monitoring method codes used when assembling activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseContext {
    pub discharge_unit: String,
    pub gage_height_unit: String,
    pub area_unit: String,
    pub velocity_unit: String,
    pub distance_unit: String,
    pub default_monitoring_method: String,
    pub mean_section_method: String,
    pub mid_section_method: String,
}

impl ParseContext {
    /// Build the context from plugin configuration
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            discharge_unit: config.units.discharge.clone(),
            gage_height_unit: config.units.gage_height.clone(),
            area_unit: config.units.area.clone(),
            velocity_unit: config.units.velocity.clone(),
            distance_unit: config.units.distance.clone(),
            default_monitoring_method: config.monitoring.default_method.clone(),
            mean_section_method: config.monitoring.mean_section_method.clone(),
            mid_section_method: config.monitoring.mid_section_method.clone(),
        }
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::from_config(&PluginConfig::default())
    }
}

/// A channel configured at the location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub name: String,
}

/// Metadata of the location a gauging belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub identifier: String,

    /// Offset of local standard time from UTC, in hours (may be fractional)
    pub utc_offset_hours: f64,

    pub channels: Vec<ChannelInfo>,
}

impl LocationInfo {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>, utc_offset_hours: f64) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            utc_offset_hours,
            channels: Vec::new(),
        }
    }

    /// Add a channel to the location
    pub fn with_channel(mut self, name: impl Into<String>) -> Self {
        self.channels.push(ChannelInfo { name: name.into() });
        self
    }

    /// UTC offset as a chrono offset, rounded to whole seconds
    ///
    /// Returns `None` for offsets chrono cannot represent (beyond ±24 h).
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        if !self.utc_offset_hours.is_finite() {
            return None;
        }
        let seconds = (self.utc_offset_hours * 3600.0).round();
        if seconds.abs() >= 86_400.0 {
            return None;
        }
        FixedOffset::east_opt(seconds as i32)
    }

    /// Name of the first configured channel
    pub fn primary_channel(&self) -> Option<&str> {
        self.channels.first().map(|channel| channel.name.as_str())
    }
}

/// Channel-level measurement settings shared by every vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMeasurementContext {
    pub deployment_method: DeploymentMethod,
}

impl ChannelMeasurementContext {
    pub fn new(deployment_method: DeploymentMethod) -> Self {
        Self { deployment_method }
    }
}
