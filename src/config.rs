//! Configuration management and validation.
//!
//! Provides the plugin configuration: unit identifiers and monitoring method
//! codes handed to the mappers as the host parse context, the default
//! deployment method, and parser strictness. Configuration files are JSON.

use crate::app::models::DeploymentMethod;
use crate::constants::{DEFAULT_CHANNEL_NAME, monitoring_methods, units};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Unit identifiers attached to mapped activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Discharge unit (e.g. "m^3/s")
    pub discharge: String,

    /// Gage height (stage) unit
    pub gage_height: String,

    /// Cross-section area unit
    pub area: String,

    /// Velocity unit
    pub velocity: String,

    /// Tagline distance and width unit
    pub distance: String,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            discharge: units::DISCHARGE.to_string(),
            gage_height: units::GAGE_HEIGHT.to_string(),
            area: units::AREA.to_string(),
            velocity: units::VELOCITY.to_string(),
            distance: units::DISTANCE.to_string(),
        }
    }
}

/// Monitoring method codes understood by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Fallback method code
    pub default_method: String,

    /// Code for mean-section gaugings
    pub mean_section_method: String,

    /// Code for mid-section gaugings
    pub mid_section_method: String,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            default_method: monitoring_methods::DEFAULT.to_string(),
            mean_section_method: monitoring_methods::MEAN_SECTION.to_string(),
            mid_section_method: monitoring_methods::MID_SECTION.to_string(),
        }
    }
}

/// Export parser behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Fail on the first malformed row instead of skipping it
    pub strict: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Global configuration for the PocketGauger plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Unit identifiers
    pub units: UnitConfig,

    /// Monitoring method codes
    pub monitoring: MonitoringConfig,

    /// Deployment method recorded on every velocity observation
    pub deployment_method: DeploymentMethod,

    /// Channel name used when the location lists none
    pub default_channel_name: String,

    /// Export parser settings
    pub parser: ParserConfig,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            units: UnitConfig::default(),
            monitoring: MonitoringConfig::default(),
            deployment_method: DeploymentMethod::Wading,
            default_channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            parser: ParserConfig::default(),
        }
    }
}

impl PluginConfig {
    /// Load configuration from a JSON file, filling omitted fields with defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: PluginConfig = serde_json::from_str(&content).map_err(|e| {
            Error::json(
                format!("Failed to parse config file {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::json("Failed to serialize configuration", e))?;
        std::fs::write(path, content).map_err(|e| {
            Error::io(
                format!("Failed to write config file {}", path.display()),
                e,
            )
        })
    }

    /// Check that every unit id and method code is present
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("units.discharge", &self.units.discharge),
            ("units.gage_height", &self.units.gage_height),
            ("units.area", &self.units.area),
            ("units.velocity", &self.units.velocity),
            ("units.distance", &self.units.distance),
            ("monitoring.default_method", &self.monitoring.default_method),
            (
                "monitoring.mean_section_method",
                &self.monitoring.mean_section_method,
            ),
            (
                "monitoring.mid_section_method",
                &self.monitoring.mid_section_method,
            ),
            ("default_channel_name", &self.default_channel_name),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::configuration(format!("{} cannot be empty", name)));
            }
        }

        Ok(())
    }

    /// Set the deployment method
    pub fn with_deployment_method(mut self, deployment_method: DeploymentMethod) -> Self {
        self.deployment_method = deployment_method;
        self
    }

    /// Set the unit identifiers
    pub fn with_units(mut self, units: UnitConfig) -> Self {
        self.units = units;
        self
    }

    /// Set the monitoring method codes
    pub fn with_monitoring(mut self, monitoring: MonitoringConfig) -> Self {
        self.monitoring = monitoring;
        self
    }

    /// Skip malformed rows instead of failing
    pub fn with_lenient_parsing(mut self) -> Self {
        self.parser.strict = false;
        self
    }

    /// Set the fallback channel name
    pub fn with_default_channel_name(mut self, name: impl Into<String>) -> Self {
        self.default_channel_name = name.into();
        self
    }
}
