//! PocketGauger plugin entry point
//!
//! Ties the export parser, meter registry and discharge mapper together:
//! an export goes in, one discharge activity per gauging comes out.

use std::path::Path;
use tracing::info;

use crate::Result;
use crate::app::models::{DischargeActivity, LocationInfo};
use crate::app::services::calibration_mapper::MeterCalibrationMapper;
use crate::app::services::discharge_mapper::DischargeActivityMapper;
use crate::app::services::export_parser::{ExportParser, ParseStats, PocketGaugerFiles};
use crate::app::services::meter_registry::MeterRegistry;
use crate::config::PluginConfig;

/// Activities mapped from one export, with parsing statistics
#[derive(Debug, Clone)]
pub struct ParsedExport {
    /// One activity per gauging, in export order
    pub activities: Vec<DischargeActivity>,

    /// Parsing statistics across all tables
    pub stats: ParseStats,

    /// Number of distinct meters in the export
    pub meter_count: usize,

    /// Gaugings whose meter is missing from the meter tables
    pub unresolved_meters: usize,
}

/// Field-visit plugin for PocketGauger exports
#[derive(Debug, Clone, Default)]
pub struct PocketGaugerPlugin {
    config: PluginConfig,
}

impl PocketGaugerPlugin {
    pub fn new(config: PluginConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Parse an export and map every gauging taken at `location`
    pub fn parse(&self, files: &PocketGaugerFiles, location: &LocationInfo) -> Result<ParsedExport> {
        let parsed = ExportParser::new(&self.config.parser).parse(files)?;

        let registry = MeterRegistry::from_items(parsed.meter_details, parsed.meter_calibrations);
        let mut gaugings = parsed.gaugings;
        let unresolved_meters = registry.attach_to(&mut gaugings);

        let mapper = DischargeActivityMapper::from_config(&self.config);
        let resolver = MeterCalibrationMapper::new();
        let activities = gaugings
            .iter()
            .map(|gauging| mapper.map(location, gauging, &resolver))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Mapped {} discharge activities for location {}",
            activities.len(),
            location.identifier
        );

        Ok(ParsedExport {
            activities,
            stats: parsed.stats,
            meter_count: registry.meter_count(),
            unresolved_meters,
        })
    }

    /// Read an export directory and parse it
    pub fn parse_directory(&self, path: &Path, location: &LocationInfo) -> Result<ParsedExport> {
        let files = PocketGaugerFiles::from_directory(path)?;
        self.parse(&files, location)
    }

    /// Parse only the meter tables of an export
    pub fn load_meters(&self, files: &PocketGaugerFiles) -> Result<MeterRegistry> {
        let parsed = ExportParser::new(&self.config.parser).parse_meters(files)?;
        Ok(MeterRegistry::from_items(
            parsed.meter_details,
            parsed.meter_calibrations,
        ))
    }
}
