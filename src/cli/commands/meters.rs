//! Meters command implementation for the PocketGauger CLI
//!
//! Lists the current meters of an export together with their calibration
//! equations.

use super::shared::{ConversionStats, setup_logging};
use crate::app::models::MeterCalibration;
use crate::app::services::calibration_mapper::MeterCalibrationMapper;
use crate::app::services::export_parser::PocketGaugerFiles;
use crate::app::services::meter_registry::{MeterRegistry, RegistryMetadata};
use crate::app::services::plugin::PocketGaugerPlugin;
use crate::cli::args::{MetersArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// Meters command runner
pub fn run_meters(args: MetersArgs) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), false)?;
    info!("Listing meters of {}", args.export_dir.display());
    debug!("Meters arguments: {:?}", args);

    args.validate()?;

    let files = PocketGaugerFiles::from_directory(&args.export_dir)?;
    let registry = PocketGaugerPlugin::default().load_meters(&files)?;
    let calibrations = map_calibrations(&registry)?;
    let metadata = registry.metadata();
    info!("{}", metadata.load_stats.summary());

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    match args.output_format {
        OutputFormat::Human => write_human_listing(&mut writer, &metadata, &calibrations)?,
        OutputFormat::Json => write_json_listing(&mut writer, &registry)?,
    }

    Ok(ConversionStats {
        exports_processed: 1,
        meters_loaded: registry.meter_count(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// Map every meter in the registry, ordered by meter id
fn map_calibrations(registry: &MeterRegistry) -> Result<Vec<MeterCalibration>> {
    let mapper = MeterCalibrationMapper::new();
    registry
        .meters()
        .into_iter()
        .map(|meter| mapper.map(meter))
        .collect()
}

/// Write meters and their equations in human-readable form
pub fn write_human_listing(
    writer: &mut dyn Write,
    metadata: &RegistryMetadata,
    calibrations: &[MeterCalibration],
) -> Result<()> {
    let io_error = |e| Error::io("Failed to write meter listing", e);

    writeln!(
        writer,
        "\n{} ({})",
        "Current Meters".bright_green().bold(),
        calibrations.len()
    )
    .map_err(io_error)?;
    writeln!(writer, "  {}", metadata.summary().bright_white()).map_err(io_error)?;

    let load_stats = &metadata.load_stats;
    if load_stats.has_warnings() {
        writeln!(
            writer,
            "  {} {} orphaned calibration rows, {} duplicate meters",
            "Warning:".bright_yellow(),
            load_stats.orphan_calibrations,
            load_stats.duplicate_meters
        )
        .map_err(io_error)?;
    }

    for calibration in calibrations {
        writeln!(
            writer,
            "\n  {} {}",
            "Meter:".bright_cyan(),
            calibration.meter_id.bright_white().bold()
        )
        .map_err(io_error)?;
        writeln!(
            writer,
            "    {} {} {} (serial {})",
            "Type:".bright_cyan(),
            calibration.manufacturer,
            calibration.model,
            calibration.serial_number
        )
        .map_err(io_error)?;

        if calibration.equations.is_empty() {
            writeln!(writer, "    {}", "No calibration equations".bright_yellow())
                .map_err(io_error)?;
            continue;
        }

        for equation in &calibration.equations {
            writeln!(
                writer,
                "    {:>8.3} .. {:<8.3} v = {:.4} n + {:.4}",
                equation.range_start, equation.range_end, equation.slope, equation.intercept
            )
            .map_err(io_error)?;
        }
    }

    writeln!(writer).map_err(io_error)?;
    Ok(())
}

/// Write the meter details as JSON
pub fn write_json_listing(writer: &mut dyn Write, registry: &MeterRegistry) -> Result<()> {
    let content = serde_json::to_string_pretty(&registry.meters())
        .map_err(|e| Error::json("Failed to serialize meter listing", e))?;
    writeln!(writer, "{}", content).map_err(|e| Error::io("Failed to write meter listing", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::export_parser::tests::sample_files;

    fn sample_registry() -> MeterRegistry {
        PocketGaugerPlugin::default()
            .load_meters(&sample_files())
            .unwrap()
    }

    #[test]
    fn test_map_calibrations() {
        let calibrations = map_calibrations(&sample_registry()).unwrap();
        assert_eq!(calibrations.len(), 1);
        assert_eq!(calibrations[0].meter_id, "M-0412");
        assert_eq!(calibrations[0].equations.len(), 2);
    }

    #[test]
    fn test_write_human_listing() {
        colored::control::set_override(false);
        let registry = sample_registry();
        let calibrations = map_calibrations(&registry).unwrap();
        let mut buffer = Vec::new();
        write_human_listing(&mut buffer, &registry.metadata(), &calibrations).unwrap();

        let listing = String::from_utf8(buffer).unwrap();
        assert!(listing.contains("Current Meters (1)"));
        assert!(listing.contains("Registry with 1 meters, 2 calibration ranges, 0 uncalibrated"));
        assert!(!listing.contains("Warning:"));
        assert!(listing.contains("Meter: M-0412"));
        assert_eq!(listing.matches(" v = ").count(), 2);
    }

    #[test]
    fn test_write_json_listing() {
        let mut buffer = Vec::new();
        write_json_listing(&mut buffer, &sample_registry()).unwrap();

        let meters: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let meters = meters.as_array().unwrap();
        assert_eq!(meters.len(), 1);
        assert_eq!(meters[0]["meter_id"], "M-0412");
        assert_eq!(meters[0]["calibrations"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_human_listing_reports_load_warnings() {
        colored::control::set_override(false);
        let calibrations = "\
MeterId,MinRotationSpeed,MaxRotationSpeed,Factor,Constant
M-0412,0.0,1.0,0.25,0.01
M-9999,0.0,1.0,0.25,0.01
";
        let files = sample_files().with_table(crate::constants::tables::METER_CALIBRATIONS, calibrations);
        let registry = PocketGaugerPlugin::default().load_meters(&files).unwrap();
        let mapped = map_calibrations(&registry).unwrap();

        let mut buffer = Vec::new();
        write_human_listing(&mut buffer, &registry.metadata(), &mapped).unwrap();

        let listing = String::from_utf8(buffer).unwrap();
        assert!(listing.contains("Warning: 1 orphaned calibration rows, 0 duplicate meters"));
    }
}
