//! Convert command implementation for the PocketGauger CLI
//!
//! Runs every export directory through the plugin and reports the mapped
//! discharge activities as JSON or a coloured human summary.

use super::shared::{ConversionStats, load_configuration, report_writer, setup_logging};
use crate::app::models::LocationInfo;
use crate::app::services::plugin::{ParsedExport, PocketGaugerPlugin};
use crate::cli::args::{ConvertArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// One converted export directory
#[derive(Debug)]
pub struct ConvertedExport {
    pub source: PathBuf,
    pub parsed: ParsedExport,
}

/// Convert command runner
pub fn run_convert(args: ConvertArgs) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;
    info!("Starting PocketGauger conversion");
    debug!("Convert arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;
    let location = args.location_info();
    let plugin = PocketGaugerPlugin::new(config);

    let progress = if args.show_progress() {
        let pb = ProgressBar::new(args.export_dirs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut exports = Vec::with_capacity(args.export_dirs.len());
    let mut stats = ConversionStats::default();

    for export_dir in &args.export_dirs {
        if let Some(pb) = &progress {
            pb.set_message(export_dir.display().to_string());
        }

        let parsed = plugin.parse_directory(export_dir, &location)?;
        record_export(&mut stats, &parsed);
        exports.push(ConvertedExport {
            source: export_dir.clone(),
            parsed,
        });

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("Conversion complete");
    }

    stats.processing_time = start_time.elapsed();
    info!(
        "Converted {} exports into {} discharge activities",
        stats.exports_processed, stats.gaugings_mapped
    );

    if args.output_file.is_some() {
        colored::control::set_override(false);
    }
    let mut writer = report_writer(args.output_file.as_deref())?;
    match args.output_format {
        OutputFormat::Human => {
            if !args.quiet || args.output_file.is_some() {
                write_human_report(&mut writer, &location, &exports, &stats)?;
            }
        }
        OutputFormat::Json => write_json_report(&mut writer, &location, &exports, &stats)?,
    }
    writer
        .flush()
        .map_err(|e| Error::io("Failed to flush report", e))?;

    if let Some(path) = &args.output_file {
        info!("Report written to {}", path.display());
    }

    Ok(stats)
}

/// Add one export's counts to the running totals
fn record_export(stats: &mut ConversionStats, parsed: &ParsedExport) {
    stats.exports_processed += 1;
    stats.gaugings_mapped += parsed.activities.len();
    stats.verticals_mapped += parsed
        .activities
        .iter()
        .map(|activity| activity.vertical_count())
        .sum::<usize>();
    stats.meters_loaded += parsed.meter_count;
    stats.add_parse_stats(&parsed.stats);
}

/// Write the human-readable summary
pub fn write_human_report(
    writer: &mut dyn Write,
    location: &LocationInfo,
    exports: &[ConvertedExport],
    stats: &ConversionStats,
) -> Result<()> {
    let io_error = |e| Error::io("Failed to write report", e);

    writeln!(writer, "\n{}", "Conversion Summary".bright_green().bold()).map_err(io_error)?;
    writeln!(
        writer,
        "  {} {} (UTC{:+})",
        "Location:".bright_cyan(),
        location.identifier.bright_white(),
        location.utc_offset_hours
    )
    .map_err(io_error)?;

    for export in exports {
        writeln!(
            writer,
            "\n  {} {}",
            "Export:".bright_cyan(),
            export.source.display().to_string().bright_white()
        )
        .map_err(io_error)?;

        for activity in &export.parsed.activities {
            writeln!(
                writer,
                "    {}  {}  {} {:.3} {}  {} verticals",
                activity.start_time.format("%Y-%m-%d %H:%M %:z"),
                activity.discharge_method,
                "Q =".bright_cyan(),
                activity.discharge,
                activity.discharge_unit,
                activity.vertical_count()
            )
            .map_err(io_error)?;
        }

        if export.parsed.unresolved_meters > 0 {
            writeln!(
                writer,
                "    {} {}",
                "Gaugings without meter details:".bright_yellow(),
                export.parsed.unresolved_meters
            )
            .map_err(io_error)?;
        }
        for message in &export.parsed.stats.errors {
            writeln!(writer, "    {} {}", "Skipped:".bright_red(), message).map_err(io_error)?;
        }
    }

    writeln!(writer).map_err(io_error)?;
    let rows = [
        ("Exports processed:", stats.exports_processed),
        ("Gaugings mapped:", stats.gaugings_mapped),
        ("Verticals mapped:", stats.verticals_mapped),
        ("Records parsed:", stats.records_parsed),
        ("Meters loaded:", stats.meters_loaded),
    ];
    for (label, value) in rows {
        writeln!(
            writer,
            "  {} {}",
            label.bright_cyan(),
            value.to_string().bright_white()
        )
        .map_err(io_error)?;
    }

    if stats.records_skipped > 0 {
        writeln!(
            writer,
            "  {} {}",
            "Records skipped:".bright_red(),
            stats.records_skipped
        )
        .map_err(io_error)?;
    }
    if stats.orphan_records > 0 {
        writeln!(
            writer,
            "  {} {}",
            "Orphan records:".bright_yellow(),
            stats.orphan_records
        )
        .map_err(io_error)?;
    }

    writeln!(
        writer,
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(stats.processing_time).to_string().bright_white()
    )
    .map_err(io_error)?;

    Ok(())
}

/// Write the JSON report for machine consumption
pub fn write_json_report(
    writer: &mut dyn Write,
    location: &LocationInfo,
    exports: &[ConvertedExport],
    stats: &ConversionStats,
) -> Result<()> {
    let report = serde_json::json!({
        "location": {
            "identifier": location.identifier,
            "utc_offset_hours": location.utc_offset_hours,
        },
        "exports": exports.iter().map(|export| {
            serde_json::json!({
                "source": export.source.display().to_string(),
                "meter_count": export.parsed.meter_count,
                "unresolved_meters": export.parsed.unresolved_meters,
                "parse_stats": export.parsed.stats,
                "activities": export.parsed.activities,
            })
        }).collect::<Vec<_>>(),
        "summary": {
            "exports_processed": stats.exports_processed,
            "gaugings_mapped": stats.gaugings_mapped,
            "verticals_mapped": stats.verticals_mapped,
            "records_parsed": stats.records_parsed,
            "records_skipped": stats.records_skipped,
            "orphan_records": stats.orphan_records,
            "meters_loaded": stats.meters_loaded,
            "processing_time_seconds": stats.processing_time.as_secs_f64(),
        }
    });

    let content = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::json("Failed to serialize report", e))?;
    writeln!(writer, "{}", content).map_err(|e| Error::io("Failed to write report", e))
}
