//! Command-line argument definitions for the PocketGauger converter
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::{DeploymentMethod, LocationInfo};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the PocketGauger converter
///
/// Converts PocketGauger field-logger exports into discharge activities.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pocket-gauger",
    version,
    about = "Convert PocketGauger gauging exports into discharge activities",
    long_about = "Reads the CSV tables written by a PocketGauger field logger (gauging \
                  summaries, panels, velocity sub-observations and current meter \
                  calibrations) and maps every gauging to a discharge activity with \
                  computed verticals and segments."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert export directories into discharge activities
    Convert(ConvertArgs),
    /// List the current meters and calibrations of an export
    Meters(MetersArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Export directories, each holding the CSV tables of one download
    #[arg(value_name = "EXPORT_DIR", required = true, num_args = 1..)]
    pub export_dirs: Vec<PathBuf>,

    /// UTC offset of the gauging location in hours
    ///
    /// Logger timestamps carry no offset. Fractional offsets such as -8.5
    /// or 5.75 are accepted.
    #[arg(
        long = "utc-offset",
        value_name = "HOURS",
        default_value_t = 0.0,
        allow_negative_numbers = true,
        help = "UTC offset of the gauging location in hours"
    )]
    pub utc_offset: f64,

    /// Location identifier recorded in logs and reports
    #[arg(long = "location", value_name = "NAME", help = "Location identifier")]
    pub location: Option<String>,

    /// Channel name for the point-velocity measurements
    #[arg(
        long = "channel",
        value_name = "NAME",
        help = "Channel name (defaults to the configured channel)"
    )]
    pub channel: Option<String>,

    /// Deployment method of the current meter
    #[arg(
        long = "deployment-method",
        value_name = "METHOD",
        help = "Deployment method: wading, bridge, cableway, boat, ice, unspecified"
    )]
    pub deployment_method: Option<DeploymentMethod>,

    /// Path to configuration file (JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the report to a file instead of stdout"
    )]
    pub output_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Skip malformed rows instead of failing
    #[arg(long = "lenient", help = "Skip malformed rows instead of failing")]
    pub lenient: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the meters command
#[derive(Debug, Clone, Parser)]
pub struct MetersArgs {
    /// Export directory holding the meter tables
    #[arg(value_name = "EXPORT_DIR")]
    pub export_dir: PathBuf,

    /// Output format for the meter listing
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the meter listing"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Log level for a verbosity count, `quiet` overriding it
pub fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl ConvertArgs {
    /// Validate the convert command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for export_dir in &self.export_dirs {
            if !export_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Export directory does not exist: {}",
                    export_dir.display()
                )));
            }
        }

        if !self.utc_offset.is_finite() || self.utc_offset.abs() >= 24.0 {
            return Err(Error::configuration(format!(
                "UTC offset must be between -24 and 24 hours, got {}",
                self.utc_offset
            )));
        }

        if let Some(channel) = &self.channel {
            if channel.trim().is_empty() {
                return Err(Error::configuration("Channel name cannot be empty"));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Location the exports were gauged at
    pub fn location_info(&self) -> LocationInfo {
        let identifier = self.location.clone().unwrap_or_else(|| "unknown".to_string());
        let location = LocationInfo::new(identifier.clone(), identifier, self.utc_offset);

        match &self.channel {
            Some(channel) => location.with_channel(channel.trim()),
            None => location,
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.export_dirs.len() > 1
    }
}

impl MetersArgs {
    /// Validate the meters command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.export_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Export directory does not exist: {}",
                self.export_dir.display()
            )));
        }
        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, false)
    }
}
