//! Shared components for CLI commands
//!
//! Logging setup, configuration loading and the statistics every command
//! reports back to `main`.

use crate::Result;
use crate::app::services::export_parser::ParseStats;
use crate::cli::args::ConvertArgs;
use crate::config::PluginConfig;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Conversion statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Number of export directories converted
    pub exports_processed: usize,
    /// Number of gaugings mapped to discharge activities
    pub gaugings_mapped: usize,
    /// Number of verticals across all activities
    pub verticals_mapped: usize,
    /// Rows read successfully across all tables
    pub records_parsed: usize,
    /// Malformed rows skipped in lenient mode
    pub records_skipped: usize,
    /// Rows referencing a gauging or panel that does not exist
    pub orphan_records: usize,
    /// Distinct meters loaded
    pub meters_loaded: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl ConversionStats {
    /// Fold the parse statistics of one export into the totals
    pub fn add_parse_stats(&mut self, stats: &ParseStats) {
        self.records_parsed += stats.records_parsed;
        self.records_skipped += stats.records_skipped;
        self.orphan_records += stats.orphan_records;
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pocket_gauger={}", log_level)));

    // A second command in the same process keeps the first subscriber
    let installed = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    match installed {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(e) => debug!("Keeping existing tracing subscriber: {}", e),
    }
    Ok(())
}

/// Load configuration (file or defaults) and apply CLI overrides
pub fn load_configuration(args: &ConvertArgs) -> Result<PluginConfig> {
    let mut config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            PluginConfig::load(path)?
        }
        None => {
            info!("No config file given, using defaults");
            PluginConfig::default()
        }
    };

    if let Some(deployment_method) = args.deployment_method {
        config = config.with_deployment_method(deployment_method);
    }
    if args.lenient {
        config = config.with_lenient_parsing();
    }

    config.validate()?;
    Ok(config)
}

/// Open the report destination: a file when given, stdout otherwise
pub fn report_writer(output_file: Option<&Path>) -> Result<Box<dyn Write>> {
    match output_file {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| {
                crate::Error::io(
                    format!("Failed to create report file {}", path.display()),
                    e,
                )
            })?;
            Ok(Box::new(std::io::BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
