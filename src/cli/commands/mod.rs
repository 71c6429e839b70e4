//! Command implementations for the PocketGauger CLI
//!
//! Each command lives in its own module:
//! - `convert`: export directories to discharge activities
//! - `meters`: current meter and calibration listing

pub mod convert;
pub mod meters;
pub mod shared;

pub use shared::ConversionStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Dispatch to the handler of the parsed subcommand
pub fn run(args: Args) -> Result<ConversionStats> {
    match args.command {
        Some(Commands::Convert(convert_args)) => convert::run_convert(convert_args),
        Some(Commands::Meters(meters_args)) => meters::run_meters(meters_args),
        None => Ok(ConversionStats::default()),
    }
}
