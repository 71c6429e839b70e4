use clap::Parser;
use pocket_gauger::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", anyhow::Error::new(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("PocketGauger Converter - Field Gauging Export Reader");
    println!("====================================================");
    println!();
    println!("Convert PocketGauger field-logger exports into discharge activities");
    println!("with verticals, segments and current meter calibrations.");
    println!();
    println!("USAGE:");
    println!("    pocket-gauger <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert export directories into discharge activities");
    println!("    meters      List current meters and calibration equations");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert one export gauged at UTC-8:30:");
    println!("    pocket-gauger convert ./export --utc-offset -8.5 --location 39001");
    println!();
    println!("    # Convert several exports to a JSON report, skipping malformed rows:");
    println!("    pocket-gauger convert ./jan ./feb --output-format json --lenient -o report.json");
    println!();
    println!("    # List meters in an export:");
    println!("    pocket-gauger meters ./export");
    println!();
    println!("For detailed help on any command, use:");
    println!("    pocket-gauger <COMMAND> --help");
}
