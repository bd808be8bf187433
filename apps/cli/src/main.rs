//! # leaflet
//!
//! Command-line entry point.
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr)
//! 3. Load configuration (file, then `LEAFLET_*` environment)
//! 4. Build the scan pipeline from the configuration
//! 5. Run the subcommand and exit with its code

use std::io;

use clap::Parser;
use leaflet_cli::cli::{Cli, Command};
use leaflet_cli::commands::{run_expiry, run_format_date, run_gtin, run_parse, Context};
use leaflet_cli::logging::init_tracing;
use leaflet_cli::{AppConfig, CliResult};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            error.exit_code()
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> CliResult<i32> {
    let config = AppConfig::load(cli.config)?;
    let ctx = Context::from_config(&config)?;
    let out = io::stdout().lock();

    match cli.command {
        Command::Parse(args) => run_parse(&ctx, &args, io::stdin().lock(), out),
        Command::Gtin(args) => run_gtin(&ctx, &args, out),
        Command::Expiry(args) => run_expiry(&ctx, &args, out),
        Command::FormatDate(args) => run_format_date(&ctx, &args, out),
    }
}
