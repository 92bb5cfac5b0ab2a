//! JAS Probador: run the JAS settings scenario from the command line
//!
//! ## Usage
//!
//! ```bash
//! jas-probador run --url http://127.0.0.1:4723/wd/hub       # Run on a device
//! jas-probador run --config jas.yaml --format json           # Config file, JSON report
//! jas-probador catalog crates/jas-probar/data/settings_xpaths.json
//! jas-probador resolve crates/jas-probar/data/main_xpaths.json resource-id "Settings button"
//! ```

use clap::Parser;
use jas_probador::{handlers, init_logging, Cli, CliResult, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, cli.log_format)?;

    match cli.command {
        Commands::Run(args) => handlers::execute_run(&args),
        Commands::Catalog(args) => handlers::execute_catalog(&args),
        Commands::Resolve(args) => handlers::execute_resolve(&args),
    }
}
