//! oinkoin-e2e CLI
//!
//! ## Usage
//!
//! ```bash
//! oinkoin-e2e check --config device.yaml     # Validate a device configuration
//! oinkoin-e2e config --capabilities          # Capabilities sent to Appium
//! oinkoin-e2e locator Salary income 1500     # Accessibility id of a record tile
//! oinkoin-e2e range-text year 2020           # Expected date range text
//! oinkoin-e2e smoke -v                       # Launch the app and check the nav bar
//! ```

use clap::Parser;
use console::style;
use oinkoin_e2e::logging::{self, Verbosity};
use oinkoin_e2e::{RemoteConnector, SessionConfig};
use oinkoin_e2e_cli::{handlers, Cli, CliResult, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    cli.color.apply();
    let _ = logging::init(verbosity);

    let load = || SessionConfig::load(cli.config.as_deref());

    match &cli.command {
        Commands::Config(args) => println!("{}", handlers::config_report(&load()?, args.capabilities)?),
        Commands::Check => {
            let summary = handlers::check(&load()?)?;
            if !verbosity.is_quiet() {
                println!("{} {summary}", style("✓").green());
            }
        }
        Commands::Locator(args) => println!("{}", handlers::locator(args)?),
        Commands::RangeText(args) => println!("{}", handlers::range_text(args.range)?),
        Commands::Smoke => {
            let states = handlers::smoke(RemoteConnector, load()?)?;
            if !verbosity.is_quiet() {
                for (tab, state) in states {
                    println!("{} {tab}: {state:?}", style("✓").green());
                }
            }
        }
    }
    Ok(())
}
