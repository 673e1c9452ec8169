//! CLI command definitions using clap

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use oinkoin_e2e::CategoryType;
use std::path::PathBuf;

/// oinkoin-e2e: end-to-end harness for the Oinkoin finance app
#[derive(Parser, Debug)]
#[command(name = "oinkoin-e2e")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Session configuration file (YAML); defaults to $OINKOIN_E2E_CONFIG
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved session configuration and its capabilities
    Config(ConfigArgs),

    /// Validate the session configuration without connecting
    Check,

    /// Print the accessibility id of a record tile on the home screen
    Locator(LocatorArgs),

    /// Print the date range text the home screen shows for a filter
    RangeText(RangeTextArgs),

    /// Open a device session and verify the navigation bar start state
    Smoke,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print only the capabilities JSON
    #[arg(long)]
    pub capabilities: bool,
}

/// Arguments for the locator command
#[derive(Args, Debug)]
pub struct LocatorArgs {
    /// Record name
    pub name: String,

    /// Record type
    #[arg(value_enum)]
    pub category_type: CategoryTypeArg,

    /// Amount, e.g. 1500 or 50.25
    pub amount: String,

    /// Print the real line break instead of `\n`
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the range-text command
#[derive(Args, Debug)]
pub struct RangeTextArgs {
    #[command(subcommand)]
    pub range: RangeCommand,
}

/// Filter whose display text to print
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum RangeCommand {
    /// One calendar month
    Month {
        year: i32,
        /// Month number (1-12)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },
    /// One calendar year
    Year { year: i32 },
    /// Inclusive range of ISO dates (YYYY-MM-DD)
    Custom { start: NaiveDate, end: NaiveDate },
}

/// Record type argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryTypeArg {
    Expense,
    Income,
}

impl From<CategoryTypeArg> for CategoryType {
    fn from(arg: CategoryTypeArg) -> Self {
        match arg {
            CategoryTypeArg::Expense => Self::Expense,
            CategoryTypeArg::Income => Self::Income,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorArg {
    /// Apply the choice to `console` output on stdout and stderr
    pub fn apply(self) {
        match self {
            Self::Always => {
                console::set_colors_enabled(true);
                console::set_colors_enabled_stderr(true);
            }
            Self::Never => {
                console::set_colors_enabled(false);
                console::set_colors_enabled_stderr(false);
            }
            Self::Auto => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["oinkoin-e2e", "check", "-vv", "--config", "device.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("device.yaml")));
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_locator_args() {
        let cli = Cli::try_parse_from(["oinkoin-e2e", "locator", "Salary", "income", "1500"]).unwrap();
        let Commands::Locator(args) = cli.command else {
            panic!("expected locator");
        };
        assert_eq!(args.name, "Salary");
        assert_eq!(CategoryType::from(args.category_type), CategoryType::Income);
        assert!(!args.raw);
    }

    #[test]
    fn test_range_month_out_of_bounds() {
        assert!(Cli::try_parse_from(["oinkoin-e2e", "range-text", "month", "2025", "13"]).is_err());
        assert!(Cli::try_parse_from(["oinkoin-e2e", "range-text", "month", "2025", "0"]).is_err());
    }

    #[test]
    fn test_range_custom_parses_iso_dates() {
        let cli = Cli::try_parse_from(["oinkoin-e2e", "range-text", "custom", "2025-10-05", "2025-11-12"]).unwrap();
        let Commands::RangeText(args) = cli.command else {
            panic!("expected range-text");
        };
        assert!(matches!(args.range, RangeCommand::Custom { start, .. } if start.to_string() == "2025-10-05"));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["oinkoin-e2e"]).is_err());
    }
}
