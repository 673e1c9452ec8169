//! oinkoin-e2e CLI library
//!
//! Command definitions and handlers for the `oinkoin-e2e` binary.

mod commands;
mod error;
pub mod handlers;

pub use commands::{
    CategoryTypeArg, Cli, ColorArg, Commands, ConfigArgs, LocatorArgs, RangeCommand, RangeTextArgs,
};
pub use error::{CliError, CliResult};
