//! Tracing subscriber setup.

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Output verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Flow steps and session lifecycle
    #[default]
    Normal,
    /// Every lookup and action
    Verbose,
    /// Everything, including HTTP exchanges
    Debug,
}

impl Verbosity {
    /// From a `-v` count and a `-q` flag; quiet wins
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Level applied to this crate's targets
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::ERROR,
            Self::Normal => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// Filter directives for `verbosity`, unless `RUST_LOG` is set
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(directives(verbosity)),
    }
}

fn directives(verbosity: Verbosity) -> String {
    let level = verbosity.level_filter();
    format!("{}={level},oinkoin_e2e_cli={level}", env!("CARGO_CRATE_NAME"))
}

/// Install a stderr fmt subscriber.
///
/// Returns `false` when a global subscriber already exists (tests call this
/// repeatedly).
pub fn init(verbosity: Verbosity) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(Verbosity::from_flags(0, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(5, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(2, true), Verbosity::Quiet);
    }

    #[test]
    fn test_directives_name_both_crates() {
        let d = directives(Verbosity::Verbose);
        assert_eq!(d, "oinkoin_e2e=info,oinkoin_e2e_cli=info");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let _ = init(Verbosity::Quiet);
        assert!(!init(Verbosity::Debug));
    }
}
