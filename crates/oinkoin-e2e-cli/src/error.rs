//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// The app was not in the expected state
    #[error("Smoke check failed: {message}")]
    Smoke {
        /// Error message
        message: String,
    },

    /// Harness error
    #[error(transparent)]
    Probe(#[from] oinkoin_e2e::ProbeError),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a smoke check error
    #[must_use]
    pub fn smoke(message: impl Into<String>) -> Self {
        Self::Smoke {
            message: message.into(),
        }
    }
}
