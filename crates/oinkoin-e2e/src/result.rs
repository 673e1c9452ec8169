//! Result and error types for the e2e harness.

use thiserror::Error;

use crate::locator::Selector;

/// Result type for harness operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while driving the app.
///
/// Absence of an element is *not* an error when the caller asked a yes/no
/// question (see [`crate::locator::Resolver::exists`]). It only becomes
/// [`ProbeError::ElementMissing`] when the element was required.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A required element is not on the current screen
    #[error("Element not found: {selector}")]
    ElementMissing {
        /// Criterion used for the lookup
        selector: Selector,
    },

    /// A record tile could not be found under the active date filter
    #[error("Record not found: {locator:?}. Active filter: {filter}")]
    RecordNotFound {
        /// Computed locator string
        locator: String,
        /// Display text of the filter that was applied
        filter: String,
    },

    /// Category tile missing on the category selection screen
    #[error("Category not found: Type: {category_type}, Name: {name}")]
    CategoryNotFound {
        /// Expense or Income
        category_type: String,
        /// Category label
        name: String,
    },

    /// A rendered label did not match the expected pattern
    #[error("Cannot parse {input:?}: expected {expected}")]
    Parse {
        /// Offending text
        input: String,
        /// Description of the expected shape
        expected: String,
    },

    /// Session could not be created
    #[error("Session setup failed: {message}")]
    SessionSetup {
        /// Error message
        message: String,
        /// Original cause
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The automation backend rejected a command
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// The session was already released
    #[error("Session is closed")]
    SessionClosed,

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Create a parse error
    #[must_use]
    pub fn parse(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            expected: expected.into(),
        }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a session setup error that keeps its cause
    #[must_use]
    pub fn session_setup<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SessionSetup {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a session setup error without an underlying cause
    #[must_use]
    pub fn session_setup_msg(message: impl Into<String>) -> Self {
        Self::SessionSetup {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors meaning "the thing you looked for is not there"
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ElementMissing { .. } | Self::RecordNotFound { .. } | Self::CategoryNotFound { .. }
        )
    }
}
