//! Error types for the dynamic DNS updater
//!
//! A completed request whose success check fails is *not* an error; it is
//! reported as `Ok(false)` by the updater. Everything in this module is the
//! exceptional channel.

use std::fmt;
use thiserror::Error;

/// Result type alias for dynamic DNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by a transport implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Input fields did not satisfy the provider's rules.
    ///
    /// Raised before any network activity.
    #[error("Validation failed for {provider}: {}", join_violations(.violations))]
    Validation {
        /// Display name of the provider
        provider: &'static str,
        /// Every violation found, in rule-declaration order
        violations: Vec<Violation>,
    },

    /// URL template could not be rendered
    ///
    /// Indicates a provider table defect or a malformed caller-supplied URL.
    #[error("Template error: {0}")]
    Template(String),

    /// The transport could not complete the request
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// Provider identifier outside the supported set
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A single field rule violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Required field absent and no default declared
    Missing {
        /// Field name
        field: &'static str,
    },

    /// Field present but its value has the wrong length
    Length {
        /// Field name
        field: &'static str,
        /// Required length in characters
        expected: usize,
        /// Actual length in characters
        actual: usize,
    },
}

impl Violation {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Violation::Missing { field } | Violation::Length { field, .. } => field,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Missing { field } => write!(f, "required field '{}' is missing", field),
            Violation::Length {
                field,
                expected,
                actual,
            } => write!(
                f,
                "field '{}' must be exactly {} characters (got {})",
                field, expected, actual
            ),
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create a template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Wrap a transport failure, keeping the original error as the source
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unknown provider error
    pub fn unknown_provider(name: impl Into<String>) -> Self {
        Self::UnknownProvider(name.into())
    }

    /// Whether this error was raised while preparing an update, before any
    /// request was sent
    ///
    /// `Config` comes from building a transport, not from an update, so it
    /// is not counted here.
    pub fn is_pre_request(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::Template(_) | Error::UnknownProvider(_)
        )
    }

    /// Violations carried by a validation error, empty otherwise
    pub fn violations(&self) -> &[Violation] {
        match self {
            Error::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}
