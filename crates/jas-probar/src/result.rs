//! Result and error types for jas-probar.

use thiserror::Error;

use crate::catalog::LocatorKind;
use crate::locator::Locator;
use crate::template::TemplateError;

/// Result type for jas-probar operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while resolving locators and driving the app
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Locator catalog could not be read or is not a well-formed record
    #[error("Failed to load locator catalog {resource}: {message}")]
    Load {
        /// Resource (usually a file path) that failed to load
        resource: String,
        /// Error message
        message: String,
    },

    /// Symbolic key is absent from the catalog mapping it was looked up in
    #[error("Key \"{key}\" not found in {kind} store")]
    UnknownKey {
        /// Missing key
        key: String,
        /// Mapping that was searched
        kind: LocatorKind,
    },

    /// Arguments could not be substituted into a template
    #[error("Template for key \"{key}\" could not be formatted: {source}")]
    Template {
        /// Key whose template failed
        key: String,
        /// Underlying formatting failure
        #[source]
        source: TemplateError,
    },

    /// A seek bar dialog's text template could not render a value
    #[error("{field} of \"{setting}\" could not be formatted: {source}")]
    SettingTemplate {
        /// Preference title
        setting: String,
        /// Template field, `hint_template` or `summary_template`
        field: &'static str,
        /// Underlying formatting failure
        #[source]
        source: TemplateError,
    },

    /// Driver found no element for a required lookup
    #[error("No element found for {locator}: {message}")]
    ElementLookup {
        /// Locator that matched nothing
        locator: Locator,
        /// Driver message
        message: String,
    },

    /// Expected-vs-actual mismatch in a widget test procedure
    #[error("Assertion failed in \"{step}\": expected {expected:?}, got {actual:?}")]
    AssertionFailed {
        /// Step that made the assertion
        step: String,
        /// Expected value
        expected: String,
        /// Actual value
        actual: String,
    },

    /// Session could not be created or terminated
    #[error("Session error: {message}")]
    Session {
        /// Error message
        message: String,
    },

    /// Any other driver failure (transport, protocol, stale element)
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a session error
    #[must_use]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check whether this is an assertion failure
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}
