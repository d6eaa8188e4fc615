//! Core error type definitions

use std::sync::Arc;

/// Result type alias for vaultsecrets operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shared, cloneable error source
pub type ErrorSource = Arc<dyn std::error::Error + Send + Sync>;

/// Core error type for vaultsecrets operations using thiserror
///
/// Cloneable: a stored resolution failure is returned to every later caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The secrets source could not be opened or produced no mapping
    SourceUnavailable {
        source_name: String,
        message: String,
        #[source]
        source: Option<ErrorSource>,
    },

    /// Source content is not a JSON object after decoding
    MalformedSecrets {
        message: String,
        #[source]
        source: Option<ErrorSource>,
    },

    /// A known secret key has no stored value
    SecretUnavailable { key: String },

    /// The requested name is not a known secret
    UnknownSecret { key: String },

    /// The requested name belongs to the proxy's own state
    ReservedName { name: String },

    /// The telemetry sink rejected an increment
    TelemetryFailure { metric: String, message: String },

    /// Invalid configuration
    Configuration { message: String },
}

impl Error {
    /// Whether this error came out of secrets resolution (as opposed to lookup)
    #[must_use]
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Error::SourceUnavailable { .. } | Error::MalformedSecrets { .. }
        )
    }
}
