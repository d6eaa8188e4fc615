//! Builder methods for creating errors with context

use super::types::{Error, ErrorSource};
use std::sync::Arc;

impl Error {
    /// Create a source-unavailable error
    #[must_use]
    pub fn source_unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SourceUnavailable {
            source_name: source_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a source-unavailable error with the underlying cause
    #[must_use]
    pub fn source_unavailable_with_source(
        source_name: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::SourceUnavailable {
            source_name: source_name.into(),
            message: message.into(),
            source: Some(Arc::new(source) as ErrorSource),
        }
    }

    /// Create a malformed-secrets error
    #[must_use]
    pub fn malformed_secrets(message: impl Into<String>) -> Self {
        Error::MalformedSecrets {
            message: message.into(),
            source: None,
        }
    }

    /// Create a malformed-secrets error with the underlying parse failure
    #[must_use]
    pub fn malformed_secrets_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::MalformedSecrets {
            message: message.into(),
            source: Some(Arc::new(source) as ErrorSource),
        }
    }

    #[must_use]
    pub fn secret_unavailable(key: impl Into<String>) -> Self {
        Error::SecretUnavailable { key: key.into() }
    }

    #[must_use]
    pub fn unknown_secret(key: impl Into<String>) -> Self {
        Error::UnknownSecret { key: key.into() }
    }

    #[must_use]
    pub fn reserved_name(name: impl Into<String>) -> Self {
        Error::ReservedName { name: name.into() }
    }

    /// Create a telemetry failure
    #[must_use]
    pub fn telemetry_failure(metric: impl Into<String>, message: impl Into<String>) -> Self {
        Error::TelemetryFailure {
            metric: metric.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}
