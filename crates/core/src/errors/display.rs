//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SourceUnavailable {
                source_name,
                message,
                ..
            } => {
                write!(f, "secrets source '{source_name}' is unavailable: {message}")
            }
            Error::MalformedSecrets { message, .. } => {
                write!(f, "malformed secrets: {message}")
            }
            Error::SecretUnavailable { key } => {
                write!(f, "requested secret could not be loaded: {key}")
            }
            Error::UnknownSecret { key } => {
                write!(f, "no secret named '{key}'")
            }
            Error::ReservedName { name } => {
                write!(f, "'{name}' is reserved for internal state and is not a secret")
            }
            Error::TelemetryFailure { metric, message } => {
                write!(f, "failed to record metric '{metric}': {message}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
        }
    }
}
