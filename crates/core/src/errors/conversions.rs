//! Conversion implementations for error types

use super::types::Error;

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::malformed_secrets_with_source(format!("invalid JSON: {error}"), error)
    }
}
