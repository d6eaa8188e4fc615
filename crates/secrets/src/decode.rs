//! Tolerant decoding of injected secrets payloads
//!
//! Agents write the secrets file either as JSON or as base64 of JSON, and
//! some wrap the real mapping in one or two `{"data": ...}` envelopes. The
//! helpers here normalise all of those shapes into a [`SecretsMap`].

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use std::borrow::Cow;
use vaultsecrets_core::{
    constants::{ENVELOPE_KEY, MAX_ENVELOPE_UNWRAPS},
    Error, Result, SecretsMap,
};

/// Decode `s` only if re-encoding the result reproduces `s` exactly
fn base64_round_trip(s: &str) -> Option<Vec<u8>> {
    let decoded = STANDARD.decode(s).ok()?;
    (STANDARD.encode(&decoded) == s).then_some(decoded)
}

/// Whether `s` is canonical base64.
///
/// `s` is base64 iff `encode(decode(s)) == s`. A decode error means it is
/// not.
pub fn is_base64(s: &str) -> bool {
    base64_round_trip(s).is_some()
}

/// Trim a raw payload and strip a base64 layer if there is one.
///
/// Content that round-trips as base64 but does not decode to UTF-8 is
/// returned unchanged.
pub fn decode_payload(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();

    match base64_round_trip(trimmed).map(String::from_utf8) {
        Some(Ok(text)) => {
            tracing::debug!("Secrets payload is base64 encoded");
            Cow::Owned(text)
        }
        Some(Err(_)) => {
            tracing::debug!("Secrets payload decodes as base64 but not as UTF-8; using it verbatim");
            Cow::Borrowed(trimmed)
        }
        None => Cow::Borrowed(trimmed),
    }
}

/// Peel at most two `{"data": ...}` envelopes off `value`.
///
/// Anything nested deeper keeps its remaining `data` key.
pub fn unwrap_envelope(value: Value) -> Value {
    let mut current = value;

    for depth in 0..MAX_ENVELOPE_UNWRAPS {
        current = match current {
            Value::Object(mut map) => match map.remove(ENVELOPE_KEY) {
                Some(inner) => {
                    tracing::debug!(depth = depth + 1, "Unwrapped secrets envelope");
                    inner
                }
                None => return Value::Object(map),
            },
            other => return other,
        };
    }

    current
}

/// Parse decoded text into a secrets mapping
pub fn parse_json_secrets(text: &str) -> Result<SecretsMap> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::malformed_secrets_with_source("secrets content is not valid JSON", e))?;

    match unwrap_envelope(value) {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(Error::malformed_secrets(format!(
            "expected a JSON object of secrets, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
