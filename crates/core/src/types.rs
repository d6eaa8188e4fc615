//! Shared secrets types

use std::collections::HashMap;

/// A single secret value as it appeared in the source.
///
/// Injected files may carry any JSON value per key, so values are kept as
/// JSON rather than coerced to strings.
pub type SecretValue = serde_json::Value;

/// Resolved mapping from secret name to value
pub type SecretsMap = HashMap<String, SecretValue>;

/// Build a [`SecretsMap`] of string values from name/value pairs
pub fn secrets_from_pairs<I, K, V>(pairs: I) -> SecretsMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), SecretValue::String(v.into())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_from_pairs() {
        let secrets = secrets_from_pairs([("API_KEY", "abc"), ("DB_PASSWORD", "hunter2")]);

        assert_eq!(secrets.len(), 2);
        assert_eq!(secrets["API_KEY"], SecretValue::String("abc".to_string()));
        assert_eq!(
            secrets["DB_PASSWORD"],
            SecretValue::String("hunter2".to_string())
        );
    }
}
