//! Environment-driven configuration loading
//!
//! Every setting is read once. A primary variable wins when it is set (even
//! to an empty string); otherwise the legacy name is consulted, and finally
//! the documented default applies.

use crate::config::Configuration;
use std::path::PathBuf;
use vaultsecrets_core::constants::{
    DEFAULT_DEV_SECRETS_PATH, DEFAULT_SECRETS_PATH, DEV_SECRETS_PATH_VAR, ENABLE_TELEMETRY_VAR,
    ENABLE_VAULT_VAR, LEGACY_ENABLE_TELEMETRY_VAR, LEGACY_ENABLE_VAULT_VAR,
    LEGACY_SECRETS_PATH_VAR, SECRETS_PATH_VAR, TELEMETRY_ENV_VAR, TELEMETRY_SERVICE_VAR,
};

/// Parse a boolean flag the way deployment manifests write them.
///
/// Only `true` and `1` (case-insensitive) are truthy.
pub fn parse_env_bool(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value == "true" || value == "1"
}

impl Configuration {
    /// Resolve configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let with_fallback =
            |primary: &str, legacy: &str| lookup(primary).or_else(|| lookup(legacy));

        let vault_enabled = with_fallback(ENABLE_VAULT_VAR, LEGACY_ENABLE_VAULT_VAR)
            .map(|v| parse_env_bool(&v))
            .unwrap_or(false);

        let secrets_path = with_fallback(SECRETS_PATH_VAR, LEGACY_SECRETS_PATH_VAR)
            .unwrap_or_else(|| DEFAULT_SECRETS_PATH.to_string());

        let telemetry_enabled = with_fallback(ENABLE_TELEMETRY_VAR, LEGACY_ENABLE_TELEMETRY_VAR)
            .map(|v| parse_env_bool(&v))
            .unwrap_or(true);

        let dev_secrets_path =
            lookup(DEV_SECRETS_PATH_VAR).unwrap_or_else(|| DEFAULT_DEV_SECRETS_PATH.to_string());

        let config = Self {
            vault_enabled,
            secrets_path: PathBuf::from(secrets_path),
            telemetry_enabled,
            dev_secrets_path: PathBuf::from(dev_secrets_path),
            environment: lookup(TELEMETRY_ENV_VAR).filter(|v| !v.is_empty()),
            service: lookup(TELEMETRY_SERVICE_VAR).filter(|v| !v.is_empty()),
        };

        tracing::debug!(
            vault_enabled = config.vault_enabled,
            secrets_path = %config.secrets_path.display(),
            telemetry_enabled = config.telemetry_enabled,
            "Resolved secrets configuration"
        );

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_parse_env_bool() {
        assert!(parse_env_bool("true"));
        assert!(parse_env_bool("TRUE"));
        assert!(parse_env_bool("True"));
        assert!(parse_env_bool("1"));

        assert!(!parse_env_bool("false"));
        assert!(!parse_env_bool("0"));
        assert!(!parse_env_bool("yes"));
        assert!(!parse_env_bool(""));
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Configuration::from_lookup(lookup_from(&[]));

        assert!(!config.vault_enabled);
        assert_eq!(config.secrets_path, PathBuf::from("/vault/secrets/secrets"));
        assert!(config.telemetry_enabled);
        assert_eq!(config.dev_secrets_path, PathBuf::from("de_secrets.env"));
        assert_eq!(config.environment, None);
        assert_eq!(config.service, None);
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_primary_variables() {
        let config = Configuration::from_lookup(lookup_from(&[
            ("VAULTSECRETS_ENABLE_VAULT", "true"),
            ("VAULTSECRETS_SECRETS_PATH", "/tmp/secrets"),
            ("VAULTSECRETS_ENABLE_TELEMETRY", "false"),
            ("VAULTSECRETS_DEV_SECRETS_PATH", "/tmp/dev.env"),
            ("DD_ENV", "staging"),
            ("DD_SERVICE", "billing"),
        ]));

        assert!(config.vault_enabled);
        assert_eq!(config.secrets_path, PathBuf::from("/tmp/secrets"));
        assert!(!config.telemetry_enabled);
        assert_eq!(config.dev_secrets_path, PathBuf::from("/tmp/dev.env"));
        assert_eq!(config.environment.as_deref(), Some("staging"));
        assert_eq!(config.service.as_deref(), Some("billing"));
    }

    #[test]
    fn test_legacy_fallbacks() {
        let config = Configuration::from_lookup(lookup_from(&[
            ("USE_VAULT", "1"),
            ("VAULT_SECRETS_PATH", "/legacy/secrets"),
            ("VAULTSECRETS_ENABLE_DATADOG", "false"),
        ]));

        assert!(config.vault_enabled);
        assert_eq!(config.secrets_path, PathBuf::from("/legacy/secrets"));
        assert!(!config.telemetry_enabled);
    }

    #[test]
    fn test_primary_wins_over_legacy() {
        let config = Configuration::from_lookup(lookup_from(&[
            ("VAULTSECRETS_ENABLE_VAULT", "false"),
            ("USE_VAULT", "true"),
            ("VAULTSECRETS_SECRETS_PATH", "/new/path"),
            ("VAULT_SECRETS_PATH", "/old/path"),
        ]));

        assert!(!config.vault_enabled);
        assert_eq!(config.secrets_path, PathBuf::from("/new/path"));
    }

    #[test]
    fn test_empty_tags_are_unset() {
        let config =
            Configuration::from_lookup(lookup_from(&[("DD_ENV", ""), ("DD_SERVICE", "")]));

        assert_eq!(config.environment, None);
        assert_eq!(config.service, None);
    }
}
