//! Constants used throughout the vaultsecrets crates

// Environment variable names
pub const ENABLE_VAULT_VAR: &str = "VAULTSECRETS_ENABLE_VAULT";
pub const SECRETS_PATH_VAR: &str = "VAULTSECRETS_SECRETS_PATH";
pub const ENABLE_TELEMETRY_VAR: &str = "VAULTSECRETS_ENABLE_TELEMETRY";
pub const DEV_SECRETS_PATH_VAR: &str = "VAULTSECRETS_DEV_SECRETS_PATH";

// Older deployments still set these; consulted only when the primary name is unset
pub const LEGACY_ENABLE_VAULT_VAR: &str = "USE_VAULT";
pub const LEGACY_SECRETS_PATH_VAR: &str = "VAULT_SECRETS_PATH";
pub const LEGACY_ENABLE_TELEMETRY_VAR: &str = "VAULTSECRETS_ENABLE_DATADOG";

// Telemetry tag context
pub const TELEMETRY_ENV_VAR: &str = "DD_ENV";
pub const TELEMETRY_SERVICE_VAR: &str = "DD_SERVICE";

// Defaults
pub const DEFAULT_SECRETS_PATH: &str = "/vault/secrets/secrets";
pub const DEFAULT_DEV_SECRETS_PATH: &str = "de_secrets.env";

// Injected file envelope
pub const ENVELOPE_KEY: &str = "data";
pub const MAX_ENVELOPE_UNWRAPS: usize = 2;

// Usage metric
pub const USAGE_METRIC: &str = "vault.secrets.usage";
pub const SECRET_KEY_TAG: &str = "secret_key";
pub const ENV_TAG: &str = "env";
pub const SERVICE_TAG: &str = "service";
