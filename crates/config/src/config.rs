//! Resolved configuration consumed by the secrets core
//!
//! A [`Configuration`] is immutable once built and is cheap to clone, so the
//! resolver and the lazy proxy can each hold their own copy.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vaultsecrets_core::{
    constants::{DEFAULT_DEV_SECRETS_PATH, DEFAULT_SECRETS_PATH},
    Error, Result,
};

/// Settings that decide where secrets come from and whether their use is reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Read the agent-injected file instead of the developer override
    pub vault_enabled: bool,

    /// Absolute path of the agent-injected secrets file
    pub secrets_path: PathBuf,

    /// Report per-key usage counters
    pub telemetry_enabled: bool,

    /// Developer override file used when `vault_enabled` is false
    pub dev_secrets_path: PathBuf,

    /// Deployment environment tag attached to usage counters
    #[serde(default)]
    pub environment: Option<String>,

    /// Service tag attached to usage counters
    #[serde(default)]
    pub service: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            vault_enabled: false,
            secrets_path: PathBuf::from(DEFAULT_SECRETS_PATH),
            telemetry_enabled: true,
            dev_secrets_path: PathBuf::from(DEFAULT_DEV_SECRETS_PATH),
            environment: None,
            service: None,
        }
    }
}

impl Configuration {
    /// Start building a configuration from the documented defaults
    #[must_use]
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    /// Path of the file the resolver reads in agent mode
    pub fn secrets_path(&self) -> &Path {
        &self.secrets_path
    }

    /// Human-readable name of the source the resolver will select
    pub fn source_description(&self) -> String {
        if self.vault_enabled {
            format!("injected file {}", self.secrets_path.display())
        } else {
            format!("developer override {}", self.dev_secrets_path.display())
        }
    }
}

/// Builder for [`Configuration`]
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    /// Create a builder seeded with defaults
    pub fn new() -> Self {
        Self {
            config: Configuration::default(),
        }
    }

    pub fn vault_enabled(mut self, enabled: bool) -> Self {
        self.config.vault_enabled = enabled;
        self
    }

    pub fn secrets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.secrets_path = path.into();
        self
    }

    pub fn telemetry_enabled(mut self, enabled: bool) -> Self {
        self.config.telemetry_enabled = enabled;
        self
    }

    pub fn dev_secrets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dev_secrets_path = path.into();
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.config.environment = Some(environment.into());
        self
    }

    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.config.service = Some(service.into());
        self
    }

    /// Build the configuration, rejecting empty paths
    pub fn build(self) -> Result<Configuration> {
        if self.config.vault_enabled && self.config.secrets_path.as_os_str().is_empty() {
            return Err(Error::configuration(
                "secrets path must not be empty when vault is enabled",
            ));
        }
        if !self.config.vault_enabled && self.config.dev_secrets_path.as_os_str().is_empty() {
            return Err(Error::configuration(
                "dev secrets path must not be empty when vault is disabled",
            ));
        }
        Ok(self.config)
    }
}
