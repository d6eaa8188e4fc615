//! Secrets resolution
//!
//! Decides where secrets come from and turns that source into a
//! [`SecretsMap`]:
//!
//! 1. With `vault_enabled` off, the developer supplier's mapping is returned
//!    verbatim and no file is touched.
//! 2. Otherwise the injected file is read, trimmed, stripped of a base64
//!    layer if present, parsed as JSON, and unwrapped from up to two
//!    `{"data": ...}` envelopes.
//!
//! The resolver holds no state between calls; every call produces a fresh
//! mapping.

use crate::decode::{decode_payload, parse_json_secrets};
use crate::supplier::{DotenvSupplier, SecretsSupplier};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vaultsecrets_config::Configuration;
use vaultsecrets_core::{Error, Result, SecretsMap};

/// Where a resolution reads its secrets from
#[derive(Clone)]
pub enum SecretsSource {
    /// In-process developer override
    DevModule(Arc<dyn SecretsSupplier>),
    /// File written by the secrets agent
    InjectedFile(PathBuf),
}

impl SecretsSource {
    /// Select the source. Only `vault_enabled` matters.
    pub fn select(config: &Configuration, supplier: Arc<dyn SecretsSupplier>) -> Self {
        if config.vault_enabled {
            SecretsSource::InjectedFile(config.secrets_path.clone())
        } else {
            SecretsSource::DevModule(supplier)
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SecretsSource::DevModule(supplier) => format!("dev supplier '{}'", supplier.name()),
            SecretsSource::InjectedFile(path) => format!("injected file '{}'", path.display()),
        }
    }

    /// Read the source into a secrets mapping
    pub fn load(&self) -> Result<SecretsMap> {
        match self {
            SecretsSource::DevModule(supplier) => {
                tracing::debug!(supplier = %supplier.name(), "Loading secrets from dev supplier");
                supplier.supply()
            }
            SecretsSource::InjectedFile(path) => read_injected_file(path),
        }
    }
}

impl std::fmt::Debug for SecretsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretsSource::DevModule(supplier) => f
                .debug_tuple("DevModule")
                .field(&supplier.name())
                .finish(),
            SecretsSource::InjectedFile(path) => f.debug_tuple("InjectedFile").field(path).finish(),
        }
    }
}

/// Read and decode an agent-injected secrets file
pub fn read_injected_file(path: &Path) -> Result<SecretsMap> {
    tracing::debug!(path = %path.display(), "Loading secrets from injected file");

    let bytes = std::fs::read(path).map_err(|e| {
        Error::source_unavailable_with_source(
            path.display().to_string(),
            "failed to read injected secrets file",
            e,
        )
    })?;
    let raw = String::from_utf8(bytes).map_err(|e| {
        Error::malformed_secrets_with_source("injected secrets file is not UTF-8 text", e)
    })?;

    parse_json_secrets(&decode_payload(&raw))
}

/// Resolve secrets for `config`, using `supplier` in developer mode
pub fn resolve(config: &Configuration, supplier: Arc<dyn SecretsSupplier>) -> Result<SecretsMap> {
    SecretsSource::select(config, supplier).load()
}

/// Resolver bound to a configuration and a developer supplier
#[derive(Clone)]
pub struct SecretsResolver {
    config: Configuration,
    supplier: Arc<dyn SecretsSupplier>,
}

impl SecretsResolver {
    pub fn new(config: Configuration, supplier: Arc<dyn SecretsSupplier>) -> Self {
        Self { config, supplier }
    }

    /// Resolver whose developer supplier reads `config.dev_secrets_path`
    pub fn from_config(config: Configuration) -> Self {
        let supplier = Arc::new(DotenvSupplier::from_config(&config));
        Self::new(config, supplier)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The source the next resolution will read
    pub fn source(&self) -> SecretsSource {
        SecretsSource::select(&self.config, self.supplier.clone())
    }

    /// Produce a fresh secrets mapping
    pub fn resolve(&self) -> Result<SecretsMap> {
        self.source().load()
    }
}

impl std::fmt::Debug for SecretsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsResolver")
            .field("config", &self.config)
            .field("supplier", &self.supplier.name())
            .finish()
    }
}
