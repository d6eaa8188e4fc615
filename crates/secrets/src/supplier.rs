//! Developer-mode secrets suppliers
//!
//! When the injected file is not in use, secrets come from whatever the
//! surrounding application wires in as a [`SecretsSupplier`]. The mapping a
//! supplier returns is used verbatim; no decoding is applied.

use std::path::{Path, PathBuf};
use vaultsecrets_config::Configuration;
use vaultsecrets_core::{secrets_from_pairs, Error, Result, SecretValue, SecretsMap};

/// Capability that provides a mapping of secret name to value
pub trait SecretsSupplier: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Produce the full secrets mapping.
    ///
    /// # Errors
    /// Returns [`Error::SourceUnavailable`] when the supplier cannot produce
    /// its mapping.
    fn supply(&self) -> Result<SecretsMap>;
}

/// Supplier holding an in-process mapping
#[derive(Debug, Clone, Default)]
pub struct StaticSupplier {
    secrets: SecretsMap,
}

impl StaticSupplier {
    pub fn new(secrets: SecretsMap) -> Self {
        Self { secrets }
    }

    /// Build from string name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(secrets_from_pairs(pairs))
    }
}

impl SecretsSupplier for StaticSupplier {
    fn name(&self) -> &str {
        "static"
    }

    fn supply(&self) -> Result<SecretsMap> {
        Ok(self.secrets.clone())
    }
}

/// Supplier backed by a closure
pub struct FnSupplier<F> {
    name: String,
    supply: F,
}

impl<F> FnSupplier<F>
where
    F: Fn() -> Result<SecretsMap> + Send + Sync,
{
    pub fn new(name: impl Into<String>, supply: F) -> Self {
        Self {
            name: name.into(),
            supply,
        }
    }
}

impl<F> SecretsSupplier for FnSupplier<F>
where
    F: Fn() -> Result<SecretsMap> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn supply(&self) -> Result<SecretsMap> {
        (self.supply)()
    }
}

/// Supplier reading a local `NAME=value` file in dotenv syntax.
///
/// Names beginning with `_` are private to the file and are not exposed.
#[derive(Debug, Clone)]
pub struct DotenvSupplier {
    path: PathBuf,
    name: String,
}

impl DotenvSupplier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Read from the configured developer override path
    pub fn from_config(config: &Configuration) -> Self {
        Self::new(config.dev_secrets_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretsSupplier for DotenvSupplier {
    fn name(&self) -> &str {
        &self.name
    }

    fn supply(&self) -> Result<SecretsMap> {
        let entries = dotenv::from_path_iter(&self.path).map_err(|e| {
            Error::source_unavailable_with_source(
                &self.name,
                "failed to open developer secrets file",
                e,
            )
        })?;

        let mut secrets = SecretsMap::new();
        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                Error::source_unavailable_with_source(
                    &self.name,
                    "failed to parse developer secrets file",
                    e,
                )
            })?;
            if key.starts_with('_') {
                continue;
            }
            secrets.insert(key, SecretValue::String(value));
        }

        tracing::debug!(path = %self.path.display(), count = secrets.len(), "Loaded developer secrets");
        Ok(secrets)
    }
}
