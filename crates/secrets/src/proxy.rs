//! Lazy, usage-tracked access to resolved secrets
//!
//! [`LazySecrets`] wraps a deferred resolution. Nothing is read when the
//! proxy is built; the first lookup of a non-reserved name runs the loader
//! exactly once, even when many threads race on it. From then on every
//! lookup of a known secret reports one usage increment before returning the
//! value.
//!
//! A failed resolution is kept as well: later lookups receive the same error
//! and the loader is not run again. A process that cannot resolve its
//! secrets is expected to be restarted.

use crate::resolver::SecretsResolver;
use crate::supplier::SecretsSupplier;
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;
use vaultsecrets_config::Configuration;
use vaultsecrets_core::{Error, Result, SecretValue, SecretsMap};
use vaultsecrets_telemetry::{TelemetrySink, UsageReporter};

/// Names of the proxy's own state. Lookups of these never resolve or report.
pub const RESERVED_NAMES: &[&str] = &["_keys", "_loaded", "_loader", "_env", "_service"];

/// Whether `name` refers to internal proxy state
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

type Loader = Box<dyn Fn() -> Result<SecretsMap> + Send + Sync>;

/// Resolved state: the known keys and their values
struct LoadedSecrets {
    keys: HashSet<String>,
    values: SecretsMap,
}

impl From<SecretsMap> for LoadedSecrets {
    fn from(values: SecretsMap) -> Self {
        Self {
            keys: values.keys().cloned().collect(),
            values,
        }
    }
}

/// Lazily resolved secrets with per-key usage telemetry
pub struct LazySecrets {
    loader: Loader,
    state: OnceCell<Result<LoadedSecrets>>,
    reporter: UsageReporter,
}

impl LazySecrets {
    /// Wrap a zero-argument loader. The loader is not called here.
    ///
    /// The loader must not look up secrets on the proxy it is loading for.
    pub fn new<F>(loader: F, reporter: UsageReporter) -> Self
    where
        F: Fn() -> Result<SecretsMap> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            state: OnceCell::new(),
            reporter,
        }
    }

    /// Wire the resolver for `config` as the loader
    pub fn from_config(
        config: Configuration,
        supplier: Arc<dyn SecretsSupplier>,
        sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        let reporter = UsageReporter::from_config(&config, sink);
        let resolver = SecretsResolver::new(config, supplier);
        Self::new(move || resolver.resolve(), reporter)
    }

    /// Whether secrets have been resolved successfully. Never triggers loading.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state.get(), Some(Ok(_)))
    }

    /// Resolve now instead of on first lookup
    pub fn load(&self) -> Result<()> {
        self.loaded().map(|_| ())
    }

    /// Look up a secret, reporting one use of it.
    ///
    /// # Errors
    /// - [`Error::ReservedName`] for internal names, without resolving
    /// - the resolution error if secrets could not be loaded
    /// - [`Error::UnknownSecret`] if `name` is not a secret
    /// - [`Error::SecretUnavailable`] if `name` is known but has no value
    pub fn get(&self, name: &str) -> Result<&SecretValue> {
        if is_reserved(name) {
            return Err(Error::reserved_name(name));
        }

        let loaded = self.loaded()?;
        if !loaded.keys.contains(name) {
            return Err(Error::unknown_secret(name));
        }

        self.reporter.record(name, 1);

        loaded.values.get(name).ok_or_else(|| {
            tracing::error!(key = %name, "Requested secret could not be loaded");
            Error::secret_unavailable(name)
        })
    }

    /// Look up a secret as text.
    ///
    /// String values are returned as-is; any other JSON value is rendered
    /// compactly.
    pub fn get_str(&self, name: &str) -> Result<String> {
        Ok(match self.get(name)? {
            SecretValue::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Whether `name` is a known secret. Resolves, but reports no usage.
    pub fn contains(&self, name: &str) -> Result<bool> {
        if is_reserved(name) {
            return Ok(false);
        }
        Ok(self.loaded()?.keys.contains(name))
    }

    /// Sorted names of all secrets. Resolves, but reports no usage.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.loaded()?.keys.iter().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn loaded(&self) -> Result<&LoadedSecrets> {
        self.state
            .get_or_init(|| self.resolve_once())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn resolve_once(&self) -> Result<LoadedSecrets> {
        let secrets = (self.loader)().map_err(|e| {
            tracing::error!(error = %e, "Failed to resolve secrets");
            e
        })?;
        let loaded = LoadedSecrets::from(secrets);

        tracing::info!(count = loaded.keys.len(), "Loaded secrets");

        // Zero baseline for every loaded key
        for key in &loaded.keys {
            self.reporter.record(key, 0);
        }

        Ok(loaded)
    }
}

impl std::fmt::Debug for LazySecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = match self.state.get() {
            Some(Ok(loaded)) => Some(loaded.keys.len()),
            _ => None,
        };
        f.debug_struct("LazySecrets")
            .field("loaded", &self.is_loaded())
            .field("count", &count)
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}
