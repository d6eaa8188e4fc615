//! Lazy, usage-tracked access to secrets injected by a secrets agent.
//!
//! Services running next to a Vault agent (or a similar sidecar) find their
//! credentials in a single file that may be plain JSON, base64 of JSON, or
//! JSON wrapped in `{"data": ...}` envelopes. In local development the same
//! names come from a developer override instead. This crate hides both
//! behind [`LazySecrets`]:
//!
//! ```no_run
//! let secrets = vaultsecrets::secrets();
//! let token = secrets.get_str("SUPER_SECRET_KEY")?;
//! # Ok::<(), vaultsecrets::Error>(())
//! ```
//!
//! Nothing is read until the first lookup, and each lookup of a known secret
//! increments the `vault.secrets.usage` counter tagged with its name, so
//! operators can spot credentials nobody uses before rotating them out.

pub mod decode;
pub mod proxy;
pub mod resolver;
pub mod supplier;

use once_cell::sync::Lazy;
use std::sync::Arc;

pub use decode::{decode_payload, is_base64, parse_json_secrets, unwrap_envelope};
pub use proxy::{is_reserved, LazySecrets, RESERVED_NAMES};
pub use resolver::{read_injected_file, resolve, SecretsResolver, SecretsSource};
pub use supplier::{DotenvSupplier, FnSupplier, SecretsSupplier, StaticSupplier};
pub use vaultsecrets_config::Configuration;
pub use vaultsecrets_core::{Error, Result, SecretValue, SecretsMap};
pub use vaultsecrets_telemetry::{
    NoopSink, PrometheusSink, Tag, TelemetrySink, TracingSink, UsageReporter,
};

static GLOBAL_SECRETS: Lazy<LazySecrets> = Lazy::new(|| {
    let config = Configuration::from_env();
    let supplier = Arc::new(DotenvSupplier::from_config(&config));
    let sink = Arc::new(PrometheusSink::with_default_registry());
    LazySecrets::from_config(config, supplier, sink)
});

/// Process-wide secrets.
///
/// Configuration is read from the environment on the first call to this
/// function; the secrets themselves on the first lookup. Usage counters are
/// registered in the default Prometheus registry.
pub fn secrets() -> &'static LazySecrets {
    &GLOBAL_SECRETS
}
