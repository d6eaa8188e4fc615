//! Failure-isolating usage reporter
//!
//! Secret reads must succeed even when metrics do not. The reporter keeps an
//! atomic enable flag: the first sink error flips it off, logs one warning,
//! and every later record becomes a no-op for the rest of the process.

use crate::sink::{NoopSink, Tag, TelemetrySink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use vaultsecrets_config::Configuration;
use vaultsecrets_core::constants::{ENV_TAG, SECRET_KEY_TAG, SERVICE_TAG, USAGE_METRIC};

/// Reports per-secret usage counters to a [`TelemetrySink`]
pub struct UsageReporter {
    sink: Arc<dyn TelemetrySink>,
    enabled: AtomicBool,
    environment: String,
    service: String,
}

impl UsageReporter {
    /// Create an enabled reporter with empty `env` and `service` tags
    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Self {
            sink,
            enabled: AtomicBool::new(true),
            environment: String::new(),
            service: String::new(),
        }
    }

    /// Create a reporter that never records anything
    pub fn disabled() -> Self {
        Self {
            sink: Arc::new(NoopSink),
            enabled: AtomicBool::new(false),
            environment: String::new(),
            service: String::new(),
        }
    }

    /// Create a reporter honoring `telemetry_enabled` and the tag context
    pub fn from_config(config: &Configuration, sink: Arc<dyn TelemetrySink>) -> Self {
        if !config.telemetry_enabled {
            return Self::disabled();
        }
        Self::new(sink).with_tags(
            config.environment.clone().unwrap_or_default(),
            config.service.clone().unwrap_or_default(),
        )
    }

    /// Set the `env` and `service` tags sent with every increment
    #[must_use]
    pub fn with_tags(mut self, environment: impl Into<String>, service: impl Into<String>) -> Self {
        self.environment = environment.into();
        self.service = service.into();
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Record `value` uses of secret `key`.
    ///
    /// Never fails. A sink error disables the reporter permanently.
    pub fn record(&self, key: &str, value: u64) {
        if !self.is_enabled() {
            return;
        }

        let tags = [
            Tag::new(ENV_TAG, self.environment.as_str()),
            Tag::new(SERVICE_TAG, self.service.as_str()),
            Tag::new(SECRET_KEY_TAG, key),
        ];

        if let Err(e) = self.sink.increment(USAGE_METRIC, value, &tags) {
            // Only the caller that flips the flag logs
            if self.enabled.swap(false, Ordering::AcqRel) {
                tracing::warn!(
                    metric = USAGE_METRIC,
                    error = %e,
                    "Secret usage telemetry failed; disabling telemetry for this process"
                );
            }
        }
    }
}

impl std::fmt::Debug for UsageReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageReporter")
            .field("enabled", &self.is_enabled())
            .field("environment", &self.environment)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
