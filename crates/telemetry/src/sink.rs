//! Telemetry sinks
//!
//! A sink receives counter increments. Sinks are allowed to fail; callers
//! that must stay available route increments through
//! [`UsageReporter`](crate::UsageReporter) instead of calling a sink directly.

use parking_lot::Mutex;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use std::fmt;
use vaultsecrets_core::{Error, Result};

/// A `key:value` tag attached to a counter increment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

/// Capability to increment a named counter with tags
pub trait TelemetrySink: Send + Sync {
    /// Increment `metric` by `value`.
    ///
    /// # Errors
    /// Returns an error when the metric cannot be recorded. Callers decide
    /// whether that is fatal.
    fn increment(&self, metric: &str, value: u64, tags: &[Tag]) -> Result<()>;
}

/// Sink that discards every increment
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn increment(&self, _metric: &str, _value: u64, _tags: &[Tag]) -> Result<()> {
        Ok(())
    }
}

/// Sink that turns increments into `tracing` debug events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn increment(&self, metric: &str, value: u64, tags: &[Tag]) -> Result<()> {
        let tags = tags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        tracing::debug!(metric = %metric, value = value, tags = %tags, "metric_increment");
        Ok(())
    }
}

/// Counter family plus the label names it was registered with
struct RegisteredCounter {
    counter: CounterVec,
    label_names: Vec<String>,
}

/// Sink backed by a Prometheus registry.
///
/// Each distinct metric becomes one `CounterVec` whose label names are the
/// tag keys seen on its first increment. Later increments must use the same
/// tag keys in the same order.
pub struct PrometheusSink {
    registry: Registry,
    counters: Mutex<HashMap<String, RegisteredCounter>>,
}

impl PrometheusSink {
    /// Create a sink with its own registry
    pub fn new() -> Self {
        Self::with_registry(Registry::new())
    }

    /// Create a sink that registers counters in an existing registry
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Create a sink that registers counters in the process-wide default registry
    pub fn with_default_registry() -> Self {
        Self::with_registry(prometheus::default_registry().clone())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Snapshot of every metric family in the registry
    pub fn gather(&self) -> Vec<prometheus::proto::MetricFamily> {
        self.registry.gather()
    }

    /// Render every registered metric in the Prometheus text format
    pub fn encode_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.gather(), &mut buffer)
            .map_err(|e| Error::telemetry_failure("*", format!("failed to encode metrics: {e}")))?;
        String::from_utf8(buffer)
            .map_err(|e| Error::telemetry_failure("*", format!("metrics are not UTF-8: {e}")))
    }

    /// Current value of `metric` for the given label values, if registered
    pub fn counter_value(&self, metric: &str, label_values: &[&str]) -> Option<f64> {
        let counters = self.counters.lock();
        let registered = counters.get(&metric_name(metric))?;
        registered
            .counter
            .get_metric_with_label_values(label_values)
            .ok()
            .map(|c| c.get())
    }

    fn counter_for(&self, name: &str, tags: &[Tag]) -> Result<CounterVec> {
        let label_names: Vec<String> = tags.iter().map(|t| t.key.clone()).collect();
        let mut counters = self.counters.lock();

        if let Some(registered) = counters.get(name) {
            if registered.label_names != label_names {
                return Err(Error::telemetry_failure(
                    name,
                    format!(
                        "tag keys {:?} do not match registered labels {:?}",
                        label_names, registered.label_names
                    ),
                ));
            }
            return Ok(registered.counter.clone());
        }

        let labels: Vec<&str> = label_names.iter().map(String::as_str).collect();
        let counter = CounterVec::new(Opts::new(name, format!("Counter for {name}")), &labels)
            .map_err(|e| Error::telemetry_failure(name, e.to_string()))?;
        self.registry
            .register(Box::new(counter.clone()))
            .map_err(|e| Error::telemetry_failure(name, e.to_string()))?;

        counters.insert(
            name.to_string(),
            RegisteredCounter {
                counter: counter.clone(),
                label_names,
            },
        );
        Ok(counter)
    }
}

impl Default for PrometheusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for PrometheusSink {
    fn increment(&self, metric: &str, value: u64, tags: &[Tag]) -> Result<()> {
        let name = metric_name(metric);
        let counter = self.counter_for(&name, tags)?;
        let values: Vec<&str> = tags.iter().map(|t| t.value.as_str()).collect();
        counter
            .get_metric_with_label_values(&values)
            .map_err(|e| Error::telemetry_failure(&name, e.to_string()))?
            .inc_by(value as f64);
        Ok(())
    }
}

/// Map a dotted metric name onto the Prometheus name charset
fn metric_name(metric: &str) -> String {
    metric
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == ':' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
