//! Usage telemetry for resolved secrets
//!
//! The secrets core only needs one capability from a metrics client:
//! increment a named counter with tags. [`TelemetrySink`] expresses that
//! capability, and [`UsageReporter`] wraps any sink so that a failing sink
//! can never break secret access.

pub mod reporter;
pub mod sink;

pub use reporter::UsageReporter;
pub use sink::{NoopSink, PrometheusSink, Tag, TelemetrySink, TracingSink};
