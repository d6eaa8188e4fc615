//! Lazy proxy behaviour: telemetry, isolation from sink failures, concurrency

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use vaultsecrets::{
    Configuration, Error, LazySecrets, PrometheusSink, Result, StaticSupplier, Tag, TelemetrySink,
    UsageReporter,
};
use vaultsecrets_core::secrets_from_pairs;

struct AlwaysFailingSink {
    attempts: AtomicUsize,
}

impl TelemetrySink for AlwaysFailingSink {
    fn increment(&self, metric: &str, _value: u64, _tags: &[Tag]) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::telemetry_failure(metric, "statsd agent unreachable"))
    }
}

fn dev_config() -> Configuration {
    Configuration::builder()
        .environment("test")
        .service("proxy-tests")
        .build()
        .unwrap()
}

#[test]
fn test_usage_is_counted_per_key() {
    let sink = Arc::new(PrometheusSink::new());
    let supplier = Arc::new(StaticSupplier::from_pairs([
        ("API_KEY", "abc"),
        ("UNUSED_KEY", "zzz"),
    ]));
    let secrets = LazySecrets::from_config(dev_config(), supplier, sink.clone());

    secrets.get("API_KEY").unwrap();
    secrets.get("API_KEY").unwrap();
    secrets.get("API_KEY").unwrap();

    let labels = |key| ["test", "proxy-tests", key];
    assert_eq!(
        sink.counter_value("vault.secrets.usage", &labels("API_KEY")),
        Some(3.0)
    );
    // Baseline registered at load even though it was never read
    assert_eq!(
        sink.counter_value("vault.secrets.usage", &labels("UNUSED_KEY")),
        Some(0.0)
    );
}

#[test]
fn test_keys_and_contains_report_no_usage() {
    let sink = Arc::new(PrometheusSink::new());
    let supplier = Arc::new(StaticSupplier::from_pairs([("API_KEY", "abc")]));
    let secrets = LazySecrets::from_config(dev_config(), supplier, sink.clone());

    assert!(secrets.contains("API_KEY").unwrap());
    assert_eq!(secrets.keys().unwrap(), vec!["API_KEY"]);

    assert_eq!(
        sink.counter_value("vault.secrets.usage", &["test", "proxy-tests", "API_KEY"]),
        Some(0.0)
    );
}

#[test]
fn test_failing_sink_never_breaks_access() {
    let sink = Arc::new(AlwaysFailingSink {
        attempts: AtomicUsize::new(0),
    });
    let supplier = Arc::new(StaticSupplier::from_pairs([
        ("API_KEY", "abc"),
        ("DB_PASSWORD", "hunter2"),
    ]));
    let secrets = LazySecrets::from_config(dev_config(), supplier, sink.clone());

    for _ in 0..5 {
        assert_eq!(secrets.get_str("API_KEY").unwrap(), "abc");
        assert_eq!(secrets.get_str("DB_PASSWORD").unwrap(), "hunter2");
    }

    // The first baseline increment fails and telemetry stays off afterwards
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn test_disabled_telemetry_sends_nothing() {
    let sink = Arc::new(AlwaysFailingSink {
        attempts: AtomicUsize::new(0),
    });
    let config = Configuration::builder()
        .telemetry_enabled(false)
        .build()
        .unwrap();
    let supplier = Arc::new(StaticSupplier::from_pairs([("API_KEY", "abc")]));
    let secrets = LazySecrets::from_config(config, supplier, sink.clone());

    assert_eq!(secrets.get_str("API_KEY").unwrap(), "abc");
    assert_eq!(sink.attempts.load(Ordering::SeqCst), 0);
}

#[test]
fn test_concurrent_first_access_resolves_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let secrets = LazySecrets::new(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            // Widen the window in which racing callers could double-load
            thread::sleep(Duration::from_millis(50));
            Ok(secrets_from_pairs([("SUPER_SECRET_KEY", "shhhhh!")]))
        },
        UsageReporter::disabled(),
    );

    let threads = 16;
    let barrier = Barrier::new(threads);
    thread::scope(|scope| {
        for _ in 0..threads {
            scope.spawn(|| {
                barrier.wait();
                assert_eq!(secrets.get_str("SUPER_SECRET_KEY").unwrap(), "shhhhh!");
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_usage_counts_every_access() {
    let sink = Arc::new(PrometheusSink::new());
    let supplier = Arc::new(StaticSupplier::from_pairs([("API_KEY", "abc")]));
    let secrets = LazySecrets::from_config(dev_config(), supplier, sink.clone());

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..25 {
                    secrets.get("API_KEY").unwrap();
                }
            });
        }
    });

    assert_eq!(
        sink.counter_value("vault.secrets.usage", &["test", "proxy-tests", "API_KEY"]),
        Some(200.0)
    );
}
