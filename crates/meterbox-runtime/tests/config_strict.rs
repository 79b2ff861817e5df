#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use meterbox_core::DEFAULT_BUCKETS;
use meterbox_runtime::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
metrics:
  counters:
    - name: "requests_total"
      lables: [method] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.logging.level, "info");
    assert!(cfg.logging.count_events);
    assert_eq!(cfg.logging.count_metric, "log_count");
    assert!(cfg.metrics.counters.is_empty());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
logging:
  level: debug
  count_events: false
metrics:
  counters:
    - name: http_requests_total
      help: "HTTP requests."
      labels: [method, status]
  gauges:
    - name: inflight_requests
  histograms:
    - name: request_seconds
      labels: [route]
      buckets: [0.1, 0.5, 1]
    - name: db_seconds
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.logging.level, "debug");
    assert!(!cfg.logging.count_events);

    let c = &cfg.metrics.counters[0];
    assert_eq!(c.name, "http_requests_total");
    assert_eq!(c.help, "HTTP requests.");
    assert_eq!(c.labels, vec!["method", "status"]);

    assert!(cfg.metrics.gauges[0].labels.is_empty());
    assert_eq!(cfg.metrics.histograms[0].buckets, vec![0.1, 0.5, 1.0]);
    assert_eq!(cfg.metrics.histograms[1].buckets, DEFAULT_BUCKETS.to_vec());
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn bad_logging_level() {
    let bad = r#"
version: 1
logging:
  level: loud
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn duplicate_metric_names_in_file() {
    let bad = r#"
version: 1
metrics:
  counters:
    - name: jobs
  histograms:
    - name: jobs
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn missing_file() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "INTERNAL");
}
