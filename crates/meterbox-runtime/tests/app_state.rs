#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use meterbox_core::MetricKind;
use meterbox_runtime::{app_state::AppState, config};

const CONFIG: &str = r#"
version: 1
metrics:
  counters:
    - name: http_requests_total
      labels: [method, status]
  gauges:
    - name: inflight_requests
  histograms:
    - name: request_seconds
      labels: [route]
      buckets: [0.1, 0.5, 1]
"#;

#[test]
fn registers_configured_families() {
    let state = AppState::new(config::load_from_str(CONFIG).unwrap()).expect("must build");
    let m = state.metrics();

    assert_eq!(m.len(), 4);
    assert_eq!(m.kind_of("http_requests_total"), Some(MetricKind::Counter));
    assert_eq!(m.kind_of("inflight_requests"), Some(MetricKind::Gauge));
    assert_eq!(m.kind_of("request_seconds"), Some(MetricKind::Histogram));
    assert_eq!(m.kind_of("log_count"), Some(MetricKind::Counter));
    assert_eq!(m.descriptor("log_count").unwrap().label_names, vec!["level"]);

    // Clones share one registry.
    let other = state.clone();
    other.metrics().count("http_requests_total", 1.0, &["GET", "200"]);
    assert_eq!(m.counter_value("http_requests_total", &["GET", "200"]), Some(1.0));
}

#[test]
fn log_counter_family_is_optional() {
    let cfg = config::load_from_str("version: 1\nlogging:\n  count_events: false\n").unwrap();
    let state = AppState::new(cfg).unwrap();
    assert!(state.metrics().is_empty());
}

#[test]
fn registration_errors_abort_startup() {
    let bad_buckets = r#"
version: 1
metrics:
  histograms:
    - name: h
      buckets: [2, 1]
"#;
    let err = AppState::new(config::load_from_str(bad_buckets).unwrap())
        .err()
        .expect("must fail");
    assert_eq!(err.code().as_str(), "INVALID_BUCKETS");

    let clash = r#"
version: 1
metrics:
  gauges:
    - name: log_count
"#;
    let err = AppState::new(config::load_from_str(clash).unwrap())
        .err()
        .expect("must fail");
    assert_eq!(err.code().as_str(), "DUPLICATE_NAME");

    let bad_label = r#"
version: 1
metrics:
  counters:
    - name: c
      labels: ["not valid"]
"#;
    let err = AppState::new(config::load_from_str(bad_label).unwrap())
        .err()
        .expect("must fail");
    assert_eq!(err.code().as_str(), "INVALID_LABELS");
}
