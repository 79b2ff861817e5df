//! Histogram vector tests: registry accounting against JSON fixtures.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use meterbox_core::MetricsRegistry;

use vector_loader::{load, HISTOGRAM_VECTORS};

const TOLERANCE: f64 = 1e-6;

#[test]
fn histogram_vectors() {
    for f in HISTOGRAM_VECTORS {
        let v = load(f);
        let m = MetricsRegistry::new();
        m.register_histogram("test_histogram", "dummy", &v.bounds, &[])
            .expect("register");

        for obs in &v.observations {
            m.observe_histogram("test_histogram", *obs, &[]);
        }

        let got = m
            .histogram_value("test_histogram", &[])
            .expect("series must exist");
        assert_eq!(got.cumulative_counts(), v.expect.cumulative, "vector={}", v.description);
        assert_eq!(got.count, v.expect.count, "vector={}", v.description);
        assert!(
            (got.sum - v.expect.sum).abs() <= TOLERANCE,
            "vector={} sum={}",
            v.description,
            got.sum
        );

        let bounds: Vec<f64> = got.buckets.iter().map(|b| b.upper_bound).collect();
        assert_eq!(bounds, v.bounds, "vector={}", v.description);
    }
}

#[test]
fn labeled_histograms_are_independent() {
    let m = MetricsRegistry::new();
    m.register_histogram("latency", "dummy", &[1.0, 2.0, 3.0, 4.0], &["route"])
        .unwrap();

    for obs in [0.9, 1.5, 2.2, 2.7, 3.0, 3.4, 4.00001] {
        m.observe_histogram("latency", obs, &["/users"]);
    }
    m.observe_histogram("latency", 0.1, &["/health"]);

    let users = m.histogram_value("latency", &["/users"]).unwrap();
    assert_eq!(users.cumulative_counts(), vec![1, 2, 5, 6]);
    assert_eq!(users.count, 7);
    assert!((users.sum - 17.70001).abs() <= TOLERANCE);

    let health = m.histogram_value("latency", &["/health"]).unwrap();
    assert_eq!(health.cumulative_counts(), vec![1, 1, 1, 1]);
    assert_eq!(health.count, 1);
}
