//! Pure bucket accounting and bound validation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use meterbox_core::metric::{accumulate, bucket_index, validate_bounds};
use meterbox_core::DEFAULT_BUCKETS;

const BOUNDS: [f64; 4] = [1.0, 2.0, 3.0, 4.0];

#[test]
fn index_is_first_bound_at_or_above_value() {
    assert_eq!(bucket_index(&BOUNDS, 0.5), 0);
    assert_eq!(bucket_index(&BOUNDS, 1.0), 0);
    assert_eq!(bucket_index(&BOUNDS, 1.0000001), 1);
    assert_eq!(bucket_index(&BOUNDS, 3.0), 2);
    assert_eq!(bucket_index(&BOUNDS, 4.0), 3);
    assert_eq!(bucket_index(&BOUNDS, 4.00001), 4);
    assert_eq!(bucket_index(&BOUNDS, f64::INFINITY), 4);
    assert_eq!(bucket_index(&BOUNDS, f64::NEG_INFINITY), 0);
}

#[test]
fn nan_only_counts_toward_inf() {
    assert_eq!(bucket_index(&BOUNDS, f64::NAN), BOUNDS.len());

    let mut counts = [0u64; 5];
    accumulate(&BOUNDS, &mut counts, f64::NAN);
    assert_eq!(counts, [0, 0, 0, 0, 1]);
}

#[test]
fn accumulate_is_cumulative_with_inf_slot() {
    let mut counts = [0u64; 5];
    accumulate(&BOUNDS, &mut counts, 2.5);
    assert_eq!(counts, [0, 0, 1, 1, 1]);

    accumulate(&BOUNDS, &mut counts, 0.1);
    assert_eq!(counts, [1, 1, 2, 2, 2]);

    accumulate(&BOUNDS, &mut counts, 99.0);
    assert_eq!(counts, [1, 1, 2, 2, 3]);
}

#[test]
fn validate_bounds_rejects_bad_input() {
    assert!(validate_bounds(&BOUNDS).is_ok());
    assert!(validate_bounds(&DEFAULT_BUCKETS).is_ok());
    assert!(validate_bounds(&[-1.0, 0.0]).is_ok());

    for bad in [
        vec![],
        vec![1.0, 1.0],
        vec![2.0, 1.0],
        vec![1.0, f64::INFINITY],
        vec![f64::NAN],
    ] {
        let err = validate_bounds(&bad).expect_err("must fail");
        assert_eq!(err.code().as_str(), "INVALID_BUCKETS", "bounds={bad:?}");
    }
}
