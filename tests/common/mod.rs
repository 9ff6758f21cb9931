//! Common test utilities
#![allow(dead_code)]

use named_vec::{Component, NamedVector};
use ndarray::array;

/// Build the worked example: a 2x2 weight matrix followed by a scalar bias
pub fn weight_bias() -> NamedVector<f64> {
    NamedVector::from_components([
        ("weight", Component::from(array![[1.0, 2.0], [3.0, 4.0]])),
        ("bias", Component::from(5.0)),
    ])
    .unwrap()
}

/// Build a vector mixing every display rank: scalar, vector, matrix, cube
pub fn all_ranks() -> NamedVector<f64> {
    NamedVector::from_components([
        ("n", Component::from(1.0)),
        ("v", Component::from(array![2.0, 3.0])),
        ("m", Component::from(array![[4.0, 5.0], [6.0, 7.0]])),
        (
            "t",
            Component::from(array![[[8.0], [9.0]], [[10.0], [11.0]]]),
        ),
    ])
    .unwrap()
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
