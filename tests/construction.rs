//! Integration tests for construction and layout bookkeeping
//!
//! Covers the contiguous partition of the flat buffer, insertion-order
//! preservation, construction errors, and the display format.

mod common;

use common::{all_ranks, weight_bias};
use named_vec::{named_vec, Component, Error, NamedVector};
use ndarray::array;

#[test]
fn test_worked_example() {
    let nv = weight_bias();
    assert_eq!(nv.len(), 5);
    assert_eq!(nv.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(
        nv.view("weight").unwrap(),
        array![[1.0, 2.0], [3.0, 4.0]].into_dyn()
    );
    assert_eq!(nv.scalar("bias").unwrap(), 5.0);
}

#[test]
fn test_partition_covers_buffer_without_gaps() {
    let nv = all_ranks();
    let entries: Vec<_> = nv.layout().entries().collect();

    assert_eq!(entries[0].start(), 0);
    for pair in entries.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
    assert_eq!(entries.last().unwrap().end(), nv.len());
}

#[test]
fn test_entry_sizes_match_registered_shapes() {
    let nv = all_ranks();
    for entry in nv.layout().entries() {
        let implied: usize = entry.shape().iter().product();
        assert_eq!(entry.len(), implied);
    }
}

#[test]
fn test_components_laid_out_in_supplied_order() {
    let nv = all_ranks();
    let names: Vec<_> = nv.names().collect();
    assert_eq!(names, ["n", "v", "m", "t"]);

    // Same components, different order: different offsets, different layout
    let reordered = NamedVector::from_components([
        ("bias", Component::from(5.0)),
        ("weight", Component::from(array![[1.0, 2.0], [3.0, 4.0]])),
    ])
    .unwrap();
    assert_eq!(reordered.as_slice(), &[5.0, 1.0, 2.0, 3.0, 4.0]);
    assert_ne!(reordered.layout(), weight_bias().layout());
}

#[test]
fn test_duplicate_name_fails_construction() {
    let result = NamedVector::from_components([
        ("x", Component::from(1.0)),
        ("x", Component::from(2.0)),
    ]);
    assert_eq!(
        result.unwrap_err(),
        Error::DuplicateName {
            name: "x".to_string()
        }
    );
}

#[test]
fn test_empty_construction_fails() {
    let result = NamedVector::<f64>::from_components(std::iter::empty::<(&str, Component<f64>)>());
    assert_eq!(result.unwrap_err(), Error::EmptyLayout);
}

#[test]
fn test_macro_matches_explicit_construction() {
    let from_macro = named_vec! {
        weight: array![[1.0, 2.0], [3.0, 4.0]],
        bias: 5.0,
    }
    .unwrap();
    assert_eq!(from_macro, weight_bias());
}

#[test]
fn test_vec_and_slice_components_are_rank_one() {
    let nv = NamedVector::from_components([
        ("a", Component::from(vec![1.0, 2.0])),
        ("b", Component::from(&[3.0, 4.0][..])),
    ])
    .unwrap();
    assert_eq!(nv.layout().get("a").unwrap().shape(), &[2]);
    assert_eq!(nv.layout().get("b").unwrap().shape(), &[2]);
    assert_eq!(nv.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_zero_sized_component() {
    let nv = NamedVector::from_components([
        ("empty", Component::from(ndarray::Array2::<f64>::zeros((0, 3)))),
        ("x", Component::from(7.0)),
    ])
    .unwrap();
    assert_eq!(nv.len(), 1);
    let e = nv.layout().get("empty").unwrap();
    assert_eq!((e.start(), e.end()), (0, 0));
    assert_eq!(nv.view("empty").unwrap().shape(), &[0, 3]);
    assert_eq!(nv.scalar("x").unwrap(), 7.0);
}

#[test]
fn test_display_reports_categories_and_ranges() {
    let text = all_ranks().to_string();
    assert!(text.starts_with("12-element NamedVector with layout:"));
    assert!(text.contains("n: Number [0-1)"));
    assert!(text.contains("v: 2-elements Vector [1-3)"));
    assert!(text.contains("m: Matrix [2, 2] [3-7)"));
    assert!(text.contains("t: Array [2, 2, 1] [7-12)"));
}

#[test]
fn test_queries() {
    let nv = weight_bias();
    assert_eq!(nv.shape(), &[5]);
    assert_eq!(nv.ndim(), 1);
    assert_eq!(nv.layout().len(), 2);
    assert!(nv.layout().contains("weight"));
    assert!(!nv.layout().contains("gradient"));
}
