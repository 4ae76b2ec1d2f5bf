// =========================================================================
// FALSIFY-PN: min-max normalization contract
//
// The LVQ codebook and the KNN reference set are only comparable with a
// query when all three pass through the same fitted scaler, so the scaler
// must be bounded, deterministic and invertible.
// =========================================================================

use super::*;
use crate::primitives::Matrix;
use crate::traits::Transformer;

/// FALSIFY-PN-001: Training data maps into [0, 1]
#[test]
fn falsify_pn_001_minmax_scaler_bounded() {
    let x = Matrix::from_vec(
        5,
        2,
        vec![
            -10.0, 100.0, 0.0, 200.0, 10.0, 300.0, 20.0, 400.0, 30.0, 500.0,
        ],
    )
    .expect("valid");

    let mut scaler = MinMaxScaler::new();
    let transformed = scaler.fit_transform(&x).expect("fit_transform");

    for (idx, &v) in transformed.as_slice().iter().enumerate() {
        assert!(
            (-1e-12..=1.0 + 1e-12).contains(&v),
            "FALSIFIED PN-001: value[{idx}]={v} outside [0, 1]"
        );
    }
}

/// FALSIFY-PN-002: Output shape preserved
#[test]
fn falsify_pn_002_shape_preserved() {
    let x = Matrix::from_vec(4, 3, (1..=12).map(f64::from).collect()).expect("valid");

    let mut scaler = MinMaxScaler::new();
    let transformed = scaler.fit_transform(&x).expect("fit_transform");
    assert_eq!(
        transformed.shape(),
        x.shape(),
        "FALSIFIED PN-002: shape changed"
    );
}

/// FALSIFY-PN-003: Same fitted state and input give bit-identical output
#[test]
fn falsify_pn_003_transform_reproducible() {
    let x = Matrix::from_vec(3, 3, vec![9.1, 71.3, 13.2, 7.7, 66.0, 11.9, 12.4, 88.8, 15.1])
        .expect("valid");

    let mut scaler = MinMaxScaler::new();
    scaler.fit(&x).expect("fit");
    let first = scaler.transform(&x).expect("transform");
    let second = scaler.transform(&x).expect("transform");
    for (a, b) in first.as_slice().iter().zip(second.as_slice()) {
        assert_eq!(
            a.to_bits(),
            b.to_bits(),
            "FALSIFIED PN-003: transform is not bit-reproducible"
        );
    }
}

/// FALSIFY-PN-004: inverse_transform(transform(v)) == v for fitted rows
#[test]
fn falsify_pn_004_roundtrip() {
    let x = Matrix::from_vec(3, 3, vec![9.1, 71.3, 13.2, 7.7, 66.0, 11.9, 12.4, 88.8, 15.1])
        .expect("valid");

    let mut scaler = MinMaxScaler::new();
    scaler.fit(&x).expect("fit");
    for row in x.rows() {
        let scaled = scaler.transform_row(row).expect("transform");
        let back = scaler.inverse_transform_row(&scaled).expect("inverse");
        for (a, b) in back.iter().zip(row) {
            assert!(
                (a - b).abs() < 1e-9,
                "FALSIFIED PN-004: roundtrip {b} -> {a}"
            );
        }
    }
}
