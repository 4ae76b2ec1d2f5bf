// =========================================================================
// FALSIFY-MC: classification metrics contract
//
// The confusion matrix is the single source for accuracy and the per-class
// figures, so its margins must agree with the raw label counts.
//
// References:
//   - Sokolova & Lapalme (2009) "A systematic analysis of performance measures"
// =========================================================================

use super::*;
use StatusLabel::{Buruk, Kurang, Normal};

fn labels() -> (Vec<StatusLabel>, Vec<StatusLabel>) {
    let y_true = vec![Normal, Normal, Normal, Kurang, Kurang, Buruk, Buruk, Normal];
    let y_pred = vec![Normal, Kurang, Normal, Kurang, Buruk, Buruk, Normal, Normal];
    (y_pred, y_true)
}

/// FALSIFY-MC-001: Accuracy in [0, 1]
#[test]
fn falsify_mc_001_accuracy_bounded() {
    let (y_pred, y_true) = labels();
    let acc = accuracy(&y_pred, &y_true).expect("accuracy");
    assert!(
        (0.0..=1.0).contains(&acc),
        "FALSIFIED MC-001: accuracy={acc} not in [0, 1]"
    );
}

/// FALSIFY-MC-002: Perfect predictions give accuracy 1.0
#[test]
fn falsify_mc_002_perfect_accuracy() {
    let (_, y) = labels();
    let acc = accuracy(&y, &y).expect("accuracy");
    assert!(
        (acc - 1.0).abs() < 1e-12,
        "FALSIFIED MC-002: accuracy={acc} for perfect predictions, expected 1.0"
    );
}

/// FALSIFY-MC-003: Row sums equal per-class true counts
#[test]
fn falsify_mc_003_row_sums_are_support() {
    let (y_pred, y_true) = labels();
    let cm = confusion_matrix(&y_pred, &y_true, &StatusLabel::CANONICAL).expect("cm");
    for (i, label) in StatusLabel::CANONICAL.iter().enumerate() {
        let expected = y_true.iter().filter(|&l| l == label).count();
        assert_eq!(
            cm.row_sum(i),
            expected,
            "FALSIFIED MC-003: row {i} ({label}) sums to {}, expected {expected}",
            cm.row_sum(i)
        );
    }
}

/// FALSIFY-MC-004: Trace equals accuracy x total
#[test]
fn falsify_mc_004_trace_matches_accuracy() {
    let (y_pred, y_true) = labels();
    let cm = confusion_matrix(&y_pred, &y_true, &StatusLabel::CANONICAL).expect("cm");
    let acc = accuracy(&y_pred, &y_true).expect("accuracy");
    let implied = acc * cm.total() as f64;
    assert!(
        (implied - cm.trace() as f64).abs() < 1e-9,
        "FALSIFIED MC-004: trace={} but accuracy x total={implied}",
        cm.trace()
    );
}

/// FALSIFY-MC-005: Per-class ratios in [0, 1]
#[test]
fn falsify_mc_005_per_class_bounded() {
    let (y_pred, y_true) = labels();
    let cm = confusion_matrix(&y_pred, &y_true, &StatusLabel::CANONICAL).expect("cm");
    for m in per_class_metrics(&cm, &StatusLabel::CANONICAL).expect("metrics") {
        for (name, v) in [
            ("sensitivity", m.sensitivity),
            ("specificity", m.specificity),
            ("precision", m.precision),
            ("f1", m.f1),
        ] {
            assert!(
                (0.0..=1.0).contains(&v),
                "FALSIFIED MC-005: {} {name}={v} not in [0, 1]",
                m.label
            );
        }
    }
}
