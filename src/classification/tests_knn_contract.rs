// =========================================================================
// FALSIFY-KNN: weighted nearest-neighbour contract
//
// The vote must be a pure function of the reference set, the weights and
// the query: clamped k, positive weight scaling and repeated calls must
// never change the answer.
//
// References:
//   - Cover & Hart (1967) "Nearest Neighbor Pattern Classification"
// =========================================================================

use super::*;

fn reference() -> Vec<LabeledSample> {
    vec![
        LabeledSample::new([3.0, 50.0, 12.0], StatusLabel::Normal),
        LabeledSample::new([3.2, 52.0, 12.4], StatusLabel::Normal),
        LabeledSample::new([2.5, 48.0, 11.0], StatusLabel::Kurang),
        LabeledSample::new([2.3, 47.0, 10.2], StatusLabel::Kurang),
        LabeledSample::new([2.2, 46.5, 10.0], StatusLabel::Kurang),
        LabeledSample::new([1.8, 45.0, 9.0], StatusLabel::Buruk),
    ]
}

fn queries() -> Vec<FeatureVector> {
    vec![
        FeatureVector::anthropometric(3.1, 51.0, 12.1),
        FeatureVector::anthropometric(2.4, 47.2, 10.6),
        FeatureVector::anthropometric(1.9, 45.5, 9.1),
        FeatureVector::anthropometric(2.7, 49.0, 11.5),
    ]
}

/// FALSIFY-KNN-001: one prediction per query, always a reference label
#[test]
fn falsify_knn_001_predictions_from_reference_labels() {
    let mut knn = WeightedKnn::new(3);
    knn.fit(&reference()).expect("fit");
    let preds = knn.predict(&queries()).expect("predict");
    assert_eq!(preds.len(), 4, "FALSIFIED KNN-001: wrong prediction count");
    for (i, p) in preds.iter().enumerate() {
        assert!(
            reference().iter().any(|s| s.label == *p),
            "FALSIFIED KNN-001: prediction[{i}] = {p} not in reference"
        );
    }
}

/// FALSIFY-KNN-002: k >= reference size votes among everyone
#[test]
fn falsify_knn_002_clamping_gives_global_majority() {
    for k in [6, 7, 100] {
        let mut knn = WeightedKnn::new(k);
        knn.fit(&reference()).expect("fit");
        for q in queries() {
            assert_eq!(
                knn.predict_one(&q).expect("predict"),
                StatusLabel::Kurang,
                "FALSIFIED KNN-002: k={k} did not return the global majority"
            );
        }
    }
}

/// FALSIFY-KNN-003: positive weight scaling preserves labels
#[test]
fn falsify_knn_003_weight_scale_invariance() {
    let base = FeatureWeights::anthropometric(0.35, 0.30, 0.15);
    let mut reference_knn = WeightedKnn::new(3).with_weights(base.clone());
    reference_knn.fit(&reference()).expect("fit");
    let expected = reference_knn.predict(&queries()).expect("predict");

    for c in [0.25, 2.0, 8.0, 1024.0] {
        let mut knn = WeightedKnn::new(3).with_weights(base.scaled(c));
        knn.fit(&reference()).expect("fit");
        assert_eq!(
            knn.predict(&queries()).expect("predict"),
            expected,
            "FALSIFIED KNN-003: scaling weights by {c} changed labels"
        );
    }
}

/// FALSIFY-KNN-004: deterministic predictions
#[test]
fn falsify_knn_004_deterministic() {
    let mut knn = WeightedKnn::new(2);
    knn.fit(&reference()).expect("fit");
    let p1 = knn.predict(&queries()).expect("predict 1");
    let p2 = knn.predict(&queries()).expect("predict 2");
    assert_eq!(p1, p2, "FALSIFIED KNN-004: predictions differ on same input");
}
