use super::*;
use crate::config::FeatureWeights;

fn separable(n_per_class: usize) -> Vec<LabeledSample> {
    let mut dataset = Vec::new();
    for i in 0..n_per_class {
        let d = i as f64 * 0.02;
        dataset.push(LabeledSample::new([3.0 + d, 50.0 + d, 12.0 + d], StatusLabel::Normal));
        dataset.push(LabeledSample::new([2.5 + d, 48.0 + d, 11.0 + d], StatusLabel::Kurang));
        dataset.push(LabeledSample::new([1.8 + d, 45.0 + d, 9.0 + d], StatusLabel::Buruk));
    }
    dataset
}

/// Kurang and buruk interleave, so some folds misclassify.
fn overlapping(n_per_class: usize) -> Vec<LabeledSample> {
    let mut dataset = Vec::new();
    for i in 0..n_per_class {
        let d = i as f64 * 0.1;
        dataset.push(LabeledSample::new([3.0 + d, 50.0, 12.0], StatusLabel::Normal));
        dataset.push(LabeledSample::new([2.0 + d, 47.0, 10.0], StatusLabel::Kurang));
        dataset.push(LabeledSample::new([2.05 + d, 47.0, 10.0], StatusLabel::Buruk));
    }
    dataset
}

fn seeded(folds: usize) -> EvaluationOptions {
    EvaluationOptions::default()
        .with_folds(folds)
        .with_random_state(7)
}

#[test]
fn test_options_default() {
    let options = EvaluationOptions::default();
    assert_eq!(options.folds, 5);
    assert!(options.random_state.is_none());
    let parsed: EvaluationOptions = serde_json::from_str(r#"{"folds":3}"#).expect("parse");
    assert_eq!(parsed, EvaluationOptions::default().with_folds(3));
}

#[test]
fn test_evaluate_separable_is_perfect() {
    let result = evaluate(&separable(10), &ClassifierConfig::default(), &seeded(5)).expect("evaluate");

    assert!((result.accuracy - 1.0).abs() < 1e-12);
    assert_eq!(result.cv.scores.len(), 5);
    assert!((result.cv_mean() - 1.0).abs() < 1e-12);
    assert!(result.cv_std().abs() < 1e-12);
    assert_eq!(result.classes, StatusLabel::CANONICAL.to_vec());
    assert_eq!(result.n_held_out, 6);
    assert_eq!(result.confusion_matrix.trace(), 6);
    for m in &result.per_class {
        assert!((m.f1 - 1.0).abs() < 1e-12);
        assert!((m.specificity - 1.0).abs() < 1e-12);
        assert_eq!(m.support, 2);
    }
    assert!((result.macro_avg.sensitivity - 1.0).abs() < 1e-12);
}

#[test]
fn test_confusion_matrix_margins_match_held_out() {
    let dataset = overlapping(12);
    let result = evaluate(&dataset, &ClassifierConfig::default(), &seeded(4)).expect("evaluate");

    assert_eq!(result.confusion_matrix.total(), result.n_held_out);
    // Round-robin dealing gives every class 3 of its 12 samples per fold.
    for i in 0..3 {
        assert_eq!(result.confusion_matrix.row_sum(i), 3);
    }
    let implied = result.accuracy * result.n_held_out as f64;
    assert!((implied - result.confusion_matrix.trace() as f64).abs() < 1e-9);
    for score in &result.cv.scores {
        assert!((0.0..=1.0).contains(score));
    }
    assert_eq!(result.cv.scores[0], result.accuracy);
}

#[test]
fn test_evaluate_seeded_is_reproducible() {
    let dataset = overlapping(10);
    let config = ClassifierConfig::new(5, FeatureWeights::anthropometric(0.6, 0.2, 0.2));
    let a = evaluate(&dataset, &config, &seeded(5)).expect("a");
    let b = evaluate(&dataset, &config, &seeded(5)).expect("b");
    assert_eq!(a, b);
}

#[test]
fn test_evaluate_empty_dataset() {
    assert!(matches!(
        evaluate(&[], &ClassifierConfig::default(), &EvaluationOptions::default()),
        Err(GiziError::EmptyDataset { .. })
    ));
}

#[test]
fn test_evaluate_two_classes_is_incomplete_before_split() {
    let dataset: Vec<LabeledSample> = separable(5)
        .into_iter()
        .filter(|s| s.label != StatusLabel::Buruk)
        .collect();
    // An impossible fold count would fail later; coverage is checked first.
    let err = evaluate(&dataset, &ClassifierConfig::default(), &seeded(100)).expect_err("two classes");
    assert!(matches!(
        err,
        GiziError::IncompleteClassCoverage { ref missing } if missing == &vec![StatusLabel::Buruk]
    ));
}

#[test]
fn test_evaluate_rejects_label_outside_canonical_list() {
    let mut dataset = separable(5);
    dataset.push(LabeledSample::new([4.0, 55.0, 14.0], StatusLabel::Lebih));
    let err = evaluate(&dataset, &ClassifierConfig::default(), &seeded(5)).expect_err("lebih");
    assert!(matches!(err, GiziError::UnknownLabel(ref l) if l == "lebih"));
}

#[test]
fn test_evaluate_invalid_fold_counts() {
    let dataset = separable(2);
    for folds in [0, 1, 7] {
        assert!(matches!(
            evaluate(&dataset, &ClassifierConfig::default(), &seeded(folds)),
            Err(GiziError::InvalidHyperparameter { .. })
        ));
    }
    assert!(evaluate(&dataset, &ClassifierConfig::default(), &seeded(6)).is_ok());
}

#[test]
fn test_evaluate_invalid_config() {
    let config = ClassifierConfig::default().with_k(0);
    assert!(matches!(
        evaluate(&separable(5), &config, &seeded(5)),
        Err(GiziError::InvalidHyperparameter { ref param, .. }) if param == "k"
    ));
}

#[test]
fn test_evaluate_ragged_dataset() {
    let mut dataset = separable(5);
    dataset.push(LabeledSample::new(vec![2.0, 47.0], StatusLabel::Kurang));
    assert!(matches!(
        evaluate(&dataset, &ClassifierConfig::default(), &seeded(5)),
        Err(GiziError::FeatureDimensionMismatch { .. })
    ));
}

#[test]
fn test_class_metrics_lookup() {
    let result = evaluate(&separable(5), &ClassifierConfig::default(), &seeded(5)).expect("evaluate");
    assert!(result.class_metrics(StatusLabel::Kurang).is_some());
    assert!(result.class_metrics(StatusLabel::Lebih).is_none());
}
