// =========================================================================
// FALSIFY-LVQ: prototype reduction contract
//
// Every class present in training keeps exactly n_prototypes_per_class
// codebook vectors, the learning rate only ever shrinks the step, and a
// seeded run is reproducible.
// =========================================================================

use super::*;

fn two_class(n: usize) -> Vec<LabeledSample> {
    (0..n)
        .flat_map(|i| {
            let d = i as f64 * 0.01;
            [
                LabeledSample::new([2.9 + d, 49.0 + d, 12.0 + d], StatusLabel::Normal),
                LabeledSample::new([2.4 + d, 47.0 + d, 10.5 + d], StatusLabel::Kurang),
            ]
        })
        .collect()
}

/// FALSIFY-LVQ-001: codebook size is classes x n_prototypes_per_class
#[test]
fn falsify_lvq_001_codebook_size() {
    for per_class in 1..=4 {
        let set = Lvq::new(per_class)
            .with_n_epochs(5)
            .with_random_state(per_class as u64)
            .fit(&two_class(8))
            .expect("fit");
        assert_eq!(
            set.len(),
            2 * per_class,
            "FALSIFIED LVQ-001: per_class={per_class} gave {} prototypes",
            set.len()
        );
        for count in set.class_counts().values() {
            assert_eq!(*count, per_class, "FALSIFIED LVQ-001: uneven class count");
        }
    }
}

/// FALSIFY-LVQ-002: codebook lives in the scaler's feature space
#[test]
fn falsify_lvq_002_codebook_width_matches_scaler() {
    let set = Lvq::new(2).with_random_state(1).fit(&two_class(6)).expect("fit");
    assert_eq!(set.n_features(), 3);
    assert_eq!(
        set.scaler().n_features(),
        Some(3),
        "FALSIFIED LVQ-002: scaler width differs from codebook"
    );
}

/// FALSIFY-LVQ-003: same seed, same codebook
#[test]
fn falsify_lvq_003_seeded_reproducible() {
    let samples = two_class(10);
    let lvq = Lvq::new(3).with_n_epochs(15).with_random_state(2024);
    let first = lvq.fit(&samples).expect("fit");
    let second = lvq.fit(&samples).expect("fit");
    assert_eq!(first, second, "FALSIFIED LVQ-003: seeded runs differ");
}

/// FALSIFY-LVQ-004: a single update never overshoots the sample
#[test]
fn falsify_lvq_004_attraction_is_contraction() {
    let mut codebook = Matrix::from_vec(1, 3, vec![0.0, 0.5, 1.0]).expect("1x3");
    let labels = [StatusLabel::Kurang];
    let x = [1.0_f64, 0.5, 0.0];
    let before: f64 = codebook
        .row(0)
        .iter()
        .zip(&x)
        .map(|(w, xi)| (w - xi).powi(2))
        .sum();
    update_winner(&mut codebook, &labels, &x, StatusLabel::Kurang, 0.3);
    let after: f64 = codebook
        .row(0)
        .iter()
        .zip(&x)
        .map(|(w, xi)| (w - xi).powi(2))
        .sum();
    assert!(
        after < before,
        "FALSIFIED LVQ-004: distance grew from {before} to {after}"
    );
}

/// FALSIFY-LVQ-005: fitting never mutates the training set
#[test]
fn falsify_lvq_005_training_set_untouched() {
    let samples = two_class(5);
    let copy = samples.clone();
    let _ = Lvq::new(1).with_random_state(3).fit(&samples).expect("fit");
    assert_eq!(samples, copy, "FALSIFIED LVQ-005: input samples changed");
}
