// =========================================================================
// FALSIFY-KF: stratified K-fold contract
//
// Every sample is held out exactly once, train and test never overlap,
// and each class is spread across the folds as evenly as its size allows.
//
// References:
//   - Stone (1974) "Cross-Validatory Choice and Assessment of Predictions"
// =========================================================================

use super::*;

fn labels(n_normal: usize, n_kurang: usize, n_buruk: usize) -> Vec<StatusLabel> {
    let mut y = vec![StatusLabel::Normal; n_normal];
    y.extend(vec![StatusLabel::Kurang; n_kurang]);
    y.extend(vec![StatusLabel::Buruk; n_buruk]);
    y
}

/// FALSIFY-KF-001: K-Fold produces exactly K splits
#[test]
fn falsify_kf_001_produces_k_splits() {
    let y = labels(40, 35, 25);
    let splits = StratifiedKFold::new(5)
        .with_random_state(1)
        .split(&y)
        .expect("split");
    assert_eq!(
        splits.len(),
        5,
        "FALSIFIED KF-001: splits={}, expected 5",
        splits.len()
    );
}

/// FALSIFY-KF-002: Every sample appears in exactly one test fold
#[test]
fn falsify_kf_002_every_sample_in_one_test_fold() {
    let y = labels(7, 8, 5);
    let splits = StratifiedKFold::new(4)
        .with_random_state(2)
        .split(&y)
        .expect("split");

    let mut test_counts = vec![0usize; y.len()];
    for (_train, test) in &splits {
        for &idx in test {
            test_counts[idx] += 1;
        }
    }
    for (i, &count) in test_counts.iter().enumerate() {
        assert_eq!(
            count, 1,
            "FALSIFIED KF-002: sample {i} appeared in {count} test folds (expected 1)"
        );
    }
}

/// FALSIFY-KF-003: Train + test indices cover all samples per fold
#[test]
fn falsify_kf_003_train_test_cover_all() {
    let y = labels(6, 6, 5);
    let splits = StratifiedKFold::new(4).split(&y).expect("split");

    for (fold_idx, (train, test)) in splits.iter().enumerate() {
        let mut all: Vec<usize> = train.iter().chain(test.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(
            all,
            (0..y.len()).collect::<Vec<_>>(),
            "FALSIFIED KF-003: fold {fold_idx} train+test does not cover all samples"
        );
    }
}

/// FALSIFY-KF-004: per-class counts per fold differ by at most one
#[test]
fn falsify_kf_004_class_balance() {
    let y = labels(23, 11, 9);
    let folds = StratifiedKFold::new(5)
        .with_random_state(3)
        .folds(&y)
        .expect("folds");

    for label in StatusLabel::CANONICAL {
        let counts: Vec<usize> = folds
            .iter()
            .map(|fold| fold.iter().filter(|&&i| y[i] == label).count())
            .collect();
        let min = counts.iter().copied().min().unwrap_or(0);
        let max = counts.iter().copied().max().unwrap_or(0);
        assert!(
            max - min <= 1,
            "FALSIFIED KF-004: {label} unevenly spread {counts:?}"
        );
    }
}
