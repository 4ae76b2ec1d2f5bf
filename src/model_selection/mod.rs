//! Stratified K-fold splitting and fold score summaries.
//!
//! Samples of each class are dealt round-robin across the folds, continuing
//! the fold cursor from one class to the next, so every class is spread as
//! evenly as possible and fold sizes differ by at most one.

use crate::data::StatusLabel;
use crate::error::{GiziError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-fold scores from cross-validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationResult {
    /// Score for each fold
    pub scores: Vec<f64>,
}

impl CrossValidationResult {
    /// Calculate mean score across folds
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().sum::<f64>() / self.scores.len() as f64
    }

    /// Population standard deviation of the scores
    #[must_use]
    pub fn std(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .scores
            .iter()
            .map(|&score| (score - mean).powi(2))
            .sum::<f64>()
            / self.scores.len() as f64;
        variance.sqrt()
    }

    /// Get minimum score
    #[must_use]
    pub fn min(&self) -> f64 {
        self.scores.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Get maximum score
    #[must_use]
    pub fn max(&self) -> f64 {
        self.scores
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Stratified K-Fold cross-validator.
///
/// # Example
///
/// ```rust
/// use gizi::data::StatusLabel::{Buruk, Kurang, Normal};
/// use gizi::model_selection::StratifiedKFold;
///
/// let y = [Normal, Normal, Normal, Kurang, Kurang, Kurang, Buruk, Buruk, Buruk];
/// let splits = StratifiedKFold::new(3).split(&y).expect("3 folds over 9 samples");
///
/// for (train, test) in &splits {
///     assert_eq!(test.len(), 3);
///     assert_eq!(train.len(), 6);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StratifiedKFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl StratifiedKFold {
    /// Create a new Stratified K-Fold cross-validator.
    ///
    /// # Arguments
    ///
    /// * `n_splits` - Number of folds. Must be at least 2.
    #[must_use]
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enable shuffling within each class before dealing.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random state for reproducible shuffling. Implies shuffling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true;
        self
    }

    /// Number of folds.
    #[must_use]
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Test-fold membership: `folds[f]` lists the sample indices held out
    /// in fold `f`.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` unless `2 <= n_splits <= y.len()`.
    pub fn folds(&self, y: &[StatusLabel]) -> Result<Vec<Vec<usize>>> {
        if self.n_splits < 2 || self.n_splits > y.len() {
            return Err(GiziError::invalid_hyperparameter(
                "folds",
                self.n_splits,
                &format!("in [2, {}]", y.len()),
            ));
        }

        let mut class_indices: BTreeMap<StatusLabel, Vec<usize>> = BTreeMap::new();
        for (i, &label) in y.iter().enumerate() {
            class_indices.entry(label).or_default().push(i);
        }

        if self.shuffle {
            let mut rng = match self.random_state {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            for indices in class_indices.values_mut() {
                indices.shuffle(&mut rng);
            }
        }

        let mut fold_indices: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];
        let mut cursor = 0;
        for indices in class_indices.values() {
            for &idx in indices {
                fold_indices[cursor % self.n_splits].push(idx);
                cursor += 1;
            }
        }
        Ok(fold_indices)
    }

    /// Generate stratified `(train_indices, test_indices)` for each fold.
    ///
    /// # Errors
    ///
    /// Same as [`StratifiedKFold::folds`].
    pub fn split(&self, y: &[StatusLabel]) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        let fold_indices = self.folds(y)?;
        let n_samples = y.len();

        let mut result = Vec::with_capacity(self.n_splits);
        for (i, test_indices) in fold_indices.iter().enumerate() {
            let mut train_indices = Vec::with_capacity(n_samples - test_indices.len());
            for (j, fold) in fold_indices.iter().enumerate() {
                if i != j {
                    train_indices.extend_from_slice(fold);
                }
            }
            result.push((train_indices, test_indices.clone()));
        }
        Ok(result)
    }
}


#[cfg(test)]
#[path = "tests_kfold_contract.rs"]
mod tests_kfold_contract;
