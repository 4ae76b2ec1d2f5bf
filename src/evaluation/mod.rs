//! Cross-validated scoring of a classifier configuration.
//!
//! [`evaluate`] runs stratified K-fold cross-validation of a [`WeightedKnn`]
//! built from a [`ClassifierConfig`], and uses the first fold as a held-out
//! split for the confusion matrix and per-class figures. It is never the code
//! path of a live prediction.
//!
//! # Example
//!
//! ```
//! use gizi::config::ClassifierConfig;
//! use gizi::data::{LabeledSample, StatusLabel};
//! use gizi::evaluation::{evaluate, EvaluationOptions};
//!
//! let mut dataset = Vec::new();
//! for i in 0..10 {
//!     let d = f64::from(i) * 0.02;
//!     dataset.push(LabeledSample::new([3.0 + d, 50.0 + d, 12.0 + d], StatusLabel::Normal));
//!     dataset.push(LabeledSample::new([2.5 + d, 48.0 + d, 11.0 + d], StatusLabel::Kurang));
//!     dataset.push(LabeledSample::new([1.8 + d, 45.0 + d, 9.0 + d], StatusLabel::Buruk));
//! }
//!
//! let options = EvaluationOptions::default().with_random_state(42);
//! let result = evaluate(&dataset, &ClassifierConfig::default(), &options).expect("all classes present");
//! assert_eq!(result.cv.scores.len(), 5);
//! assert!(result.accuracy > 0.9);
//! ```

use crate::classification::WeightedKnn;
use crate::config::ClassifierConfig;
use crate::data::{self, FeatureVector, LabeledSample, StatusLabel};
use crate::error::{GiziError, Result};
use crate::metrics::{self, ClassMetrics, MacroAverage};
use crate::model_selection::{CrossValidationResult, StratifiedKFold};
use crate::primitives::Matrix;
use crate::traits::Classifier;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default number of cross-validation folds.
pub const DEFAULT_FOLDS: usize = 5;

/// How an evaluation splits the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Number of stratified folds, at least 2 and at most the dataset size.
    pub folds: usize,
    /// Seed for fold assignment; `None` draws from entropy.
    #[serde(default)]
    pub random_state: Option<u64>,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            folds: DEFAULT_FOLDS,
            random_state: None,
        }
    }
}

impl EvaluationOptions {
    /// Sets the fold count.
    #[must_use]
    pub fn with_folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }

    /// Fixes the fold assignment seed.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    fn splitter(&self) -> StratifiedKFold {
        match self.random_state {
            Some(seed) => StratifiedKFold::new(self.folds).with_random_state(seed),
            None => StratifiedKFold::new(self.folds).with_shuffle(true),
        }
    }
}

/// Outcome of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Accuracy on the held-out split, a fraction in [0, 1].
    pub accuracy: f64,
    /// Held-out confusion matrix; rows are true labels, columns predictions,
    /// both in `classes` order.
    pub confusion_matrix: Matrix<usize>,
    /// Class order of the confusion matrix and `per_class`.
    pub classes: Vec<StatusLabel>,
    /// One-vs-rest figures per class on the held-out split.
    pub per_class: Vec<ClassMetrics>,
    /// Unweighted means of `per_class`.
    pub macro_avg: MacroAverage,
    /// Accuracy of every fold.
    pub cv: CrossValidationResult,
    /// Size of the held-out split.
    pub n_held_out: usize,
}

impl EvaluationResult {
    /// Mean cross-validation accuracy.
    #[must_use]
    pub fn cv_mean(&self) -> f64 {
        self.cv.mean()
    }

    /// Population standard deviation of the fold accuracies.
    #[must_use]
    pub fn cv_std(&self) -> f64 {
        self.cv.std()
    }

    /// Held-out figures of `label`, if it is one of `classes`.
    #[must_use]
    pub fn class_metrics(&self, label: StatusLabel) -> Option<&ClassMetrics> {
        self.per_class.iter().find(|m| m.label == label)
    }
}

/// Scores `config` on `dataset` with stratified cross-validation.
///
/// # Errors
///
/// Checked in this order: `EmptyDataset`; `IncompleteClassCoverage` when a
/// canonical class is absent; `UnknownLabel` for a label outside the
/// canonical list; `InvalidHyperparameter` for a bad fold count or config;
/// `FeatureDimensionMismatch` for ragged samples.
pub fn evaluate(
    dataset: &[LabeledSample],
    config: &ClassifierConfig,
    options: &EvaluationOptions,
) -> Result<EvaluationResult> {
    if dataset.is_empty() {
        return Err(GiziError::empty_dataset("evaluation dataset"));
    }

    let classes = StatusLabel::CANONICAL.to_vec();
    let labels: Vec<StatusLabel> = dataset.iter().map(|s| s.label).collect();

    let missing = data::missing_classes(&labels, &classes);
    if !missing.is_empty() {
        return Err(GiziError::IncompleteClassCoverage { missing });
    }
    if let Some(unknown) = labels.iter().find(|l| !classes.contains(*l)) {
        return Err(GiziError::UnknownLabel(unknown.to_string()));
    }

    config.validate()?;
    data::to_matrix(dataset)?;

    let splits = options.splitter().split(&labels)?;

    let mut scores = Vec::with_capacity(splits.len());
    let mut held_out = None;
    for (fold, (train_idx, test_idx)) in splits.iter().enumerate() {
        let train: Vec<LabeledSample> = train_idx.iter().map(|&i| dataset[i].clone()).collect();
        let queries: Vec<FeatureVector> = test_idx
            .iter()
            .map(|&i| dataset[i].features.clone())
            .collect();
        let y_true: Vec<StatusLabel> = test_idx.iter().map(|&i| labels[i]).collect();

        let mut knn = WeightedKnn::from_config(config);
        knn.fit(&train)?;
        let y_pred = knn.predict(&queries)?;

        let fold_accuracy = metrics::accuracy(&y_pred, &y_true)?;
        debug!(
            fold,
            n_train = train.len(),
            n_test = y_true.len(),
            accuracy = fold_accuracy,
            "fold scored"
        );
        scores.push(fold_accuracy);

        if fold == 0 {
            held_out = Some((fold_accuracy, y_pred, y_true));
        }
    }

    let (accuracy, y_pred, y_true) =
        held_out.ok_or_else(|| GiziError::empty_dataset("held-out fold"))?;
    let confusion_matrix = metrics::confusion_matrix(&y_pred, &y_true, &classes)?;
    let per_class = metrics::per_class_metrics(&confusion_matrix, &classes)?;
    let macro_avg = metrics::macro_average(&per_class);
    let cv = CrossValidationResult { scores };

    info!(
        n_samples = dataset.len(),
        folds = options.folds,
        k = config.k,
        accuracy,
        cv_mean = cv.mean(),
        cv_std = cv.std(),
        "evaluation finished"
    );

    Ok(EvaluationResult {
        accuracy,
        confusion_matrix,
        classes,
        per_class,
        macro_avg,
        cv,
        n_held_out: y_true.len(),
    })
}

#[cfg(test)]
mod tests;
