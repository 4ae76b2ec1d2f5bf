//! The three call shapes the surrounding application uses.
//!
//! Each function is a pure function of its inputs: the reference set and the
//! configuration are always passed in, never looked up.
//!
//! # Example
//!
//! ```
//! use gizi::data::{FeatureVector, LabeledSample, StatusLabel};
//! use gizi::pipeline;
//!
//! let mut raw = Vec::new();
//! for i in 0..20 {
//!     let d = f64::from(i) * 0.01;
//!     raw.push(LabeledSample::new([3.0 + d, 50.0 + d, 12.0 + d], StatusLabel::Normal));
//!     raw.push(LabeledSample::new([2.5 + d, 48.0 + d, 11.0 + d], StatusLabel::Kurang));
//!     raw.push(LabeledSample::new([1.8 + d, 45.0 + d, 9.0 + d], StatusLabel::Buruk));
//! }
//!
//! let prototypes = pipeline::reduce_prototypes(&raw, 2, 0.1, 30, Some(1)).expect("reduce");
//! let reference = prototypes.to_samples().expect("original units");
//!
//! let label = pipeline::classify(
//!     &reference,
//!     &FeatureVector::anthropometric(1.85, 45.2, 9.1),
//!     3,
//!     &[0.35, 0.30, 0.15],
//! )
//! .expect("classify");
//! assert_eq!(label, StatusLabel::Buruk);
//! ```

use crate::classification::WeightedKnn;
use crate::config::{ClassifierConfig, FeatureWeights, ReductionConfig};
use crate::data::{self, FeatureVector, LabeledSample, StatusLabel};
use crate::error::Result;
use crate::evaluation::{self, EvaluationOptions, EvaluationResult};
use crate::lvq::PrototypeSet;
use std::collections::BTreeMap;

/// Compresses `raw` into a new prototype set.
///
/// # Errors
///
/// `InvalidHyperparameter`, `EmptyDataset`, `FeatureDimensionMismatch`,
/// `InvalidFeature` or `InsufficientClassSamples`.
pub fn reduce_prototypes(
    raw: &[LabeledSample],
    n_prototypes_per_class: usize,
    learning_rate: f64,
    n_epochs: usize,
    seed: Option<u64>,
) -> Result<PrototypeSet> {
    let config = ReductionConfig {
        n_prototypes_per_class,
        learning_rate,
        n_epochs,
        random_state: seed,
    };
    reduce_prototypes_with(raw, &config)
}

/// [`reduce_prototypes`] driven by a stored [`ReductionConfig`].
///
/// # Errors
///
/// Same as [`reduce_prototypes`].
pub fn reduce_prototypes_with(raw: &[LabeledSample], config: &ReductionConfig) -> Result<PrototypeSet> {
    config.to_lvq().fit(raw)
}

/// Labels `query` by weighted KNN over `reference`.
///
/// # Errors
///
/// `EmptyReferenceSet`, `FeatureDimensionMismatch`, `InvalidFeature` or
/// `InvalidHyperparameter`.
pub fn classify(
    reference: &[LabeledSample],
    query: &FeatureVector,
    k: usize,
    weights: &[f64],
) -> Result<StatusLabel> {
    classify_with(reference, query, &ClassifierConfig::new(k, weights))
}

/// [`classify`] driven by a stored [`ClassifierConfig`].
///
/// # Errors
///
/// Same as [`classify`].
pub fn classify_with(
    reference: &[LabeledSample],
    query: &FeatureVector,
    config: &ClassifierConfig,
) -> Result<StatusLabel> {
    let mut knn = WeightedKnn::from_config(config);
    knn.fit(reference)?;
    knn.predict_one(query)
}

/// Scores `(k, weights)` on `dataset` with stratified cross-validation.
///
/// # Errors
///
/// See [`evaluation::evaluate`].
pub fn evaluate(
    dataset: &[LabeledSample],
    k: usize,
    weights: &[f64],
    folds: usize,
    seed: Option<u64>,
) -> Result<EvaluationResult> {
    let mut options = EvaluationOptions::default().with_folds(folds);
    options.random_state = seed;
    evaluate_with(dataset, &ClassifierConfig::new(k, FeatureWeights::from(weights)), &options)
}

/// [`evaluate`] driven by a stored [`ClassifierConfig`].
///
/// # Errors
///
/// See [`evaluation::evaluate`].
pub fn evaluate_with(
    dataset: &[LabeledSample],
    config: &ClassifierConfig,
    options: &EvaluationOptions,
) -> Result<EvaluationResult> {
    evaluation::evaluate(dataset, config, options)
}

/// Number of samples per status label. Every label of [`StatusLabel::ALL`]
/// is present, with zero when unseen.
#[must_use]
pub fn status_distribution(samples: &[LabeledSample]) -> BTreeMap<StatusLabel, usize> {
    let labels: Vec<StatusLabel> = samples.iter().map(|s| s.label).collect();
    let mut counts = data::class_counts(&labels);
    for label in StatusLabel::ALL {
        counts.entry(label).or_insert(0);
    }
    counts
}
