//! Weighted K-nearest-neighbour classification of nutritional status.
//!
//! The reference set (raw samples or LVQ prototypes in original units) gets
//! its own min-max scaler at [`WeightedKnn::fit`]. Queries pass through that
//! same scaler before distances are measured.

use crate::config::{ClassifierConfig, FeatureWeights};
use crate::data::{self, FeatureVector, LabeledSample, StatusLabel};
use crate::error::{GiziError, Result};
use crate::preprocessing::MinMaxScaler;
use crate::primitives::Matrix;
use crate::traits::{Classifier, Transformer};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One selected neighbour of a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Position of the neighbour in the fitted reference set.
    pub index: usize,
    /// Weighted Euclidean distance in scaled space.
    pub distance: f64,
    /// Label of the neighbour.
    pub label: StatusLabel,
}

/// K-nearest-neighbour classifier with per-feature distance weights.
///
/// Distance between a scaled query `x` and a scaled reference `r` is
/// `sqrt(sum(w_i * (x_i - r_i)^2))`. The `k` smallest distances vote;
/// equal distances keep reference order, and a tied vote goes to the label
/// that appears first among the neighbours.
///
/// # Example
///
/// ```
/// use gizi::classification::WeightedKnn;
/// use gizi::config::FeatureWeights;
/// use gizi::data::{FeatureVector, LabeledSample, StatusLabel};
///
/// let reference = vec![
///     LabeledSample::new([3.0, 50.0, 12.0], StatusLabel::Normal),
///     LabeledSample::new([3.1, 51.0, 12.5], StatusLabel::Normal),
///     LabeledSample::new([1.8, 45.0, 9.0], StatusLabel::Buruk),
///     LabeledSample::new([1.7, 44.0, 8.5], StatusLabel::Buruk),
/// ];
///
/// let mut knn = WeightedKnn::new(3).with_weights(FeatureWeights::anthropometric(0.5, 0.3, 0.2));
/// knn.fit(&reference).expect("non-empty reference set");
///
/// let label = knn
///     .predict_one(&FeatureVector::anthropometric(2.9, 49.5, 11.8))
///     .expect("fitted");
/// assert_eq!(label, StatusLabel::Normal);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKnn {
    /// Number of neighbours that vote.
    k: usize,
    /// Distance weights, padded or truncated to the reference width.
    weights: FeatureWeights,
    /// Scaler fitted on the reference set.
    scaler: Option<MinMaxScaler>,
    /// Scaled reference features.
    x_ref: Option<Matrix<f64>>,
    /// Reference labels.
    y_ref: Option<Vec<StatusLabel>>,
}

impl WeightedKnn {
    /// Creates an unfitted classifier with uniform weights.
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            weights: FeatureWeights::new(Vec::new()),
            scaler: None,
            x_ref: None,
            y_ref: None,
        }
    }

    /// Creates an unfitted classifier from a stored configuration.
    #[must_use]
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.k).with_weights(config.weights.clone())
    }

    /// Sets the per-feature distance weights.
    #[must_use]
    pub fn with_weights(mut self, weights: impl Into<FeatureWeights>) -> Self {
        self.weights = weights.into();
        self
    }

    /// Configured neighbour count (before clamping).
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Configured weights.
    #[must_use]
    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// Size of the fitted reference set, zero when unfitted.
    #[must_use]
    pub fn n_references(&self) -> usize {
        self.y_ref.as_ref().map_or(0, Vec::len)
    }

    /// Stores `reference` and fits a scaler over its features.
    ///
    /// Any previous reference set and scaler are replaced.
    ///
    /// # Errors
    ///
    /// `EmptyReferenceSet` for an empty slice, `FeatureDimensionMismatch`
    /// for ragged samples, `InvalidFeature` for a non-finite or non-positive
    /// measurement, `InvalidHyperparameter` for `k = 0` or bad weights.
    pub fn fit(&mut self, reference: &[LabeledSample]) -> Result<()> {
        self.validate()?;
        if reference.is_empty() {
            return Err(GiziError::EmptyReferenceSet);
        }
        let (raw, labels) = data::to_matrix(reference)?;
        data::validate_samples(reference)?;

        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(&raw)?;

        debug!(
            n_references = labels.len(),
            n_features = scaled.n_cols(),
            k = self.k,
            "knn reference set fitted"
        );

        self.scaler = Some(scaler);
        self.x_ref = Some(scaled);
        self.y_ref = Some(labels);
        Ok(())
    }

    /// Predicts the label of a single query.
    ///
    /// # Errors
    ///
    /// `EmptyReferenceSet` when unfitted, `FeatureDimensionMismatch` when the
    /// query width differs from the reference width, `InvalidFeature` for a
    /// non-finite or non-positive measurement.
    pub fn predict_one(&self, query: &FeatureVector) -> Result<StatusLabel> {
        let neighbors = self.kneighbors(query)?;
        vote(&neighbors).ok_or(GiziError::EmptyReferenceSet)
    }

    /// The neighbours that vote for `query`, nearest first.
    ///
    /// # Errors
    ///
    /// Same as [`WeightedKnn::predict_one`].
    pub fn kneighbors(&self, query: &FeatureVector) -> Result<Vec<Neighbor>> {
        let (scaler, x_ref, y_ref) = self.fitted()?;
        if query.len() != x_ref.n_cols() {
            return Err(GiziError::dimension_mismatch(x_ref.n_cols(), query.len()));
        }
        query.validate()?;

        let scaled = scaler.transform_row(query.as_slice())?;
        let weights = self.weights.padded_to(x_ref.n_cols());

        let mut neighbors: Vec<Neighbor> = x_ref
            .rows()
            .zip(y_ref)
            .enumerate()
            .map(|(index, (row, &label))| Neighbor {
                index,
                distance: weighted_distance(&scaled, row, &weights),
                label,
            })
            .collect();

        // Stable: equal distances keep ascending reference index.
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(self.k.min(y_ref.len()));
        Ok(neighbors)
    }

    fn fitted(&self) -> Result<(&MinMaxScaler, &Matrix<f64>, &[StatusLabel])> {
        match (&self.scaler, &self.x_ref, &self.y_ref) {
            (Some(scaler), Some(x), Some(y)) if !y.is_empty() => Ok((scaler, x, y)),
            _ => Err(GiziError::EmptyReferenceSet),
        }
    }

    fn validate(&self) -> Result<()> {
        ClassifierConfig::new(self.k, self.weights.clone()).validate()
    }
}

impl Classifier for WeightedKnn {
    fn predict(&self, queries: &[FeatureVector]) -> Result<Vec<StatusLabel>> {
        self.fitted()?;
        queries.iter().map(|q| self.predict_one(q)).collect()
    }
}

/// `sqrt(sum(w_i * (a_i - b_i)^2))`.
pub(crate) fn weighted_distance(a: &[f64], b: &[f64], weights: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .zip(weights)
        .map(|((x, r), w)| w * (x - r) * (x - r))
        .sum::<f64>()
        .sqrt()
}

/// Majority vote; a tie goes to the label seen first in `neighbors`.
fn vote(neighbors: &[Neighbor]) -> Option<StatusLabel> {
    // (label, votes), in first-seen order.
    let mut tally: Vec<(StatusLabel, usize)> = Vec::with_capacity(StatusLabel::ALL.len());
    for n in neighbors {
        match tally.iter_mut().find(|(label, _)| *label == n.label) {
            Some((_, count)) => *count += 1,
            None => tally.push((n.label, 1)),
        }
    }

    let mut best: Option<(StatusLabel, usize)> = None;
    for (label, count) in tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}


#[cfg(test)]
#[path = "tests_knn_contract.rs"]
mod tests_knn_contract;
