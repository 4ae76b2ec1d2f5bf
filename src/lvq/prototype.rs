//! The trained codebook and the scaler that defines its feature space.

use super::nearest_index;
use crate::data::{self, FeatureVector, LabeledSample, StatusLabel};
use crate::error::{GiziError, Result};
use crate::preprocessing::MinMaxScaler;
use crate::primitives::Matrix;
use crate::traits::Classifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One codebook vector: a point in normalized space and its class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prototype {
    /// Coordinates in the scaler's normalized space.
    pub features: FeatureVector,
    /// Class the prototype represents.
    pub label: StatusLabel,
}

/// How much a reduction run compressed the training set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReductionStats {
    /// Raw samples the codebook was trained on.
    pub total_training: usize,
    /// Codebook size.
    pub total_prototypes: usize,
    /// Percentage of the training set removed, in [0, 100].
    pub reduction_ratio: f64,
}

/// A trained LVQ codebook bundled with the scaler it was trained under.
///
/// The two are only ever created together by [`super::Lvq`] and persisted
/// together, so a codebook can never be read in the wrong feature space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrototypeSet {
    pub(super) scaler: MinMaxScaler,
    pub(super) codebook: Matrix<f64>,
    pub(super) labels: Vec<StatusLabel>,
    pub(super) n_training_samples: usize,
}

impl PrototypeSet {
    pub(super) fn new(
        scaler: MinMaxScaler,
        codebook: Matrix<f64>,
        labels: Vec<StatusLabel>,
        n_training_samples: usize,
    ) -> Self {
        Self {
            scaler,
            codebook,
            labels,
            n_training_samples,
        }
    }

    /// Number of prototypes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the set holds no prototype.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Feature dimensionality of the codebook.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.codebook.n_cols()
    }

    /// Prototype labels, in codebook order.
    #[must_use]
    pub fn labels(&self) -> &[StatusLabel] {
        &self.labels
    }

    /// Codebook in normalized space.
    #[must_use]
    pub fn codebook(&self) -> &Matrix<f64> {
        &self.codebook
    }

    /// Scaler that defines the codebook's feature space.
    #[must_use]
    pub fn scaler(&self) -> &MinMaxScaler {
        &self.scaler
    }

    /// Prototypes in normalized space.
    #[must_use]
    pub fn prototypes(&self) -> Vec<Prototype> {
        self.codebook
            .rows()
            .zip(&self.labels)
            .map(|(row, &label)| Prototype {
                features: FeatureVector::new(row.to_vec()),
                label,
            })
            .collect()
    }

    /// Prototypes mapped back to original measurement units, ready to be
    /// stored or used as a KNN reference set.
    ///
    /// # Errors
    ///
    /// Propagates scaler errors (a deserialised set with a mismatched scaler).
    pub fn to_samples(&self) -> Result<Vec<LabeledSample>> {
        let original = self.scaler.inverse_transform(&self.codebook)?;
        Ok(original
            .rows()
            .zip(&self.labels)
            .map(|(row, &label)| LabeledSample::new(row.to_vec(), label))
            .collect())
    }

    /// Prototypes per class.
    #[must_use]
    pub fn class_counts(&self) -> BTreeMap<StatusLabel, usize> {
        data::class_counts(&self.labels)
    }

    /// Compression achieved relative to the training set.
    #[must_use]
    pub fn reduction_stats(&self) -> ReductionStats {
        let total_training = self.n_training_samples;
        let total_prototypes = self.len();
        let reduction_ratio = if total_training > 0 {
            total_training.saturating_sub(total_prototypes) as f64 / total_training as f64 * 100.0
        } else {
            0.0
        };
        ReductionStats {
            total_training,
            total_prototypes,
            reduction_ratio,
        }
    }

    /// Serialises the set (scaler included) to JSON.
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a set produced by [`PrototypeSet::to_json`].
    ///
    /// # Errors
    ///
    /// `Serialization` on malformed JSON (including a codebook whose data
    /// does not fill its shape), `FeatureDimensionMismatch` if the codebook,
    /// labels and scaler disagree, `NotFitted` for an unfitted scaler.
    pub fn from_json(json: &str) -> Result<Self> {
        let set: Self = serde_json::from_str(json)?;
        set.check_consistency()?;
        Ok(set)
    }

    /// Writes the set to `path` as JSON.
    ///
    /// # Errors
    ///
    /// `Io` or `Serialization`.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reads a set written by [`PrototypeSet::save_json`].
    ///
    /// # Errors
    ///
    /// `Io`, `Serialization` or `FeatureDimensionMismatch`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    fn check_consistency(&self) -> Result<()> {
        if self.codebook.n_rows() != self.labels.len() {
            return Err(GiziError::dimension_mismatch(
                self.codebook.n_rows(),
                self.labels.len(),
            ));
        }
        self.scaler.check_width(self.codebook.n_cols())
    }
}

impl Classifier for PrototypeSet {
    /// Nearest-prototype (LVQ1) decision rule.
    fn predict(&self, queries: &[FeatureVector]) -> Result<Vec<StatusLabel>> {
        if self.is_empty() {
            return Err(GiziError::EmptyReferenceSet);
        }
        queries
            .iter()
            .map(|q| {
                if q.len() != self.n_features() {
                    return Err(GiziError::dimension_mismatch(self.n_features(), q.len()));
                }
                q.validate()?;
                let scaled = self.scaler.transform_row(q.as_slice())?;
                Ok(self.labels[nearest_index(&self.codebook, &scaled)])
            })
            .collect()
    }
}
