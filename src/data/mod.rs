//! Measurement records: feature vectors, status labels and labeled samples.
//!
//! These are the plain values exchanged with storage and the web layer. A
//! [`FeatureVector`] always starts with the three anthropometric measurements;
//! age and sex can be appended when the caller configures weights for them.
//!
//! # Example
//!
//! ```
//! use gizi::data::{FeatureVector, LabeledSample, StatusLabel};
//!
//! let sample = LabeledSample::new(
//!     FeatureVector::anthropometric(9.5, 75.0, 13.5),
//!     StatusLabel::Normal,
//! );
//! assert_eq!(sample.features.len(), 3);
//! assert_eq!("KURANG".parse::<StatusLabel>().unwrap(), StatusLabel::Kurang);
//! ```

use crate::error::{GiziError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of structural measurements (weight, height, mid-upper-arm circumference).
pub const N_STRUCTURAL_FEATURES: usize = 3;

/// Nutritional status of a child.
///
/// Declaration order is the class index order used everywhere a class needs
/// a position (codebook initialisation, confusion matrices).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabel {
    /// Normal nutritional status.
    Normal,
    /// Under-nourished.
    Kurang,
    /// Over-nourished.
    Lebih,
    /// Severely under-nourished.
    Buruk,
}

impl StatusLabel {
    /// Every label, in index order.
    pub const ALL: [StatusLabel; 4] = [Self::Normal, Self::Kurang, Self::Lebih, Self::Buruk];

    /// Target domain of model evaluation.
    pub const CANONICAL: [StatusLabel; 3] = [Self::Normal, Self::Kurang, Self::Buruk];

    /// Lowercase name as stored by the measurement records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Kurang => "kurang",
            Self::Lebih => "lebih",
            Self::Buruk => "buruk",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusLabel {
    type Err = GiziError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "kurang" => Ok(Self::Kurang),
            "lebih" => Ok(Self::Lebih),
            "buruk" => Ok(Self::Buruk),
            _ => Err(GiziError::UnknownLabel(s.to_string())),
        }
    }
}

/// Sex of the child, encoded numerically when used as a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Encoded as 0.0.
    Female,
    /// Encoded as 1.0.
    Male,
}

impl Sex {
    /// Numeric encoding used inside feature vectors.
    #[must_use]
    pub fn encode(self) -> f64 {
        match self {
            Self::Female => 0.0,
            Self::Male => 1.0,
        }
    }
}

/// Ordered feature values of one observation.
///
/// The first three values are weight (kg), height (cm) and mid-upper-arm
/// circumference (cm). Optional trailing values are age (months) and sex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Builds a vector from raw values, in declared order.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Builds the structural triple.
    #[must_use]
    pub fn anthropometric(weight_kg: f64, height_cm: f64, muac_cm: f64) -> Self {
        Self {
            values: vec![weight_kg, height_cm, muac_cm],
        }
    }

    /// Appends age (months) and sex to the structural triple.
    #[must_use]
    pub fn with_age_sex(mut self, age_months: f64, sex: Sex) -> Self {
        self.values.truncate(N_STRUCTURAL_FEATURES);
        self.values.push(age_months);
        self.values.push(sex.encode());
        self
    }

    /// Number of declared features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no feature is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature values.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Weight in kilograms, if declared.
    #[must_use]
    pub fn weight_kg(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Height in centimetres, if declared.
    #[must_use]
    pub fn height_cm(&self) -> Option<f64> {
        self.values.get(1).copied()
    }

    /// Mid-upper-arm circumference in centimetres, if declared.
    #[must_use]
    pub fn muac_cm(&self) -> Option<f64> {
        self.values.get(2).copied()
    }

    /// Checks that the structural measurements are strictly positive and
    /// every value is finite.
    ///
    /// # Errors
    ///
    /// `FeatureDimensionMismatch` for fewer than three values,
    /// `InvalidFeature` naming the offending feature otherwise.
    pub fn validate(&self) -> Result<()> {
        const NAMES: [&str; N_STRUCTURAL_FEATURES] = ["weight_kg", "height_cm", "muac_cm"];
        if self.values.len() < N_STRUCTURAL_FEATURES {
            return Err(GiziError::dimension_mismatch(
                N_STRUCTURAL_FEATURES,
                self.values.len(),
            ));
        }
        for (i, &v) in self.values.iter().enumerate() {
            let name = NAMES.get(i).copied().unwrap_or("extra feature");
            if !v.is_finite() {
                return Err(GiziError::invalid_feature(name, v, "a finite value"));
            }
            if i < N_STRUCTURAL_FEATURES && v <= 0.0 {
                return Err(GiziError::invalid_feature(name, v, "> 0"));
            }
        }
        Ok(())
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<[f64; N_STRUCTURAL_FEATURES]> for FeatureVector {
    fn from(values: [f64; N_STRUCTURAL_FEATURES]) -> Self {
        Self::new(values.to_vec())
    }
}

/// A feature vector with its known status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    /// Measurements.
    pub features: FeatureVector,
    /// Known status.
    pub label: StatusLabel,
}

impl LabeledSample {
    /// Pairs a feature vector with its label.
    #[must_use]
    pub fn new(features: impl Into<FeatureVector>, label: StatusLabel) -> Self {
        Self {
            features: features.into(),
            label,
        }
    }
}

/// Stacks sample features into a matrix and collects their labels.
///
/// # Errors
///
/// `EmptyDataset` for no samples, `FeatureDimensionMismatch` when the
/// samples declare different lengths.
pub fn to_matrix(samples: &[LabeledSample]) -> Result<(Matrix<f64>, Vec<StatusLabel>)> {
    if samples.is_empty() {
        return Err(GiziError::empty_dataset("labeled samples"));
    }
    let rows: Vec<&[f64]> = samples.iter().map(|s| s.features.as_slice()).collect();
    let x = Matrix::from_rows(&rows)?;
    let y = samples.iter().map(|s| s.label).collect();
    Ok((x, y))
}

/// Validates the features of every sample.
///
/// # Errors
///
/// The first error reported by [`FeatureVector::validate`].
pub fn validate_samples(samples: &[LabeledSample]) -> Result<()> {
    samples.iter().try_for_each(|s| s.features.validate())
}

/// Number of samples per label, in label order. Labels with no sample are absent.
#[must_use]
pub fn class_counts(labels: &[StatusLabel]) -> BTreeMap<StatusLabel, usize> {
    let mut counts = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Labels of `required` that never occur in `labels`.
#[must_use]
pub fn missing_classes(labels: &[StatusLabel], required: &[StatusLabel]) -> Vec<StatusLabel> {
    let present = class_counts(labels);
    required
        .iter()
        .copied()
        .filter(|c| !present.contains_key(c))
        .collect()
}
