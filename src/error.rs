//! Error types for gizi operations.
//!
//! Every failure is a local validation error raised at the offending call.
//! Nothing here is retried: the computations are deterministic, so the same
//! bad input can never succeed on a second attempt.

use crate::data::StatusLabel;
use thiserror::Error;

/// Main error type for gizi operations.
///
/// # Examples
///
/// ```
/// use gizi::error::GiziError;
///
/// let err = GiziError::FeatureDimensionMismatch {
///     expected: 3,
///     actual: 2,
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum GiziError {
    /// A dataset (or a matrix derived from one) has no rows.
    #[error("empty dataset: {context}")]
    EmptyDataset {
        /// What was empty
        context: String,
    },

    /// A class has fewer samples than prototypes requested for it.
    #[error("class '{label}' has {available} samples, {requested} prototypes requested")]
    InsufficientClassSamples {
        /// Offending class
        label: StatusLabel,
        /// Samples of that class in the training set
        available: usize,
        /// Prototypes requested per class
        requested: usize,
    },

    /// The dataset does not contain every class of the canonical list.
    #[error("dataset is missing required classes: {}", display_labels(.missing))]
    IncompleteClassCoverage {
        /// Canonical classes that have no sample
        missing: Vec<StatusLabel>,
    },

    /// The classifier was never fitted, or was fitted on nothing.
    #[error("reference set is empty; fit the classifier with at least one sample")]
    EmptyReferenceSet,

    /// A vector's length disagrees with the fitted dimensionality.
    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    FeatureDimensionMismatch {
        /// Fitted dimensionality
        expected: usize,
        /// Dimensionality found
        actual: usize,
    },

    /// Invalid hyperparameter value provided.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A measurement is non-finite or outside its physical range.
    #[error("invalid feature: {feature} = {value}, expected {constraint}")]
    InvalidFeature {
        /// Feature name
        feature: String,
        /// Offending value
        value: f64,
        /// Constraint description
        constraint: String,
    },

    /// A label outside the fixed class list (or an unparseable label string).
    #[error("unknown status label: {0}")]
    UnknownLabel(String),

    /// A parameter store has no record with this id.
    #[error("parameter record {0} not found")]
    RecordNotFound(u64),

    /// A transformer was used before `fit`.
    #[error("{0} is not fitted")]
    NotFitted(&'static str),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while persisting a prototype set.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_labels(labels: &[StatusLabel]) -> String {
    labels
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl GiziError {
    /// Create an empty dataset error with context.
    #[must_use]
    pub fn empty_dataset(context: &str) -> Self {
        Self::EmptyDataset {
            context: context.to_string(),
        }
    }

    /// Create a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::FeatureDimensionMismatch { expected, actual }
    }

    /// Create an invalid hyperparameter error.
    #[must_use]
    pub fn invalid_hyperparameter(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an invalid feature error.
    #[must_use]
    pub fn invalid_feature(feature: &str, value: f64, constraint: &str) -> Self {
        Self::InvalidFeature {
            feature: feature.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, GiziError>;
