//! Core traits for transformers and classifiers.
//!
//! These traits define the API contracts shared by the scaler, the LVQ
//! codebook and the weighted KNN classifier.

use crate::data::{FeatureVector, LabeledSample, StatusLabel};
use crate::error::{GiziError, Result};
use crate::primitives::Matrix;

/// Trait for data transformers (scalers).
///
/// # Example
///
/// ```
/// use gizi::prelude::*;
///
/// let x = Matrix::from_vec(2, 1, vec![10.0, 20.0]).unwrap();
/// let mut scaler = MinMaxScaler::new();
/// let scaled = scaler.fit_transform(&x).unwrap();
/// assert_eq!(scaled.as_slice(), &[0.0, 1.0]);
/// ```
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if transformer is not fitted.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// Anything that assigns a [`StatusLabel`] to feature vectors.
pub trait Classifier {
    /// Predicts one label per query.
    ///
    /// # Errors
    ///
    /// Returns an error if the classifier is unusable or a query is malformed.
    fn predict(&self, queries: &[FeatureVector]) -> Result<Vec<StatusLabel>>;

    /// Fraction of `samples` whose label is predicted correctly.
    ///
    /// # Errors
    ///
    /// `EmptyDataset` for no samples, otherwise whatever `predict` returns.
    fn score(&self, samples: &[LabeledSample]) -> Result<f64> {
        if samples.is_empty() {
            return Err(GiziError::empty_dataset("scoring samples"));
        }
        let queries: Vec<FeatureVector> = samples.iter().map(|s| s.features.clone()).collect();
        let predicted = self.predict(&queries)?;
        let correct = predicted
            .iter()
            .zip(samples)
            .filter(|(p, s)| **p == s.label)
            .count();
        Ok(correct as f64 / samples.len() as f64)
    }
}
