//! Min-max feature scaling shared by the LVQ reducer and the KNN classifier.
//!
//! Both consumers must see measurements on comparable scales: raw weight (kg)
//! and height (cm) differ by more than an order of magnitude, which would
//! otherwise let height dominate every distance.
//!
//! # Example
//!
//! ```
//! use gizi::prelude::*;
//!
//! let data = Matrix::from_vec(3, 2, vec![
//!     2.0, 45.0,
//!     2.5, 48.0,
//!     3.0, 51.0,
//! ]).expect("valid matrix dimensions");
//!
//! let mut scaler = MinMaxScaler::new();
//! let scaled = scaler.fit_transform(&data).expect("fit_transform should succeed");
//! assert!((scaled.get(1, 0) - 0.5).abs() < 1e-12);
//!
//! let restored = scaler.inverse_transform(&scaled).expect("fitted");
//! assert!((restored.get(2, 1) - 51.0).abs() < 1e-9);
//! ```

use crate::error::{GiziError, Result};
use crate::primitives::Matrix;
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};

/// Spread below which a feature is treated as constant.
const DEGENERATE_RANGE: f64 = 1e-10;

/// Scales each feature to a target range using the min and max seen at fit time.
///
/// `scaled = (x - min) / scale * (feature_max - feature_min) + feature_min`
/// where `scale = max - min`, or exactly `1.0` for a constant feature so a
/// tiny dataset never divides by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Minimum value of each feature (computed during fit).
    data_min: Option<Vec<f64>>,
    /// Maximum value of each feature (computed during fit).
    data_max: Option<Vec<f64>>,
    /// Divisor of each feature (computed during fit).
    scale: Option<Vec<f64>>,
    /// Target minimum for scaling (default 0.0).
    feature_min: f64,
    /// Target maximum for scaling (default 1.0).
    feature_max: f64,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Creates a new `MinMaxScaler` with default range [0, 1].
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_min: None,
            data_max: None,
            scale: None,
            feature_min: 0.0,
            feature_max: 1.0,
        }
    }

    /// Sets the target range for scaling.
    ///
    /// # Example
    ///
    /// ```
    /// use gizi::preprocessing::MinMaxScaler;
    ///
    /// let scaler = MinMaxScaler::new().with_range(-1.0, 1.0);
    /// ```
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.feature_min = min;
        self.feature_max = max;
        self
    }

    /// Minimum value of each feature, once fitted.
    #[must_use]
    pub fn data_min(&self) -> Option<&[f64]> {
        self.data_min.as_deref()
    }

    /// Maximum value of each feature, once fitted.
    #[must_use]
    pub fn data_max(&self) -> Option<&[f64]> {
        self.data_max.as_deref()
    }

    /// Per-feature divisor, once fitted. Constant features report `1.0`.
    #[must_use]
    pub fn scale(&self) -> Option<&[f64]> {
        self.scale.as_deref()
    }

    /// Number of features seen at fit time.
    #[must_use]
    pub fn n_features(&self) -> Option<usize> {
        self.data_min.as_ref().map(Vec::len)
    }

    /// Returns true if the scaler has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.data_min.is_some()
    }

    /// Checks that every fitted parameter covers exactly `n_features`.
    ///
    /// # Errors
    ///
    /// `NotFitted` before `fit`, `FeatureDimensionMismatch` when the min,
    /// max or divisor length differs from `n_features`.
    pub fn check_width(&self, n_features: usize) -> Result<()> {
        self.fitted_params(n_features).map(|_| ())
    }

    fn fitted_params(&self, width: usize) -> Result<(&[f64], &[f64])> {
        let (Some(data_min), Some(data_max), Some(scale)) = (
            self.data_min.as_deref(),
            self.data_max.as_deref(),
            self.scale.as_deref(),
        ) else {
            return Err(GiziError::NotFitted("MinMaxScaler"));
        };
        for len in [data_min.len(), data_max.len(), scale.len()] {
            if len != width {
                return Err(GiziError::dimension_mismatch(len, width));
            }
        }
        Ok((data_min, scale))
    }

    /// Scales a single feature row.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or the width mismatches.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        let (data_min, scale) = self.fitted_params(row.len())?;
        let feature_range = self.feature_max - self.feature_min;
        Ok(row
            .iter()
            .zip(data_min.iter().zip(scale))
            .map(|(&x, (&min, &s))| (x - min) / s * feature_range + self.feature_min)
            .collect())
    }

    /// Maps a single scaled row back to original units.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or the width mismatches.
    pub fn inverse_transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        let (data_min, scale) = self.fitted_params(row.len())?;
        let feature_range = self.feature_max - self.feature_min;
        Ok(row
            .iter()
            .zip(data_min.iter().zip(scale))
            .map(|(&v, (&min, &s))| (v - self.feature_min) / feature_range * s + min)
            .collect())
    }

    /// Transforms data back to original scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the scaler is not fitted or dimensions mismatch.
    pub fn inverse_transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (n_samples, n_features) = x.shape();
        self.fitted_params(n_features)?;
        let mut result = Vec::with_capacity(n_samples * n_features);
        for row in x.rows() {
            result.extend(self.inverse_transform_row(row)?);
        }
        Matrix::from_vec(n_samples, n_features, result)
    }
}

impl Transformer for MinMaxScaler {
    /// Computes the min, max and divisor of each feature.
    fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples == 0 {
            return Err(GiziError::empty_dataset("cannot fit scaler with zero samples"));
        }

        let mut data_min = vec![f64::INFINITY; n_features];
        let mut data_max = vec![f64::NEG_INFINITY; n_features];

        for row in x.rows() {
            for (j, &val) in row.iter().enumerate() {
                if val < data_min[j] {
                    data_min[j] = val;
                }
                if val > data_max[j] {
                    data_max[j] = val;
                }
            }
        }

        let scale = data_min
            .iter()
            .zip(&data_max)
            .map(|(min, max)| {
                let range = max - min;
                if range.abs() > DEGENERATE_RANGE {
                    range
                } else {
                    1.0
                }
            })
            .collect();

        self.data_min = Some(data_min);
        self.data_max = Some(data_max);
        self.scale = Some(scale);

        Ok(())
    }

    /// Scales the data to the target range.
    fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let (n_samples, n_features) = x.shape();
        self.fitted_params(n_features)?;
        let mut result = Vec::with_capacity(n_samples * n_features);
        for row in x.rows() {
            result.extend(self.transform_row(row)?);
        }
        Matrix::from_vec(n_samples, n_features, result)
    }
}


#[cfg(test)]
#[path = "tests_normalization_contract.rs"]
mod tests_normalization_contract;
