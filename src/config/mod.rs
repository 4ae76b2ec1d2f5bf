//! Classifier and reduction configuration.
//!
//! Configuration is always passed explicitly into `classify`/`evaluate`; the
//! core never reads an ambient "active parameters" record. Values are plain
//! serde structs so the storage layer can persist them as JSON.
//!
//! # Example
//!
//! ```
//! use gizi::config::{ClassifierConfig, FeatureWeights};
//!
//! let config = ClassifierConfig::new(5, FeatureWeights::anthropometric(0.5, 0.3, 0.2));
//! config.validate().expect("k > 0 and non-negative weights");
//! assert!(config.weights.is_normalized());
//! ```

use crate::error::{GiziError, Result};
use crate::lvq::Lvq;
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that weights sum to one.
const NORMALIZED_TOLERANCE: f64 = 1e-4;

/// Per-feature distance multipliers.
///
/// Weights are relative scale factors: they do not have to sum to one, and
/// a list shorter than the data is right-padded with `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureWeights(Vec<f64>);

impl FeatureWeights {
    /// Weights in feature order.
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    /// Equal weight for `n` features.
    #[must_use]
    pub fn uniform(n: usize) -> Self {
        Self(vec![1.0; n])
    }

    /// Weights for weight, height and mid-upper-arm circumference.
    #[must_use]
    pub fn anthropometric(weight: f64, height: f64, muac: f64) -> Self {
        Self(vec![weight, height, muac])
    }

    /// Adds weights for age and sex after the structural three.
    #[must_use]
    pub fn with_age_sex(mut self, age: f64, sex: f64) -> Self {
        self.0.resize(3, 1.0);
        self.0.push(age);
        self.0.push(sex);
        self
    }

    /// Raw weights.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of declared weights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no weight is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Weights fitted to `n_features`: truncated when longer, right-padded
    /// with `1.0` when shorter.
    #[must_use]
    pub fn padded_to(&self, n_features: usize) -> Vec<f64> {
        let mut w: Vec<f64> = self.0.iter().copied().take(n_features).collect();
        w.resize(n_features, 1.0);
        w
    }

    /// Sum of all declared weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// True when the weights sum to one.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < NORMALIZED_TOLERANCE
    }

    /// Copy rescaled to sum to one. All-zero weights are returned unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total > 0.0 {
            self.scaled(1.0 / total)
        } else {
            self.clone()
        }
    }

    /// Copy multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.iter().map(|w| w * factor).collect())
    }

    /// Rejects negative or non-finite weights.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` naming the first offending index.
    pub fn validate(&self) -> Result<()> {
        for (i, &w) in self.0.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(GiziError::invalid_hyperparameter(
                    &format!("weights[{i}]"),
                    w,
                    "a finite value >= 0",
                ));
            }
        }
        Ok(())
    }
}

impl From<Vec<f64>> for FeatureWeights {
    fn from(weights: Vec<f64>) -> Self {
        Self(weights)
    }
}

impl From<&[f64]> for FeatureWeights {
    fn from(weights: &[f64]) -> Self {
        Self(weights.to_vec())
    }
}

/// Active KNN configuration: neighbour count and feature weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Number of neighbours that vote.
    pub k: usize,
    /// Distance weights in feature order.
    pub weights: FeatureWeights,
}

impl Default for ClassifierConfig {
    /// `k = 3`; weight 0.35, height 0.30, arm circumference 0.15,
    /// age 0.15, sex 0.05.
    fn default() -> Self {
        Self {
            k: 3,
            weights: FeatureWeights::anthropometric(0.35, 0.30, 0.15).with_age_sex(0.15, 0.05),
        }
    }
}

impl ClassifierConfig {
    /// Creates a configuration.
    #[must_use]
    pub fn new(k: usize, weights: impl Into<FeatureWeights>) -> Self {
        Self {
            k,
            weights: weights.into(),
        }
    }

    /// Sets the neighbour count.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the feature weights.
    #[must_use]
    pub fn with_weights(mut self, weights: impl Into<FeatureWeights>) -> Self {
        self.weights = weights.into();
        self
    }

    /// Checks `k > 0` and the weights.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` on the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(GiziError::invalid_hyperparameter("k", self.k, "> 0"));
        }
        self.weights.validate()
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// `Serialization` on malformed JSON, `InvalidHyperparameter` on bad values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises to JSON.
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Hyperparameters of one LVQ prototype-reduction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// Codebook vectors per class.
    pub n_prototypes_per_class: usize,
    /// Initial learning rate, in (0, 1).
    pub learning_rate: f64,
    /// Passes over the training set.
    pub n_epochs: usize,
    /// Seed for initialisation and shuffling; `None` draws from entropy.
    #[serde(default)]
    pub random_state: Option<u64>,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            n_prototypes_per_class: 10,
            learning_rate: 0.1,
            n_epochs: 50,
            random_state: None,
        }
    }
}

impl ReductionConfig {
    /// Sets the seed.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Checks the configuration with the reducer's own rules.
    ///
    /// # Errors
    ///
    /// See [`Lvq::validate`].
    pub fn validate(&self) -> Result<()> {
        self.to_lvq().validate()
    }

    /// Builds the reducer described by this configuration.
    #[must_use]
    pub fn to_lvq(&self) -> Lvq {
        let lvq = Lvq::new(self.n_prototypes_per_class)
            .with_learning_rate(self.learning_rate)
            .with_n_epochs(self.n_epochs);
        match self.random_state {
            Some(seed) => lvq.with_random_state(seed),
            None => lvq,
        }
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// `Serialization` on malformed JSON, `InvalidHyperparameter` on bad values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
