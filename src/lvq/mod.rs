//! Learning Vector Quantization (LVQ1) prototype reduction.
//!
//! Compresses a raw labeled training set into a small labeled codebook that
//! the weighted KNN classifier can use as its reference set.
//!
//! # Algorithm
//!
//! 1. Fit a [`MinMaxScaler`] on every raw sample and scale them.
//! 2. For each class, pick `n_prototypes_per_class` distinct scaled samples
//!    as the initial codebook vectors.
//! 3. For `n_epochs` passes over a reshuffled training order, with the
//!    learning rate decaying linearly to zero, move the single nearest
//!    codebook vector toward a sample of its own class and away from a
//!    sample of any other class.
//!
//! The result is a [`PrototypeSet`], which owns the scaler that defines its
//! feature space. A reduction run always produces a whole new set.
//!
//! # Example
//!
//! ```
//! use gizi::prelude::*;
//!
//! let mut samples = Vec::new();
//! for i in 0..10 {
//!     let d = f64::from(i) * 0.01;
//!     samples.push(LabeledSample::new([3.0 + d, 50.0 + d, 12.0 + d], StatusLabel::Normal));
//!     samples.push(LabeledSample::new([1.8 + d, 45.0 + d, 9.0 + d], StatusLabel::Buruk));
//! }
//!
//! let prototypes = Lvq::new(2)
//!     .with_learning_rate(0.1)
//!     .with_n_epochs(20)
//!     .with_random_state(7)
//!     .fit(&samples)
//!     .expect("both classes have enough samples");
//! assert_eq!(prototypes.len(), 4);
//! ```

mod prototype;

pub use prototype::{Prototype, PrototypeSet, ReductionStats};

use crate::data::{self, LabeledSample, StatusLabel};
use crate::error::{GiziError, Result};
use crate::preprocessing::MinMaxScaler;
use crate::primitives::Matrix;
use crate::traits::Transformer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// LVQ1 prototype reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lvq {
    /// Codebook vectors per class.
    n_prototypes_per_class: usize,
    /// Base learning rate, decayed linearly over the epochs.
    learning_rate: f64,
    /// Passes over the training set.
    n_epochs: usize,
    /// Seed for initialisation and shuffling.
    random_state: Option<u64>,
}

impl Default for Lvq {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Lvq {
    /// Creates a reducer with learning rate 0.1 and 100 epochs.
    #[must_use]
    pub fn new(n_prototypes_per_class: usize) -> Self {
        Self {
            n_prototypes_per_class,
            learning_rate: 0.1,
            n_epochs: 100,
            random_state: None,
        }
    }

    /// Sets the base learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the number of epochs. Zero returns the initial codebook.
    #[must_use]
    pub fn with_n_epochs(mut self, n_epochs: usize) -> Self {
        self.n_epochs = n_epochs;
        self
    }

    /// Fixes the seed for reproducible runs.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Codebook vectors per class.
    #[must_use]
    pub fn n_prototypes_per_class(&self) -> usize {
        self.n_prototypes_per_class
    }

    /// Base learning rate.
    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Number of epochs.
    #[must_use]
    pub fn n_epochs(&self) -> usize {
        self.n_epochs
    }

    /// Checks the prototype count and the learning rate.
    ///
    /// # Errors
    ///
    /// `InvalidHyperparameter` on the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.n_prototypes_per_class == 0 {
            return Err(GiziError::invalid_hyperparameter(
                "n_prototypes_per_class",
                self.n_prototypes_per_class,
                ">= 1",
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate < 1.0) {
            return Err(GiziError::invalid_hyperparameter(
                "learning_rate",
                self.learning_rate,
                "in (0, 1)",
            ));
        }
        Ok(())
    }

    /// Learning rate applied during `epoch`: the base rate decayed linearly,
    /// from `learning_rate` at epoch 0 down to `learning_rate / n_epochs`
    /// at the last epoch.
    #[must_use]
    pub fn learning_rate_at(&self, epoch: usize) -> f64 {
        if self.n_epochs == 0 {
            return self.learning_rate;
        }
        self.learning_rate * (1.0 - epoch as f64 / self.n_epochs as f64)
    }

    fn rng(&self) -> StdRng {
        match self.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Builds the initial codebook without training it.
    ///
    /// With the same seed this is exactly what [`Lvq::fit`] starts from.
    ///
    /// # Errors
    ///
    /// `EmptyDataset`, `FeatureDimensionMismatch` for ragged samples,
    /// `InvalidFeature`, `InsufficientClassSamples`, or `InvalidHyperparameter`.
    pub fn initialize(&self, samples: &[LabeledSample]) -> Result<PrototypeSet> {
        let mut rng = self.rng();
        let (set, _, _) = self.initialize_with(samples, &mut rng)?;
        Ok(set)
    }

    /// Trains a new prototype set on `samples`.
    ///
    /// # Errors
    ///
    /// `EmptyDataset`, `FeatureDimensionMismatch` for ragged samples,
    /// `InvalidFeature`, `InsufficientClassSamples`, or `InvalidHyperparameter`.
    pub fn fit(&self, samples: &[LabeledSample]) -> Result<PrototypeSet> {
        let mut rng = self.rng();
        let (mut set, x, y) = self.initialize_with(samples, &mut rng)?;

        let n_samples = x.n_rows();
        let mut order: Vec<usize> = (0..n_samples).collect();

        for epoch in 0..self.n_epochs {
            let lr = self.learning_rate_at(epoch);
            order.shuffle(&mut rng);

            let mut repelled = 0usize;
            for &i in &order {
                if !update_winner(&mut set.codebook, &set.labels, x.row(i), y[i], lr) {
                    repelled += 1;
                }
            }
            trace!(epoch, lr, repelled, "lvq epoch");
        }

        debug!(
            n_samples,
            n_prototypes = set.len(),
            n_epochs = self.n_epochs,
            "lvq training finished"
        );
        Ok(set)
    }

    fn initialize_with(
        &self,
        samples: &[LabeledSample],
        rng: &mut StdRng,
    ) -> Result<(PrototypeSet, Matrix<f64>, Vec<StatusLabel>)> {
        self.validate()?;
        let (raw, y) = data::to_matrix(samples)?;
        data::validate_samples(samples)?;

        let mut scaler = MinMaxScaler::new();
        let x = scaler.fit_transform(&raw)?;

        let mut by_class: BTreeMap<StatusLabel, Vec<usize>> = BTreeMap::new();
        for (i, &label) in y.iter().enumerate() {
            by_class.entry(label).or_default().push(i);
        }

        let mut chosen = Vec::with_capacity(by_class.len() * self.n_prototypes_per_class);
        let mut labels = Vec::with_capacity(chosen.capacity());
        for (&label, indices) in &by_class {
            if indices.len() < self.n_prototypes_per_class {
                return Err(GiziError::InsufficientClassSamples {
                    label,
                    available: indices.len(),
                    requested: self.n_prototypes_per_class,
                });
            }
            chosen.extend(
                indices
                    .choose_multiple(rng, self.n_prototypes_per_class)
                    .copied(),
            );
            labels.extend(std::iter::repeat(label).take(self.n_prototypes_per_class));
        }

        debug!(
            n_classes = by_class.len(),
            n_prototypes = chosen.len(),
            "lvq codebook initialised"
        );

        let codebook = x.select_rows(&chosen);
        let set = PrototypeSet::new(scaler, codebook, labels, samples.len());
        Ok((set, x, y))
    }
}

/// LVQ1 update for one sample: the nearest codebook vector moves toward `x`
/// when its label is `y`, away from it otherwise. Returns true on attraction.
pub(crate) fn update_winner(
    codebook: &mut Matrix<f64>,
    labels: &[StatusLabel],
    x: &[f64],
    y: StatusLabel,
    lr: f64,
) -> bool {
    let winner = nearest_index(codebook, x);
    let attract = labels[winner] == y;
    let direction = if attract { 1.0 } else { -1.0 };
    for (w, &xi) in codebook.row_mut(winner).iter_mut().zip(x) {
        *w += direction * lr * (xi - *w);
    }
    attract
}

/// Index of the codebook row closest to `x` (Euclidean). The lowest index
/// wins ties.
pub(crate) fn nearest_index(codebook: &Matrix<f64>, x: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, w) in codebook.rows().enumerate() {
        let dist: f64 = w.iter().zip(x).map(|(a, b)| (a - b) * (a - b)).sum();
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    best
}


#[cfg(test)]
#[path = "tests_lvq_contract.rs"]
mod tests_lvq_contract;
