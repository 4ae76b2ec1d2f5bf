//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use gizi::prelude::*;
//! ```

pub use crate::classification::WeightedKnn;
pub use crate::config::{ClassifierConfig, FeatureWeights, ReductionConfig};
pub use crate::data::{FeatureVector, LabeledSample, Sex, StatusLabel};
pub use crate::error::{GiziError, Result};
pub use crate::evaluation::{evaluate, EvaluationOptions, EvaluationResult};
pub use crate::lvq::{Lvq, PrototypeSet};
pub use crate::preprocessing::MinMaxScaler;
pub use crate::primitives::Matrix;
pub use crate::store::{InMemoryParameterStore, ParameterStore};
pub use crate::traits::{Classifier, Transformer};
