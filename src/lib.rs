//! Gizi: child nutritional status classification.
//!
//! Anthropometric measurements (weight, height, mid-upper-arm circumference,
//! optionally age and sex) are labelled with a nutritional status by a
//! weighted K-nearest-neighbour classifier. The reference set can be the raw
//! training data or a compact codebook produced by LVQ prototype reduction.
//!
//! # Quick Start
//!
//! ```
//! use gizi::prelude::*;
//!
//! let mut raw = Vec::new();
//! for i in 0..10 {
//!     let d = f64::from(i) * 0.02;
//!     raw.push(LabeledSample::new([3.0 + d, 50.0 + d, 12.0 + d], StatusLabel::Normal));
//!     raw.push(LabeledSample::new([2.5 + d, 48.0 + d, 11.0 + d], StatusLabel::Kurang));
//!     raw.push(LabeledSample::new([1.8 + d, 45.0 + d, 9.0 + d], StatusLabel::Buruk));
//! }
//!
//! // Compress the training set to two prototypes per class.
//! let prototypes = Lvq::new(2)
//!     .with_n_epochs(20)
//!     .with_random_state(42)
//!     .fit(&raw)
//!     .expect("every class has enough samples");
//!
//! // Classify against the prototypes, in original units.
//! let mut knn = WeightedKnn::from_config(&ClassifierConfig::default());
//! knn.fit(&prototypes.to_samples().expect("inverse transform"))
//!     .expect("non-empty reference set");
//! let label = knn
//!     .predict_one(&FeatureVector::anthropometric(3.05, 50.1, 12.1))
//!     .expect("fitted");
//! assert_eq!(label, StatusLabel::Normal);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Row-major `Matrix`
//! - [`data`]: Status labels, feature vectors and labelled samples
//! - [`preprocessing`]: Min-max feature scaling
//! - [`lvq`]: LVQ1 prototype reduction
//! - [`classification`]: Weighted KNN classifier
//! - [`model_selection`]: Stratified K-fold splitting
//! - [`metrics`]: Accuracy, confusion matrix, per-class figures
//! - [`evaluation`]: Cross-validated scoring of a configuration
//! - [`config`]: Classifier and reduction configuration
//! - [`store`]: Versioned parameter and accuracy history
//! - [`pipeline`]: `reduce_prototypes` / `classify` / `evaluate` call shapes

pub mod classification;
pub mod config;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod lvq;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod store;
pub mod traits;

pub use error::{GiziError, Result};
pub use primitives::Matrix;
pub use traits::{Classifier, Transformer};
