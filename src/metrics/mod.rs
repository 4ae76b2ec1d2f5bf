//! Evaluation metrics for status classifiers.
//!
//! Everything is indexed by an explicit class list so that the confusion
//! matrix layout is identical across runs.

pub mod classification;

pub use classification::{
    accuracy, confusion_matrix, macro_average, per_class_metrics, ClassMetrics, MacroAverage,
};
