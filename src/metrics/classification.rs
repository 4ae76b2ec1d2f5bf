//! Classification metrics for evaluating classifier performance.
//!
//! Provides accuracy, a confusion matrix over a fixed class list, and
//! one-vs-rest sensitivity, specificity, precision and F1 per class.

use crate::data::StatusLabel;
use crate::error::{GiziError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Errors
///
/// `EmptyDataset` for empty input, `FeatureDimensionMismatch` when the two
/// slices differ in length.
///
/// # Examples
///
/// ```
/// use gizi::data::StatusLabel::{Buruk, Kurang, Normal};
/// use gizi::metrics::accuracy;
///
/// let y_true = [Normal, Kurang, Buruk, Normal];
/// let y_pred = [Normal, Buruk, Buruk, Kurang];
/// let acc = accuracy(&y_pred, &y_true).expect("same length");
/// assert!((acc - 0.5).abs() < 1e-12);
/// ```
pub fn accuracy(y_pred: &[StatusLabel], y_true: &[StatusLabel]) -> Result<f64> {
    check_lengths(y_pred, y_true)?;

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    Ok(correct as f64 / y_true.len() as f64)
}

/// Compute confusion matrix over `classes`.
///
/// Element `[i, j]` counts samples with true label `classes[i]` predicted as
/// `classes[j]`.
///
/// # Errors
///
/// `UnknownLabel` if a label is not in `classes`, `EmptyDataset` for empty
/// input, `FeatureDimensionMismatch` when the slices differ in length.
///
/// # Examples
///
/// ```
/// use gizi::data::StatusLabel::{self, Buruk, Kurang, Normal};
/// use gizi::metrics::confusion_matrix;
///
/// let y_true = [Normal, Normal, Kurang, Kurang, Buruk, Buruk];
/// let y_pred = [Normal, Kurang, Kurang, Kurang, Buruk, Normal];
/// let cm = confusion_matrix(&y_pred, &y_true, &StatusLabel::CANONICAL).expect("known labels");
/// assert_eq!(cm.shape(), (3, 3));
/// assert_eq!(cm.trace(), 4);
/// ```
pub fn confusion_matrix(
    y_pred: &[StatusLabel],
    y_true: &[StatusLabel],
    classes: &[StatusLabel],
) -> Result<Matrix<usize>> {
    check_lengths(y_pred, y_true)?;

    let n_classes = classes.len();
    let mut cm = Matrix::zeros(n_classes, n_classes);
    for (&true_label, &pred_label) in y_true.iter().zip(y_pred.iter()) {
        let i = class_index(classes, true_label)?;
        let j = class_index(classes, pred_label)?;
        cm.set(i, j, cm.get(i, j) + 1);
    }
    Ok(cm)
}

/// One-vs-rest figures of one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// The class these figures describe.
    pub label: StatusLabel,
    /// TP / (TP + FN), also called recall.
    pub sensitivity: f64,
    /// TN / (TN + FP).
    pub specificity: f64,
    /// TP / (TP + FP).
    pub precision: f64,
    /// Harmonic mean of precision and sensitivity.
    pub f1: f64,
    /// True instances of the class (TP + FN).
    pub support: usize,
}

impl ClassMetrics {
    /// Reads the metrics of class `index` from a confusion matrix whose rows
    /// are true labels and columns predictions.
    ///
    /// Every ratio with a zero denominator is reported as zero.
    #[must_use]
    pub fn from_confusion(cm: &Matrix<usize>, index: usize, label: StatusLabel) -> Self {
        let tp = cm.get(index, index);
        let fp = cm.col_sum(index) - tp;
        let fn_count = cm.row_sum(index) - tp;
        let tn = cm.total() - tp - fp - fn_count;

        let sensitivity = ratio(tp, tp + fn_count);
        let precision = ratio(tp, tp + fp);
        Self {
            label,
            sensitivity,
            specificity: ratio(tn, tn + fp),
            precision,
            f1: f1_from_prec_rec(precision, sensitivity),
            support: tp + fn_count,
        }
    }
}

/// Unweighted means of the per-class figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroAverage {
    /// Mean sensitivity.
    pub sensitivity: f64,
    /// Mean specificity.
    pub specificity: f64,
    /// Mean precision.
    pub precision: f64,
    /// Mean F1.
    pub f1: f64,
}

/// Metrics for every class, in `classes` order.
///
/// # Errors
///
/// `FeatureDimensionMismatch` unless `cm` is square with one row per class.
pub fn per_class_metrics(cm: &Matrix<usize>, classes: &[StatusLabel]) -> Result<Vec<ClassMetrics>> {
    if cm.n_rows() != classes.len() || cm.n_cols() != classes.len() {
        return Err(GiziError::dimension_mismatch(classes.len(), cm.n_rows()));
    }
    Ok(classes
        .iter()
        .enumerate()
        .map(|(i, &label)| ClassMetrics::from_confusion(cm, i, label))
        .collect())
}

/// Unweighted mean across classes. An empty list yields zeros.
#[must_use]
pub fn macro_average(metrics: &[ClassMetrics]) -> MacroAverage {
    if metrics.is_empty() {
        return MacroAverage::default();
    }
    let n = metrics.len() as f64;
    let sum = metrics.iter().fold(MacroAverage::default(), |acc, m| MacroAverage {
        sensitivity: acc.sensitivity + m.sensitivity,
        specificity: acc.specificity + m.specificity,
        precision: acc.precision + m.precision,
        f1: acc.f1 + m.f1,
    });
    MacroAverage {
        sensitivity: sum.sensitivity / n,
        specificity: sum.specificity / n,
        precision: sum.precision / n,
        f1: sum.f1 / n,
    }
}

fn check_lengths(y_pred: &[StatusLabel], y_true: &[StatusLabel]) -> Result<()> {
    if y_pred.len() != y_true.len() {
        return Err(GiziError::dimension_mismatch(y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(GiziError::empty_dataset("metric inputs"));
    }
    Ok(())
}

fn class_index(classes: &[StatusLabel], label: StatusLabel) -> Result<usize> {
    classes
        .iter()
        .position(|&c| c == label)
        .ok_or_else(|| GiziError::UnknownLabel(label.to_string()))
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Compute F1 score from precision and recall.
fn f1_from_prec_rec(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}


#[cfg(test)]
#[path = "tests_classification_contract.rs"]
mod tests_classification_contract;
