//! Precision, recall and F1 from match counts.

use serde::{Deserialize, Serialize};

/// Container for precision and recall values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecall {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

/// Divide two counts, yielding 0.0 when the denominator is zero.
///
/// # Example
///
/// ```
/// use yolo_eval::metrics::precision_recall::ratio;
///
/// assert_eq!(ratio(3, 4), 0.75);
/// assert_eq!(ratio(3, 0), 0.0);
/// ```
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Calculate F1 score from precision and recall.
///
/// F1 = 2 × (Precision × Recall) / (Precision + Recall), or 0.0 if both are 0.
pub fn calculate_f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }

    2.0 * (precision * recall) / (precision + recall)
}

/// Calculate precision and recall from TP, FP, and FN counts.
///
/// # Arguments
///
/// * `true_positives` - Number of matched predictions
/// * `false_positives` - Number of predictions that matched nothing
/// * `false_negatives` - Number of missed ground-truth boxes
///
/// # Example
///
/// ```
/// use yolo_eval::metrics::precision_recall::calculate_precision_recall;
///
/// let pr = calculate_precision_recall(8, 2, 3);
/// assert_eq!(pr.precision, 0.8); // 8 / (8 + 2)
/// assert!((pr.recall - 0.7272).abs() < 0.001); // 8 / (8 + 3)
/// ```
pub fn calculate_precision_recall(
    true_positives: usize,
    false_positives: usize,
    false_negatives: usize,
) -> PrecisionRecall {
    let precision = ratio(true_positives, true_positives + false_positives);
    let recall = ratio(true_positives, true_positives + false_negatives);

    PrecisionRecall {
        precision,
        recall,
        f1: calculate_f1_score(precision, recall),
        true_positives,
        false_positives,
        false_negatives,
    }
}
