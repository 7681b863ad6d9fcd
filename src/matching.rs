//! Greedy matching of predicted boxes against ground truth.

use crate::error::Result;
use crate::metrics::iou::calculate_iou;
use crate::threshold::{validate_threshold, DEFAULT_IOU_THRESHOLD};
use crate::types::{BoundingBox, MatchResult, MatchedPair};

/// Knobs for [`match_boxes_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Minimum IoU for a prediction to claim a ground-truth box
    pub iou_threshold: f64,
    /// Only pair boxes that share a class id
    pub class_aware: bool,
}

impl MatchConfig {
    /// Create a class-agnostic config, validating the threshold.
    pub fn new(iou_threshold: f64) -> Result<Self> {
        Ok(Self {
            iou_threshold: validate_threshold(iou_threshold)?,
            class_aware: false,
        })
    }

    pub fn class_aware(mut self, class_aware: bool) -> Self {
        self.class_aware = class_aware;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            class_aware: false,
        }
    }
}

/// Match predictions to ground truth for a single image.
///
/// Class-agnostic shorthand for [`match_boxes_with`].
///
/// # Example
///
/// ```
/// use yolo_eval::matching::match_boxes;
/// use yolo_eval::types::BoundingBox;
///
/// let gt = vec![BoundingBox::new(0, 0, 10, 10, 0)];
/// let pred = vec![BoundingBox::new(1, 1, 9, 9, 0)];
/// let result = match_boxes(&gt, &pred, 0.5);
/// assert_eq!(result.match_count(), 1);
/// assert!((result.matches[0].iou - 0.64).abs() < 1e-12);
/// ```
pub fn match_boxes(
    ground_truths: &[BoundingBox],
    predictions: &[BoundingBox],
    iou_threshold: f64,
) -> MatchResult {
    match_boxes_with(
        ground_truths,
        predictions,
        &MatchConfig {
            iou_threshold,
            class_aware: false,
        },
    )
}

/// Match predictions to ground truth for a single image.
///
/// Uses greedy matching in prediction order, not an optimal assignment:
/// each prediction takes the highest-IoU ground-truth box that is still
/// unclaimed. Ties go to the box that comes first in ground-truth order, and
/// a box with zero overlap is never taken. A claimed box leaves the pool, so
/// the outcome depends on the order of `predictions`.
///
/// # Arguments
///
/// * `ground_truths` - Ground-truth boxes for this image
/// * `predictions` - Predicted boxes for this image, in the order to visit them
/// * `config` - IoU threshold and class handling
///
/// # Returns
///
/// Returns the matched pairs plus the indices left unmatched on each side.
pub fn match_boxes_with(
    ground_truths: &[BoundingBox],
    predictions: &[BoundingBox],
    config: &MatchConfig,
) -> MatchResult {
    // Unclaimed ground-truth indices, kept in original order
    let mut remaining: Vec<usize> = (0..ground_truths.len()).collect();
    let mut matches = Vec::new();
    let mut unmatched_predictions = Vec::new();

    for (pred_idx, pred_box) in predictions.iter().enumerate() {
        let mut best_iou = 0.0;
        let mut best_slot: Option<usize> = None;

        for (slot, &gt_idx) in remaining.iter().enumerate() {
            let gt_box = &ground_truths[gt_idx];
            if config.class_aware && gt_box.class_id() != pred_box.class_id() {
                continue;
            }

            let iou = calculate_iou(pred_box, gt_box);
            if iou > best_iou {
                best_iou = iou;
                best_slot = Some(slot);
            }
        }

        match best_slot {
            Some(slot) if best_iou >= config.iou_threshold => {
                let gt_idx = remaining.remove(slot);
                matches.push(MatchedPair {
                    ground_truth: gt_idx,
                    prediction: pred_idx,
                    iou: best_iou,
                });
            }
            _ => unmatched_predictions.push(pred_idx),
        }
    }

    MatchResult {
        matches,
        unmatched_ground_truth: remaining,
        unmatched_predictions,
    }
}
