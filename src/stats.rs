//! Corpus-wide running totals.
//!
//! [`CorpusStats`] is a plain value: every update consumes it and returns the
//! next one, so a run threads a single accumulator through its images and
//! parallel workers can fold partial sums that are merged afterwards.

use serde::{Deserialize, Serialize};

use crate::report::Report;
use crate::types::MatchResult;

/// Totals accumulated over the images of an evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Ground-truth boxes across all evaluated images
    pub total_ground_truth: usize,

    /// Predicted boxes across all evaluated images
    pub total_predicted: usize,

    /// Predictions that claimed a ground-truth box
    pub total_matched: usize,

    /// Sum of the IoUs of all matches
    pub iou_sum: f64,

    /// Images folded in through [`CorpusStats::accumulate`]
    pub images_evaluated: usize,

    /// Images left out because they could not be read
    pub images_skipped: usize,

    /// Malformed label lines dropped while loading
    pub skipped_label_lines: usize,
}

impl CorpusStats {
    /// Create a new `CorpusStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one image's match result into the totals.
    ///
    /// # Example
    ///
    /// ```
    /// use yolo_eval::matching::match_boxes;
    /// use yolo_eval::stats::CorpusStats;
    /// use yolo_eval::types::BoundingBox;
    ///
    /// let gt = vec![BoundingBox::new(0, 0, 10, 10, 0)];
    /// let pred = vec![BoundingBox::new(0, 0, 10, 10, 0)];
    /// let result = match_boxes(&gt, &pred, 0.5);
    ///
    /// let stats = CorpusStats::new().accumulate(&result, gt.len(), pred.len());
    /// assert_eq!(stats.total_matched, 1);
    /// ```
    #[must_use]
    pub fn accumulate(self, result: &MatchResult, gt_count: usize, pred_count: usize) -> Self {
        Self {
            total_ground_truth: self.total_ground_truth + gt_count,
            total_predicted: self.total_predicted + pred_count,
            total_matched: self.total_matched + result.match_count(),
            iou_sum: self.iou_sum + result.iou_sum(),
            images_evaluated: self.images_evaluated + 1,
            ..self
        }
    }

    /// Combine two partial totals.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            total_ground_truth: self.total_ground_truth + other.total_ground_truth,
            total_predicted: self.total_predicted + other.total_predicted,
            total_matched: self.total_matched + other.total_matched,
            iou_sum: self.iou_sum + other.iou_sum,
            images_evaluated: self.images_evaluated + other.images_evaluated,
            images_skipped: self.images_skipped + other.images_skipped,
            skipped_label_lines: self.skipped_label_lines + other.skipped_label_lines,
        }
    }

    /// Record an image that was left out of the totals
    #[must_use]
    pub fn record_skipped_image(self) -> Self {
        Self {
            images_skipped: self.images_skipped + 1,
            ..self
        }
    }

    /// Record malformed label lines dropped while loading
    #[must_use]
    pub fn record_skipped_lines(self, count: usize) -> Self {
        Self {
            skipped_label_lines: self.skipped_label_lines + count,
            ..self
        }
    }

    /// Derive the final report. See [`Report::from_stats`].
    pub fn finalize(&self) -> Report {
        Report::from_stats(self)
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "CorpusStats {{ gt: {}, predicted: {}, matched: {}, images: {}, skipped_images: {}, skipped_lines: {} }}",
            self.total_ground_truth,
            self.total_predicted,
            self.total_matched,
            self.images_evaluated,
            self.images_skipped,
            self.skipped_label_lines
        )
    }
}
