//! Final evaluation report and its text/JSON renderings.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::precision_recall::{calculate_precision_recall, ratio};
use crate::stats::CorpusStats;

/// Summary metrics derived once from [`CorpusStats`].
///
/// Percentages are in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub total_ground_truth: usize,
    pub total_predicted: usize,
    pub correct_detections: usize,
    /// Predictions that matched nothing
    pub wrong_detections: usize,
    /// Ground-truth boxes nothing matched
    pub missed_detections: usize,
    /// Matched / ground truth, 0 without ground truth
    pub detection_accuracy: f64,
    /// Mean IoU of the matches, 0 without matches
    pub average_iou: f64,
    /// Matched / predicted, 0 without predictions
    pub precision: f64,
    pub f1: f64,
    pub images_evaluated: usize,
    pub images_skipped: usize,
    pub skipped_label_lines: usize,
}

impl Report {
    /// Compute the report from corpus totals.
    ///
    /// Every ratio with a zero denominator is reported as 0.
    ///
    /// # Example
    ///
    /// ```
    /// use yolo_eval::stats::CorpusStats;
    ///
    /// let report = CorpusStats::new().finalize();
    /// assert_eq!(report.detection_accuracy, 0.0);
    /// assert_eq!(report.average_iou, 0.0);
    /// ```
    pub fn from_stats(stats: &CorpusStats) -> Self {
        let matched = stats.total_matched;
        let wrong = stats.total_predicted.saturating_sub(matched);
        let missed = stats.total_ground_truth.saturating_sub(matched);
        let pr = calculate_precision_recall(matched, wrong, missed);

        let average_iou = if matched > 0 {
            stats.iou_sum / matched as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_ground_truth: stats.total_ground_truth,
            total_predicted: stats.total_predicted,
            correct_detections: matched,
            wrong_detections: wrong,
            missed_detections: missed,
            detection_accuracy: ratio(matched, stats.total_ground_truth) * 100.0,
            average_iou,
            precision: pr.precision * 100.0,
            f1: pr.f1 * 100.0,
            images_evaluated: stats.images_evaluated,
            images_skipped: stats.images_skipped,
            skipped_label_lines: stats.skipped_label_lines,
        }
    }

    /// Write the text summary to `path`, replacing any existing file.
    pub fn write_text<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write!(writer, "{}", self)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Evaluation Summary")?;
        writeln!(f, "===========================")?;
        writeln!(f, "Total Ground Truth Objects : {}", self.total_ground_truth)?;
        writeln!(f, "Total Predicted Objects    : {}", self.total_predicted)?;
        writeln!(
            f,
            "Correct Detections         : {}/{}",
            self.correct_detections, self.total_ground_truth
        )?;
        writeln!(f, "Wrong Detections           : {}", self.wrong_detections)?;
        writeln!(f, "Missed Detections          : {}", self.missed_detections)?;
        writeln!(f, "Detection Accuracy         : {:.2}%", self.detection_accuracy)?;
        writeln!(f, "Average IoU of Matches     : {:.2}%", self.average_iou)
    }
}

/// Per-image line of the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub image: String,
    pub ground_truth: usize,
    pub predicted: usize,
    pub matched: usize,
    pub extra: usize,
    pub missed: usize,
    /// Mean IoU of this image's matches, in percent
    pub average_iou: f64,
    /// `None` when the image has no ground truth
    pub accuracy: Option<f64>,
    pub skipped_label_lines: usize,
}

/// An image excluded from the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedImage {
    pub image: String,
    pub reason: String,
}

/// Report for one IoU threshold of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub iou_threshold: f64,
    pub report: Report,
}

/// Machine-readable output of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub iou_threshold: f64,
    pub summary: Report,
    pub images: Vec<ImageSummary>,
    pub skipped_images: Vec<SkippedImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sweep: Vec<SweepPoint>,
}

impl JsonReport {
    /// Write pretty-printed JSON to `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
