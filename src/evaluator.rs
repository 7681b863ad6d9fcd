//! Main evaluation orchestrator for YOLO label directories.
//!
//! A run has two phases. [`load_corpus`] reads every image header and both
//! label files into memory, and [`evaluate_corpus`] matches each image and
//! folds the results into a [`CorpusStats`]. Splitting them lets a threshold
//! sweep reuse one load.

use std::path::Path;

use indicatif::ProgressBar;
use log::{info, warn};
use rayon::prelude::*;

use crate::dataset::{read_image_size, DatasetLayout, ImageEntry};
use crate::error::{Result, YoloEvalError};
use crate::loader::{load_boxes, LabelPolicy};
use crate::matching::{match_boxes_with, MatchConfig};
use crate::metrics::precision_recall::ratio;
use crate::report::{ImageSummary, JsonReport, Report, SkippedImage, SweepPoint};
use crate::stats::CorpusStats;
use crate::types::{BoundingBox, MatchResult};

/// Settings for a whole evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalConfig {
    pub matching: MatchConfig,
    pub label_policy: LabelPolicy,
}

/// Ground truth and predictions of one image, in pixel space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageBoxes {
    pub id: String,
    pub ground_truth: Vec<BoundingBox>,
    pub predictions: Vec<BoundingBox>,
    /// Malformed lines dropped from both label files
    pub skipped_label_lines: usize,
}

/// Every image of a dataset, loaded and ready to match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedCorpus {
    /// Images in sorted id order
    pub images: Vec<ImageBoxes>,
    pub skipped: Vec<SkippedImage>,
}

impl LoadedCorpus {
    /// Fail with [`YoloEvalError::EmptyDataset`] when no image could be read.
    pub fn ensure_not_empty(&self, images_dir: &Path) -> Result<()> {
        if self.images.is_empty() {
            return Err(YoloEvalError::EmptyDataset(format!(
                "None of the {} images in {} could be read",
                self.skipped.len(),
                images_dir.display()
            )));
        }
        Ok(())
    }
}

/// Match outcome for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEvaluation {
    pub id: String,
    pub ground_truth_count: usize,
    pub prediction_count: usize,
    pub result: MatchResult,
    pub skipped_label_lines: usize,
}

impl ImageEvaluation {
    /// Matched / ground truth in percent, `None` for an image without ground truth.
    pub fn accuracy(&self) -> Option<f64> {
        (self.ground_truth_count > 0)
            .then(|| ratio(self.result.match_count(), self.ground_truth_count) * 100.0)
    }

    pub fn summary(&self) -> ImageSummary {
        ImageSummary {
            image: self.id.clone(),
            ground_truth: self.ground_truth_count,
            predicted: self.prediction_count,
            matched: self.result.match_count(),
            extra: self.result.extra_count(),
            missed: self.result.missed_count(),
            average_iou: self.result.average_iou() * 100.0,
            accuracy: self.accuracy(),
            skipped_label_lines: self.skipped_label_lines,
        }
    }

    /// One-line console summary.
    pub fn log_line(&self) -> String {
        format!(
            "Processed {}: Good {}/{}, Extra {}, Missed {}, Avg IoU: {:.1}%",
            self.id,
            self.result.match_count(),
            self.ground_truth_count,
            self.result.extra_count(),
            self.result.missed_count(),
            self.result.average_iou() * 100.0
        )
    }
}

/// Outcome of evaluating a corpus at one IoU threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub iou_threshold: f64,
    pub stats: CorpusStats,
    pub images: Vec<ImageEvaluation>,
    pub skipped: Vec<SkippedImage>,
}

impl Evaluation {
    pub fn report(&self) -> Report {
        self.stats.finalize()
    }

    /// Build the JSON document, attaching an optional threshold sweep.
    pub fn to_json(&self, sweep: Vec<SweepPoint>) -> JsonReport {
        JsonReport {
            iou_threshold: self.iou_threshold,
            summary: self.report(),
            images: self.images.iter().map(ImageEvaluation::summary).collect(),
            skipped_images: self.skipped.clone(),
            sweep,
        }
    }
}

/// Match one image.
pub fn evaluate_image(image: &ImageBoxes, config: &MatchConfig) -> ImageEvaluation {
    ImageEvaluation {
        id: image.id.clone(),
        ground_truth_count: image.ground_truth.len(),
        prediction_count: image.predictions.len(),
        result: match_boxes_with(&image.ground_truth, &image.predictions, config),
        skipped_label_lines: image.skipped_label_lines,
    }
}

/// Read one image's size and both of its label files.
///
/// Returns `Ok(Err(..))` when the image itself cannot be read: that image is
/// skipped, while label errors abort the run.
fn load_image(
    entry: &ImageEntry,
    policy: LabelPolicy,
) -> Result<std::result::Result<ImageBoxes, SkippedImage>> {
    let size = match read_image_size(&entry.image_path) {
        Ok(size) => size,
        Err(e) => {
            warn!("{}. Skipping.", e);
            return Ok(Err(SkippedImage {
                image: entry.id.clone(),
                reason: e.to_string(),
            }));
        }
    };

    let ground_truth = load_boxes(&entry.gt_label_path, size, policy)?;
    let predictions = load_boxes(&entry.pred_label_path, size, policy)?;

    Ok(Ok(ImageBoxes {
        id: entry.id.clone(),
        skipped_label_lines: ground_truth.skipped_lines + predictions.skipped_lines,
        ground_truth: ground_truth.boxes,
        predictions: predictions.boxes,
    }))
}

/// Load every image of `layout`.
///
/// Images are read in parallel but kept in sorted id order. `progress` is
/// advanced once per image.
///
/// # Errors
///
/// Returns an error if a directory is missing, the images directory holds no
/// images, a label file cannot be read, or a label line is malformed under
/// [`LabelPolicy::Strict`]. Unreadable images are skipped, not errors.
pub fn load_corpus(
    layout: &DatasetLayout,
    policy: LabelPolicy,
    progress: &ProgressBar,
) -> Result<LoadedCorpus> {
    layout.validate()?;
    let entries = layout.collect_images()?;
    info!(
        "Found {} images in {}",
        entries.len(),
        layout.images_dir.display()
    );
    progress.set_length(entries.len() as u64);

    let loaded: Vec<_> = entries
        .par_iter()
        .map(|entry| {
            let outcome = load_image(entry, policy);
            progress.inc(1);
            outcome
        })
        .collect::<Result<Vec<_>>>()?;

    let mut corpus = LoadedCorpus::default();
    for outcome in loaded {
        match outcome {
            Ok(image) => corpus.images.push(image),
            Err(skipped) => corpus.skipped.push(skipped),
        }
    }

    Ok(corpus)
}

/// Match every loaded image and fold the results.
///
/// Matching runs in parallel; the fold runs sequentially in image order.
pub fn evaluate_corpus(corpus: &LoadedCorpus, config: &MatchConfig) -> Evaluation {
    let images: Vec<ImageEvaluation> = corpus
        .images
        .par_iter()
        .map(|image| evaluate_image(image, config))
        .collect();

    let stats = images.iter().fold(CorpusStats::new(), |stats, image| {
        stats
            .accumulate(&image.result, image.ground_truth_count, image.prediction_count)
            .record_skipped_lines(image.skipped_label_lines)
    });
    let stats = corpus
        .skipped
        .iter()
        .fold(stats, |stats, _| stats.record_skipped_image());

    Evaluation {
        iou_threshold: config.iou_threshold,
        stats,
        images,
        skipped: corpus.skipped.clone(),
    }
}

/// Evaluate the corpus once per IoU threshold.
pub fn sweep_thresholds(
    corpus: &LoadedCorpus,
    thresholds: &[f64],
    class_aware: bool,
) -> Result<Vec<SweepPoint>> {
    thresholds
        .iter()
        .map(|&threshold| {
            let config = MatchConfig::new(threshold)?.class_aware(class_aware);
            Ok(SweepPoint {
                iou_threshold: threshold,
                report: evaluate_corpus(corpus, &config).report(),
            })
        })
        .collect()
}

/// Load and evaluate a dataset directory in one call, logging each image.
///
/// # Example
///
/// ```no_run
/// use indicatif::ProgressBar;
/// use yolo_eval::dataset::DatasetLayout;
/// use yolo_eval::evaluator::{evaluate_dataset, EvalConfig};
///
/// let layout = DatasetLayout::new("test/images", "test/labels", "runs/detect/predict/labels");
/// let evaluation = evaluate_dataset(&layout, &EvalConfig::default(), &ProgressBar::hidden()).unwrap();
/// print!("{}", evaluation.report());
/// ```
pub fn evaluate_dataset(
    layout: &DatasetLayout,
    config: &EvalConfig,
    progress: &ProgressBar,
) -> Result<Evaluation> {
    let corpus = load_corpus(layout, config.label_policy, progress)?;
    corpus.ensure_not_empty(&layout.images_dir)?;

    let evaluation = evaluate_corpus(&corpus, &config.matching);
    for image in &evaluation.images {
        info!("{}", image.log_line());
    }

    Ok(evaluation)
}
