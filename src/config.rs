use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::dataset::DatasetLayout;
use crate::error::Result;
use crate::evaluator::EvalConfig;
use crate::loader::LabelPolicy;
use crate::matching::MatchConfig;
use crate::threshold::{
    generate_threshold_range, DEFAULT_SWEEP_END, DEFAULT_SWEEP_START, DEFAULT_SWEEP_STEPS,
};

/// Command-line arguments for comparing predicted YOLO labels against ground truth.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory containing the test images
    #[arg(long = "images")]
    pub images_dir: PathBuf,

    /// Directory containing ground-truth YOLO label files
    #[arg(long = "gt-labels")]
    pub gt_labels_dir: PathBuf,

    /// Directory containing predicted YOLO label files
    #[arg(long = "pred-labels")]
    pub pred_labels_dir: PathBuf,

    /// Minimum IoU for a prediction to count as a correct detection
    #[arg(long = "iou-threshold", default_value_t = 0.5, value_parser = validate_iou)]
    pub iou_threshold: f64,

    /// Only match predictions to ground truth of the same class
    #[arg(long = "class-aware")]
    pub class_aware: bool,

    /// Fail on malformed label lines instead of skipping them
    #[arg(long = "strict")]
    pub strict: bool,

    /// Path of the text summary
    #[arg(short = 'o', long = "output", default_value = "results.txt")]
    pub output: PathBuf,

    /// Also write a JSON report with per-image results
    #[arg(long = "json")]
    pub json: Option<PathBuf>,

    /// Re-evaluate over a range of IoU thresholds
    #[arg(long = "sweep")]
    pub sweep: bool,

    /// First IoU threshold of the sweep
    #[arg(long = "sweep-start", default_value_t = DEFAULT_SWEEP_START, value_parser = validate_iou)]
    pub sweep_start: f64,

    /// Last IoU threshold of the sweep
    #[arg(long = "sweep-end", default_value_t = DEFAULT_SWEEP_END, value_parser = validate_iou)]
    pub sweep_end: f64,

    /// Number of evenly spaced thresholds in the sweep
    #[arg(long = "sweep-steps", default_value_t = DEFAULT_SWEEP_STEPS)]
    pub sweep_steps: usize,
}

impl Args {
    pub fn layout(&self) -> DatasetLayout {
        DatasetLayout::new(&self.images_dir, &self.gt_labels_dir, &self.pred_labels_dir)
    }

    /// Thresholds for `--sweep`, start and end inclusive.
    pub fn sweep_thresholds(&self) -> Result<Vec<f64>> {
        generate_threshold_range(self.sweep_start, self.sweep_end, self.sweep_steps)
    }

    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig {
            matching: MatchConfig {
                iou_threshold: self.iou_threshold,
                class_aware: self.class_aware,
            },
            label_policy: if self.strict {
                LabelPolicy::Strict
            } else {
                LabelPolicy::Lenient
            },
        }
    }
}

// Validate that the IoU threshold is between 0.0 and 1.0
fn validate_iou(s: &str) -> std::result::Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("IOU_THRESHOLD must be between 0.0 and 1.0".to_string()),
    }
}
