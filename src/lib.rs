//! # yolo-eval
//!
//! A Rust library for checking YOLO-format object detections against ground
//! truth labels.
//!
//! For every image, predicted boxes are matched to ground-truth boxes with a
//! greedy IoU rule and the results are folded into corpus-wide totals:
//! - **Correct detections** (predictions that claimed a ground-truth box)
//! - **Wrong detections** (predictions that matched nothing)
//! - **Missed detections** (ground truth nothing matched)
//! - **Detection accuracy** (correct / ground truth)
//! - **Average IoU** of the correct detections
//!
//! ## Quick Start
//!
//! ```rust
//! use yolo_eval::matching::match_boxes;
//! use yolo_eval::stats::CorpusStats;
//! use yolo_eval::types::BoundingBox;
//!
//! let ground_truth = vec![BoundingBox::new(0, 0, 10, 10, 0)];
//! let predictions = vec![BoundingBox::new(1, 1, 9, 9, 0)];
//!
//! let result = match_boxes(&ground_truth, &predictions, 0.5);
//! let report = CorpusStats::new()
//!     .accumulate(&result, ground_truth.len(), predictions.len())
//!     .finalize();
//!
//! assert_eq!(report.correct_detections, 1);
//! assert!((report.average_iou - 64.0).abs() < 1e-9);
//! ```
//!
//! ## Label Format
//!
//! One `.txt` file per image, sharing the image's file stem, with one object
//! per line:
//!
//! ```text
//! <class_id> <x_center> <y_center> <width> <height>
//! ```
//!
//! Coordinates are normalized to `[0, 1]`. A missing label file means the
//! image has no objects.

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod matching;
pub mod metrics;
pub mod report;
pub mod stats;
pub mod threshold;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use error::{Result, YoloEvalError};
pub use evaluator::{evaluate_corpus, evaluate_dataset, load_corpus, EvalConfig, Evaluation};
pub use loader::{load_boxes, LabelPolicy};
pub use matching::{match_boxes, match_boxes_with, MatchConfig};
pub use metrics::iou::calculate_iou;
pub use report::Report;
pub use stats::CorpusStats;
pub use types::{BoundingBox, ImageSize, MatchResult, MatchedPair, YoloRecord};
