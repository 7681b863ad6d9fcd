//! Error types for the yolo-eval library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for yolo-eval operations.
pub type Result<T> = std::result::Result<T, YoloEvalError>;

/// Error types that can occur while evaluating detections.
#[derive(Error, Debug)]
pub enum YoloEvalError {
    /// Error during JSON serialization of a report.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// An image header could not be decoded.
    #[error("Failed to read image {}: {source}", path.display())]
    ImageError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A malformed label line under the strict label policy.
    #[error("Invalid label in {} at line {line}: {message}", path.display())]
    LabelParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Invalid IoU threshold.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// A required input directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// No images to evaluate.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),
}
