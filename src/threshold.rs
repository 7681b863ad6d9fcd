//! IoU threshold validation and sweep ranges.

use crate::error::{Result, YoloEvalError};

/// IoU threshold used when none is given.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Default sweep: 0.50 to 0.95 in steps of 0.05.
pub const DEFAULT_SWEEP_START: f64 = 0.5;
pub const DEFAULT_SWEEP_END: f64 = 0.95;
pub const DEFAULT_SWEEP_STEPS: usize = 10;

/// Validate that a threshold is in the valid range [0.0, 1.0].
///
/// # Example
///
/// ```
/// use yolo_eval::threshold::validate_threshold;
///
/// assert!(validate_threshold(0.5).is_ok());
/// assert!(validate_threshold(1.5).is_err());
/// ```
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(YoloEvalError::InvalidThreshold(format!(
            "Threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(threshold)
}

/// Generate a range of threshold values for evaluation.
///
/// # Arguments
///
/// * `start` - Starting threshold value (inclusive)
/// * `end` - Ending threshold value (inclusive)
/// * `steps` - Number of threshold values to generate
///
/// # Returns
///
/// Returns a vector of evenly-spaced threshold values.
///
/// # Example
///
/// ```
/// use yolo_eval::threshold::generate_threshold_range;
///
/// let thresholds = generate_threshold_range(0.0, 1.0, 11).unwrap();
/// assert_eq!(thresholds.len(), 11);
/// assert_eq!(thresholds[0], 0.0);
/// assert_eq!(thresholds[10], 1.0);
/// ```
pub fn generate_threshold_range(start: f64, end: f64, steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(YoloEvalError::InvalidThreshold(
            "Number of steps must be greater than 0".to_string(),
        ));
    }

    validate_threshold(start)?;
    validate_threshold(end)?;

    if start > end {
        return Err(YoloEvalError::InvalidThreshold(format!(
            "Start threshold ({}) must be <= end threshold ({})",
            start, end
        )));
    }

    if steps == 1 {
        return Ok(vec![start]);
    }

    let step_size = (end - start) / (steps - 1) as f64;
    Ok((0..steps).map(|i| start + step_size * i as f64).collect())
}
