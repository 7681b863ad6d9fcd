//! Core data types for YOLO labels and match results.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in pixel space.
///
/// Coordinates are in LTRB (Left-Top-Right-Bottom) format:
/// - left: Left edge
/// - top: Top edge
/// - right: Right edge
/// - bottom: Bottom edge
///
/// Boxes built from malformed labels may have `right <= left` or
/// `bottom <= top`. Such boxes are kept but have zero area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    class_id: u32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32, class_id: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            class_id,
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn class_id(&self) -> u32 {
        self.class_id
    }

    /// Horizontal extent, negative for inverted boxes.
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    /// Vertical extent, negative for inverted boxes.
    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }

    /// Get the area of the bounding box, zero for degenerate boxes.
    pub fn area(&self) -> u64 {
        if self.is_valid() {
            self.width() as u64 * self.height() as u64
        } else {
            0
        }
    }

    /// Check if the bounding box is valid (positive dimensions).
    pub fn is_valid(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One object line of a YOLO label file.
///
/// Center and extent are normalized to `[0, 1]` relative to the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YoloRecord {
    pub class_id: f64,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl YoloRecord {
    /// Denormalize against `size` and convert center+extent to corners.
    ///
    /// Corners are truncated toward zero.
    pub fn to_pixel_box(&self, size: ImageSize) -> BoundingBox {
        let image_width = f64::from(size.width);
        let image_height = f64::from(size.height);

        let x_center = self.x_center * image_width;
        let y_center = self.y_center * image_height;
        let half_width = self.width * image_width / 2.0;
        let half_height = self.height * image_height / 2.0;

        BoundingBox::new(
            (x_center - half_width) as i32,
            (y_center - half_height) as i32,
            (x_center + half_width) as i32,
            (y_center + half_height) as i32,
            self.class_id as u32,
        )
    }
}

/// A ground-truth box paired with the prediction that claimed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchedPair {
    /// Index into the ground-truth slice
    pub ground_truth: usize,
    /// Index into the prediction slice
    pub prediction: usize,
    pub iou: f64,
}

/// Outcome of matching one image's predictions against its ground truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Matches in the order the predictions were visited
    pub matches: Vec<MatchedPair>,
    /// Ground-truth indices nothing matched (false negatives)
    pub unmatched_ground_truth: Vec<usize>,
    /// Prediction indices that matched nothing (false positives)
    pub unmatched_predictions: Vec<usize>,
}

impl MatchResult {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Number of missed ground-truth boxes.
    pub fn missed_count(&self) -> usize {
        self.unmatched_ground_truth.len()
    }

    /// Number of predictions with no ground-truth partner.
    pub fn extra_count(&self) -> usize {
        self.unmatched_predictions.len()
    }

    /// Sum of the IoUs of all matches.
    pub fn iou_sum(&self) -> f64 {
        self.matches.iter().map(|m| m.iou).sum()
    }

    /// Mean IoU of the matches, 0.0 when nothing matched.
    pub fn average_iou(&self) -> f64 {
        if self.matches.is_empty() {
            0.0
        } else {
            self.iou_sum() / self.matches.len() as f64
        }
    }
}
