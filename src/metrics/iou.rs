//! Intersection over Union (IoU) calculation.

use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// IoU is defined as the area of intersection divided by the area of union.
/// Degenerate boxes (non-positive width or height) never overlap anything,
/// so any pair involving one yields 0.0.
///
/// # Arguments
///
/// * `bbox1` - First bounding box
/// * `bbox2` - Second bounding box
///
/// # Returns
///
/// Returns a value between 0.0 (no overlap) and 1.0 (perfect overlap).
///
/// # Example
///
/// ```
/// use yolo_eval::metrics::iou::calculate_iou;
/// use yolo_eval::types::BoundingBox;
///
/// let gt = BoundingBox::new(0, 0, 10, 10, 0);
/// let pred = BoundingBox::new(1, 1, 9, 9, 0);
/// assert!((calculate_iou(&gt, &pred) - 0.64).abs() < 1e-12);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    if !bbox1.is_valid() || !bbox2.is_valid() {
        return 0.0;
    }

    // Overlap extents, clamped at zero on each axis
    let overlap_width = (i64::from(bbox1.right().min(bbox2.right()))
        - i64::from(bbox1.left().max(bbox2.left())))
    .max(0);
    let overlap_height = (i64::from(bbox1.bottom().min(bbox2.bottom()))
        - i64::from(bbox1.top().max(bbox2.top())))
    .max(0);

    // Products of two i32 spans can exceed i64, so areas are widened
    let intersection_area = overlap_width as u128 * overlap_height as u128;
    let union_area = u128::from(bbox1.area()) + u128::from(bbox2.area()) - intersection_area;

    // Avoid division by zero
    if union_area == 0 {
        return 0.0;
    }

    intersection_area as f64 / union_area as f64
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// # Arguments
///
/// * `bboxes1` - First set of bounding boxes
/// * `bboxes2` - Second set of bounding boxes
///
/// # Returns
///
/// Returns a 2D vector where `result[i][j]` is the IoU between `bboxes1[i]` and `bboxes2[j]`.
///
/// # Example
///
/// ```
/// use yolo_eval::metrics::iou::calculate_iou_matrix;
/// use yolo_eval::types::BoundingBox;
///
/// let bboxes1 = vec![BoundingBox::new(0, 0, 10, 10, 0)];
/// let bboxes2 = vec![BoundingBox::new(5, 5, 15, 15, 0)];
/// let iou_matrix = calculate_iou_matrix(&bboxes1, &bboxes2);
/// assert_eq!(iou_matrix.len(), 1);
/// assert_eq!(iou_matrix[0].len(), 1);
/// ```
pub fn calculate_iou_matrix(bboxes1: &[BoundingBox], bboxes2: &[BoundingBox]) -> Vec<Vec<f64>> {
    bboxes1
        .iter()
        .map(|bbox1| {
            bboxes2
                .iter()
                .map(|bbox2| calculate_iou(bbox1, bbox2))
                .collect()
        })
        .collect()
}
