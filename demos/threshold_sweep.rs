//! Example showing how detection accuracy changes with the IoU threshold.

use yolo_eval::evaluator::{evaluate_corpus, sweep_thresholds, ImageBoxes, LoadedCorpus};
use yolo_eval::matching::MatchConfig;
use yolo_eval::threshold::{
    generate_threshold_range, DEFAULT_SWEEP_END, DEFAULT_SWEEP_START, DEFAULT_SWEEP_STEPS,
};
use yolo_eval::BoundingBox;

fn shifted(bbox: &BoundingBox, dx: i32) -> BoundingBox {
    BoundingBox::new(bbox.left() + dx, bbox.top(), bbox.right() + dx, bbox.bottom(), bbox.class_id())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== IoU Threshold Sweep Example ===\n");

    // Predictions drift further from the ground truth in each image
    let ground_truth = vec![
        BoundingBox::new(0, 0, 100, 100, 0),
        BoundingBox::new(200, 0, 300, 100, 1),
    ];
    let images: Vec<ImageBoxes> = [0, 5, 10, 20, 30, 45]
        .iter()
        .map(|&dx| ImageBoxes {
            id: format!("drift_{:02}", dx),
            predictions: ground_truth.iter().map(|b| shifted(b, dx)).collect(),
            ground_truth: ground_truth.clone(),
            skipped_label_lines: 0,
        })
        .collect();
    let corpus = LoadedCorpus {
        images,
        skipped: vec![],
    };

    // Example 1: Single threshold
    println!("1. Evaluation at IoU >= 0.5");
    let evaluation = evaluate_corpus(&corpus, &MatchConfig::new(0.5)?);
    for image in &evaluation.images {
        println!("   {}", image.log_line());
    }
    println!();

    // Example 2: Standard sweep
    println!("2. Sweep over 0.50:0.05:0.95");
    println!("   Threshold | Accuracy | Avg IoU | Precision");
    println!("   ----------|----------|---------|----------");
    let standard = generate_threshold_range(DEFAULT_SWEEP_START, DEFAULT_SWEEP_END, DEFAULT_SWEEP_STEPS)?;
    for point in sweep_thresholds(&corpus, &standard, false)? {
        println!(
            "   {:>9.2} | {:>7.2}% | {:>6.2}% | {:>8.2}%",
            point.iou_threshold,
            point.report.detection_accuracy,
            point.report.average_iou,
            point.report.precision
        );
    }
    println!();

    // Example 3: Custom range
    println!("3. Custom Threshold Range");
    let thresholds = generate_threshold_range(0.1, 0.9, 5)?;
    let points = sweep_thresholds(&corpus, &thresholds, true)?;
    for point in &points {
        println!(
            "   IoU >= {:.2}: {}/{} correct",
            point.iou_threshold, point.report.correct_detections, point.report.total_ground_truth
        );
    }
    println!();

    println!("=== Example Complete ===");

    Ok(())
}
