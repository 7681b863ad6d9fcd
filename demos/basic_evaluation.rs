//! Basic evaluation example demonstrating core functionality.

use std::path::Path;

use yolo_eval::loader::{parse_labels, LabelPolicy};
use yolo_eval::metrics::precision_recall::calculate_precision_recall;
use yolo_eval::{calculate_iou, match_boxes, BoundingBox, CorpusStats, ImageSize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== YOLO Evaluation Example ===\n");

    // Example 1: IoU Calculation
    println!("1. IoU Calculation");
    let bbox1 = BoundingBox::new(0, 0, 10, 10, 0);
    let bbox2 = BoundingBox::new(1, 1, 9, 9, 0);
    let iou = calculate_iou(&bbox1, &bbox2);
    println!("   IoU between a box and its inset: {:.4}", iou);
    println!();

    // Example 2: Parse YOLO labels
    println!("2. Parsing YOLO Labels");
    let size = ImageSize::new(640, 480);
    let ground_truth_txt = "\
0 0.3125 0.3646 0.3125 0.3125
2 0.6250 0.5417 0.1563 0.2500
";
    let ground_truth = parse_labels(ground_truth_txt, size, LabelPolicy::Lenient, Path::new("gt.txt"))?;
    for bbox in &ground_truth.boxes {
        println!(
            "   class {} -> ({}, {}, {}, {})",
            bbox.class_id(),
            bbox.left(),
            bbox.top(),
            bbox.right(),
            bbox.bottom()
        );
    }
    println!();

    // Example 3: Predictions with one malformed line
    println!("3. Parsing Predictions");
    let predictions_txt = "\
0 0.3200 0.3700 0.3000 0.3100
2 0.6300 0.5400 0.1600 0.2600 0.87
1 0.1000 0.1000 0.0500 0.0500
";
    let predictions = parse_labels(predictions_txt, size, LabelPolicy::Lenient, Path::new("pred.txt"))?;
    println!(
        "   Loaded {} predictions, skipped {} malformed line(s)",
        predictions.boxes.len(),
        predictions.skipped_lines
    );
    println!();

    // Example 4: Greedy matching
    println!("4. Greedy Matching at IoU >= 0.5");
    let result = match_boxes(&ground_truth.boxes, &predictions.boxes, 0.5);
    for pair in &result.matches {
        println!(
            "   prediction {} -> ground truth {} (IoU {:.3})",
            pair.prediction, pair.ground_truth, pair.iou
        );
    }
    println!("   Unmatched ground truth: {:?}", result.unmatched_ground_truth);
    println!("   Unmatched predictions: {:?}", result.unmatched_predictions);
    println!();

    // Example 5: Report
    println!("5. Report");
    let report = CorpusStats::new()
        .accumulate(&result, ground_truth.boxes.len(), predictions.boxes.len())
        .record_skipped_lines(predictions.skipped_lines)
        .finalize();
    print!("{}", report);
    println!();

    // Example 6: Precision and recall from the same counts
    println!("6. Precision and Recall");
    let pr = calculate_precision_recall(
        report.correct_detections,
        report.wrong_detections,
        report.missed_detections,
    );
    println!("   ├─ Precision: {:.4}", pr.precision);
    println!("   ├─ Recall: {:.4}", pr.recall);
    println!("   └─ F1 Score: {:.4}", pr.f1);
    println!();

    println!("=== Example Complete ===");

    Ok(())
}
