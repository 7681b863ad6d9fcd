//! Stress tests with large datasets and complex scenarios.

use std::fs;

use indicatif::ProgressBar;
use yolo_eval::dataset::DatasetLayout;
use yolo_eval::evaluator::{evaluate_corpus, evaluate_dataset, EvalConfig, ImageBoxes, LoadedCorpus};
use yolo_eval::matching::{match_boxes, MatchConfig};
use yolo_eval::stats::CorpusStats;
use yolo_eval::types::BoundingBox;

/// A 100 x 10 grid of 8x8 boxes on a 10 px pitch.
fn grid(count: usize, offset: i32) -> Vec<BoundingBox> {
    (0..count)
        .map(|i| {
            let x = (i % 100) as i32 * 10 + offset;
            let y = (i / 100) as i32 * 10 + offset;
            BoundingBox::new(x, y, x + 8, y + 8, 0)
        })
        .collect()
}

#[test]
fn test_1000_boxes_single_image() {
    let ground_truth = grid(1000, 0);
    let predictions = grid(1000, 0);

    let result = match_boxes(&ground_truth, &predictions, 0.5);

    assert_eq!(result.match_count(), 1000);
    assert_eq!(result.missed_count(), 0);
    assert_eq!(result.extra_count(), 0);
    assert!((result.average_iou() - 1.0).abs() < 1e-12);
    for m in &result.matches {
        assert_eq!(m.ground_truth, m.prediction);
    }
}

#[test]
fn test_1000_boxes_reversed_predictions() {
    let ground_truth = grid(1000, 0);
    let mut predictions = grid(1000, 0);
    predictions.reverse();

    let result = match_boxes(&ground_truth, &predictions, 0.5);
    assert_eq!(result.match_count(), 1000);
    assert_eq!(result.matches[0].ground_truth, 999);
}

#[test]
fn test_1000_boxes_shifted_below_threshold() {
    // A 4 px shift leaves 4x8 overlap: IoU = 32 / 96
    let ground_truth = grid(1000, 0);
    let predictions: Vec<BoundingBox> = ground_truth
        .iter()
        .map(|b| BoundingBox::new(b.left() + 4, b.top(), b.right() + 4, b.bottom(), 0))
        .collect();

    assert_eq!(match_boxes(&ground_truth, &predictions, 0.5).match_count(), 0);
    assert_eq!(match_boxes(&ground_truth, &predictions, 0.3).match_count(), 1000);
}

#[test]
fn test_many_images_in_memory() {
    let images: Vec<ImageBoxes> = (0..500)
        .map(|i| {
            let ground_truth = grid(20, 0);
            // Every other image misses its last five boxes
            let kept = if i % 2 == 0 { 20 } else { 15 };
            ImageBoxes {
                id: format!("img_{:04}", i),
                predictions: ground_truth[..kept].to_vec(),
                ground_truth,
                skipped_label_lines: 0,
            }
        })
        .collect();
    let corpus = LoadedCorpus {
        images,
        skipped: vec![],
    };

    let evaluation = evaluate_corpus(&corpus, &MatchConfig::default());
    let report = evaluation.report();

    assert_eq!(report.images_evaluated, 500);
    assert_eq!(report.total_ground_truth, 10_000);
    assert_eq!(report.correct_detections, 8_750);
    assert_eq!(report.missed_detections, 1_250);
    assert_eq!(report.wrong_detections, 0);
    assert!((report.detection_accuracy - 87.5).abs() < 1e-10);

    assert_eq!(evaluation.images[0].id, "img_0000");
    assert_eq!(evaluation.images[499].id, "img_0499");
}

#[test]
fn test_parallel_fold_matches_sequential_fold() {
    let images: Vec<ImageBoxes> = (0..200)
        .map(|i| {
            let shift = (i % 7) as i32;
            ImageBoxes {
                id: format!("{:03}", i),
                ground_truth: grid(30, 0),
                predictions: grid(30 - (i % 5), shift),
                skipped_label_lines: 0,
            }
        })
        .collect();

    let sequential = images.iter().fold(CorpusStats::new(), |stats, image| {
        let result = match_boxes(&image.ground_truth, &image.predictions, 0.5);
        stats.accumulate(&result, image.ground_truth.len(), image.predictions.len())
    });

    let corpus = LoadedCorpus {
        images,
        skipped: vec![],
    };
    let first = evaluate_corpus(&corpus, &MatchConfig::default());
    let second = evaluate_corpus(&corpus, &MatchConfig::default());

    assert_eq!(first.stats, sequential);
    assert_eq!(first, second, "Repeated runs must be identical");
}

#[test]
fn test_dataset_with_many_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    for dir in ["images", "gt", "pred"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }

    for i in 0..50 {
        let stem = format!("frame_{:03}", i);
        image::RgbImage::new(64, 64)
            .save(root.join("images").join(format!("{}.png", stem)))
            .unwrap();
        fs::write(
            root.join("gt").join(format!("{}.txt", stem)),
            "0 0.25 0.25 0.25 0.25\n1 0.75 0.75 0.25 0.25\n",
        )
        .unwrap();
        if i % 10 != 0 {
            fs::write(
                root.join("pred").join(format!("{}.txt", stem)),
                "0 0.25 0.25 0.25 0.25\n",
            )
            .unwrap();
        }
    }

    let layout = DatasetLayout::new(root.join("images"), root.join("gt"), root.join("pred"));
    let evaluation =
        evaluate_dataset(&layout, &EvalConfig::default(), &ProgressBar::hidden()).unwrap();
    let report = evaluation.report();

    assert_eq!(report.images_evaluated, 50);
    assert_eq!(report.total_ground_truth, 100);
    assert_eq!(report.total_predicted, 45);
    assert_eq!(report.correct_detections, 45);
    assert_eq!(report.missed_detections, 55);
    assert!((report.detection_accuracy - 45.0).abs() < 1e-10);
}
