use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yolo_eval::loader::{parse_labels, LabelPolicy};
use yolo_eval::matching::match_boxes;
use yolo_eval::metrics::{calculate_iou, calculate_iou_matrix};
use yolo_eval::stats::CorpusStats;
use yolo_eval::types::{BoundingBox, ImageSize};
use std::path::Path;

fn diagonal_boxes(count: usize, step: i32) -> Vec<BoundingBox> {
    (0..count)
        .map(|i| {
            let offset = i as i32 * step;
            BoundingBox::new(offset, offset, offset + 50, offset + 50, 0)
        })
        .collect()
}

fn bench_iou_calculation(c: &mut Criterion) {
    let bbox1 = BoundingBox::new(10, 10, 60, 60, 0);
    let bbox2 = BoundingBox::new(30, 30, 80, 80, 0);

    c.bench_function("iou_single", |b| {
        b.iter(|| calculate_iou(black_box(&bbox1), black_box(&bbox2)));
    });
}

fn bench_iou_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("iou_matrix");

    for size in [10, 50, 100, 500].iter() {
        let boxes = diagonal_boxes(*size, 2);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| calculate_iou_matrix(black_box(&boxes), black_box(&boxes)));
        });
    }
    group.finish();
}

fn bench_greedy_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_matching");

    for size in [10, 50, 100, 500].iter() {
        let ground_truth = diagonal_boxes(*size, 10);
        // Shifted by 3 px so every prediction overlaps several ground-truth boxes
        let predictions: Vec<BoundingBox> = ground_truth
            .iter()
            .map(|b| BoundingBox::new(b.left() + 3, b.top() + 3, b.right() + 3, b.bottom() + 3, 0))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| match_boxes(black_box(&ground_truth), black_box(&predictions), 0.5));
        });
    }
    group.finish();
}

fn bench_matching_overlapping(c: &mut Criterion) {
    // Heavily overlapping boxes stress the best-candidate scan
    let ground_truth = diagonal_boxes(100, 1);
    let predictions = diagonal_boxes(100, 1);

    c.bench_function("matching_overlapping_100", |b| {
        b.iter(|| match_boxes(black_box(&ground_truth), black_box(&predictions), 0.5));
    });
}

fn bench_label_parsing(c: &mut Criterion) {
    let content: String = (0..500)
        .map(|i| format!("{} 0.{:03} 0.5 0.05 0.1\n", i % 80, i))
        .collect();

    c.bench_function("parse_labels_500", |b| {
        b.iter(|| {
            parse_labels(
                black_box(&content),
                ImageSize::new(1920, 1080),
                LabelPolicy::Lenient,
                Path::new("bench.txt"),
            )
        });
    });
}

fn bench_corpus_fold(c: &mut Criterion) {
    let ground_truth = diagonal_boxes(20, 60);
    let results: Vec<_> = (0..1000)
        .map(|i| {
            let predictions = &ground_truth[..20 - i % 5];
            (match_boxes(&ground_truth, predictions, 0.5), predictions.len())
        })
        .collect();

    c.bench_function("corpus_fold_1000", |b| {
        b.iter(|| {
            results
                .iter()
                .fold(CorpusStats::new(), |stats, (result, predicted)| {
                    stats.accumulate(result, ground_truth.len(), *predicted)
                })
                .finalize()
        });
    });
}

criterion_group!(
    benches,
    bench_iou_calculation,
    bench_iou_matrix,
    bench_greedy_matching,
    bench_matching_overlapping,
    bench_label_parsing,
    bench_corpus_fold,
);
criterion_main!(benches);
