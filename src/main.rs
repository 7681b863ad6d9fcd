use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use yolo_eval::config::Args;
use yolo_eval::evaluator::{evaluate_corpus, load_corpus, sweep_thresholds};
use yolo_eval::utils::create_progress_bar;
use yolo_eval::Result;

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Evaluation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.eval_config();
    info!("Starting the evaluation...");

    let progress = create_progress_bar(0, "Loading");
    let layout = args.layout();
    let corpus = load_corpus(&layout, config.label_policy, &progress)?;
    progress.finish_and_clear();
    corpus.ensure_not_empty(&layout.images_dir)?;

    let evaluation = evaluate_corpus(&corpus, &config.matching);
    for image in &evaluation.images {
        info!("{}", image.log_line());
    }
    for skipped in &evaluation.skipped {
        info!("Skipped {}: {}", skipped.image, skipped.reason);
    }

    let sweep = if args.sweep {
        let thresholds = args.sweep_thresholds()?;
        let points = sweep_thresholds(&corpus, &thresholds, config.matching.class_aware)?;
        for point in &points {
            info!(
                "IoU >= {:.2}: accuracy {:.2}%, average IoU {:.2}%",
                point.iou_threshold, point.report.detection_accuracy, point.report.average_iou
            );
        }
        points
    } else {
        Vec::new()
    };

    let report = evaluation.report();
    report.write_text(&args.output)?;
    print!("{}", report);
    info!("{}", evaluation.stats.summary_string());

    if let Some(json_path) = &args.json {
        evaluation.to_json(sweep).write(json_path)?;
        info!("JSON report saved to {}", json_path.display());
    }

    info!("Evaluation complete. Results saved to {}", args.output.display());
    Ok(())
}
