/// backprop-demo
///
/// Trains one of the two demo networks and writes a numbered PNG frame of
/// its activations every `sample_interval` iterations.
///
/// Run with:
///   cargo run --release --bin backprop-demo -- xor
///   cargo run --release --bin backprop-demo -- grid --iterations 200000
/// Frames land in ./frames unless `--out-dir` says otherwise.

mod cli;
mod frames;
mod sink;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ferrite_backprop::{Discard, ExampleKind, TrainReport, Trainer, TruthTable};

use cli::Args;
use frames::FrameRenderer;
use sink::FrameSink;

/// Snapshots buffered between the training loop and the frame writer.
const FRAME_QUEUE: usize = 1024;

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.train_config()?;
    info!(
        variant = ?args.variant,
        iterations = config.iterations,
        learning_rate = config.learning_rate,
        weight_scale = config.weight_scale,
        sample_interval = config.sample_interval,
        "starting"
    );

    let mut trainer = Trainer::new(config)?;
    let report = if args.no_frames || trainer.config().sample_interval == 0 {
        trainer.run(&mut Discard)?
    } else {
        run_with_frames(&mut trainer, &args)?
    };

    info!(
        final_sse = report.final_sse,
        first_window_mean = report.first_window_mean,
        last_window_mean = report.last_window_mean,
        "done"
    );

    if trainer.config().examples == ExampleKind::Xor {
        let network = trainer.network_mut();
        for (inputs, targets) in TruthTable::xor().rows() {
            let out = network.predict(inputs);
            info!("{:?} -> {:.4} (want {})", inputs, out[0], targets[0]);
        }
    }

    Ok(())
}

fn run_with_frames(trainer: &mut Trainer, args: &Args) -> Result<TrainReport> {
    let renderer = FrameRenderer::new(trainer.config().topology, args.canvas);
    info!(layout = ?renderer.layout(), dir = %args.out_dir.display(), "writing frames");

    let sink = FrameSink::spawn(renderer, args.out_dir.clone(), FRAME_QUEUE)?;
    let mut observer = sink.observer();
    let report = trainer.run(&mut observer)?;

    if observer.dropped() > 0 {
        warn!(dropped = observer.dropped(), "frame writer fell behind; some frames were skipped");
    }
    drop(observer);

    let dir = sink.dir().clone();
    let written = sink.finish()?;
    info!(written, dir = %dir.display(), "frames written");
    Ok(report)
}
