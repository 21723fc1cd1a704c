use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use ferrite_backprop::TrainConfig;

/// Which demo network to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// 2-2-1 XOR classifier.
    Xor,
    /// side²-20-side² auto-associator over random binary grids.
    Grid,
}

#[derive(Debug, Parser)]
#[command(name = "backprop-demo")]
#[command(about = "Train a three-layer backprop network and dump PNG frames of its activations")]
pub struct Args {
    /// Preset to start from
    #[arg(value_enum, default_value = "xor")]
    pub variant: Variant,

    /// JSON training config; replaces the preset entirely
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid side length for the grid preset
    #[arg(long, default_value_t = 10)]
    pub side: usize,

    /// Override the number of training iterations
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Override the random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the learning rate
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Override how often a frame is captured (0 = never)
    #[arg(long)]
    pub sample_interval: Option<usize>,

    /// Directory the numbered PNG frames are written to
    #[arg(short, long, default_value = "frames")]
    pub out_dir: PathBuf,

    /// Side length of one canvas in pixels
    #[arg(long, default_value_t = 500)]
    pub canvas: u32,

    /// Train without writing any frames
    #[arg(long)]
    pub no_frames: bool,

    /// Log every sampled iteration
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Preset (or config file) with command-line overrides applied.
    pub fn train_config(&self) -> Result<TrainConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let path_str = path.to_str().context("config path is not valid UTF-8")?;
                TrainConfig::load_json(path_str)
                    .with_context(|| format!("loading config from {}", path.display()))?
            }
            None => match self.variant {
                Variant::Xor => TrainConfig::xor(),
                Variant::Grid => TrainConfig::auto_associator(self.side),
            },
        };

        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(interval) = self.sample_interval {
            config.sample_interval = interval;
        }

        config.validate()?;
        Ok(config)
    }
}
