use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::network::topology::Topology;
use crate::optim::sgd::HiddenGradient;
use crate::train::examples::ExampleKind;

/// Everything needed to reproduce a training run.
///
/// # Fields
/// - `topology`        — node counts and optional sentinel slot
/// - `examples`        — which example source feeds the network
/// - `weight_scale`    — initial weights are drawn from `[0, weight_scale)`
/// - `learning_rate`   — fixed step size of the online update
/// - `iterations`      — examples presented; training never stops early
/// - `sample_interval` — emit a snapshot every this many iterations
///                       (starting at iteration 0); `0` disables snapshots
/// - `seed`            — seeds the only random source of the run
/// - `hidden_gradient` — which w(h,o) scales the hidden gradient
/// - `sse_window`      — iterations averaged into the report's SSE means
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub topology: Topology,
    pub examples: ExampleKind,
    pub weight_scale: f64,
    pub learning_rate: f64,
    pub iterations: usize,
    pub sample_interval: usize,
    pub seed: u64,
    #[serde(default)]
    pub hidden_gradient: HiddenGradient,
    #[serde(default = "default_sse_window")]
    pub sse_window: usize,
}

fn default_sse_window() -> usize {
    100
}

impl TrainConfig {
    /// Two inputs, two hidden nodes, one output; index 0 reserved.
    pub fn xor() -> TrainConfig {
        TrainConfig {
            topology: Topology {
                input_count: 2,
                hidden_count: 2,
                output_count: 1,
                sentinel: true,
            },
            examples: ExampleKind::Xor,
            weight_scale: 2.0,
            learning_rate: 0.2,
            iterations: 100_000,
            sample_interval: 101,
            seed: 0,
            hidden_gradient: HiddenGradient::UpdatedWeight,
            sse_window: default_sse_window(),
        }
    }

    /// A `side × side` grid reproduced through 20 hidden nodes.
    pub fn auto_associator(side: usize) -> TrainConfig {
        TrainConfig {
            topology: Topology {
                input_count: side * side,
                hidden_count: 20,
                output_count: side * side,
                sentinel: false,
            },
            examples: ExampleKind::RandomPattern,
            weight_scale: 1.0,
            learning_rate: 0.6,
            iterations: 2_000_000,
            sample_interval: 500,
            seed: 0,
            hidden_gradient: HiddenGradient::UpdatedWeight,
            sse_window: default_sse_window(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.topology.validate()?;
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if !(self.weight_scale.is_finite() && self.weight_scale > 0.0) {
            return Err(NetworkError::InvalidConfig(format!(
                "weight_scale must be positive and finite, got {}",
                self.weight_scale
            )));
        }
        if self.sse_window == 0 {
            return Err(NetworkError::InvalidConfig("sse_window must be at least 1".into()));
        }
        Ok(())
    }

    /// Writes the config as pretty-printed JSON.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config written by `save_json` (or by hand).
    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
