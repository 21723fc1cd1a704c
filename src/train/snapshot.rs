use serde::{Deserialize, Serialize};

/// Read-only copy of the network's activations at one sampled iteration.
///
/// This is all a visualizer ever sees of the network: it maps `values` to
/// pixels (or anything else) without touching the trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 0-based iteration the snapshot was taken at.
    pub iteration: usize,
    /// Activation of every node, in absolute node order.
    pub values: Vec<f64>,
    /// SSE of the example presented at this iteration.
    pub sse: f64,
}

/// Summary returned by a completed training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    /// Number of examples presented.
    pub iterations: usize,
    /// SSE of the last example, 0 if no iteration ran.
    pub final_sse: f64,
    /// Mean SSE over the first `sse_window` iterations.
    pub first_window_mean: f64,
    /// Mean SSE over the last `sse_window` iterations.
    pub last_window_mean: f64,
}
