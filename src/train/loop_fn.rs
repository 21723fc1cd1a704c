use rand::RngCore;
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::loss::sse::SseWindow;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::examples::ExampleSource;
use crate::train::observer::Observer;
use crate::train::snapshot::{Snapshot, TrainReport};

/// Runs `iterations` rounds of example → forward pass → backprop update.
///
/// # Arguments
/// - `network`         — modified in place
/// - `examples`        — writes each iteration's inputs and targets
/// - `optimizer`       — carries the learning rate and gradient ordering
/// - `rng`             — the run's random source, lent to `examples`
/// - `iterations`      — fixed budget; there is no early stop
/// - `sample_interval` — `observer` gets a snapshot whenever
///                       `iteration % sample_interval == 0`; `0` disables it
/// - `sse_window`      — size of the averaging windows in the report
///
/// # Errors
/// Returns `NumericInstability` as soon as a forward pass produces an
/// activation outside [0, 1] or a non-finite one; the network is left as it
/// was at that point.
///
/// # Panics
/// Panics if `sse_window == 0`.
#[allow(clippy::too_many_arguments)]
pub fn train_loop(
    network: &mut Network,
    examples: &mut dyn ExampleSource,
    optimizer: &Sgd,
    rng: &mut dyn RngCore,
    iterations: usize,
    sample_interval: usize,
    sse_window: usize,
    observer: &mut dyn Observer,
) -> Result<TrainReport> {
    let mut first = SseWindow::new(sse_window);
    let mut last = SseWindow::new(sse_window);
    let mut final_sse = 0.0;

    for iteration in 0..iterations {
        examples.write_example(iteration, rng, network);
        network.activate();

        if let Some((node, value)) = network.find_unstable() {
            return Err(NetworkError::NumericInstability { iteration, node, value });
        }

        let sse = optimizer.step(network);
        final_sse = sse;
        if !first.is_full() {
            first.push(sse);
        }
        last.push(sse);

        if sample_interval > 0 && iteration % sample_interval == 0 {
            debug!(iteration, sse, "sample");
            observer.observe(Snapshot {
                iteration,
                values: network.values().to_vec(),
                sse,
            });
        }
    }

    Ok(TrainReport {
        iterations,
        final_sse,
        first_window_mean: first.mean(),
        last_window_mean: last.mean(),
    })
}
