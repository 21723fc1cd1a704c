use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::error::Result;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::examples::ExampleSource;
use crate::train::loop_fn::train_loop;
use crate::train::observer::Observer;
use crate::train::snapshot::TrainReport;
use crate::train::train_config::TrainConfig;

/// Owns a network together with the seeded random source and example source
/// that drive it.
///
/// The generator is seeded once from `config.seed` and consumed first by
/// `connect_nodes`, then by the example source on every iteration, so a
/// config fully determines the run.
pub struct Trainer {
    config: TrainConfig,
    network: Network,
    examples: Box<dyn ExampleSource>,
    optimizer: Sgd,
    rng: ChaCha8Rng,
}

impl Trainer {
    /// Validates `config`, allocates the network and draws its initial
    /// weights and thresholds.
    pub fn new(config: TrainConfig) -> Result<Trainer> {
        let examples = config.examples.build();
        Trainer::with_examples(config, examples)
    }

    /// Like `new`, with a caller-supplied example source in place of
    /// `config.examples`.
    pub fn with_examples(config: TrainConfig, examples: Box<dyn ExampleSource>) -> Result<Trainer> {
        config.validate()?;
        examples.check(&config.topology)?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let network = Network::random(config.topology, config.weight_scale, &mut rng)?;
        let optimizer = Sgd::new(config.learning_rate).with_hidden_gradient(config.hidden_gradient);

        info!(
            inputs = config.topology.input_count,
            hidden = config.topology.hidden_count,
            outputs = config.topology.output_count,
            seed = config.seed,
            "network connected"
        );

        Ok(Trainer { config, network, examples, optimizer, rng })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Trains for `config.iterations` more iterations.
    ///
    /// Iteration numbers restart at 0 on every call.
    pub fn run(&mut self, observer: &mut dyn Observer) -> Result<TrainReport> {
        let report = train_loop(
            &mut self.network,
            self.examples.as_mut(),
            &self.optimizer,
            &mut self.rng,
            self.config.iterations,
            self.config.sample_interval,
            self.config.sse_window,
            observer,
        )?;

        info!(
            iterations = report.iterations,
            final_sse = report.final_sse,
            first_window_mean = report.first_window_mean,
            last_window_mean = report.last_window_mean,
            "training finished"
        );
        Ok(report)
    }
}

/// Builds a trainer from `config`, runs it once and hands back the trained
/// network.
pub fn train_network(config: TrainConfig, observer: &mut dyn Observer) -> Result<(Network, TrainReport)> {
    let mut trainer = Trainer::new(config)?;
    let report = trainer.run(observer)?;
    Ok((trainer.into_network(), report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::train::examples::{ExampleKind, TruthTable};
    use crate::train::observer::Discard;

    fn small_grid() -> TrainConfig {
        let mut config = TrainConfig::auto_associator(3);
        config.topology.hidden_count = 4;
        config.iterations = 200;
        config.sample_interval = 0;
        config.seed = 12;
        config
    }

    #[test]
    fn same_config_builds_identical_networks() {
        let a = Trainer::new(small_grid()).unwrap();
        let b = Trainer::new(small_grid()).unwrap();
        assert_eq!(a.network(), b.network());
    }

    #[test]
    fn different_seed_builds_different_network() {
        let mut other = small_grid();
        other.seed += 1;
        let a = Trainer::new(small_grid()).unwrap();
        let b = Trainer::new(other).unwrap();
        assert_ne!(a.network().weights(), b.network().weights());
    }

    #[test]
    fn same_config_trains_identically() {
        let (a, ra) = train_network(small_grid(), &mut Discard).unwrap();
        let (b, rb) = train_network(small_grid(), &mut Discard).unwrap();
        assert_eq!(a, b);
        assert_eq!(ra, rb);
    }

    #[test]
    fn mismatched_example_source_is_rejected_up_front() {
        let mut config = TrainConfig::xor();
        config.examples = ExampleKind::RandomPattern;
        assert!(matches!(Trainer::new(config), Err(NetworkError::InvalidConfig(_))));

        let grid = small_grid();
        let err = Trainer::with_examples(grid, Box::new(TruthTable::xor()));
        assert!(err.is_err());
    }

    #[test]
    fn zero_node_counts_fail_fast() {
        let mut config = TrainConfig::xor();
        config.topology.input_count = 0;
        assert!(matches!(Trainer::new(config), Err(NetworkError::EmptyLayer { .. })));
    }
}
