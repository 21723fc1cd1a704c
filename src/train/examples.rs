use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::network::topology::Topology;

/// Produces one labelled example per call, written straight into the
/// network's input activations and output targets.
pub trait ExampleSource {
    /// Writes example number `iteration`. Implementations that need
    /// randomness draw from `rng` and nothing else.
    fn write_example(&mut self, iteration: usize, rng: &mut dyn RngCore, network: &mut Network);

    /// Rejects topologies this source cannot fill.
    fn check(&self, _topology: &Topology) -> Result<()> {
        Ok(())
    }
}

/// Random binary patterns that the network must reproduce at its outputs.
///
/// Each input is 0.0 when a uniform draw is ≤ 0.5 and 1.0 otherwise; the
/// output at the same offset gets the same target.
#[derive(Debug, Clone, Default)]
pub struct RandomPattern {
    repeat: bool,
    pattern: Option<Vec<f64>>,
}

impl RandomPattern {
    /// A new pattern on every call.
    pub fn fresh() -> RandomPattern {
        RandomPattern { repeat: false, pattern: None }
    }

    /// One pattern, drawn on the first call and presented forever after.
    pub fn repeated() -> RandomPattern {
        RandomPattern { repeat: true, pattern: None }
    }

    fn draw(rng: &mut dyn RngCore, len: usize) -> Vec<f64> {
        (0..len)
            .map(|_| if rng.gen::<f64>() <= 0.5 { 0.0 } else { 1.0 })
            .collect()
    }
}

impl ExampleSource for RandomPattern {
    fn write_example(&mut self, _iteration: usize, rng: &mut dyn RngCore, network: &mut Network) {
        let len = network.topology().input_count;
        let fresh;
        let pattern: &[f64] = if self.repeat {
            self.pattern.get_or_insert_with(|| RandomPattern::draw(rng, len))
        } else {
            fresh = RandomPattern::draw(rng, len);
            &fresh
        };

        for (offset, &bit) in pattern.iter().enumerate() {
            network.set_input(offset, bit);
            network.set_expected(offset, bit);
        }
    }

    fn check(&self, topology: &Topology) -> Result<()> {
        if topology.input_count != topology.output_count {
            return Err(NetworkError::InvalidConfig(format!(
                "random patterns need as many outputs as inputs (got {} inputs, {} outputs)",
                topology.input_count, topology.output_count
            )));
        }
        Ok(())
    }
}

/// A fixed list of `(inputs, targets)` rows presented cyclically:
/// example `n` is row `n % rows.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct TruthTable {
    rows: Vec<(Vec<f64>, Vec<f64>)>,
}

impl TruthTable {
    pub fn new(rows: Vec<(Vec<f64>, Vec<f64>)>) -> TruthTable {
        TruthTable { rows }
    }

    /// (1,1)→0, (0,1)→1, (1,0)→1, (0,0)→0, in that order.
    pub fn xor() -> TruthTable {
        TruthTable::new(vec![
            (vec![1.0, 1.0], vec![0.0]),
            (vec![0.0, 1.0], vec![1.0]),
            (vec![1.0, 0.0], vec![1.0]),
            (vec![0.0, 0.0], vec![0.0]),
        ])
    }

    pub fn rows(&self) -> &[(Vec<f64>, Vec<f64>)] {
        &self.rows
    }
}

impl ExampleSource for TruthTable {
    fn write_example(&mut self, iteration: usize, _rng: &mut dyn RngCore, network: &mut Network) {
        let (inputs, targets) = &self.rows[iteration % self.rows.len()];
        for (offset, &value) in inputs.iter().enumerate() {
            network.set_input(offset, value);
        }
        for (offset, &value) in targets.iter().enumerate() {
            network.set_expected(offset, value);
        }
    }

    fn check(&self, topology: &Topology) -> Result<()> {
        if self.rows.is_empty() {
            return Err(NetworkError::InvalidConfig("truth table has no rows".into()));
        }
        for (inputs, targets) in &self.rows {
            if inputs.len() != topology.input_count || targets.len() != topology.output_count {
                return Err(NetworkError::InvalidConfig(format!(
                    "truth table row is {}→{} but the network is {}→{}",
                    inputs.len(),
                    targets.len(),
                    topology.input_count,
                    topology.output_count
                )));
            }
        }
        Ok(())
    }
}

/// Serializable choice of example source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleKind {
    RandomPattern,
    RepeatedPattern,
    Xor,
}

impl ExampleKind {
    pub fn build(self) -> Box<dyn ExampleSource> {
        match self {
            ExampleKind::RandomPattern => Box::new(RandomPattern::fresh()),
            ExampleKind::RepeatedPattern => Box::new(RandomPattern::repeated()),
            ExampleKind::Xor => Box::new(TruthTable::xor()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid_net() -> Network {
        Network::initialize(Topology::new(9, 3, 9).unwrap()).unwrap()
    }

    fn inputs(net: &Network) -> Vec<f64> {
        net.values()[net.topology().inputs()].to_vec()
    }

    fn targets(net: &Network) -> Vec<f64> {
        net.expected()[net.topology().outputs()].to_vec()
    }

    #[test]
    fn xor_cycles_with_period_four() {
        let mut net = Network::initialize(Topology::new(2, 2, 1).unwrap().with_sentinel()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut table = TruthTable::xor();

        let want = [
            ([1.0, 1.0], 0.0),
            ([0.0, 1.0], 1.0),
            ([1.0, 0.0], 1.0),
            ([0.0, 0.0], 0.0),
        ];
        for iteration in 0..12 {
            table.write_example(iteration, &mut rng, &mut net);
            let (x, y) = want[iteration % 4];
            assert_eq!(&net.values()[1..3], &x);
            assert_eq!(net.expected()[5], y);
        }
    }

    #[test]
    fn random_pattern_is_binary_and_mirrored() {
        let mut net = grid_net();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut source = RandomPattern::fresh();

        for iteration in 0..20 {
            source.write_example(iteration, &mut rng, &mut net);
            let x = inputs(&net);
            assert!(x.iter().all(|&v| v == 0.0 || v == 1.0));
            assert_eq!(x, targets(&net));
        }
    }

    #[test]
    fn fresh_patterns_change_between_calls() {
        let mut net = grid_net();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut source = RandomPattern::fresh();

        let seen: Vec<Vec<f64>> = (0..8)
            .map(|i| {
                source.write_example(i, &mut rng, &mut net);
                inputs(&net)
            })
            .collect();
        assert!(seen.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn repeated_pattern_never_changes() {
        let mut net = grid_net();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut source = RandomPattern::repeated();

        source.write_example(0, &mut rng, &mut net);
        let first = inputs(&net);
        for iteration in 1..10 {
            source.write_example(iteration, &mut rng, &mut net);
            assert_eq!(inputs(&net), first);
        }
    }

    #[test]
    fn same_seed_gives_same_patterns() {
        let mut a = grid_net();
        let mut b = grid_net();
        let mut rng_a = ChaCha8Rng::seed_from_u64(77);
        let mut rng_b = ChaCha8Rng::seed_from_u64(77);
        let mut src_a = RandomPattern::fresh();
        let mut src_b = RandomPattern::fresh();
        for i in 0..5 {
            src_a.write_example(i, &mut rng_a, &mut a);
            src_b.write_example(i, &mut rng_b, &mut b);
            assert_eq!(inputs(&a), inputs(&b));
        }
    }

    #[test]
    fn incompatible_topologies_are_rejected() {
        let xor = Topology::new(2, 2, 1).unwrap();
        assert!(RandomPattern::fresh().check(&xor).is_err());
        assert!(TruthTable::xor().check(&xor).is_ok());

        let grid = Topology::new(9, 3, 9).unwrap();
        assert!(TruthTable::xor().check(&grid).is_err());
        assert!(RandomPattern::repeated().check(&grid).is_ok());
        assert!(TruthTable::new(vec![]).check(&grid).is_err());
    }
}
