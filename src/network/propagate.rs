use std::ops::Range;

use crate::activation::sigmoid::sigmoid;
use crate::network::network::Network;

impl Network {
    /// Single forward pass: every hidden activation is finalized before any
    /// output activation is computed.
    pub fn activate(&mut self) {
        let t = self.topology;
        self.fire(t.inputs(), t.hidden());
        self.fire(t.hidden(), t.outputs());
    }

    /// Computes σ(Σ w(s,d)·a(s) − θ(d)) for every `d` in `targets`, summing
    /// over `sources` in node order.
    fn fire(&mut self, sources: Range<usize>, targets: Range<usize>) {
        for target in targets {
            let mut weighted_input = 0.0;
            for source in sources.clone() {
                weighted_input += self.weights[(source, target)] * self.values[source];
            }
            weighted_input -= self.thresholds[target];
            self.values[target] = sigmoid(weighted_input);
        }
    }

    /// Loads `inputs` into the input layer, activates and returns the outputs.
    ///
    /// # Panics
    /// Panics if `inputs.len()` differs from the input layer size.
    pub fn predict(&mut self, inputs: &[f64]) -> Vec<f64> {
        assert_eq!(
            inputs.len(),
            self.topology.input_count,
            "expected {} inputs",
            self.topology.input_count
        );
        for (offset, &value) in inputs.iter().enumerate() {
            self.set_input(offset, value);
        }
        self.activate();
        self.output_values().to_vec()
    }

    /// First hidden or output node whose activation is not a finite value in
    /// [0, 1], as `(node, value)`.
    pub fn find_unstable(&self) -> Option<(usize, f64)> {
        let t = self.topology;
        t.hidden()
            .chain(t.outputs())
            .map(|node| (node, self.values[node]))
            .find(|&(_, value)| !(0.0..=1.0).contains(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::topology::Topology;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// 1-1-1 network with hand-set parameters: nodes 0 (in), 1 (hidden), 2 (out).
    fn chain() -> Network {
        let mut net = Network::initialize(Topology::new(1, 1, 1).unwrap()).unwrap();
        net.weights[(0, 1)] = 2.0;
        net.weights[(1, 2)] = -1.0;
        net.thresholds[1] = 0.5;
        net.thresholds[2] = 0.25;
        net
    }

    #[test]
    fn matches_hand_computation() {
        let mut net = chain();
        let out = net.predict(&[1.0]);

        let hidden = 1.0 / (1.0 + (-(2.0 - 0.5_f64)).exp());
        let output = 1.0 / (1.0 + (-(-hidden - 0.25)).exp());
        assert_relative_eq!(net.values()[1], hidden, epsilon = 1e-15);
        assert_relative_eq!(out[0], output, epsilon = 1e-15);
    }

    #[test]
    fn zero_input_leaves_only_threshold() {
        let mut net = chain();
        net.predict(&[0.0]);
        assert_relative_eq!(net.values()[1], sigmoid(-0.5), epsilon = 1e-15);
    }

    #[test]
    fn activations_lie_strictly_inside_unit_interval() {
        let topology = Topology::new(16, 6, 16).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut net = Network::random(topology, 2.0, &mut rng).unwrap();

        for offset in 0..16 {
            net.set_input(offset, (offset % 2) as f64);
        }
        net.activate();
        for node in topology.hidden().chain(topology.outputs()) {
            let a = net.values()[node];
            assert!(a > 0.0 && a < 1.0, "node {node} = {a}");
        }
        assert_eq!(net.find_unstable(), None);
    }

    #[test]
    fn saturated_sums_stay_finite() {
        let mut net = chain();
        net.weights[(0, 1)] = 1e6;
        net.weights[(1, 2)] = -1e6;
        net.predict(&[1.0]);
        let a = net.output_values()[0];
        assert!(a > 0.0 && a < 1.0);
        assert_eq!(net.find_unstable(), None);
    }

    #[test]
    fn repeated_activation_is_idempotent() {
        let topology = Topology::new(2, 2, 1).unwrap().with_sentinel();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut net = Network::random(topology, 2.0, &mut rng).unwrap();
        net.set_input(0, 1.0);
        net.set_input(1, 0.0);

        net.activate();
        let first = net.values().to_vec();
        net.activate();
        assert_eq!(first, net.values());
    }

    #[test]
    fn nan_weight_is_reported() {
        let mut net = chain();
        net.weights[(0, 1)] = f64::NAN;
        net.predict(&[1.0]);
        let (node, value) = net.find_unstable().unwrap();
        assert_eq!(node, 1);
        assert!(value.is_nan());
    }
}
