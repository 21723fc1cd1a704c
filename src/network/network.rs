use rand::Rng;

use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// Complete state of a three-layer network.
///
/// Every vector has one slot per node and the weight matrix is
/// `node_count × node_count`, all addressed by absolute node index. Only the
/// input→hidden and hidden→output blocks of `weights` are ever non-zero;
/// `thresholds` is only meaningful for hidden and output nodes and
/// `expected` only for output nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub(crate) topology: Topology,
    pub(crate) weights: Matrix,
    pub(crate) thresholds: Vec<f64>,
    pub(crate) values: Vec<f64>,
    pub(crate) expected: Vec<f64>,
}

impl Network {
    /// Allocates an all-zero network for `topology`.
    ///
    /// Fails if any layer is empty.
    pub fn initialize(topology: Topology) -> Result<Network> {
        topology.validate()?;
        let n = topology.node_count();
        Ok(Network {
            topology,
            weights: Matrix::square(n),
            thresholds: vec![0.0; n],
            values: vec![0.0; n],
            expected: vec![0.0; n],
        })
    }

    /// Allocates and connects in one step.
    pub fn random<R: Rng + ?Sized>(topology: Topology, weight_scale: f64, rng: &mut R) -> Result<Network> {
        let mut network = Network::initialize(topology)?;
        network.connect_nodes(rng, weight_scale);
        Ok(network)
    }

    /// Draws a weight in `[0, weight_scale)` for every legal connection, then a
    /// threshold in `[0, 1)` for every hidden and output node.
    ///
    /// Pairs are visited source-major in node order, so the draw sequence is
    /// fixed for a given topology and the result is reproducible from a
    /// seeded `rng`. Previous weights and thresholds are discarded.
    pub fn connect_nodes<R: Rng + ?Sized>(&mut self, rng: &mut R, weight_scale: f64) {
        let t = self.topology;
        self.weights.clear();
        self.thresholds.fill(0.0);

        for source in 0..t.node_count() {
            for destination in 0..t.node_count() {
                if t.is_connection(source, destination) {
                    self.weights[(source, destination)] = rng.gen::<f64>() * weight_scale;
                }
            }
        }

        for node in t.hidden().chain(t.outputs()) {
            self.thresholds[node] = rng.gen::<f64>();
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn weight(&self, source: usize, destination: usize) -> f64 {
        self.weights[(source, destination)]
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn threshold(&self, node: usize) -> f64 {
        self.thresholds[node]
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Current activation of every node.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn expected(&self) -> &[f64] {
        &self.expected
    }

    pub fn output_values(&self) -> &[f64] {
        &self.values[self.topology.outputs()]
    }

    /// Writes the `offset`-th input node. Panics if `offset` is past the
    /// input layer.
    pub fn set_input(&mut self, offset: usize, value: f64) {
        let inputs = self.topology.inputs();
        assert!(offset < inputs.len(), "input offset {offset} out of range");
        self.values[inputs.start + offset] = value;
    }

    /// Writes the target of the `offset`-th output node. Panics if `offset`
    /// is past the output layer.
    pub fn set_expected(&mut self, offset: usize, value: f64) {
        let outputs = self.topology.outputs();
        assert!(offset < outputs.len(), "output offset {offset} out of range");
        self.expected[outputs.start + offset] = value;
    }

    /// Every non-zero weight outside the input→hidden and hidden→output
    /// blocks, as `(source, destination, weight)`. Always empty for a
    /// healthy network.
    pub fn stray_weights(&self) -> Vec<(usize, usize, f64)> {
        self.weights
            .entries()
            .filter(|&(s, d, w)| w != 0.0 && !self.topology.is_connection(s, d))
            .collect()
    }
}
