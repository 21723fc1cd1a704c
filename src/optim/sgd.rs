use serde::{Deserialize, Serialize};

use crate::activation::sigmoid::sigmoid_slope;
use crate::loss::sse::SseLoss;
use crate::network::network::Network;

/// Which hidden→output weight scales a hidden node's error gradient.
///
/// The update of w(h,o) and the gradient of `h` are computed in the same
/// step. `UpdatedWeight` reads w(h,o) after adding this step's delta,
/// `PriorWeight` reads it as it was before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenGradient {
    #[default]
    UpdatedWeight,
    PriorWeight,
}

/// Online gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
    pub hidden_gradient: HiddenGradient,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate, hidden_gradient: HiddenGradient::default() }
    }

    pub fn with_hidden_gradient(self, hidden_gradient: HiddenGradient) -> Sgd {
        Sgd { hidden_gradient, ..self }
    }

    /// Backpropagates the current example through `network` and updates its
    /// weights and thresholds in place.
    ///
    /// Expects `network.activate()` to have run on the current inputs.
    /// Returns the example's SSE, measured on the activations as they were
    /// before this call.
    ///
    /// For each output `o`, every hidden `h` updates w(h,o), derives its own
    /// gradient from it, then updates w(i,h) for all inputs and θ(h). Hidden
    /// nodes are therefore adjusted once per output node.
    pub fn step(&self, network: &mut Network) -> f64 {
        let t = network.topology;
        let lr = self.learning_rate;
        let Network { weights, thresholds, values, expected, .. } = network;

        let sse = SseLoss::loss(&values[t.outputs()], &expected[t.outputs()]);

        for output in t.outputs() {
            let error = expected[output] - values[output];
            let output_gradient = sigmoid_slope(values[output]) * error;

            for hidden in t.hidden() {
                let prior = weights[(hidden, output)];
                weights[(hidden, output)] += lr * values[hidden] * output_gradient;
                let link = match self.hidden_gradient {
                    HiddenGradient::UpdatedWeight => weights[(hidden, output)],
                    HiddenGradient::PriorWeight => prior,
                };
                let hidden_gradient = sigmoid_slope(values[hidden]) * output_gradient * link;

                for input in t.inputs() {
                    weights[(input, hidden)] += lr * values[input] * hidden_gradient;
                }
                thresholds[hidden] += lr * -1.0 * hidden_gradient;
            }
            thresholds[output] += lr * -1.0 * output_gradient;
        }

        sse
    }
}
