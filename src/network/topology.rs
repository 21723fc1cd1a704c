use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// The layer a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Input,
    Hidden,
    Output,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeRole::Input => "input",
            NodeRole::Hidden => "hidden",
            NodeRole::Output => "output",
        };
        f.write_str(name)
    }
}

/// Node counts of a three-layer network and the global numbering derived
/// from them.
///
/// Nodes share one dense index space: all inputs first, then all hidden
/// nodes, then all outputs. With `sentinel` set, index 0 is reserved and
/// never used, so the first input lives at index 1.
///
/// Fields:
/// - `input_count`  — nodes in the input layer
/// - `hidden_count` — nodes in the single hidden layer
/// - `output_count` — nodes in the output layer
/// - `sentinel`     — reserve index 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub input_count: usize,
    pub hidden_count: usize,
    pub output_count: usize,
    #[serde(default)]
    pub sentinel: bool,
}

impl Topology {
    /// Builds a topology without a sentinel, rejecting empty layers.
    pub fn new(input_count: usize, hidden_count: usize, output_count: usize) -> Result<Topology> {
        let topology = Topology {
            input_count,
            hidden_count,
            output_count,
            sentinel: false,
        };
        topology.validate()?;
        Ok(topology)
    }

    /// Same counts, with index 0 reserved.
    pub fn with_sentinel(self) -> Topology {
        Topology { sentinel: true, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        let layers = [
            (NodeRole::Input, self.input_count),
            (NodeRole::Hidden, self.hidden_count),
            (NodeRole::Output, self.output_count),
        ];
        match layers.into_iter().find(|&(_, count)| count == 0) {
            Some((role, _)) => Err(NetworkError::EmptyLayer { role }),
            None => Ok(()),
        }
    }

    /// Size of every per-node vector and of each side of the weight matrix.
    pub fn node_count(&self) -> usize {
        self.first_node() + self.input_count + self.hidden_count + self.output_count
    }

    pub fn first_node(&self) -> usize {
        usize::from(self.sentinel)
    }

    pub fn inputs(&self) -> Range<usize> {
        let start = self.first_node();
        start..start + self.input_count
    }

    pub fn hidden(&self) -> Range<usize> {
        let start = self.inputs().end;
        start..start + self.hidden_count
    }

    pub fn outputs(&self) -> Range<usize> {
        let start = self.hidden().end;
        start..start + self.output_count
    }

    /// Role of `node`, or `None` for the sentinel and out-of-range indices.
    pub fn role(&self, node: usize) -> Option<NodeRole> {
        if self.inputs().contains(&node) {
            Some(NodeRole::Input)
        } else if self.hidden().contains(&node) {
            Some(NodeRole::Hidden)
        } else if self.outputs().contains(&node) {
            Some(NodeRole::Output)
        } else {
            None
        }
    }

    /// True only for input→hidden and hidden→output pairs.
    pub fn is_connection(&self, source: usize, destination: usize) -> bool {
        matches!(
            (self.role(source), self.role(destination)),
            (Some(NodeRole::Input), Some(NodeRole::Hidden))
                | (Some(NodeRole::Hidden), Some(NodeRole::Output))
        )
    }
}
