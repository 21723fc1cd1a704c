use thiserror::Error;

use crate::network::topology::NodeRole;

/// Everything that can go wrong while building or training a network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid topology: the {role} layer must contain at least one node")]
    EmptyLayer { role: NodeRole },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An activation left [0, 1] or stopped being finite.
    #[error("numeric instability at iteration {iteration}: node {node} has activation {value}")]
    NumericInstability {
        iteration: usize,
        node: usize,
        value: f64,
    },

    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
