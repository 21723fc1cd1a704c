pub mod network;
pub mod propagate;
pub mod topology;

pub use network::Network;
pub use topology::{NodeRole, Topology};
