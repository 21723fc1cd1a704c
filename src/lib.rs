pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use network::network::Network;
pub use network::topology::{NodeRole, Topology};
pub use loss::sse::SseLoss;
pub use optim::sgd::{HiddenGradient, Sgd};
pub use train::trainer::{train_network, Trainer};
pub use train::train_config::TrainConfig;
pub use train::snapshot::{Snapshot, TrainReport};
pub use train::observer::{ChannelObserver, Discard, Observer};
pub use train::examples::{ExampleKind, ExampleSource, RandomPattern, TruthTable};
pub use error::{NetworkError, Result};
