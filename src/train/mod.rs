pub mod examples;
pub mod loop_fn;
pub mod observer;
pub mod snapshot;
pub mod train_config;
pub mod trainer;

pub use examples::{ExampleKind, ExampleSource, RandomPattern, TruthTable};
pub use loop_fn::train_loop;
pub use observer::{ChannelObserver, Discard, Observer};
pub use snapshot::{Snapshot, TrainReport};
pub use train_config::TrainConfig;
pub use trainer::{train_network, Trainer};
