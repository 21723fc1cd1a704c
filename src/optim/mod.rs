pub mod sgd;

pub use sgd::{HiddenGradient, Sgd};
