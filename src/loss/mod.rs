pub mod sse;

pub use sse::{SseLoss, SseWindow};
