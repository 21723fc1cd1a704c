use std::collections::VecDeque;

pub struct SseLoss;

impl SseLoss {
    /// Sum of squared errors: Σ(expected - predicted)²
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (b - a).powi(2))
            .sum::<f64>()
    }
}

/// Moving average over the last `capacity` SSE values.
#[derive(Debug, Clone)]
pub struct SseWindow {
    capacity: usize,
    values: VecDeque<f64>,
}

impl SseWindow {
    pub fn new(capacity: usize) -> SseWindow {
        assert!(capacity > 0, "window capacity must be at least 1");
        SseWindow { capacity, values: VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, sse: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(sse);
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean of the values currently held; 0 for an empty window.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}
