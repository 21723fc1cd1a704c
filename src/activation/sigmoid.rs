/// Weighted sums are clamped to ±this before the exponential.
///
/// σ(±30) is about 1e-13 away from 0 or 1, so every finite input still lands
/// strictly inside (0, 1) in f64.
pub const SIGMOID_INPUT_LIMIT: f64 = 30.0;

/// Logistic sigmoid σ(z) = 1 / (1 + e^{-z}) on a clamped input.
///
/// NaN passes through unchanged.
pub fn sigmoid(z: f64) -> f64 {
    let z = z.clamp(-SIGMOID_INPUT_LIMIT, SIGMOID_INPUT_LIMIT);
    1.0 / (1.0 + (-z).exp())
}

/// Derivative of the sigmoid expressed through its output `a = σ(z)`.
pub fn sigmoid_slope(a: f64) -> f64 {
    a * (1.0 - a)
}
