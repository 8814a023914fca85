//! Pixel dissimilarity functions
//!
//! The smoothness term is parameterised over a distance between adjacent
//! pixel vectors. The two-pass pipeline swaps metrics between passes
//! (depth-only first, weighted RGBD second), so the metric is data, not a
//! fixed function: a tagged variant evaluated through [`Difference::eval`].

use lidarseg_core::CHANNEL_DEPTH;

/// Dissimilarity metric between two same-shape pixel vectors
///
/// Every variant is pure and symmetric, and evaluates to 0 for identical
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Difference {
    /// Absolute depth difference: |p₃ − q₃|
    Depth,
    /// Euclidean distance over the RGB channels
    Color,
    /// Weighted Euclidean distance over RGB + depth
    Weighted([f64; 4]),
}

impl Difference {
    /// Evaluate the metric on two pixel vectors
    ///
    /// Both slices must have at least 4 channels; the image type enforces
    /// this for every pixel it hands out.
    pub fn eval(&self, p: &[f32], q: &[f32]) -> f64 {
        match self {
            Difference::Depth => {
                (p[CHANNEL_DEPTH] as f64 - q[CHANNEL_DEPTH] as f64).abs()
            }
            Difference::Color => {
                let mut sum = 0.0;
                for c in 0..3 {
                    let d = p[c] as f64 - q[c] as f64;
                    sum += d * d;
                }
                sum.sqrt()
            }
            Difference::Weighted(weights) => {
                let mut sum = 0.0;
                for (c, w) in weights.iter().enumerate() {
                    let d = p[c] as f64 - q[c] as f64;
                    sum += w * d * d;
                }
                sum.sqrt()
            }
        }
    }
}
