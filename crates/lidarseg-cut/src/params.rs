//! Segmentation parameters
//!
//! One configuration record drives both the single-pass cut and the
//! two-pass refinement. Validation happens once at the top of every
//! pipeline entry point; everything downstream can assume a consistent
//! record.

use crate::difference::Difference;
use crate::error::{CutError, CutResult};

/// Default number of histogram bins
pub const DEFAULT_BINS: u32 = 10;
/// Largest supported number of histogram bins
pub const MAX_BINS: u32 = 256;
/// Default window radius for the boundary background check
pub const DEFAULT_BACKGROUND_CHECK_RADIUS: u32 = 3;
/// Default depth-discontinuity threshold (normalized units)
pub const DEFAULT_BACKGROUND_THRESHOLD: f64 = 0.4;

/// Configuration for a segmentation run
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationParams {
    /// Histogram bins per channel, in [1, 256]
    pub bins: u32,
    /// Trade-off between the regional and smoothness terms; must be > 0
    pub lambda: f64,
    /// Histogram the RGB channels
    pub include_color: bool,
    /// Histogram the depth channel
    pub include_depth: bool,
    /// Neighbor dissimilarity metric for the smoothness term
    pub difference: Difference,
    /// Window radius of the boundary background check (two-pass only)
    pub background_check_radius: u32,
    /// Depth-discontinuity threshold for boundary sinks (two-pass only)
    pub background_threshold: f64,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            lambda: 1.0,
            include_color: true,
            include_depth: true,
            difference: Difference::Depth,
            background_check_radius: DEFAULT_BACKGROUND_CHECK_RADIUS,
            background_threshold: DEFAULT_BACKGROUND_THRESHOLD,
        }
    }
}

impl SegmentationParams {
    /// Create parameters with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of histogram bins
    pub fn with_bins(mut self, bins: u32) -> Self {
        self.bins = bins;
        self
    }

    /// Set the regional/smoothness trade-off
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Select which channels feed the histograms
    pub fn with_histogram_channels(mut self, color: bool, depth: bool) -> Self {
        self.include_color = color;
        self.include_depth = depth;
        self
    }

    /// Set the neighbor dissimilarity metric
    pub fn with_difference(mut self, difference: Difference) -> Self {
        self.difference = difference;
        self
    }

    /// Set the boundary background check radius
    pub fn with_background_check_radius(mut self, radius: u32) -> Self {
        self.background_check_radius = radius;
        self
    }

    /// Set the boundary depth-discontinuity threshold
    pub fn with_background_threshold(mut self, threshold: f64) -> Self {
        self.background_threshold = threshold;
        self
    }

    /// Validate the record
    ///
    /// # Errors
    ///
    /// Returns `InvalidParams` for λ ≤ 0 or non-finite, bins outside
    /// [1, 256], both histogram channel flags off, or a negative or
    /// non-finite weight in a weighted metric.
    pub fn validate(&self) -> CutResult<()> {
        if !self.lambda.is_finite() || self.lambda <= 0.0 {
            return Err(CutError::InvalidParams(format!(
                "lambda must be positive and finite, got {}",
                self.lambda
            )));
        }
        if self.bins < 1 || self.bins > MAX_BINS {
            return Err(CutError::InvalidParams(format!(
                "bins must be in [1, {MAX_BINS}], got {}",
                self.bins
            )));
        }
        if !self.include_color && !self.include_depth {
            return Err(CutError::InvalidParams(
                "at least one of color and depth must feed the histograms".into(),
            ));
        }
        if let Difference::Weighted(weights) = self.difference
            && weights.iter().any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(CutError::InvalidParams(format!(
                "weighted difference requires finite non-negative weights, got {weights:?}"
            )));
        }
        if !self.background_threshold.is_finite() || self.background_threshold < 0.0 {
            return Err(CutError::InvalidParams(format!(
                "background threshold must be non-negative and finite, got {}",
                self.background_threshold
            )));
        }
        Ok(())
    }
}
