//! Per-label channel histograms
//!
//! The regional term models each label (foreground, background) as a
//! product of independent 1-D histograms, one per active channel, built
//! from that label's seed pixels. Likelihoods come out as raw bin
//! fractions; the bank sums negative logs across channels, flooring empty
//! bins so a single unseen value never produces an infinite capacity.

use lidarseg_core::{CHANNEL_B, CHANNEL_DEPTH, CHANNEL_G, CHANNEL_R, Coord, RgbdImage};
use tracing::debug;

/// Scale factor of the empty-bin likelihood floor
///
/// The floor for a histogram with total count N over B bins is
/// `1 / (N * B * LIKELIHOOD_FLOOR_SCALE)`: well below any real bin
/// fraction, far above zero.
pub const LIKELIHOOD_FLOOR_SCALE: f64 = 1000.0;

/// Absolute floor used when a histogram has no samples at all
pub const EMPTY_HISTOGRAM_FLOOR: f64 = 1e-10;

/// A 1-D histogram with uniform bins over [0, 1]
#[derive(Debug, Clone)]
pub struct Histogram1d {
    counts: Vec<u64>,
    total: u64,
}

impl Histogram1d {
    /// Create an empty histogram with `bins` uniform bins
    ///
    /// `bins` must be at least 1; parameter validation upstream guarantees
    /// this for pipeline-built histograms.
    pub fn new(bins: u32) -> Self {
        debug_assert!(bins >= 1);
        Self {
            counts: vec![0; bins.max(1) as usize],
            total: 0,
        }
    }

    /// Number of bins
    #[inline]
    pub fn bins(&self) -> u32 {
        self.counts.len() as u32
    }

    /// Total number of counted samples
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Bin index of a value in [0, 1]
    ///
    /// Values at the upper edge fall into the last bin; values outside
    /// [0, 1] are clamped to the nearest bin.
    #[inline]
    pub fn bin_index(&self, value: f32) -> usize {
        let bins = self.counts.len();
        let raw = (value as f64 * bins as f64).floor();
        (raw.max(0.0) as usize).min(bins - 1)
    }

    /// Count one sample
    pub fn add(&mut self, value: f32) {
        let bin = self.bin_index(value);
        self.counts[bin] += 1;
        self.total += 1;
    }

    /// Raw count of the bin containing `value`
    pub fn count(&self, value: f32) -> u64 {
        self.counts[self.bin_index(value)]
    }

    /// Fraction of samples in the bin containing `value`
    ///
    /// Returns 0 for an empty histogram; callers floor the result before
    /// taking logs.
    pub fn probability(&self, value: f32) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(value) as f64 / self.total as f64
    }

    /// The empty-bin likelihood floor for this histogram
    pub fn likelihood_floor(&self) -> f64 {
        if self.total == 0 {
            return EMPTY_HISTOGRAM_FLOOR;
        }
        1.0 / (self.total as f64 * self.counts.len() as f64 * LIKELIHOOD_FLOOR_SCALE)
    }
}

/// Product-of-histograms model for one label
///
/// Holds one histogram per active channel. Active channels are RGB when
/// `include_color`, plus depth when `include_depth`; auxiliary channels
/// are never histogrammed.
#[derive(Debug, Clone)]
pub struct HistogramBank {
    channels: Vec<usize>,
    histograms: Vec<Histogram1d>,
}

impl HistogramBank {
    /// Build the bank from a label's seed pixels
    ///
    /// Coordinates outside the image are skipped; the caller is expected
    /// to have filtered (and counted) them already.
    pub fn build(
        image: &RgbdImage,
        seeds: &[Coord],
        include_color: bool,
        include_depth: bool,
        bins: u32,
    ) -> Self {
        let mut channels = Vec::new();
        if include_color {
            channels.extend([CHANNEL_R, CHANNEL_G, CHANNEL_B]);
        }
        if include_depth {
            channels.push(CHANNEL_DEPTH);
        }

        let mut histograms: Vec<_> = channels.iter().map(|_| Histogram1d::new(bins)).collect();
        for &coord in seeds {
            if !image.contains(coord) {
                continue;
            }
            let pixel = image.pixel_unchecked(coord.x as u32, coord.y as u32);
            for (histogram, &channel) in histograms.iter_mut().zip(&channels) {
                histogram.add(pixel[channel]);
            }
        }

        Self {
            channels,
            histograms,
        }
    }

    /// The active channel indices
    #[inline]
    pub fn channels(&self) -> &[usize] {
        &self.channels
    }

    /// Whether the bank was built from zero samples
    pub fn is_empty(&self) -> bool {
        self.histograms.first().is_none_or(|h| h.total() == 0)
    }

    /// Sum of per-channel negative log-likelihoods for one pixel
    ///
    /// Channels are treated as independent. Empty bins clamp to the
    /// histogram's likelihood floor rather than producing infinity; clamps
    /// are logged at debug level and are not errors.
    ///
    /// A bank built from zero seeds carries no information about its label
    /// and costs nothing: the cut is then driven by the other label's
    /// model, the smoothness term, and the hard constraints.
    pub fn negative_log_likelihood(&self, pixel: &[f32]) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mut sum = 0.0;
        for (histogram, &channel) in self.histograms.iter().zip(&self.channels) {
            let p = histogram.probability(pixel[channel]);
            let floor = histogram.likelihood_floor();
            if p < floor {
                debug!(channel, value = pixel[channel], "empty bin clamped to likelihood floor");
            }
            sum += -(p.max(floor)).ln();
        }
        sum
    }
}
