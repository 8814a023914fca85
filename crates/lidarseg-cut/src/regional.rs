//! Regional (data) term
//!
//! Converts the per-label histogram models into terminal capacities: a
//! pixel that looks like the foreground model gets a cheap sink-link (it
//! "wants" to stay on the source side) and vice versa. Seeded pixels are
//! hard constraints: one terminal capacity is pinned above anything the
//! data term can produce, the other is zeroed.

use crate::histogram::HistogramBank;
use crate::params::SegmentationParams;
use lidarseg_core::{RgbdImage, SeedSet};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Upper bound on the total smoothness capacity incident to one pixel
///
/// Smoothness weights are `exp(..) / dist ≤ 1` (and exactly 1 in the
/// degenerate σ² = 0 case), and the grid is 8-connected, so no pixel can
/// route more than this around a severed terminal link. The seed sentinel
/// must exceed it or a cheap neighborhood could outbid a hard constraint.
const MAX_NEIGHBOR_CAPACITY: f64 = 8.0;

/// Per-pixel terminal capacities
///
/// Indexed row-major like the image. `hard_cap` is the sentinel capacity
/// assigned to seeds; it exceeds every data-term capacity plus the whole
/// smoothness capacity of a pixel's neighborhood, so no cut can afford to
/// put a seed on the wrong side.
#[derive(Debug, Clone)]
pub struct RegionalTerm {
    pub t_source: Vec<f64>,
    pub t_sink: Vec<f64>,
    pub hard_cap: f64,
}

impl RegionalTerm {
    /// Build the regional term from seeded histograms
    ///
    /// `image` must be normalized and `seeds` clipped to it; `params` must
    /// have been validated. An empty seed list on either side collapses
    /// that label's likelihood to the floor everywhere, which still yields
    /// a valid (smoothness-driven) cut.
    pub fn build(image: &RgbdImage, seeds: &SeedSet, params: &SegmentationParams) -> Self {
        let foreground = HistogramBank::build(
            image,
            &seeds.sources,
            params.include_color,
            params.include_depth,
            params.bins,
        );
        let background = HistogramBank::build(
            image,
            &seeds.sinks,
            params.include_color,
            params.include_depth,
            params.bins,
        );
        if foreground.is_empty() {
            debug!("no foreground seeds: foreground likelihood collapses to the floor");
        }
        if background.is_empty() {
            debug!("no background seeds: background likelihood collapses to the floor");
        }

        let (width, height) = image.dimensions();
        let num_pixels = image.num_pixels();
        let mut t_source = Vec::with_capacity(num_pixels);
        let mut t_sink = Vec::with_capacity(num_pixels);

        let mut max_cap = 0.0f64;
        for y in 0..height {
            for x in 0..width {
                let pixel = image.pixel_unchecked(x, y);
                let source_cap = params.lambda * background.negative_log_likelihood(pixel);
                let sink_cap = params.lambda * foreground.negative_log_likelihood(pixel);
                max_cap = max_cap.max(source_cap).max(sink_cap);
                t_source.push(source_cap);
                t_sink.push(sink_cap);
            }
        }
        let hard_cap = 1.0 + max_cap + MAX_NEIGHBOR_CAPACITY;

        let mut term = Self {
            t_source,
            t_sink,
            hard_cap,
        };
        term.apply_seed_constraints(image, seeds);
        term
    }

    /// Pin seeded pixels to their side of the cut
    ///
    /// Sinks are applied after sources, so a pixel scribbled as both ends
    /// up background: the later assignment wins.
    fn apply_seed_constraints(&mut self, image: &RgbdImage, seeds: &SeedSet) {
        let mut source_indices = HashSet::new();
        for &c in &seeds.sources {
            if !image.contains(c) {
                continue;
            }
            let index = image.index(c.x as u32, c.y as u32);
            source_indices.insert(index);
            self.t_source[index] = self.hard_cap;
            self.t_sink[index] = 0.0;
        }
        for &c in &seeds.sinks {
            if !image.contains(c) {
                continue;
            }
            let index = image.index(c.x as u32, c.y as u32);
            if source_indices.contains(&index) {
                warn!(
                    x = c.x,
                    y = c.y,
                    "pixel seeded as both foreground and background; keeping background"
                );
            }
            self.t_source[index] = 0.0;
            self.t_sink[index] = self.hard_cap;
        }
    }
}
