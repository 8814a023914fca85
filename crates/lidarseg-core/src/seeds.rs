//! Seed sets - user-marked foreground and background pixels
//!
//! Seeds are kept as plain coordinate lists: duplicates are tolerated,
//! out-of-image coordinates survive until a consumer filters them (and
//! logs how many were dropped), and a pixel present in both lists is
//! resolved at graph-construction time, not here.

use crate::coord::{Coord, Region};
use tracing::debug;

/// Foreground (source) and background (sink) seed pixels
#[derive(Debug, Clone, Default)]
pub struct SeedSet {
    pub sources: Vec<Coord>,
    pub sinks: Vec<Coord>,
}

impl SeedSet {
    /// Create an empty seed set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a seed set from coordinate lists
    pub fn from_coords(sources: Vec<Coord>, sinks: Vec<Coord>) -> Self {
        Self { sources, sinks }
    }

    /// Append foreground seeds
    pub fn add_sources(&mut self, coords: impl IntoIterator<Item = Coord>) {
        self.sources.extend(coords);
    }

    /// Append background seeds
    pub fn add_sinks(&mut self, coords: impl IntoIterator<Item = Coord>) {
        self.sinks.extend(coords);
    }

    /// Whether both lists are empty
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.sinks.is_empty()
    }

    /// Copy of this seed set restricted to a region
    ///
    /// Out-of-region coordinates are dropped silently; the counts are
    /// reported at debug level.
    pub fn clipped_to(&self, region: &Region) -> SeedSet {
        let clip = |coords: &[Coord], label: &str| {
            let kept: Vec<_> = coords
                .iter()
                .copied()
                .filter(|&c| region.contains(c))
                .collect();
            let dropped = coords.len() - kept.len();
            if dropped > 0 {
                debug!(label, dropped, "seeds outside the image were dropped");
            }
            kept
        };
        SeedSet {
            sources: clip(&self.sources, "sources"),
            sinks: clip(&self.sinks, "sinks"),
        }
    }
}
