//! SegmentationSession - the pipeline entry point
//!
//! A session owns the image and the accumulated seed scribbles and exposes
//! the single-pass cut and the two-pass LiDAR refinement. All per-call
//! state (normalized image, histograms, terms, graph) is rebuilt inside
//! each call and dropped on return; nothing is cached between cuts and
//! nothing is process-global, so concurrent cuts on different sessions are
//! safe.

use crate::builder::build_graph;
use crate::difference::Difference;
use crate::error::{CutError, CutResult};
use crate::params::SegmentationParams;
use crate::refine::grow_boundary_sinks;
use crate::regional::RegionalTerm;
use crate::runner::{SegmentationResult, run_min_cut};
use crate::smoothness::SmoothnessTerm;
use lidarseg_core::{Coord, MIN_CHANNELS, RgbdImage, SeedSet, SegmentMask};
use lidarseg_graph::{CancelToken, DinicSolver, MaxFlowSolver};
use lidarseg_morph::{Sel, erode};
use tracing::info;

/// Default disk radius for [`SegmentationSession::erode_sources`]
pub const SOURCE_ERODE_RADIUS: u32 = 3;

/// Outcome of the two-pass refinement
#[derive(Debug, Clone)]
pub struct TwoPassResult {
    /// Final mask from the second (color-aware) pass
    pub mask: SegmentMask,
    /// Flow value of the second pass
    pub flow: f64,
    /// Flow value of the first (depth-only) pass
    pub pass_one_flow: f64,
    /// Number of background seeds grown along the pass-one boundary
    pub boundary_sinks: usize,
}

/// An image plus its accumulated seed scribbles
#[derive(Debug, Clone)]
pub struct SegmentationSession {
    image: RgbdImage,
    seeds: SeedSet,
}

impl SegmentationSession {
    /// Create a session for an image with no seeds yet
    pub fn new(image: RgbdImage) -> Self {
        Self {
            image,
            seeds: SeedSet::new(),
        }
    }

    /// The session's image
    pub fn image(&self) -> &RgbdImage {
        &self.image
    }

    /// The current seed set
    pub fn seeds(&self) -> &SeedSet {
        &self.seeds
    }

    /// Mutable access to the seed set
    pub fn seeds_mut(&mut self) -> &mut SeedSet {
        &mut self.seeds
    }

    /// Replace the seed set
    pub fn set_seeds(&mut self, seeds: SeedSet) {
        self.seeds = seeds;
    }

    /// Single-pass cut with the default solver
    pub fn segment(&self, params: &SegmentationParams) -> CutResult<SegmentationResult> {
        self.segment_with(params, &DinicSolver::new(), None)
    }

    /// Single-pass cut with an explicit solver and optional cancellation
    pub fn segment_with<S: MaxFlowSolver>(
        &self,
        params: &SegmentationParams,
        solver: &S,
        cancel: Option<&CancelToken>,
    ) -> CutResult<SegmentationResult> {
        check_image(&self.image)?;
        params.validate()?;
        let clipped = self.seeds.clipped_to(&self.image.region());
        if clipped.is_empty() {
            return Err(CutError::NoSeeds);
        }

        let normalized = self.image.normalized();
        let regional = RegionalTerm::build(&normalized, &clipped, params);
        let smoothness = SmoothnessTerm::build(&normalized, params.difference);
        let graph = build_graph(&regional, &smoothness)?;

        let (width, height) = self.image.dimensions();
        run_min_cut(&graph, width, height, solver, cancel)
    }

    /// Two-pass LiDAR refinement with the default solver
    pub fn segment_two_pass(&mut self, params: &SegmentationParams) -> CutResult<TwoPassResult> {
        self.segment_two_pass_with(params, &DinicSolver::new(), None)
    }

    /// Two-pass LiDAR refinement
    ///
    /// Pass one cuts on depth dissimilarity alone (histograms over color
    /// and depth). Its mask reseeds the foreground, and background seeds
    /// are grown along the mask boundary where the local depth medians
    /// disagree by more than the configured threshold. Pass two re-cuts
    /// with the weighted RGBD dissimilarity. The session's seed set is
    /// left holding the reseeded sources and grown sinks, so the caller
    /// can inspect or display them.
    pub fn segment_two_pass_with<S: MaxFlowSolver>(
        &mut self,
        params: &SegmentationParams,
        solver: &S,
        cancel: Option<&CancelToken>,
    ) -> CutResult<TwoPassResult> {
        check_image(&self.image)?;
        params.validate()?;

        let pass_one_params = params
            .clone()
            .with_difference(Difference::Depth)
            .with_histogram_channels(true, true);
        info!("two-pass segmentation: depth-only cut");
        let pass_one = self.segment_with(&pass_one_params, solver, cancel)?;

        self.reseed_foreground(&pass_one.mask);
        let boundary_sinks = self.generate_neighbor_sinks(&pass_one.mask, params)?;

        let weights = match params.difference {
            Difference::Weighted(w) => w,
            _ => [1.0; 4],
        };
        let pass_two_params = pass_one_params.with_difference(Difference::Weighted(weights));
        info!("two-pass segmentation: weighted RGBD cut");
        let pass_two = self.segment_with(&pass_two_params, solver, cancel)?;

        Ok(TwoPassResult {
            mask: pass_two.mask,
            flow: pass_two.flow,
            pass_one_flow: pass_one.flow,
            boundary_sinks,
        })
    }

    /// Replace the foreground seeds with a mask's foreground pixels
    ///
    /// After a depth-only cut the foreground region is a reliable seed set
    /// for the color-aware pass.
    pub fn reseed_foreground(&mut self, mask: &SegmentMask) {
        self.seeds.sources = mask.to_indices();
        info!(sources = self.seeds.sources.len(), "foreground reseeded from mask");
    }

    /// Grow background seeds along a mask's boundary depth discontinuities
    ///
    /// Appends the new sinks to the session's seed set and returns how
    /// many were added.
    pub fn generate_neighbor_sinks(
        &mut self,
        mask: &SegmentMask,
        params: &SegmentationParams,
    ) -> CutResult<usize> {
        let normalized = self.image.normalized();
        let new_sinks = grow_boundary_sinks(&normalized, mask, params)?;
        let count = new_sinks.len();
        self.seeds.add_sinks(new_sinks);
        Ok(count)
    }

    /// Erode the foreground seeds with a disk
    ///
    /// Removes thin frills from seeds that came from a prior mask.
    pub fn erode_sources(&mut self, radius: u32) -> CutResult<()> {
        let (width, height) = self.image.dimensions();
        let mask = SegmentMask::from_indices(width, height, &self.seeds.sources)?;
        let sel = Sel::create_disk(radius)?;
        let eroded = erode(&mask, &sel)?;
        self.seeds.sources = eroded.to_indices();
        Ok(())
    }
}

/// Reject images the energy model cannot work with
///
/// [`RgbdImage`] construction already enforces this geometry; the pipeline
/// re-checks so the error kind is reportable at the call that fails.
fn check_image(image: &RgbdImage) -> CutResult<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || image.num_channels() < MIN_CHANNELS {
        return Err(CutError::UnsupportedImage(format!(
            "{}x{} with {} channels",
            width,
            height,
            image.num_channels()
        )));
    }
    Ok(())
}

/// Single-pass segmentation of an image with explicit seed lists
///
/// Convenience wrapper over [`SegmentationSession`] using the default
/// solver; returns only the mask.
pub fn segment(
    image: &RgbdImage,
    sources: &[Coord],
    sinks: &[Coord],
    params: &SegmentationParams,
) -> CutResult<SegmentMask> {
    let mut session = SegmentationSession::new(image.clone());
    session.set_seeds(SeedSet::from_coords(sources.to_vec(), sinks.to_vec()));
    Ok(session.segment(params)?.mask)
}

/// Two-pass segmentation of an image with explicit seed lists
pub fn segment_two_pass(
    image: &RgbdImage,
    sources: &[Coord],
    sinks: &[Coord],
    params: &SegmentationParams,
) -> CutResult<SegmentMask> {
    let mut session = SegmentationSession::new(image.clone());
    session.set_seeds(SeedSet::from_coords(sources.to_vec(), sinks.to_vec()));
    Ok(session.segment_two_pass(params)?.mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_two_tone() -> SegmentationSession {
        // 4x1: dark pair, bright pair
        let mut img = RgbdImage::new(4, 1, 4).unwrap();
        img.set_pixel(0, 0, &[0.0, 0.0, 0.0, 0.0]).unwrap();
        img.set_pixel(1, 0, &[0.05, 0.0, 0.0, 0.05]).unwrap();
        img.set_pixel(2, 0, &[1.0, 1.0, 1.0, 1.0]).unwrap();
        img.set_pixel(3, 0, &[0.95, 1.0, 1.0, 0.95]).unwrap();
        let mut session = SegmentationSession::new(img);
        session.seeds_mut().add_sources([Coord::new(0, 0)]);
        session.seeds_mut().add_sinks([Coord::new(3, 0)]);
        session
    }

    fn params() -> SegmentationParams {
        SegmentationParams::new().with_difference(Difference::Weighted([1.0; 4]))
    }

    #[test]
    fn test_segment_separates_tones() {
        let session = tiny_two_tone();
        let result = session.segment(&params()).unwrap();
        assert_eq!(result.mask.dimensions(), (4, 1));
        assert!(result.mask.is_foreground(0, 0));
        assert!(result.mask.is_foreground(1, 0));
        assert!(!result.mask.is_foreground(2, 0));
        assert!(!result.mask.is_foreground(3, 0));
    }

    #[test]
    fn test_segment_is_deterministic() {
        let session = tiny_two_tone();
        let a = session.segment(&params()).unwrap();
        let b = session.segment(&params()).unwrap();
        assert_eq!(a.mask, b.mask);
        assert_eq!(a.flow, b.flow);
    }

    #[test]
    fn test_no_seeds_rejected() {
        let img = RgbdImage::new(4, 4, 4).unwrap();
        let session = SegmentationSession::new(img);
        assert!(matches!(
            session.segment(&params()),
            Err(CutError::NoSeeds)
        ));
    }

    #[test]
    fn test_all_seeds_out_of_bounds_is_no_seeds() {
        let img = RgbdImage::new(4, 4, 4).unwrap();
        let mut session = SegmentationSession::new(img);
        session.seeds_mut().add_sources([Coord::new(100, 100)]);
        assert!(matches!(
            session.segment(&params()),
            Err(CutError::NoSeeds)
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let session = tiny_two_tone();
        let bad = params().with_lambda(-2.0);
        assert!(matches!(
            session.segment(&bad),
            Err(CutError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_convenience_wrappers() {
        let session = tiny_two_tone();
        let mask = segment(
            session.image(),
            &[Coord::new(0, 0)],
            &[Coord::new(3, 0)],
            &params(),
        )
        .unwrap();
        assert!(mask.is_foreground(0, 0));
        assert!(!mask.is_foreground(3, 0));
    }

    #[test]
    fn test_erode_sources_removes_isolated_seed() {
        let mut img = RgbdImage::new(16, 16, 4).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                img.set_pixel(x, y, &[0.5, 0.5, 0.5, 0.5]).unwrap();
            }
        }
        let mut session = SegmentationSession::new(img);
        // a solid 7x7 block plus a stray single seed
        for y in 4..11 {
            for x in 4..11 {
                session.seeds_mut().add_sources([Coord::new(x, y)]);
            }
        }
        session.seeds_mut().add_sources([Coord::new(14, 14)]);

        session.erode_sources(SOURCE_ERODE_RADIUS).unwrap();
        let sources = &session.seeds().sources;
        assert!(sources.contains(&Coord::new(7, 7)));
        assert!(!sources.contains(&Coord::new(14, 14)));
        assert!(!sources.contains(&Coord::new(4, 4)));
    }
}
