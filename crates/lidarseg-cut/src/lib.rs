//! lidarseg-cut - Interactive graph-cut segmentation of RGBD images
//!
//! Implements the energy-minimization core: user-marked foreground and
//! background scribbles become hard constraints in a capacitated pixel
//! graph whose minimum cut balances a regional term (per-label color/depth
//! histogram likelihoods) against a smoothness term (penalties for cutting
//! between similar 8-connected neighbors).
//!
//! - [`Difference`] - pluggable pixel dissimilarity (depth, color,
//!   weighted RGBD)
//! - [`Histogram1d`] / [`HistogramBank`] - per-label channel histograms
//! - [`RegionalTerm`] / [`SmoothnessTerm`] - the two energy components
//! - [`SegmentationSession`] - image + seeds, single-pass [`segment`] and
//!   two-pass [`segment_two_pass`] LiDAR refinement
//!
//! The max-flow computation itself is behind the
//! [`MaxFlowSolver`](lidarseg_graph::MaxFlowSolver) seam in
//! `lidarseg-graph`.

pub mod builder;
pub mod difference;
pub mod error;
pub mod histogram;
pub mod params;
pub mod refine;
pub mod regional;
pub mod runner;
pub mod session;
pub mod smoothness;

pub use difference::Difference;
pub use error::{CutError, CutResult};
pub use histogram::{
    EMPTY_HISTOGRAM_FLOOR, Histogram1d, HistogramBank, LIKELIHOOD_FLOOR_SCALE,
};
pub use params::{
    DEFAULT_BACKGROUND_CHECK_RADIUS, DEFAULT_BACKGROUND_THRESHOLD, DEFAULT_BINS, MAX_BINS,
    SegmentationParams,
};
pub use lidarseg_core::SeedSet;
pub use refine::{grow_boundary_sinks, median};
pub use regional::RegionalTerm;
pub use runner::SegmentationResult;
pub use session::{
    SOURCE_ERODE_RADIUS, SegmentationSession, TwoPassResult, segment, segment_two_pass,
};
pub use smoothness::{NeighborLink, SmoothnessTerm};
