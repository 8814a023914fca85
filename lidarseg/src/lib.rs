//! lidarseg - Interactive graph-cut segmentation of RGBD LiDAR images
//!
//! A user marks foreground and background pixels on a 4+ channel
//! (RGB + depth) image; the library partitions the remaining pixels by
//! minimizing an energy that combines per-label color/depth histogram
//! likelihoods with penalties for cutting between similar neighbors, via
//! max-flow/min-cut. A two-pass mode refines a depth-only cut with a
//! color-aware one, reseeding from the first mask and growing background
//! seeds along its depth discontinuities.
//!
//! # Example
//!
//! ```
//! use lidarseg::{
//!     Coord, Difference, RgbdImage, SegmentationParams, SegmentationSession,
//! };
//!
//! // a 4x1 image: two dark pixels, two bright pixels
//! let mut image = RgbdImage::new(4, 1, 4).unwrap();
//! image.set_pixel(2, 0, &[1.0, 1.0, 1.0, 1.0]).unwrap();
//! image.set_pixel(3, 0, &[1.0, 1.0, 1.0, 1.0]).unwrap();
//!
//! let mut session = SegmentationSession::new(image);
//! session.seeds_mut().add_sources([Coord::new(0, 0)]);
//! session.seeds_mut().add_sinks([Coord::new(3, 0)]);
//!
//! let params = SegmentationParams::new()
//!     .with_lambda(1.0)
//!     .with_difference(Difference::Weighted([1.0; 4]));
//! let result = session.segment(&params).unwrap();
//! assert!(result.mask.is_foreground(0, 0));
//! assert!(!result.mask.is_foreground(3, 0));
//! ```

// Re-export core types
pub use lidarseg_core::*;

// Morphology
pub use lidarseg_morph::{Sel, boundary_ring, dilate, dilate_indices, erode};

// Graphs and solving
pub use lidarseg_graph::{
    CancelToken, DinicSolver, FlowGraph, GraphError, MaxFlowOutcome, MaxFlowSolver, Side,
};

// The segmentation pipeline
pub use lidarseg_cut::{
    CutError, CutResult, Difference, Histogram1d, HistogramBank, RegionalTerm,
    SegmentationParams, SegmentationResult, SegmentationSession, SmoothnessTerm, TwoPassResult,
    segment, segment_two_pass,
};

// Boundary-format I/O
pub use lidarseg_io::{
    IoError, IoResult, read_image, read_label_image, read_mask, read_seeds, read_seeds_text,
    write_composite_png, write_image, write_mask, write_seeds, write_seeds_text,
};
