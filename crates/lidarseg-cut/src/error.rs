//! Error types for lidarseg-cut
//!
//! Every failure aborts the current segmentation call; no partial mask is
//! ever returned. Empty histogram bins and duplicated seeds are not errors.

use lidarseg_graph::GraphError;
use thiserror::Error;

/// Errors surfaced by the segmentation pipeline
#[derive(Debug, Error)]
pub enum CutError {
    /// Image unusable for RGBD segmentation (zero-size, fewer than 4
    /// channels)
    ///
    /// [`RgbdImage`](lidarseg_core::RgbdImage) construction already
    /// rejects such geometry; the pipeline re-checks its input and
    /// surfaces this kind so callers can match on it.
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    /// Rejected parameter combination
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Both seed sets are empty
    #[error("no seeds: at least one source or sink pixel is required")]
    NoSeeds,

    /// The max-flow solver reported an internal failure
    #[error("solver failure: {0}")]
    SolverFailure(String),

    /// A cancellation token tripped mid-run
    #[error("segmentation cancelled")]
    Cancelled,

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lidarseg_core::Error),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] lidarseg_morph::MorphError),
}

impl From<GraphError> for CutError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Cancelled => CutError::Cancelled,
            other => CutError::SolverFailure(other.to_string()),
        }
    }
}

/// Result type for segmentation operations
pub type CutResult<T> = Result<T, CutError>;
