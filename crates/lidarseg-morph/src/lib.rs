//! lidarseg-morph - Binary mask morphology
//!
//! This crate provides the morphological toolkit the segmentation pipeline
//! relies on:
//!
//! - **Structuring elements** - bricks, squares, and disks ([`Sel`])
//! - **Dilation / erosion** - standard binary semantics on [`SegmentMask`]
//! - **Boundary rings** - `dilate XOR original`, the candidate band for
//!   growing background seeds
//! - **Index-list dilation** - thickening thin scribble paths into usable
//!   seed regions
//!
//! All operations are pure on their inputs.
//!
//! [`SegmentMask`]: lidarseg_core::SegmentMask

pub mod binary;
pub mod error;
pub mod sel;

pub use binary::{boundary_ring, dilate, dilate_indices, erode};
pub use error::{MorphError, MorphResult};
pub use sel::Sel;
