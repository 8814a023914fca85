//! lidarseg-core - Core data structures for RGBD segmentation
//!
//! This crate provides the shared vocabulary of the lidarseg workspace:
//!
//! - [`RgbdImage`] - a W×H image of K ≥ 4 `f32` channels (RGB, depth,
//!   optional auxiliary features) with per-channel min–max normalization
//! - [`SegmentMask`] - a binary {0, 255} foreground mask
//! - [`SeedSet`] - user-marked foreground and background pixels
//! - [`Coord`] / [`Region`] - pixel coordinates and clipped rectangles
//!
//! Higher layers (morphology, graph construction, the cut pipeline) all
//! operate on these types.

pub mod coord;
pub mod error;
pub mod image;
pub mod mask;
pub mod seeds;

pub use coord::{Coord, Region};
pub use error::{Error, Result};
pub use image::{
    CHANNEL_B, CHANNEL_DEPTH, CHANNEL_G, CHANNEL_R, MIN_CHANNELS, RgbdImage,
};
pub use mask::{BACKGROUND, FOREGROUND, SegmentMask};
pub use seeds::SeedSet;
