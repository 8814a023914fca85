//! Boundary refinement for the two-pass pipeline
//!
//! After the depth-only pass, the mask boundary is walked: wherever the
//! local depth statistics inside and outside the mask disagree strongly,
//! the boundary pixel is declared background for the second pass. This
//! anchors the color-aware cut at real depth discontinuities.

use crate::error::CutResult;
use crate::params::SegmentationParams;
use lidarseg_core::{CHANNEL_DEPTH, Coord, Region, RgbdImage, SegmentMask};
use lidarseg_morph::boundary_ring;
use tracing::{debug, info};

/// Median of a list of samples
///
/// Exact middle value for odd length, mean of the two central values for
/// even length, `None` for an empty list.
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Find boundary pixels that sit on a depth discontinuity
///
/// Walks the 1-ring just outside the mask. For each ring pixel, the square
/// window of radius `background_check_radius` around it is split by mask
/// membership into foreground and background depth samples; when both
/// lists are non-empty and their medians differ by more than
/// `background_threshold`, the pixel becomes a background seed candidate.
/// A window that falls entirely on one side yields no decision and the
/// pixel is skipped.
///
/// `normalized` must be the normalized image: the threshold is calibrated
/// in normalized depth units.
pub fn grow_boundary_sinks(
    normalized: &RgbdImage,
    mask: &SegmentMask,
    params: &SegmentationParams,
) -> CutResult<Vec<Coord>> {
    let ring = boundary_ring(mask, 1)?;
    let candidates = ring.to_indices();
    debug!(candidates = candidates.len(), "boundary pixels considered");

    let bounds = normalized.region();
    let mut new_sinks = Vec::new();

    for &b in &candidates {
        let window = Region::around(b, params.background_check_radius, &bounds)?;

        let mut foreground_depths = Vec::new();
        let mut background_depths = Vec::new();
        for c in window.coords() {
            let depth = normalized.channel_value_unchecked(
                c.x as u32,
                c.y as u32,
                CHANNEL_DEPTH,
            );
            if mask.is_foreground(c.x as u32, c.y as u32) {
                foreground_depths.push(depth);
            } else {
                background_depths.push(depth);
            }
        }

        let (Some(fg_median), Some(bg_median)) =
            (median(&foreground_depths), median(&background_depths))
        else {
            continue;
        };

        if (fg_median - bg_median).abs() as f64 > params.background_threshold {
            new_sinks.push(b);
        }
    }

    info!(
        new_sinks = new_sinks.len(),
        considered = candidates.len(),
        "boundary background growth"
    );
    Ok(new_sinks)
}
