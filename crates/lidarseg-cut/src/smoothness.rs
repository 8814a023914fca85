//! Smoothness (boundary) term
//!
//! Each pair of 8-connected neighbors gets a symmetric edge whose capacity
//! falls off with the pixels' dissimilarity: cutting between similar
//! neighbors is expensive, cutting across an edge in the data is cheap.
//! The falloff is scaled by σ², the mean squared neighbor dissimilarity of
//! the whole image, so one λ behaves comparably across images of different
//! contrast. σ² is recomputed from scratch for every cut; it is one linear
//! pass and must reflect the image being cut, never an earlier one.

use crate::difference::Difference;
use lidarseg_core::RgbdImage;
use tracing::debug;

/// Offsets enumerating each unordered 8-neighbor pair exactly once
const PAIR_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// One symmetric neighbor link with its capacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborLink {
    pub a: u32,
    pub b: u32,
    pub weight: f64,
}

/// All neighbor links of an image under one dissimilarity metric
#[derive(Debug, Clone)]
pub struct SmoothnessTerm {
    pub links: Vec<NeighborLink>,
    pub sigma_sq: f64,
}

impl SmoothnessTerm {
    /// Build the smoothness term for a normalized image
    ///
    /// Weights are `exp(-d² / 2σ²) / ‖p−q‖` with ‖p−q‖ the Euclidean pixel
    /// distance (1 axial, √2 diagonal), debiasing diagonal neighbors. When
    /// σ² is 0 — every neighbor pair identical under the metric — all
    /// weights become 1; the exponential is undefined there.
    pub fn build(image: &RgbdImage, difference: Difference) -> Self {
        // first pass: σ² = mean squared dissimilarity over all pairs
        let mut sum_sq = 0.0f64;
        let mut num_pairs = 0u64;
        for_each_pair(image, difference, |_, _, _, d| {
            sum_sq += d * d;
            num_pairs += 1;
        });
        let sigma_sq = if num_pairs > 0 {
            sum_sq / num_pairs as f64
        } else {
            0.0
        };
        debug!(sigma_sq, num_pairs, "smoothness scale computed");

        // second pass: per-pair weights
        let mut links = Vec::with_capacity(num_pairs as usize);
        for_each_pair(image, difference, |a, b, diagonal, d| {
            let weight = if sigma_sq > 0.0 {
                let dist = if diagonal { std::f64::consts::SQRT_2 } else { 1.0 };
                (-d * d / (2.0 * sigma_sq)).exp() / dist
            } else {
                1.0
            };
            links.push(NeighborLink { a, b, weight });
        });

        Self { links, sigma_sq }
    }
}

/// Visit every unordered 8-neighbor pair once
///
/// The callback receives the two row-major pixel indices, whether the pair
/// is diagonal, and its dissimilarity.
fn for_each_pair(
    image: &RgbdImage,
    difference: Difference,
    mut visit: impl FnMut(u32, u32, bool, f64),
) {
    let (width, height) = image.dimensions();
    for y in 0..height {
        for x in 0..width {
            let p = image.pixel_unchecked(x, y);
            for &(dx, dy) in &PAIR_OFFSETS {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                let q = image.pixel_unchecked(nx, ny);
                let d = difference.eval(p, q);
                let a = image.index(x, y) as u32;
                let b = image.index(nx, ny) as u32;
                visit(a, b, dx != 0 && dy != 0, d);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image() -> RgbdImage {
        // 4x4, depth 0 on the left half and 1 on the right, flat color
        let mut img = RgbdImage::new(4, 4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let depth = if x < 2 { 0.0 } else { 1.0 };
                img.set_pixel(x, y, &[0.0, 0.0, 0.0, depth]).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_pair_count_8_connected() {
        let img = step_image();
        let term = SmoothnessTerm::build(&img, Difference::Depth);
        // 4x4 grid: 12 horizontal + 12 vertical + 2*9 diagonal pairs
        assert_eq!(term.links.len(), 42);
    }

    #[test]
    fn test_each_pair_appears_once() {
        let img = step_image();
        let term = SmoothnessTerm::build(&img, Difference::Depth);
        let mut seen = std::collections::HashSet::new();
        for link in &term.links {
            let key = (link.a.min(link.b), link.a.max(link.b));
            assert!(seen.insert(key), "duplicate pair {key:?}");
        }
    }

    #[test]
    fn test_cross_step_edges_are_cheap() {
        let img = step_image();
        let term = SmoothnessTerm::build(&img, Difference::Depth);
        assert!(term.sigma_sq > 0.0);

        let index = |x: u32, y: u32| (y * 4 + x) as u32;
        let weight_of = |a: u32, b: u32| {
            term.links
                .iter()
                .find(|l| (l.a == a && l.b == b) || (l.a == b && l.b == a))
                .map(|l| l.weight)
                .unwrap()
        };

        let within = weight_of(index(0, 0), index(1, 0));
        let across = weight_of(index(1, 0), index(2, 0));
        assert!(across < within, "cut across the step must be cheaper");
        assert!((within - 1.0).abs() < 1e-9, "identical neighbors weigh 1");
    }

    #[test]
    fn test_diagonal_debias() {
        let img = step_image();
        let term = SmoothnessTerm::build(&img, Difference::Depth);
        let index = |x: u32, y: u32| (y * 4 + x) as u32;
        // identical-pixel pairs: axial weight 1, diagonal weight 1/sqrt(2)
        let diagonal = term
            .links
            .iter()
            .find(|l| l.a == index(0, 0) && l.b == index(1, 1))
            .unwrap();
        assert!((diagonal.weight - 1.0 / std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_constant_image_unit_weights() {
        let img = RgbdImage::new(3, 3, 4).unwrap();
        let term = SmoothnessTerm::build(&img, Difference::Weighted([1.0; 4]));
        assert_eq!(term.sigma_sq, 0.0);
        assert!(term.links.iter().all(|l| l.weight == 1.0));
    }

    #[test]
    fn test_metric_matters() {
        // under the color metric the depth step is invisible
        let img = step_image();
        let term = SmoothnessTerm::build(&img, Difference::Color);
        assert_eq!(term.sigma_sq, 0.0);
        assert!(term.links.iter().all(|l| l.weight == 1.0));
    }
}
