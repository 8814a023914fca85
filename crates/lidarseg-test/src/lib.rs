//! lidarseg-test - Shared test fixtures
//!
//! Synthetic RGBD images and coordinate helpers used by the regression
//! tests across the workspace. Real LiDAR captures are large and binary;
//! the pipeline's behavior is fully exercisable on small constructed
//! scenes with known structure.

use lidarseg_core::{Coord, RgbdImage};

/// A constant image: every pixel carries the same 4-channel value
pub fn constant_image(width: u32, height: u32, value: f32) -> RgbdImage {
    let mut image = RgbdImage::new(width, height, 4).expect("valid fixture geometry");
    for y in 0..height {
        for x in 0..width {
            image
                .set_pixel(x, y, &[value, value, value, value])
                .expect("in-bounds fixture pixel");
        }
    }
    image
}

/// A vertical depth step: depth `left_depth` for x < step_x, `right_depth`
/// from step_x on; color is flat everywhere
pub fn depth_step_image(
    width: u32,
    height: u32,
    step_x: u32,
    left_depth: f32,
    right_depth: f32,
) -> RgbdImage {
    let mut image = RgbdImage::new(width, height, 4).expect("valid fixture geometry");
    for y in 0..height {
        for x in 0..width {
            let depth = if x < step_x { left_depth } else { right_depth };
            image
                .set_pixel(x, y, &[0.5, 0.5, 0.5, depth])
                .expect("in-bounds fixture pixel");
        }
    }
    image
}

/// A flat-depth image with a square color blob in the center
///
/// The blob spans `blob_half_side` pixels in each direction around the
/// image center and carries `blob_value` in the RGB channels; the rest of
/// the image carries `background_value`. Depth is 0.5 everywhere.
pub fn color_blob_image(
    width: u32,
    height: u32,
    blob_half_side: u32,
    blob_value: f32,
    background_value: f32,
) -> RgbdImage {
    let mut image = RgbdImage::new(width, height, 4).expect("valid fixture geometry");
    let (cx, cy) = (width / 2, height / 2);
    for y in 0..height {
        for x in 0..width {
            let in_blob = x.abs_diff(cx) <= blob_half_side && y.abs_diff(cy) <= blob_half_side;
            let v = if in_blob { blob_value } else { background_value };
            image
                .set_pixel(x, y, &[v, v, v, 0.5])
                .expect("in-bounds fixture pixel");
        }
    }
    image
}

/// All coordinates of the inclusive square [x0, x0+side) × [y0, y0+side)
pub fn square_coords(x0: i32, y0: i32, side: i32) -> Vec<Coord> {
    let mut coords = Vec::with_capacity((side * side) as usize);
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            coords.push(Coord::new(x, y));
        }
    }
    coords
}
