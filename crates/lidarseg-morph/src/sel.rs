//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Only hit elements exist here; the segmentation pipeline has
//! no use for hit-miss patterns.

use crate::{MorphError, MorphResult};

/// Structuring Element (SEL)
///
/// Defines the neighborhood pattern for morphological operations as a set
/// of offsets relative to the origin, which sits at the element's center.
#[derive(Debug, Clone)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    hits: Vec<bool>,
}

impl Sel {
    /// Create a rectangular "brick" structuring element with all hits
    ///
    /// The origin is the center pixel.
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "brick dimensions must be positive: {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            hits: vec![true; width as usize * height as usize],
        })
    }

    /// Create a square structuring element of half-side `radius`
    ///
    /// The element spans `2*radius + 1` pixels in each direction.
    pub fn create_square(radius: u32) -> MorphResult<Self> {
        Self::create_brick(2 * radius + 1, 2 * radius + 1)
    }

    /// Create a disk structuring element of the given radius
    ///
    /// Contains every offset (dx, dy) with dx² + dy² ≤ radius², the binary
    /// ball used for seed erosion and boundary growth.
    pub fn create_disk(radius: u32) -> MorphResult<Self> {
        let side = 2 * radius + 1;
        let r2 = (radius as i64) * (radius as i64);
        let mut hits = Vec::with_capacity(side as usize * side as usize);
        for y in 0..side as i64 {
            for x in 0..side as i64 {
                let dx = x - radius as i64;
                let dy = y - radius as i64;
                hits.push(dx * dx + dy * dy <= r2);
            }
        }
        Ok(Self {
            width: side,
            height: side,
            cx: radius,
            cy: radius,
            hits,
        })
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// Iterate over hit positions relative to the origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.hits.iter().enumerate().filter_map(move |(idx, &hit)| {
            if hit {
                let x = (idx as u32 % width) as i32;
                let y = (idx as u32 / width) as i32;
                Some((x - cx, y - cy))
            } else {
                None
            }
        })
    }
}
