//! SegmentMask - binary foreground/background mask
//!
//! A W×H grid of {0, 255} matching the image dimensions; 255 marks
//! foreground. Masks are the output of every cut and the carrier for the
//! morphological operations in `lidarseg-morph`.

use crate::coord::{Coord, Region};
use crate::error::{Error, Result};

/// Pixel value marking foreground
pub const FOREGROUND: u8 = 255;
/// Pixel value marking background
pub const BACKGROUND: u8 = 0;

/// Binary segmentation mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SegmentMask {
    /// Create an all-background mask
    ///
    /// # Errors
    ///
    /// Returns an error for zero-size dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![BACKGROUND; width as usize * height as usize],
        })
    }

    /// Create a mask from a raw buffer; any nonzero byte becomes foreground
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not equal `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let data = data
            .into_iter()
            .map(|v| if v != 0 { FOREGROUND } else { BACKGROUND })
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a mask with foreground at the listed coordinates
    ///
    /// Out-of-bounds coordinates are ignored; duplicates are harmless.
    pub fn from_indices(width: u32, height: u32, indices: &[Coord]) -> Result<Self> {
        let mut mask = Self::new(width, height)?;
        for &c in indices {
            if mask.region().contains(c) {
                mask.set_unchecked(c.x as u32, c.y as u32, FOREGROUND);
            }
        }
        Ok(mask)
    }

    /// Get the mask width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the mask height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the mask dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the region covering the whole mask
    #[inline]
    pub fn region(&self) -> Region {
        Region::of_size(self.width, self.height)
    }

    /// Get the value at (x, y)
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_unchecked(x, y))
    }

    /// Get the value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of bounds.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Check whether (x, y) is foreground; out-of-bounds reads as background
    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.get(x, y) == Some(FOREGROUND)
    }

    /// Set the value at (x, y); any nonzero value becomes foreground
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        self.set_unchecked(x, y, value);
        Ok(())
    }

    /// Set the value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of bounds.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: u8) {
        self.data[y as usize * self.width as usize + x as usize] =
            if value != 0 { FOREGROUND } else { BACKGROUND };
    }

    /// Get raw access to the mask data
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Collect every foreground coordinate in row-major order
    pub fn to_indices(&self) -> Vec<Coord> {
        let mut indices = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get_unchecked(x, y) != BACKGROUND {
                    indices.push(Coord::new(x as i32, y as i32));
                }
            }
        }
        indices
    }

    /// Count the foreground pixels
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v != BACKGROUND).count()
    }

    /// Elementwise exclusive-or with another mask
    ///
    /// # Errors
    ///
    /// Returns an error on dimension mismatch.
    pub fn xor(&self, other: &SegmentMask) -> Result<SegmentMask> {
        self.check_same_size(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| if (a != 0) != (b != 0) { FOREGROUND } else { BACKGROUND })
            .collect();
        Ok(SegmentMask {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Invert the mask (foreground becomes background and vice versa)
    pub fn invert(&self) -> SegmentMask {
        let data = self
            .data
            .iter()
            .map(|&v| if v != 0 { BACKGROUND } else { FOREGROUND })
            .collect();
        SegmentMask {
            width: self.width,
            height: self.height,
            data,
        }
    }

    fn check_same_size(&self, other: &SegmentMask) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}
