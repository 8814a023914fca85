//! RgbdImage - multi-channel floating-point image
//!
//! The fundamental image type of the library: a W×H grid where each pixel
//! is a vector of K ≥ 4 `f32` channels. Channels 0..2 are R,G,B, channel 3
//! is depth, and channels 4.. carry optional auxiliary features. Pixels are
//! stored interleaved, so a pixel is addressable as a contiguous slice.

use crate::coord::{Coord, Region};
use crate::error::{Error, Result};

/// Index of the red channel
pub const CHANNEL_R: usize = 0;
/// Index of the green channel
pub const CHANNEL_G: usize = 1;
/// Index of the blue channel
pub const CHANNEL_B: usize = 2;
/// Index of the depth channel
pub const CHANNEL_DEPTH: usize = 3;

/// Minimum number of channels (RGB + depth)
pub const MIN_CHANNELS: u32 = 4;

/// Multi-channel floating-point image
///
/// Pixel data is interleaved: the K channel values of pixel (x, y) occupy
/// `data[(y*W + x)*K .. (y*W + x)*K + K]`. Rows are in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbdImage {
    width: u32,
    height: u32,
    num_channels: u32,
    data: Vec<f32>,
}

impl RgbdImage {
    /// Create a new image with all channels set to zero
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedImage`] for zero-size dimensions or
    /// fewer than 4 channels.
    pub fn new(width: u32, height: u32, num_channels: u32) -> Result<Self> {
        Self::check_geometry(width, height, num_channels)?;
        let len = width as usize * height as usize * num_channels as usize;
        Ok(Self {
            width,
            height,
            num_channels,
            data: vec![0.0; len],
        })
    }

    /// Create an image from an interleaved data buffer
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedImage`] if the geometry is invalid, or
    /// [`Error::DataSizeMismatch`] if the buffer length does not equal
    /// `width * height * num_channels`.
    pub fn from_data(width: u32, height: u32, num_channels: u32, data: Vec<f32>) -> Result<Self> {
        Self::check_geometry(width, height, num_channels)?;
        let expected = width as usize * height as usize * num_channels as usize;
        if data.len() != expected {
            return Err(Error::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            num_channels,
            data,
        })
    }

    fn check_geometry(width: u32, height: u32, num_channels: u32) -> Result<()> {
        if width == 0 || height == 0 || num_channels < MIN_CHANNELS {
            return Err(Error::UnsupportedImage {
                width,
                height,
                channels: num_channels,
            });
        }
        Ok(())
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the number of channels per pixel
    #[inline]
    pub fn num_channels(&self) -> u32 {
        self.num_channels
    }

    /// Get the number of pixels
    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the region covering the whole image
    #[inline]
    pub fn region(&self) -> Region {
        Region::of_size(self.width, self.height)
    }

    /// Check whether a coordinate lies inside the image
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.region().contains(c)
    }

    /// Row-major pixel index of (x, y)
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the channel vector of the pixel at (x, y)
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixel_unchecked(x, y))
    }

    /// Get the channel vector of the pixel at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is out of bounds.
    #[inline]
    pub fn pixel_unchecked(&self, x: u32, y: u32) -> &[f32] {
        let k = self.num_channels as usize;
        let start = self.index(x, y) * k;
        &self.data[start..start + k]
    }

    /// Set the channel vector of the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of bounds or `values`
    /// does not have one entry per channel.
    pub fn set_pixel(&mut self, x: u32, y: u32, values: &[f32]) -> Result<()> {
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
        if values.len() != self.num_channels as usize {
            return Err(Error::DataSizeMismatch {
                expected: self.num_channels as usize,
                actual: values.len(),
            });
        }
        let k = self.num_channels as usize;
        let start = self.index(x, y) * k;
        self.data[start..start + k].copy_from_slice(values);
        Ok(())
    }

    /// Get a single channel value at (x, y)
    pub fn channel_value(&self, x: u32, y: u32, channel: usize) -> Option<f32> {
        self.pixel(x, y).and_then(|p| p.get(channel).copied())
    }

    /// Get a single channel value without bounds checking
    #[inline]
    pub fn channel_value_unchecked(&self, x: u32, y: u32, channel: usize) -> f32 {
        self.pixel_unchecked(x, y)[channel]
    }

    /// Get raw access to the interleaved pixel data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the interleaved pixel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Extract one channel as a planar buffer in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if `channel` is out of range.
    pub fn extract_channel(&self, channel: usize) -> Result<Vec<f32>> {
        if channel >= self.num_channels as usize {
            return Err(Error::IndexOutOfBounds {
                index: channel,
                len: self.num_channels as usize,
            });
        }
        let k = self.num_channels as usize;
        Ok(self
            .data
            .iter()
            .skip(channel)
            .step_by(k)
            .copied()
            .collect())
    }

    /// Clamp all values of one channel that exceed `max` down to `max`
    ///
    /// Useful for bounding raw LiDAR depth returns before display or
    /// normalization.
    ///
    /// # Errors
    ///
    /// Returns an error if `channel` is out of range.
    pub fn clamp_channel_above(&mut self, channel: usize, max: f32) -> Result<()> {
        if channel >= self.num_channels as usize {
            return Err(Error::IndexOutOfBounds {
                index: channel,
                len: self.num_channels as usize,
            });
        }
        let k = self.num_channels as usize;
        for v in self.data.iter_mut().skip(channel).step_by(k) {
            if *v > max {
                *v = max;
            }
        }
        Ok(())
    }

    /// Compute the minimum and maximum value of one channel
    ///
    /// Returns `None` if `channel` is out of range.
    pub fn channel_min_max(&self, channel: usize) -> Option<(f32, f32)> {
        if channel >= self.num_channels as usize {
            return None;
        }
        let k = self.num_channels as usize;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in self.data.iter().skip(channel).step_by(k) {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        Some((min, max))
    }

    /// Rescale every channel independently to [0, 1] by its min–max
    ///
    /// A channel whose values are all equal becomes all zeros. The result
    /// is idempotent up to floating-point error: normalizing an already
    /// normalized image leaves it unchanged. Every numerical stage of the
    /// segmentation (dissimilarity, histograms, the smoothness scale)
    /// operates on the normalized image.
    pub fn normalized(&self) -> RgbdImage {
        let k = self.num_channels as usize;
        let mut out = self.clone();
        for c in 0..k {
            let (min, max) = self
                .channel_min_max(c)
                .unwrap_or((0.0, 0.0));
            let range = max - min;
            for v in out.data.iter_mut().skip(c).step_by(k) {
                *v = if range > 0.0 { (*v - min) / range } else { 0.0 };
            }
        }
        out
    }
}
