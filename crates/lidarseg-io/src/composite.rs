//! Masked composite export
//!
//! Renders the segmentation result for inspection: the image's RGB
//! channels, rescaled to 8 bits, with full opacity inside the mask and
//! transparency outside.

use crate::{IoError, IoResult};
use lidarseg_core::{CHANNEL_B, CHANNEL_G, CHANNEL_R, RgbdImage, SegmentMask};
use png::{BitDepth, ColorType, Encoder};
use std::io::Write;

/// Write the masked image as an RGBA PNG
///
/// Each color channel is min–max rescaled to [0, 255] independently;
/// background pixels get alpha 0.
pub fn write_composite_png<W: Write>(
    image: &RgbdImage,
    mask: &SegmentMask,
    writer: W,
) -> IoResult<()> {
    if image.dimensions() != mask.dimensions() {
        return Err(IoError::InvalidData(format!(
            "image is {}x{} but mask is {}x{}",
            image.width(),
            image.height(),
            mask.width(),
            mask.height()
        )));
    }

    let (width, height) = image.dimensions();
    let channels = [CHANNEL_R, CHANNEL_G, CHANNEL_B];
    let ranges: Vec<(f32, f32)> = channels
        .iter()
        .map(|&c| image.channel_min_max(c).unwrap_or((0.0, 0.0)))
        .collect();

    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let pixel = image.pixel_unchecked(x, y);
            for (&c, &(min, max)) in channels.iter().zip(&ranges) {
                let range = max - min;
                let scaled = if range > 0.0 {
                    ((pixel[c] - min) / range * 255.0).round()
                } else {
                    0.0
                };
                data.push(scaled.clamp(0.0, 255.0) as u8);
            }
            data.push(mask.get_unchecked(x, y));
        }
    }

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {e}")))?;
    png_writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {e}")))?;
    Ok(())
}
