//! Segment mask PNG support
//!
//! Masks persist as 8-bit single-channel grayscale PNGs with 255 marking
//! foreground. Reading binarizes: any nonzero sample becomes foreground.

use crate::{IoError, IoResult};
use lidarseg_core::SegmentMask;
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// Read a segment mask from a grayscale PNG
pub fn read_mask_png<R: BufRead + Seek>(reader: R) -> IoResult<SegmentMask> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {e}")))?;

    let info = reader.info();
    let (width, height) = (info.width, info.height);
    if info.color_type != ColorType::Grayscale || info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "mask PNG must be 8-bit grayscale, got {:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {e}")))?;

    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row_start = y * output_info.line_size;
        data.extend_from_slice(&buf[row_start..row_start + width as usize]);
    }
    Ok(SegmentMask::from_data(width, height, data)?)
}

/// Write a segment mask as an 8-bit grayscale PNG
pub fn write_mask_png<W: Write>(mask: &SegmentMask, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, mask.width(), mask.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);
    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {e}")))?;
    png_writer
        .write_image_data(mask.data())
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidarseg_core::Coord;
    use std::io::Cursor;

    #[test]
    fn test_mask_png_roundtrip() {
        let mask = SegmentMask::from_indices(
            5,
            4,
            &[Coord::new(0, 0), Coord::new(2, 3), Coord::new(4, 1)],
        )
        .unwrap();

        let mut bytes = Vec::new();
        write_mask_png(&mask, &mut bytes).unwrap();
        let back = read_mask_png(Cursor::new(bytes)).unwrap();
        assert_eq!(back, mask);
    }
}
