//! MetaImage (.mha) RGBD raster support
//!
//! Reads and writes the local, uncompressed MetaImage flavor: a textual
//! `Key = Value` header terminated by `ElementDataFile = LOCAL`, followed
//! immediately by raw `MET_FLOAT` samples, channel-interleaved in
//! row-major order. This is the interchange format for 4+ channel LiDAR
//! rasters; external data files and compressed payloads are not
//! supported.

use crate::{IoError, IoResult};
use lidarseg_core::RgbdImage;
use std::io::{BufRead, Read, Write};
use tracing::debug;

/// Read an RGBD image from a MetaImage stream
pub fn read_mha<R: BufRead>(mut reader: R) -> IoResult<RgbdImage> {
    let mut ndims = None;
    let mut dim_size: Option<(u32, u32)> = None;
    let mut num_channels = 1u32;
    let mut element_type = None;
    let mut big_endian = false;

    loop {
        let mut line = Vec::new();
        let read = reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            return Err(IoError::InvalidData(
                "missing ElementDataFile header line".into(),
            ));
        }
        let text = String::from_utf8_lossy(&line);
        let Some((key, value)) = text.split_once('=') else {
            return Err(IoError::InvalidData(format!(
                "malformed header line {:?}",
                text.trim()
            )));
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "ObjectType" => {
                if value != "Image" {
                    return Err(IoError::UnsupportedFormat(format!(
                        "ObjectType must be Image, got {value}"
                    )));
                }
            }
            "NDims" => ndims = value.parse::<u32>().ok(),
            "DimSize" => {
                let mut parts = value.split_whitespace();
                let w = parts.next().and_then(|v| v.parse().ok());
                let h = parts.next().and_then(|v| v.parse().ok());
                if let (Some(w), Some(h)) = (w, h) {
                    dim_size = Some((w, h));
                }
            }
            "ElementNumberOfChannels" => {
                num_channels = value.parse().map_err(|_| {
                    IoError::InvalidData(format!("bad ElementNumberOfChannels {value:?}"))
                })?;
            }
            "ElementType" => element_type = Some(value.to_string()),
            "BinaryDataByteOrderMSB" | "ElementByteOrderMSB" => {
                big_endian = value.eq_ignore_ascii_case("true");
            }
            "CompressedData" => {
                if value.eq_ignore_ascii_case("true") {
                    return Err(IoError::UnsupportedFormat(
                        "compressed MetaImage data is not supported".into(),
                    ));
                }
            }
            "ElementDataFile" => {
                if value != "LOCAL" {
                    return Err(IoError::UnsupportedFormat(format!(
                        "only ElementDataFile = LOCAL is supported, got {value}"
                    )));
                }
                break;
            }
            // TransformMatrix, Offset, ElementSpacing, BinaryData, ...
            _ => {}
        }
    }

    if ndims != Some(2) {
        return Err(IoError::UnsupportedFormat(format!(
            "NDims must be 2, got {ndims:?}"
        )));
    }
    match element_type.as_deref() {
        Some("MET_FLOAT") => {}
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "ElementType must be MET_FLOAT, got {other:?}"
            )));
        }
    }
    let (width, height) = dim_size
        .ok_or_else(|| IoError::InvalidData("missing DimSize".into()))?;

    let expected = width as usize * height as usize * num_channels as usize;
    let mut bytes = Vec::with_capacity(expected * 4);
    reader.read_to_end(&mut bytes)?;
    if bytes.len() != expected * 4 {
        return Err(IoError::InvalidData(format!(
            "payload is {} bytes, expected {} ({}x{}x{} floats)",
            bytes.len(),
            expected * 4,
            width,
            height,
            num_channels
        )));
    }

    let data: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|chunk| {
            let raw = [chunk[0], chunk[1], chunk[2], chunk[3]];
            if big_endian {
                f32::from_be_bytes(raw)
            } else {
                f32::from_le_bytes(raw)
            }
        })
        .collect();

    debug!(width, height, num_channels, "MetaImage raster loaded");
    Ok(RgbdImage::from_data(width, height, num_channels, data)?)
}

/// Write an RGBD image as a local, uncompressed MetaImage
pub fn write_mha<W: Write>(image: &RgbdImage, mut writer: W) -> IoResult<()> {
    writeln!(writer, "ObjectType = Image")?;
    writeln!(writer, "NDims = 2")?;
    writeln!(writer, "BinaryData = True")?;
    writeln!(writer, "BinaryDataByteOrderMSB = False")?;
    writeln!(writer, "CompressedData = False")?;
    writeln!(writer, "DimSize = {} {}", image.width(), image.height())?;
    writeln!(writer, "ElementNumberOfChannels = {}", image.num_channels())?;
    writeln!(writer, "ElementType = MET_FLOAT")?;
    writeln!(writer, "ElementDataFile = LOCAL")?;
    for &v in image.data() {
        writer.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_image() -> RgbdImage {
        let mut img = RgbdImage::new(3, 2, 4).unwrap();
        img.set_pixel(0, 0, &[0.25, 0.5, 0.75, 12.5]).unwrap();
        img.set_pixel(2, 1, &[1.0, 0.0, -3.5, 100.0]).unwrap();
        img
    }

    #[test]
    fn test_mha_roundtrip() {
        let img = sample_image();
        let mut bytes = Vec::new();
        write_mha(&img, &mut bytes).unwrap();
        let back = read_mha(Cursor::new(bytes)).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_rejects_too_few_channels() {
        let header = "ObjectType = Image\nNDims = 2\nDimSize = 2 2\n\
                      ElementNumberOfChannels = 3\nElementType = MET_FLOAT\n\
                      ElementDataFile = LOCAL\n";
        let mut bytes = header.as_bytes().to_vec();
        bytes.extend(std::iter::repeat_n(0u8, 2 * 2 * 3 * 4));
        let err = read_mha(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, IoError::Core(_)));
    }

    #[test]
    fn test_rejects_wrong_element_type() {
        let header = "ObjectType = Image\nNDims = 2\nDimSize = 2 2\n\
                      ElementType = MET_UCHAR\nElementDataFile = LOCAL\n";
        let err = read_mha(Cursor::new(header.as_bytes().to_vec())).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let img = sample_image();
        let mut bytes = Vec::new();
        write_mha(&img, &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 4);
        let err = read_mha(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, IoError::InvalidData(_)));
    }

    #[test]
    fn test_big_endian_payload() {
        let mut bytes = b"ObjectType = Image\nNDims = 2\nDimSize = 1 1\n\
                          ElementNumberOfChannels = 4\nElementType = MET_FLOAT\n\
                          BinaryDataByteOrderMSB = True\nElementDataFile = LOCAL\n"
            .to_vec();
        for v in [0.5f32, 1.0, 0.0, 2.0] {
            bytes.extend(v.to_be_bytes());
        }
        let img = read_mha(Cursor::new(bytes)).unwrap();
        assert_eq!(img.pixel(0, 0).unwrap(), &[0.5, 1.0, 0.0, 2.0]);
    }
}
