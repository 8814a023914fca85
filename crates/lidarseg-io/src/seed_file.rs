//! Seed set persistence
//!
//! Three interchange formats for scribble selections:
//!
//! - a 3-channel RGB PNG where pure green pixels are sources and pure red
//!   pixels are sinks, everything else is ignored
//! - a single-label grayscale PNG (nonzero = seed), for saving or loading
//!   one side at a time
//! - a text file with one `f x y` (foreground) or `b x y` (background)
//!   line per seed

use crate::mask_png::{read_mask_png, write_mask_png};
use crate::{IoError, IoResult};
use lidarseg_core::{Coord, Region, SeedSet, SegmentMask};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};
use tracing::debug;

const SOURCE_COLOR: &[u8] = &[0, 255, 0];
const SINK_COLOR: &[u8] = &[255, 0, 0];
const BLANK_COLOR: &[u8] = &[255, 255, 255];

/// Read a seed set from an RGB seed image
///
/// Exactly (0,255,0) marks a source, exactly (255,0,0) a sink; any other
/// color is ignored. 8-bit RGB and RGBA inputs are accepted.
pub fn read_seed_image<R: BufRead + Seek>(reader: R) -> IoResult<SeedSet> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {e}")))?;

    let info = reader.info();
    let (width, height) = (info.width, info.height);
    let samples = match (info.color_type, info.bit_depth) {
        (ColorType::Rgb, BitDepth::Eight) => 3usize,
        (ColorType::Rgba, BitDepth::Eight) => 4usize,
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "seed image must be 8-bit RGB(A), got {color_type:?} {bit_depth:?}"
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {e}")))?;

    let mut seeds = SeedSet::new();
    for y in 0..height as usize {
        let row_start = y * output_info.line_size;
        for x in 0..width as usize {
            let p = &buf[row_start + x * samples..row_start + x * samples + 3];
            let coord = Coord::new(x as i32, y as i32);
            if p == SOURCE_COLOR {
                seeds.sources.push(coord);
            } else if p == SINK_COLOR {
                seeds.sinks.push(coord);
            }
        }
    }
    debug!(
        sources = seeds.sources.len(),
        sinks = seeds.sinks.len(),
        "seed image loaded"
    );
    Ok(seeds)
}

/// Write a seed set as an RGB seed image
///
/// Sources paint green over a white background, sinks paint red; a pixel
/// scribbled as both comes out red, matching the cut's last-wins rule.
/// Out-of-region seeds are skipped.
pub fn write_seed_image<W: Write>(seeds: &SeedSet, region: &Region, writer: W) -> IoResult<()> {
    let (width, height) = (region.w, region.h);
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for _ in 0..width as usize * height as usize {
        data.extend_from_slice(BLANK_COLOR);
    }
    let mut paint = |coords: &[Coord], color: &[u8]| {
        for &c in coords {
            if region.contains(c) {
                let i = (c.y as usize * width as usize + c.x as usize) * 3;
                data[i..i + 3].copy_from_slice(color);
            }
        }
    };
    paint(&seeds.sources, SOURCE_COLOR);
    paint(&seeds.sinks, SINK_COLOR);

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {e}")))?;
    png_writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {e}")))?;
    Ok(())
}

/// Read one label's seeds from a grayscale PNG (nonzero = seed)
pub fn read_label_image<R: BufRead + Seek>(reader: R) -> IoResult<Vec<Coord>> {
    Ok(read_mask_png(reader)?.to_indices())
}

/// Write one label's seeds as a grayscale PNG
pub fn write_label_image<W: Write>(
    coords: &[Coord],
    region: &Region,
    writer: W,
) -> IoResult<()> {
    let mask = SegmentMask::from_indices(region.w, region.h, coords)?;
    write_mask_png(&mask, writer)
}

/// Read seeds from a text selection file
///
/// One `f x y` or `b x y` line per seed; blank lines are skipped; any
/// other tag is an error.
pub fn read_seeds_text<R: BufRead>(reader: R) -> IoResult<SeedSet> {
    let mut seeds = SeedSet::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let tag = parts.next().unwrap_or_default();
        let x = parts.next().and_then(|v| v.parse::<i32>().ok());
        let y = parts.next().and_then(|v| v.parse::<i32>().ok());
        let (Some(x), Some(y)) = (x, y) else {
            return Err(IoError::InvalidData(format!(
                "line {}: expected '<tag> <x> <y>', got {trimmed:?}",
                line_no + 1
            )));
        };
        match tag {
            "f" => seeds.sources.push(Coord::new(x, y)),
            "b" => seeds.sinks.push(Coord::new(x, y)),
            other => {
                return Err(IoError::InvalidData(format!(
                    "line {}: tag must be 'f' or 'b', got {other:?}",
                    line_no + 1
                )));
            }
        }
    }
    Ok(seeds)
}

/// Write seeds as a text selection file, one line per seed
pub fn write_seeds_text<W: Write>(seeds: &SeedSet, mut writer: W) -> IoResult<()> {
    for c in &seeds.sources {
        writeln!(writer, "f {} {}", c.x, c.y)?;
    }
    for c in &seeds.sinks {
        writeln!(writer, "b {} {}", c.x, c.y)?;
    }
    Ok(())
}
