//! lidarseg-io - Boundary-format I/O for RGBD segmentation
//!
//! Everything that crosses the filesystem boundary lives here:
//!
//! - **Segment masks** - 8-bit grayscale PNG, 255 = foreground
//! - **Seed sets** - RGB seed images (green = source, red = sink),
//!   single-label grayscale PNGs, and `f x y` / `b x y` text files
//! - **RGBD rasters** - local uncompressed MetaImage (`.mha`) with
//!   `MET_FLOAT` samples and 4 or more channels
//! - **Composites** - RGBA renderings of the image clipped to a mask
//!
//! Path-based convenience wrappers sit next to the stream-based codecs.

pub mod composite;
pub mod error;
pub mod mask_png;
pub mod mha;
pub mod seed_file;

pub use composite::write_composite_png;
pub use error::{IoError, IoResult};
pub use mask_png::{read_mask_png, write_mask_png};
pub use mha::{read_mha, write_mha};
pub use seed_file::{
    read_label_image, read_seed_image, read_seeds_text, write_label_image, write_seed_image,
    write_seeds_text,
};

use lidarseg_core::{Region, RgbdImage, SeedSet, SegmentMask};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read an RGBD raster from a `.mha` file
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<RgbdImage> {
    read_mha(BufReader::new(File::open(path)?))
}

/// Write an RGBD raster to a `.mha` file
pub fn write_image<P: AsRef<Path>>(image: &RgbdImage, path: P) -> IoResult<()> {
    write_mha(image, BufWriter::new(File::create(path)?))
}

/// Read a segment mask from a PNG file
pub fn read_mask<P: AsRef<Path>>(path: P) -> IoResult<SegmentMask> {
    read_mask_png(BufReader::new(File::open(path)?))
}

/// Write a segment mask to a PNG file
pub fn write_mask<P: AsRef<Path>>(mask: &SegmentMask, path: P) -> IoResult<()> {
    write_mask_png(mask, BufWriter::new(File::create(path)?))
}

/// Read a seed set from an RGB seed image file
pub fn read_seeds<P: AsRef<Path>>(path: P) -> IoResult<SeedSet> {
    read_seed_image(BufReader::new(File::open(path)?))
}

/// Write a seed set to an RGB seed image file
pub fn write_seeds<P: AsRef<Path>>(seeds: &SeedSet, region: &Region, path: P) -> IoResult<()> {
    write_seed_image(seeds, region, BufWriter::new(File::create(path)?))
}
