//! Binary morphological operations on segment masks
//!
//! Implements dilation, erosion, and the derived boundary-ring operation
//! used by the two-pass segmentation to grow background seeds just outside
//! the current foreground.

use crate::{MorphResult, Sel};
use lidarseg_core::{Coord, FOREGROUND, Region, SegmentMask};

/// Dilate a mask
///
/// For each pixel, if ANY hit position in the SEL corresponds to a
/// foreground pixel, the output is foreground. Pixels outside the mask are
/// treated as background.
pub fn dilate(mask: &SegmentMask, sel: &Sel) -> MorphResult<SegmentMask> {
    let w = mask.width();
    let h = mask.height();

    let mut out = SegmentMask::new(w, h)?;
    let hit_offsets: Vec<_> = sel.hit_offsets().collect();

    for y in 0..h {
        for x in 0..w {
            let dilated = hit_offsets.iter().any(|&(dx, dy)| {
                let sx = x as i32 + dx;
                let sy = y as i32 + dy;
                if sx >= 0 && sx < w as i32 && sy >= 0 && sy < h as i32 {
                    mask.get_unchecked(sx as u32, sy as u32) != 0
                } else {
                    false
                }
            });

            if dilated {
                out.set_unchecked(x, y, FOREGROUND);
            }
        }
    }

    Ok(out)
}

/// Erode a mask
///
/// For each pixel, if ALL hit positions in the SEL correspond to foreground
/// pixels, the output is foreground. Pixels outside the mask are treated as
/// background, so foreground touching the border erodes inward.
pub fn erode(mask: &SegmentMask, sel: &Sel) -> MorphResult<SegmentMask> {
    let w = mask.width();
    let h = mask.height();

    let mut out = SegmentMask::new(w, h)?;
    let hit_offsets: Vec<_> = sel.hit_offsets().collect();

    for y in 0..h {
        for x in 0..w {
            let eroded = hit_offsets.iter().all(|&(dx, dy)| {
                let sx = x as i32 + dx;
                let sy = y as i32 + dy;
                if sx >= 0 && sx < w as i32 && sy >= 0 && sy < h as i32 {
                    mask.get_unchecked(sx as u32, sy as u32) != 0
                } else {
                    false
                }
            });

            if eroded {
                out.set_unchecked(x, y, FOREGROUND);
            }
        }
    }

    Ok(out)
}

/// The ring of pixels just outside the mask's foreground
///
/// Computed as `dilate(mask, disk(radius)) XOR mask`. With radius 1 this is
/// the 1-ring the refinement pass walks when deciding which boundary pixels
/// become background seeds.
pub fn boundary_ring(mask: &SegmentMask, radius: u32) -> MorphResult<SegmentMask> {
    let sel = Sel::create_disk(radius)?;
    let dilated = dilate(mask, &sel)?;
    Ok(dilated.xor(mask)?)
}

/// Thicken a list of pixel coordinates by a disk
///
/// Rasterizes the coordinates into a mask over `region`, dilates, and
/// returns the resulting coordinate list. Scribble input arrives as thin
/// one-pixel paths; seeding works much better when each stroke is a few
/// pixels wide.
pub fn dilate_indices(
    indices: &[Coord],
    region: &Region,
    radius: u32,
) -> MorphResult<Vec<Coord>> {
    let mask = SegmentMask::from_indices(region.w, region.h, indices)?;
    let sel = Sel::create_disk(radius)?;
    let dilated = dilate(&mask, &sel)?;
    Ok(dilated.to_indices())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidarseg_core::Coord;

    fn square_mask(size: u32, x0: u32, y0: u32, side: u32) -> SegmentMask {
        let mut mask = SegmentMask::new(size, size).unwrap();
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                mask.set_unchecked(x, y, FOREGROUND);
            }
        }
        mask
    }

    #[test]
    fn test_dilate_grows() {
        let mask = square_mask(7, 2, 2, 3);
        let sel = Sel::create_square(1).unwrap();
        let dilated = dilate(&mask, &sel).unwrap();
        assert_eq!(dilated.count_foreground(), 25);
        assert!(dilated.is_foreground(1, 1));
        assert!(!dilated.is_foreground(0, 0));
    }

    #[test]
    fn test_erode_shrinks() {
        let mask = square_mask(7, 2, 2, 3);
        let sel = Sel::create_square(1).unwrap();
        let eroded = erode(&mask, &sel).unwrap();
        assert_eq!(eroded.count_foreground(), 1);
        assert!(eroded.is_foreground(3, 3));
    }

    #[test]
    fn test_erode_dilate_containment() {
        // erode(dilate(m, r), r) ⊇ m when nothing touches the border
        let mask = square_mask(11, 4, 4, 3);
        for r in 1..=2 {
            let sel = Sel::create_disk(r).unwrap();
            let closed = erode(&dilate(&mask, &sel).unwrap(), &sel).unwrap();
            for c in mask.to_indices() {
                assert!(
                    closed.is_foreground(c.x as u32, c.y as u32),
                    "pixel ({}, {}) lost under closing with r={}",
                    c.x,
                    c.y,
                    r
                );
            }
        }
    }

    #[test]
    fn test_boundary_ring_of_single_pixel() {
        let mut mask = SegmentMask::new(5, 5).unwrap();
        mask.set_unchecked(2, 2, FOREGROUND);
        let ring = boundary_ring(&mask, 1).unwrap();
        // disk(1) dilation adds the 4-neighborhood; XOR removes the center
        assert_eq!(ring.count_foreground(), 4);
        assert!(!ring.is_foreground(2, 2));
        assert!(ring.is_foreground(1, 2));
        assert!(ring.is_foreground(2, 1));
    }

    #[test]
    fn test_erode_removes_spur() {
        // a 7x7 square with a one-pixel-wide spur; disk(3) erosion must
        // remove the spur entirely and re-dilation must not bring it back
        // wider than the original square
        let mut mask = square_mask(15, 4, 4, 7);
        for x in 11..15 {
            mask.set_unchecked(x, 7, FOREGROUND);
        }
        let sel = Sel::create_disk(3).unwrap();
        let eroded = erode(&mask, &sel).unwrap();
        assert!(eroded.is_foreground(7, 7));
        for x in 11..15 {
            assert!(!eroded.is_foreground(x, 7), "spur pixel ({x}, 7) survived");
        }
        let redilated = dilate(&eroded, &sel).unwrap();
        for c in redilated.to_indices() {
            assert!(
                mask.is_foreground(c.x as u32, c.y as u32),
                "re-dilation escaped the original mask at ({}, {})",
                c.x,
                c.y
            );
        }
    }

    #[test]
    fn test_dilate_indices_thickens_path() {
        let region = Region::of_size(10, 10);
        let path = vec![Coord::new(4, 4), Coord::new(5, 4)];
        let thick = dilate_indices(&path, &region, 1).unwrap();
        assert!(thick.len() > path.len());
        assert!(thick.contains(&Coord::new(4, 3)));
        assert!(thick.contains(&Coord::new(6, 4)));
    }
}
