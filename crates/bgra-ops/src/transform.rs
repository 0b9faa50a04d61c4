//! Geometric operations on BGRA bitmaps.
//!
//! # Operations
//!
//! - [`tiled`] - Repeat an image over a larger or offset area
//! - [`downsample_by_two`] - Halve both dimensions with a 2x2 box
//! - [`downsample_by_two_until_size`] - Halve repeatedly down to a floor
//! - [`crop`] - Extract a region
//!
//! # Example
//!
//! ```rust
//! use bgra_core::{PixelBuffer, Rect};
//! use bgra_ops::transform::{crop, downsample_by_two};
//!
//! let src = PixelBuffer::filled(9, 5, [1, 2, 3, 255], false);
//! let half = downsample_by_two(src.view());
//! assert_eq!(half.dimensions(), (5, 3));
//!
//! let corner = crop(src.view(), Rect::new(0, 0, 4, 4)).unwrap();
//! assert_eq!(corner.dimensions(), (4, 4));
//! ```

use bgra_core::{PixelBuffer, PixelBufferRef, Rect};
use tracing::{debug, trace};

use crate::OpsResult;

/// Fills a `dst_width` x `dst_height` buffer by repeating `source`.
///
/// Output pixel `(x, y)` is source pixel
/// `((src_x + x) mod width, (src_y + y) mod height)`. Origins may be
/// negative or lie beyond the source.
///
/// ```rust
/// use bgra_core::PixelBuffer;
/// use bgra_ops::transform::tiled;
///
/// let mut src = PixelBuffer::new(2, 1, false);
/// src.set_pixel(1, 0, [9, 9, 9, 255]);
/// let strip = tiled(src.view(), -1, 0, 3, 1);
/// assert_eq!(strip.pixel(0, 0), [9, 9, 9, 255]);
/// assert_eq!(strip.pixel(2, 0), [9, 9, 9, 255]);
/// ```
pub fn tiled(
    source: PixelBufferRef<'_>,
    src_x: i32,
    src_y: i32,
    dst_width: u32,
    dst_height: u32,
) -> PixelBuffer {
    trace!(src_x, src_y, dst_width, dst_height, "transform::tiled");
    if source.is_empty() || dst_width == 0 || dst_height == 0 {
        debug!(
            src_w = source.width(),
            src_h = source.height(),
            dst_width,
            dst_height,
            "degenerate tile, returning empty buffer"
        );
        return PixelBuffer::empty();
    }

    let (w, h) = (source.width() as i64, source.height() as i64);
    let mut out = PixelBuffer::new(dst_width, dst_height, source.has_alpha());
    for y in 0..dst_height {
        let sy = (src_y as i64 + y as i64).rem_euclid(h) as u32;
        let src_row = source.row(sy);
        let dst_row = out.row_mut(y);
        for (x, dst) in dst_row.chunks_exact_mut(4).enumerate() {
            let sx = (src_x as i64 + x as i64).rem_euclid(w) as usize * 4;
            dst.copy_from_slice(&src_row[sx..sx + 4]);
        }
    }
    out
}

/// Halves `source` in both dimensions.
///
/// The result is `((width + 1) / 2, (height + 1) / 2)`. Each output pixel
/// is the rounded average of a 2x2 block; on an odd right or bottom edge
/// the block reuses the last column or row. Sources one pixel wide or tall
/// are returned as a copy.
pub fn downsample_by_two(source: PixelBufferRef<'_>) -> PixelBuffer {
    let (w, h) = source.dimensions();
    trace!(width = w, height = h, "transform::downsample_by_two");
    if w <= 1 || h <= 1 {
        return source.to_buffer();
    }

    let (dw, dh) = (w.div_ceil(2), h.div_ceil(2));
    let mut out = PixelBuffer::new(dw, dh, source.has_alpha());
    for dy in 0..dh {
        let y0 = dy * 2;
        let row0 = source.row(y0);
        let row1 = source.row((y0 + 1).min(h - 1));
        let dst_row = out.row_mut(dy);
        for (dx, dst) in dst_row.chunks_exact_mut(4).enumerate() {
            let x0 = dx * 2 * 4;
            let x1 = ((dx * 2 + 1).min(w as usize - 1)) * 4;
            for c in 0..4 {
                let sum = row0[x0 + c] as u32
                    + row0[x1 + c] as u32
                    + row1[x0 + c] as u32
                    + row1[x1 + c] as u32;
                dst[c] = ((sum + 2) >> 2) as u8;
            }
        }
    }
    out
}

/// Repeatedly halves `source` while the result would still be at least
/// `min_width` x `min_height`.
///
/// Stops as soon as `width < 2 * min_width`, `height < 2 * min_height`, or
/// either dimension reaches 1. Returns a copy if no halving applies.
///
/// ```rust
/// use bgra_core::PixelBuffer;
/// use bgra_ops::transform::downsample_by_two_until_size;
///
/// let src = PixelBuffer::new(100, 40, false);
/// let small = downsample_by_two_until_size(src.view(), 10, 10);
/// assert_eq!(small.dimensions(), (25, 10));
/// ```
pub fn downsample_by_two_until_size(
    source: PixelBufferRef<'_>,
    min_width: u32,
    min_height: u32,
) -> PixelBuffer {
    trace!(
        width = source.width(),
        height = source.height(),
        min_width,
        min_height,
        "transform::downsample_by_two_until_size"
    );
    let mut current = source.to_buffer();
    let mut passes = 0u32;
    loop {
        let (w, h) = current.dimensions();
        let halve = w as u64 >= 2 * min_width as u64
            && h as u64 >= 2 * min_height as u64
            && w > 1
            && h > 1;
        if !halve {
            break;
        }
        current = downsample_by_two(current.view());
        passes += 1;
    }
    debug!(passes, width = current.width(), height = current.height(), "downsampled");
    current
}

/// Copies `region` of `source` into a new packed buffer.
///
/// # Errors
///
/// Returns [`OpsError::Core`](crate::OpsError::Core) wrapping
/// [`bgra_core::Error::InvalidRegion`] if `region` is not inside `source`.
pub fn crop(source: PixelBufferRef<'_>, region: Rect) -> OpsResult<PixelBuffer> {
    trace!(%region, width = source.width(), height = source.height(), "transform::crop");
    Ok(source.subview(region)?.to_buffer())
}
