//! Image resize and resampling operations.
//!
//! High-quality scaling of BGRA bitmaps built from the fixed-point
//! filters in [`crate::resize_filter`] and the row-buffered engine in
//! [`crate::convolver`].
//!
//! # Subsets
//!
//! [`resize_subset`] computes only part of the destination. The pixels it
//! returns are exactly the pixels a full [`resize`] would produce inside
//! that rectangle, so a caller painting only a dirty region pays only for
//! that region.
//!
//! # Example
//!
//! ```rust
//! use bgra_core::PixelBuffer;
//! use bgra_ops::resize::{resize, ResizeMethod};
//!
//! let src = PixelBuffer::filled(64, 64, [40, 80, 120, 255], false);
//! let dst = resize(src.view(), ResizeMethod::Lanczos3, 20, 30);
//! assert_eq!(dst.dimensions(), (20, 30));
//! assert_eq!(dst.pixel(10, 10), [40, 80, 120, 255]);
//! ```

use bgra_core::{PixelBuffer, PixelBufferRef, Rect};
use tracing::{debug, trace};

use crate::convolver::convolve_2d;
use crate::resize_filter::ResizeFilter;

pub use crate::resize_filter::ResizeMethod;

/// Resizes `source` to `dest_width` x `dest_height`.
///
/// A source or destination with a zero dimension produces
/// [`PixelBuffer::empty`]. The result is tightly packed and keeps the
/// source's `has_alpha` flag.
pub fn resize(
    source: PixelBufferRef<'_>,
    method: ResizeMethod,
    dest_width: u32,
    dest_height: u32,
) -> PixelBuffer {
    resize_subset(
        source,
        method,
        dest_width,
        dest_height,
        Rect::from_size(dest_width, dest_height),
    )
}

/// Resizes `source` to `dest_width` x `dest_height` but computes only
/// `dest_subset`.
///
/// The returned buffer is `dest_subset.width` x `dest_subset.height`; its
/// pixel (0, 0) is destination pixel (`dest_subset.x`, `dest_subset.y`).
/// Degenerate sizes, including an empty subset, produce
/// [`PixelBuffer::empty`].
///
/// # Panics
///
/// Panics if `dest_subset` is not contained in the destination rectangle.
///
/// # Example
///
/// ```rust
/// use bgra_core::{PixelBuffer, Rect};
/// use bgra_ops::resize::{resize_subset, ResizeMethod};
///
/// let src = PixelBuffer::filled(32, 32, [0, 0, 255, 255], false);
/// let part = resize_subset(src.view(), ResizeMethod::Box, 16, 16, Rect::new(4, 4, 8, 2));
/// assert_eq!(part.dimensions(), (8, 2));
/// ```
pub fn resize_subset(
    source: PixelBufferRef<'_>,
    method: ResizeMethod,
    dest_width: u32,
    dest_height: u32,
    dest_subset: Rect,
) -> PixelBuffer {
    trace!(
        src_w = source.width(),
        src_h = source.height(),
        dest_width,
        dest_height,
        %dest_subset,
        %method,
        "resize"
    );

    if source.is_empty() || dest_width == 0 || dest_height == 0 {
        debug!(
            src_w = source.width(),
            src_h = source.height(),
            dest_width,
            dest_height,
            "degenerate resize, returning empty buffer"
        );
        return PixelBuffer::empty();
    }

    let dest = Rect::from_size(dest_width, dest_height);
    assert!(
        dest.contains_rect(&dest_subset),
        "dest subset {dest_subset} not inside {dest_width}x{dest_height}"
    );
    if dest_subset.is_empty() {
        return PixelBuffer::empty();
    }

    let x_filter = ResizeFilter::new(
        method,
        source.width() as usize,
        dest_width as usize,
        dest_subset.x as usize,
        dest_subset.right() as usize,
    );
    let y_filter = ResizeFilter::new(
        method,
        source.height() as usize,
        dest_height as usize,
        dest_subset.y as usize,
        dest_subset.bottom() as usize,
    );

    let mut result = PixelBuffer::new(dest_subset.width, dest_subset.height, source.has_alpha());
    let output_stride = result.stride();
    convolve_2d(
        source.data(),
        source.stride(),
        source.has_alpha(),
        x_filter.filter(),
        y_filter.filter(),
        output_stride,
        result.data_mut(),
    );
    result
}
