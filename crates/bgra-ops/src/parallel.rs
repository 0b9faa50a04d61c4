//! Multi-threaded resize using Rayon.
//!
//! The destination is cut into bands of [`BAND_ROWS`] rows. Each band is an
//! independent [`crate::resize::resize_subset`] call, so the stitched
//! result is byte-identical to the single-threaded one.
//!
//! # Example
//!
//! ```rust
//! use bgra_core::PixelBuffer;
//! use bgra_ops::{parallel, ResizeMethod};
//!
//! let src = PixelBuffer::filled(512, 512, [1, 2, 3, 255], false);
//! let out = parallel::resize(src.view(), ResizeMethod::Lanczos3, 300, 200);
//! assert_eq!(out.dimensions(), (300, 200));
//! ```

use bgra_core::{PixelBuffer, PixelBufferRef, Rect};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::resize::{self, ResizeMethod};

/// Destination rows per work item.
pub const BAND_ROWS: u32 = 64;

/// Parallel version of [`crate::resize::resize`].
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

/// Parallel version of [`crate::resize::resize_subset`].
///
/// # Panics
///
/// Panics if `dest_subset` is not contained in the destination rectangle.
pub fn resize_subset(
    source: PixelBufferRef<'_>,
    method: ResizeMethod,
    dest_width: u32,
    dest_height: u32,
    dest_subset: Rect,
) -> PixelBuffer {
    trace!(dest_width, dest_height, %dest_subset, %method, "parallel::resize_subset");

    if source.is_empty() || dest_width == 0 || dest_height == 0 {
        return resize::resize_subset(source, method, dest_width, dest_height, dest_subset);
    }
    assert!(
        Rect::from_size(dest_width, dest_height).contains_rect(&dest_subset),
        "dest subset {dest_subset} not inside {dest_width}x{dest_height}"
    );
    let bands = dest_subset.row_bands(BAND_ROWS);
    if bands.len() <= 1 || dest_subset.is_empty() {
        return resize::resize_subset(source, method, dest_width, dest_height, dest_subset);
    }
    debug!(bands = bands.len(), "resizing in parallel bands");

    let parts: Vec<PixelBuffer> = bands
        .par_iter()
        .map(|band| resize::resize_subset(source, method, dest_width, dest_height, *band))
        .collect();

    let mut out = PixelBuffer::new(dest_subset.width, dest_subset.height, source.has_alpha());
    let mut y = 0;
    for part in &parts {
        for row in 0..part.height() {
            out.row_mut(y).copy_from_slice(part.row(row));
            y += 1;
        }
    }
    out
}
