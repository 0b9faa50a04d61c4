//! Box blur with wraparound edges.
//!
//! Each output pixel is the plain average of the `(2n + 1)^2` source pixels
//! centred on it. Window coordinates that fall off an edge wrap to the
//! opposite edge, so a tiling texture stays seamless after blurring.
//!
//! # Example
//!
//! ```rust
//! use bgra_core::PixelBuffer;
//! use bgra_ops::blur::blurred;
//!
//! let src = PixelBuffer::filled(8, 8, [50, 60, 70, 255], false);
//! let soft = blurred(src.view(), 2);
//! assert_eq!(soft.pixel(0, 0), [50, 60, 70, 255]);
//! ```

use bgra_core::{PixelBuffer, PixelBufferRef};
use tracing::trace;

/// Number of pixels in the window for `blur_amount`. Exact for any `u32`.
fn window_area(blur_amount: u32) -> u128 {
    let side = 2 * blur_amount as u128 + 1;
    side * side
}

/// Blurs `source` with a `(2 * blur_amount + 1)` square box.
///
/// A `blur_amount` of 0 returns a copy. The result keeps the source's
/// alpha flag.
pub fn blurred(source: PixelBufferRef<'_>, blur_amount: u32) -> PixelBuffer {
    trace!(width = source.width(), height = source.height(), blur_amount, "blur::blurred");
    if blur_amount == 0 || source.is_empty() {
        return source.to_buffer();
    }

    let (w, h) = source.dimensions();
    let n = blur_amount as i64;
    let count = window_area(blur_amount);
    let mut out = PixelBuffer::new(w, h, source.has_alpha());

    for y in 0..h {
        for x in 0..w {
            let mut sum = [0u128; 4];
            for dy in -n..=n {
                let sy = (y as i64 + dy).rem_euclid(h as i64) as u32;
                let row = source.row(sy);
                for dx in -n..=n {
                    let sx = (x as i64 + dx).rem_euclid(w as i64) as usize * 4;
                    for c in 0..4 {
                        sum[c] += row[sx + c] as u128;
                    }
                }
            }
            out.set_pixel(x, y, sum.map(|s| (s / count) as u8));
        }
    }
    out
}
