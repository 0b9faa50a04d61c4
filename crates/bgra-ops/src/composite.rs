//! Alpha blending and masking of BGRA bitmaps.
//!
//! Both helpers work byte-wise on premultiplied data and require their two
//! inputs to have the same dimensions.
//!
//! - [`blend`] - Cross-fade between two images
//! - [`masked`] - Cut an image by the alpha of a mask
//!
//! # Example
//!
//! ```rust
//! use bgra_core::PixelBuffer;
//! use bgra_ops::composite::blend;
//!
//! let black = PixelBuffer::filled(2, 2, [0, 0, 0, 255], false);
//! let white = PixelBuffer::filled(2, 2, [255, 255, 255, 255], false);
//! let grey = blend(black.view(), white.view(), 0.5).unwrap();
//! assert_eq!(grey.pixel(0, 0), [127, 127, 127, 255]);
//! ```

use bgra_core::{Bgra, PixelBuffer, PixelBufferRef};
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

fn check_same_size(first: &PixelBufferRef<'_>, second: &PixelBufferRef<'_>) -> OpsResult<()> {
    if first.dimensions() != second.dimensions() {
        return Err(OpsError::SizeMismatch(format!(
            "{}x{} vs {}x{}",
            first.width(),
            first.height(),
            second.width(),
            second.height()
        )));
    }
    Ok(())
}

/// Blends one pixel: `first * (1 - alpha) + second * alpha`, truncated.
#[inline]
pub fn blend_pixel(first: Bgra, second: Bgra, alpha: f64) -> Bgra {
    let inv = 1.0 - alpha;
    // `as u8` saturates
    let mix = |a: u8, b: u8| -> u8 { (a as f64 * inv + b as f64 * alpha) as u8 };
    [
        mix(first[0], second[0]),
        mix(first[1], second[1]),
        mix(first[2], second[2]),
        mix(first[3], second[3]),
    ]
}

/// Cross-fades `first` into `second`.
///
/// `alpha` is the weight of `second`. At `alpha <= 0` the result is a copy
/// of `first`, at `alpha >= 1` a copy of `second`. The result carries alpha
/// if either input does.
///
/// # Errors
///
/// Returns [`OpsError::SizeMismatch`] if the inputs differ in size.
pub fn blend(
    first: PixelBufferRef<'_>,
    second: PixelBufferRef<'_>,
    alpha: f64,
) -> OpsResult<PixelBuffer> {
    trace!(width = first.width(), height = first.height(), alpha, "composite::blend");
    check_same_size(&first, &second)?;

    if alpha <= 0.0 {
        debug!(alpha, "blend weight saturated, copying first");
        return Ok(first.to_buffer());
    }
    if alpha >= 1.0 {
        debug!(alpha, "blend weight saturated, copying second");
        return Ok(second.to_buffer());
    }

    let (w, h) = first.dimensions();
    let mut out = PixelBuffer::new(w, h, first.has_alpha() || second.has_alpha());
    for y in 0..h {
        for x in 0..w {
            out.set_pixel(x, y, blend_pixel(first.pixel(x, y), second.pixel(x, y), alpha));
        }
    }
    Ok(out)
}

/// Multiplies every channel of `rgb`, alpha included, by the alpha of the
/// matching `alpha_mask` pixel.
///
/// Uses `(c * (mask + 1)) >> 8`, so a mask alpha of 255 keeps the pixel
/// and 0 clears it. The result always carries alpha.
///
/// # Errors
///
/// Returns [`OpsError::SizeMismatch`] if the inputs differ in size.
///
/// # Example
///
/// ```rust
/// use bgra_core::PixelBuffer;
/// use bgra_ops::composite::masked;
///
/// let photo = PixelBuffer::filled(1, 1, [200, 100, 50, 255], false);
/// let mask = PixelBuffer::filled(1, 1, [0, 0, 0, 127], true);
/// let cut = masked(photo.view(), mask.view()).unwrap();
/// assert_eq!(cut.pixel(0, 0), [100, 50, 25, 127]);
/// ```
pub fn masked(rgb: PixelBufferRef<'_>, alpha_mask: PixelBufferRef<'_>) -> OpsResult<PixelBuffer> {
    trace!(width = rgb.width(), height = rgb.height(), "composite::masked");
    check_same_size(&rgb, &alpha_mask)?;

    let (w, h) = rgb.dimensions();
    let mut out = PixelBuffer::new(w, h, true);
    for y in 0..h {
        let src = rgb.row(y);
        let mask = alpha_mask.row(y);
        let dst = out.row_mut(y);
        for ((d, s), m) in dst
            .chunks_exact_mut(4)
            .zip(src.chunks_exact(4))
            .zip(mask.chunks_exact(4))
        {
            let scale = m[3] as u32 + 1;
            for c in 0..4 {
                d[c] = ((s[c] as u32 * scale) >> 8) as u8;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints_copy() {
        let a = PixelBuffer::filled(3, 2, [10, 20, 30, 255], false);
        let b = PixelBuffer::filled(3, 2, [200, 150, 100, 255], false);
        let lo = blend(a.view(), b.view(), -0.5).unwrap();
        let hi = blend(a.view(), b.view(), 1.0).unwrap();
        assert_eq!(lo.data(), a.data());
        assert_eq!(hi.data(), b.data());
    }

    #[test]
    fn test_blend_quarter() {
        let a = PixelBuffer::filled(1, 1, [100, 0, 200, 255], false);
        let b = PixelBuffer::filled(1, 1, [0, 100, 200, 255], false);
        let out = blend(a.view(), b.view(), 0.25).unwrap();
        assert_eq!(out.pixel(0, 0), [75, 25, 200, 255]);
    }

    #[test]
    fn test_blend_alpha_flag() {
        let a = PixelBuffer::filled(1, 1, [0, 0, 0, 255], false);
        let b = PixelBuffer::filled(1, 1, [0, 0, 0, 0], true);
        assert!(blend(a.view(), b.view(), 0.5).unwrap().has_alpha());
    }

    #[test]
    fn test_blend_size_mismatch() {
        let a = PixelBuffer::new(2, 2, false);
        let b = PixelBuffer::new(2, 3, false);
        let err = blend(a.view(), b.view(), 0.5).unwrap_err();
        assert!(matches!(err, OpsError::SizeMismatch(_)));
    }

    #[test]
    fn test_masked_full_and_empty() {
        let rgb = PixelBuffer::filled(2, 1, [40, 80, 120, 255], false);
        let mut mask = PixelBuffer::new(2, 1, true);
        mask.set_pixel(0, 0, [0, 0, 0, 255]);
        mask.set_pixel(1, 0, [9, 9, 9, 0]);
        let out = masked(rgb.view(), mask.view()).unwrap();
        assert!(out.has_alpha());
        assert_eq!(out.pixel(0, 0), [40, 80, 120, 255]);
        assert_eq!(out.pixel(1, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_masked_size_mismatch() {
        let rgb = PixelBuffer::new(4, 4, false);
        let mask = PixelBuffer::new(3, 4, true);
        assert!(masked(rgb.view(), mask.view()).is_err());
    }
}
