//! Hue, saturation and lightness shifts.
//!
//! An [`Hsl`] shift describes a colour adjustment applied to every pixel:
//!
//! - `h` in `[0, 1]` replaces the hue
//! - `s` in `[0, 0.5]` scales saturation toward grey, `(0.5, 1]` toward
//!   full saturation
//! - `l` in `[0, 0.5]` darkens toward black, `(0.5, 1]` lightens toward
//!   white
//!
//! A negative component leaves that property alone, and `s = l = 0.5` is
//! a no-op. Shifts are applied to unpremultiplied colour; the result is
//! premultiplied again.
//!
//! # Example
//!
//! ```rust
//! use bgra_ops::hsl::{shift_pixel, Hsl};
//!
//! let red = [0, 0, 255, 255];
//! let blue = shift_pixel(red, Hsl::new(2.0 / 3.0, -1.0, -1.0));
//! assert_eq!(blue, [255, 0, 0, 255]);
//! ```

use bgra_core::pixel::{self, Bgra};
use bgra_core::{PixelBuffer, PixelBufferRef};
use tracing::trace;

/// A colour in hue, saturation, lightness form, or a shift of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in `[0, 1]`.
    pub h: f64,
    /// Saturation in `[0, 1]`.
    pub s: f64,
    /// Lightness in `[0, 1]`.
    pub l: f64,
}

impl Hsl {
    /// Creates an `Hsl` value.
    #[inline]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// The shift that changes nothing.
    pub const IDENTITY: Hsl = Hsl::new(-1.0, 0.5, 0.5);
}

impl Default for Hsl {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts an unpremultiplied pixel to HSL. Alpha is ignored.
pub fn bgra_to_hsl(px: Bgra) -> Hsl {
    let r = px[pixel::R] as f64 / 255.0;
    let g = px[pixel::G] as f64 / 255.0;
    let b = px[pixel::B] as f64 / 255.0;
    let vmax = r.max(g).max(b);
    let vmin = r.min(g).min(b);
    let delta = vmax - vmin;
    let l = (vmax + vmin) / 2.0;

    if delta == 0.0 {
        return Hsl::new(0.0, 0.0, l);
    }

    let s = if l < 0.5 {
        delta / (vmax + vmin)
    } else {
        delta / (2.0 - vmax - vmin)
    };

    let dr = ((vmax - r) / 6.0 + delta / 2.0) / delta;
    let dg = ((vmax - g) / 6.0 + delta / 2.0) / delta;
    let db = ((vmax - b) / 6.0 + delta / 2.0) / delta;

    let mut h = if r == vmax {
        db - dg
    } else if g == vmax {
        1.0 / 3.0 + dr - db
    } else {
        2.0 / 3.0 + dg - dr
    };
    if h < 0.0 {
        h += 1.0;
    }
    if h > 1.0 {
        h -= 1.0;
    }
    Hsl::new(h, s, l)
}

fn hue_channel(t1: f64, t2: f64, mut hue: f64) -> u8 {
    if hue < 0.0 {
        hue += 1.0;
    } else if hue > 1.0 {
        hue -= 1.0;
    }
    let v = if hue * 6.0 < 1.0 {
        t1 + (t2 - t1) * hue * 6.0
    } else if hue * 2.0 < 1.0 {
        t2
    } else if hue * 3.0 < 2.0 {
        t1 + (t2 - t1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        t1
    };
    (v * 255.0).round() as u8
}

/// Converts HSL back to an unpremultiplied pixel with the given alpha.
pub fn hsl_to_bgra(hsl: Hsl, alpha: u8) -> Bgra {
    if hsl.s == 0.0 {
        let v = (hsl.l * 255.0).round() as u8;
        return [v, v, v, alpha];
    }
    let t2 = if hsl.l < 0.5 {
        hsl.l * (1.0 + hsl.s)
    } else {
        hsl.l + hsl.s - hsl.l * hsl.s
    };
    let t1 = 2.0 * hsl.l - t2;
    pixel::from_argb(
        alpha,
        hue_channel(t1, t2, hsl.h + 1.0 / 3.0),
        hue_channel(t1, t2, hsl.h),
        hue_channel(t1, t2, hsl.h - 1.0 / 3.0),
    )
}

/// Applies `shift` to one premultiplied pixel.
pub fn shift_pixel(px: Bgra, shift: Hsl) -> Bgra {
    let alpha = px[pixel::A];
    let straight = pixel::unpremultiply(px);
    let mut hsl = bgra_to_hsl(straight);

    if shift.h >= 0.0 {
        hsl.h = shift.h;
    }
    if shift.s >= 0.0 && shift.s <= 0.5 {
        hsl.s *= shift.s * 2.0;
    } else if shift.s > 0.5 && shift.s <= 1.0 {
        hsl.s += (1.0 - hsl.s) * (shift.s - 0.5) * 2.0;
    }

    let mut out = hsl_to_bgra(hsl, alpha);

    if shift.l >= 0.0 && shift.l <= 0.5 {
        let k = shift.l * 2.0;
        for c in &mut out[..3] {
            *c = (*c as f64 * k) as u8;
        }
    } else if shift.l > 0.5 && shift.l <= 1.0 {
        let k = (shift.l - 0.5) * 2.0;
        for c in &mut out[..3] {
            *c = (*c as f64 + (255.0 - *c as f64) * k) as u8;
        }
    }

    pixel::premultiply(out)
}

/// Applies `shift` to every pixel of `source`.
pub fn shifted(source: PixelBufferRef<'_>, shift: Hsl) -> PixelBuffer {
    trace!(
        width = source.width(),
        height = source.height(),
        h = shift.h,
        s = shift.s,
        l = shift.l,
        "hsl::shifted"
    );
    let mut out = source.to_buffer();
    out.map_pixels(|px| shift_pixel(px, shift));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RED: Bgra = [0, 0, 255, 255];
    const GREEN: Bgra = [0, 255, 0, 255];
    const BLUE: Bgra = [255, 0, 0, 255];

    #[test]
    fn test_primaries_to_hsl() {
        let r = bgra_to_hsl(RED);
        assert_relative_eq!(r.h, 0.0);
        assert_relative_eq!(r.s, 1.0);
        assert_relative_eq!(r.l, 0.5);
        assert_relative_eq!(bgra_to_hsl(GREEN).h, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(bgra_to_hsl(BLUE).h, 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grey_has_no_saturation() {
        let hsl = bgra_to_hsl([128, 128, 128, 255]);
        assert_eq!(hsl.s, 0.0);
        assert_relative_eq!(hsl.l, 128.0 / 255.0);
        assert_eq!(hsl_to_bgra(hsl, 255), [128, 128, 128, 255]);
    }

    #[test]
    fn test_hsl_to_primaries() {
        assert_eq!(hsl_to_bgra(Hsl::new(0.0, 1.0, 0.5), 255), RED);
        assert_eq!(hsl_to_bgra(Hsl::new(1.0 / 3.0, 1.0, 0.5), 255), GREEN);
        assert_eq!(hsl_to_bgra(Hsl::new(2.0 / 3.0, 1.0, 0.5), 255), BLUE);
    }

    #[test]
    fn test_identity_shift_is_close() {
        for px in [[12, 200, 90, 255], [255, 255, 255, 255], [3, 7, 250, 255], RED] {
            let out = shift_pixel(px, Hsl::IDENTITY);
            for c in 0..4 {
                assert!(out[c].abs_diff(px[c]) <= 1, "{px:?} -> {out:?}");
            }
        }
    }

    #[test]
    fn test_desaturate_and_lightness_extremes() {
        assert_eq!(shift_pixel(RED, Hsl::new(-1.0, 0.0, -1.0)), [128, 128, 128, 255]);
        assert_eq!(shift_pixel(RED, Hsl::new(-1.0, -1.0, 0.0)), [0, 0, 0, 255]);
        assert_eq!(shift_pixel(RED, Hsl::new(-1.0, -1.0, 1.0)), [255, 255, 255, 255]);
    }

    #[test]
    fn test_keeps_premultiplied_alpha() {
        let px = [0, 0, 128, 128]; // half-transparent red
        let out = shift_pixel(px, Hsl::new(2.0 / 3.0, -1.0, -1.0));
        assert_eq!(out, [128, 0, 0, 128]);
        assert_eq!(shift_pixel([0, 0, 0, 0], Hsl::new(0.5, 1.0, 1.0)), [0, 0, 0, 0]);
    }

    #[test]
    fn test_shifted_buffer() {
        let src = PixelBuffer::filled(3, 2, RED, false);
        let out = shifted(src.view(), Hsl::new(1.0 / 3.0, -1.0, -1.0));
        assert!(out.pixels().all(|(_, _, p)| p == GREEN));
        assert!(!out.has_alpha());
    }
}
