//! BGRA8888 pixel helpers.
//!
//! Pixels are four bytes in memory order blue, green, red, alpha. Colour
//! channels are premultiplied by alpha wherever the buffer carries alpha,
//! so a well-formed pixel always satisfies `b, g, r <= a`.
//!
//! ```text
//! byte:   0   1   2   3
//!         B   G   R   A
//! ```
//!
//! # Example
//!
//! ```rust
//! use bgra_core::pixel::{premultiply, unpremultiply};
//!
//! let straight = [255, 128, 0, 128];
//! let pm = premultiply(straight);
//! assert_eq!(pm, [128, 64, 0, 128]);
//! assert_eq!(unpremultiply(pm), [255, 128, 0, 128]);
//! ```

/// One BGRA8888 pixel, in memory byte order.
pub type Bgra = [u8; 4];

/// Bytes per BGRA8888 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Byte index of the blue channel.
pub const B: usize = 0;
/// Byte index of the green channel.
pub const G: usize = 1;
/// Byte index of the red channel.
pub const R: usize = 2;
/// Byte index of the alpha channel.
pub const A: usize = 3;

/// Fully transparent black.
pub const TRANSPARENT: Bgra = [0, 0, 0, 0];

/// Builds a pixel from channel values given in the conventional A, R, G, B
/// order.
#[inline]
pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Bgra {
    [b, g, r, a]
}

/// Largest of the three colour channels.
#[inline]
pub fn max_color(px: Bgra) -> u8 {
    px[B].max(px[G]).max(px[R])
}

/// Returns `true` if no colour channel exceeds alpha.
#[inline]
pub fn is_valid_premultiplied(px: Bgra) -> bool {
    max_color(px) <= px[A]
}

/// Scales the colour channels of a straight-alpha pixel by its alpha.
#[inline]
pub fn premultiply(px: Bgra) -> Bgra {
    let a = px[A] as u32;
    if a == 255 {
        return px;
    }
    let mul = |c: u8| ((c as u32 * a + 127) / 255) as u8;
    [mul(px[B]), mul(px[G]), mul(px[R]), px[A]]
}

/// Undoes [`premultiply`]. Fully transparent pixels come back as
/// transparent black.
#[inline]
pub fn unpremultiply(px: Bgra) -> Bgra {
    let a = px[A] as u32;
    match a {
        0 => TRANSPARENT,
        255 => px,
        _ => {
            let div = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
            [div(px[B]), div(px[G]), div(px[R]), px[A]]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_argb_order() {
        assert_eq!(from_argb(1, 2, 3, 4), [4, 3, 2, 1]);
    }

    #[test]
    fn test_premultiply_opaque_is_identity() {
        let px = [12, 34, 56, 255];
        assert_eq!(premultiply(px), px);
        assert_eq!(unpremultiply(px), px);
    }

    #[test]
    fn test_premultiply_is_valid() {
        for a in [0u8, 1, 64, 128, 200, 254] {
            let px = premultiply([255, 200, 10, a]);
            assert!(is_valid_premultiplied(px), "{px:?}");
        }
    }

    #[test]
    fn test_unpremultiply_transparent() {
        assert_eq!(unpremultiply([0, 0, 0, 0]), TRANSPARENT);
    }

    #[test]
    fn test_round_trip_close() {
        let straight = [200, 100, 50, 180];
        let back = unpremultiply(premultiply(straight));
        for c in 0..3 {
            assert!((back[c] as i32 - straight[c] as i32).abs() <= 1);
        }
    }
}
