//! Filter coefficient generation for resampling.
//!
//! [`ResizeFilter`] turns a resampling kernel and a source/destination size
//! pair into a [`ConvolutionFilter1D`] for one axis, covering only the
//! destination range that is actually needed.
//!
//! # Methods
//!
//! - [`ResizeMethod::Box`] - average of the source pixels under each output
//!   pixel; fast, good for integral downscales
//! - [`ResizeMethod::Lanczos3`] - windowed sinc with three lobes; sharp,
//!   the default
//!
//! # Coefficients
//!
//! For output pixel `i` the filter is centred on `(i + 0.5) / scale` in
//! source space. When shrinking, the kernel is stretched by `1 / scale` so
//! every source pixel contributes; when enlarging it keeps its natural
//! width. Weights are normalised, converted to fixed point, and the
//! truncation error is folded back into the middle tap so each filter sums
//! to exactly [`FIXED_ONE`].
//!
//! # Example
//!
//! ```rust
//! use bgra_ops::resize_filter::{ResizeFilter, ResizeMethod};
//!
//! let f = ResizeFilter::new(ResizeMethod::Box, 16, 8, 0, 8);
//! let (weights, offset, _) = f.filter().filter_for(3);
//! assert_eq!(offset, 6);
//! assert_eq!(weights, &[8192, 8192]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::convolver::{float_to_fixed, ConvolutionFilter1D, Fixed, FIXED_ONE};
use crate::OpsError;
use tracing::trace;

/// Resampling kernel used by [`crate::resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResizeMethod {
    /// Box filter: equal weight over one output pixel's footprint.
    Box,
    /// Lanczos windowed sinc, `a = 3`.
    #[default]
    Lanczos3,
}

impl ResizeMethod {
    /// Kernel half-width in destination pixels, beyond which it is zero.
    #[inline]
    pub fn half_width(&self) -> f32 {
        match self {
            ResizeMethod::Box => 0.5,
            ResizeMethod::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the kernel at `x` destination pixels from its centre.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            ResizeMethod::Box => eval_box(x),
            ResizeMethod::Lanczos3 => eval_lanczos(3, x),
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            ResizeMethod::Box => "box",
            ResizeMethod::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for ResizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeMethod {
    type Err = OpsError;

    /// Parses `"box"` or `"lanczos3"` (also `"lanczos"`), ignoring case.
    ///
    /// ```rust
    /// use bgra_ops::ResizeMethod;
    ///
    /// assert_eq!("Lanczos3".parse::<ResizeMethod>().unwrap(), ResizeMethod::Lanczos3);
    /// assert!("bicubic".parse::<ResizeMethod>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "box" => Ok(ResizeMethod::Box),
            "lanczos3" | "lanczos" => Ok(ResizeMethod::Lanczos3),
            other => Err(OpsError::InvalidParameter(format!("unknown resize method '{other}'"))),
        }
    }
}

/// Box kernel: 1 on `[-0.5, 0.5)`, else 0.
#[inline]
fn eval_box(x: f32) -> f32 {
    if (-0.5..0.5).contains(&x) { 1.0 } else { 0.0 }
}

/// Lanczos kernel with `size` lobes.
#[inline]
fn eval_lanczos(size: i32, x: f32) -> f32 {
    let size = size as f32;
    if x <= -size || x >= size {
        return 0.0;
    }
    // sinc(0) is 1; avoid 0/0.
    if x > -f32::EPSILON && x < f32::EPSILON {
        return 1.0;
    }
    let xpi = x * std::f32::consts::PI;
    (xpi.sin() / xpi) * ((xpi / size).sin() / (xpi / size))
}

/// Builds the per-output-pixel filters for one axis.
///
/// Only output indices in `[dest_subset_lo, dest_subset_hi)` get a
/// filter; index `dest_subset_lo` becomes filter 0.
#[derive(Debug, Clone)]
pub struct ResizeFilter {
    method: ResizeMethod,
    filter: ConvolutionFilter1D,
}

impl ResizeFilter {
    /// Computes filters mapping `src_size` pixels onto `dest_size` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `src_size` or `dest_size` is zero, if the subset range is
    /// not inside `0..dest_size`, or if a computed filter has no weight,
    /// which would mean a blank output pixel.
    pub fn new(
        method: ResizeMethod,
        src_size: usize,
        dest_size: usize,
        dest_subset_lo: usize,
        dest_subset_hi: usize,
    ) -> Self {
        assert!(src_size > 0 && dest_size > 0, "resize filter sizes must be > 0");
        assert!(
            dest_subset_lo <= dest_subset_hi && dest_subset_hi <= dest_size,
            "dest subset {dest_subset_lo}..{dest_subset_hi} outside 0..{dest_size}"
        );

        let mut filter = ConvolutionFilter1D::new();
        compute_filters(method, src_size, dest_size, dest_subset_lo, dest_subset_hi, &mut filter);
        trace!(
            %method,
            src_size,
            dest_size,
            dest_subset_lo,
            dest_subset_hi,
            max_filter = filter.max_filter(),
            "resize filter"
        );
        Self { method, filter }
    }

    /// Method the filters were built with.
    #[inline]
    pub fn method(&self) -> ResizeMethod {
        self.method
    }

    /// The computed filters.
    #[inline]
    pub fn filter(&self) -> &ConvolutionFilter1D {
        &self.filter
    }

    /// Consumes the builder and returns the filters.
    #[inline]
    pub fn into_filter(self) -> ConvolutionFilter1D {
        self.filter
    }
}

fn compute_filters(
    method: ResizeMethod,
    src_size: usize,
    dest_size: usize,
    dest_subset_lo: usize,
    dest_subset_hi: usize,
    output: &mut ConvolutionFilter1D,
) {
    let scale = dest_size as f32 / src_size as f32;
    let inv_scale = 1.0 / scale;
    // Enlarging keeps the kernel at its natural width.
    let clamped_scale = scale.min(1.0);
    let src_support = method.half_width() / clamped_scale;

    // Scratch buffers reused across output pixels.
    let mut filter_values: Vec<f32> = Vec::with_capacity(src_support.ceil() as usize * 2 + 2);
    let mut fixed_values: Vec<Fixed> = Vec::with_capacity(filter_values.capacity());

    output.reserve_additional(
        dest_subset_hi - dest_subset_lo,
        (dest_subset_hi - dest_subset_lo) * filter_values.capacity(),
    );

    for dest_i in dest_subset_lo..dest_subset_hi {
        filter_values.clear();
        fixed_values.clear();

        // Centre of this output pixel in source coordinates.
        let src_pixel = (dest_i as f32 + 0.5) * inv_scale;

        // Inclusive range of source pixels the kernel can reach.
        let src_begin = (src_pixel - src_support).floor().max(0.0) as usize;
        let src_end = ((src_pixel + src_support).ceil() as usize).min(src_size - 1);

        let mut filter_sum = 0.0f32;
        for cur in src_begin..=src_end {
            let src_filter_dist = (cur as f32 + 0.5) - src_pixel;
            let dest_filter_dist = src_filter_dist * clamped_scale;
            let value = method.weight(dest_filter_dist);
            filter_values.push(value);
            filter_sum += value;
        }
        assert!(
            filter_sum != 0.0,
            "empty {method} filter for output {dest_i} ({src_size} -> {dest_size})"
        );

        let mut fixed_sum: i32 = 0;
        for &v in &filter_values {
            let fixed = float_to_fixed(v / filter_sum);
            fixed_sum += fixed as i32;
            fixed_values.push(fixed);
        }

        // Truncation error goes to the middle tap so the sum is exactly one.
        let leftovers = FIXED_ONE as i32 - fixed_sum;
        let mid = fixed_values.len() / 2;
        fixed_values[mid] = (fixed_values[mid] as i32 + leftovers) as Fixed;

        output.add_filter(src_begin, &fixed_values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums(f: &ConvolutionFilter1D) -> Vec<i32> {
        (0..f.num_values())
            .map(|i| f.filter_for(i).0.iter().map(|&w| w as i32).sum())
            .collect()
    }

    #[test]
    fn test_kernel_values() {
        assert_eq!(ResizeMethod::Box.weight(0.0), 1.0);
        assert_eq!(ResizeMethod::Box.weight(-0.5), 1.0);
        assert_eq!(ResizeMethod::Box.weight(0.5), 0.0);
        assert_eq!(ResizeMethod::Lanczos3.weight(0.0), 1.0);
        assert_eq!(ResizeMethod::Lanczos3.weight(3.0), 0.0);
        assert_eq!(ResizeMethod::Lanczos3.weight(-3.5), 0.0);
        assert!(ResizeMethod::Lanczos3.weight(1.0).abs() < 1e-6);
        // First negative lobe.
        assert!(ResizeMethod::Lanczos3.weight(1.5) < 0.0);
    }

    #[test]
    fn test_method_parse_display() {
        for m in [ResizeMethod::Box, ResizeMethod::Lanczos3] {
            assert_eq!(m.to_string().parse::<ResizeMethod>().unwrap(), m);
        }
        assert_eq!(ResizeMethod::default(), ResizeMethod::Lanczos3);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let cases = [
            (ResizeMethod::Box, 16, 8),
            (ResizeMethod::Box, 7, 20),
            (ResizeMethod::Box, 100, 3),
            (ResizeMethod::Lanczos3, 15, 15),
            (ResizeMethod::Lanczos3, 640, 123),
            (ResizeMethod::Lanczos3, 5, 37),
            (ResizeMethod::Lanczos3, 1, 9),
        ];
        for (method, src, dst) in cases {
            let f = ResizeFilter::new(method, src, dst, 0, dst);
            assert_eq!(f.filter().num_values(), dst);
            for (i, s) in sums(f.filter()).into_iter().enumerate() {
                assert_eq!(s, FIXED_ONE as i32, "{method} {src}->{dst} output {i}");
            }
        }
    }

    #[test]
    fn test_lanczos_same_size_index_7() {
        let f = ResizeFilter::new(ResizeMethod::Lanczos3, 15, 15, 0, 15);
        let (weights, _, _) = f.filter().filter_for(7);
        assert_eq!(weights.iter().map(|&w| w as i32).sum::<i32>(), 16384);
    }

    #[test]
    fn test_filters_stay_in_source() {
        for (src, dst) in [(10, 3), (3, 10), (33, 33), (2, 1)] {
            let f = ResizeFilter::new(ResizeMethod::Lanczos3, src, dst, 0, dst);
            for i in 0..dst {
                let (_, offset, length) = f.filter().filter_for(i);
                assert!(length > 0);
                assert!(offset + length <= src, "{src}->{dst} output {i}");
            }
        }
    }

    #[test]
    fn test_box_halving_taps() {
        let f = ResizeFilter::new(ResizeMethod::Box, 16, 8, 0, 8);
        for i in 0..8 {
            assert_eq!(f.filter().filter_for(i), (&[8192, 8192][..], 2 * i, 2));
        }
    }

    #[test]
    fn test_same_size_box_is_identity() {
        let f = ResizeFilter::new(ResizeMethod::Box, 9, 9, 0, 9);
        for i in 0..9 {
            assert_eq!(f.filter().filter_for(i), (&[FIXED_ONE][..], i, 1));
        }
    }

    #[test]
    fn test_subset_matches_full() {
        let full = ResizeFilter::new(ResizeMethod::Lanczos3, 50, 21, 0, 21);
        let part = ResizeFilter::new(ResizeMethod::Lanczos3, 50, 21, 6, 13);
        assert_eq!(part.filter().num_values(), 7);
        for i in 0..7 {
            assert_eq!(part.filter().filter_for(i), full.filter().filter_for(i + 6));
        }
    }

    #[test]
    fn test_box_offsets_are_monotonic() {
        let f = ResizeFilter::new(ResizeMethod::Box, 97, 41, 0, 41);
        let mut prev = (0, 0);
        for i in 0..41 {
            let (_, offset, length) = f.filter().filter_for(i);
            assert!(offset >= prev.0 && offset + length >= prev.1);
            prev = (offset, offset + length);
        }
    }

    #[test]
    #[should_panic(expected = "dest subset")]
    fn test_subset_outside_dest_panics() {
        ResizeFilter::new(ResizeMethod::Box, 4, 4, 2, 5);
    }
}
