//! Fixed-point separable convolution of BGRA bitmaps.
//!
//! This is the engine underneath [`crate::resize`]. A 2D filter is applied
//! as two 1D passes: every source row is convolved horizontally, and the
//! resulting rows are convolved vertically. Only as many horizontally
//! convolved rows as the tallest vertical filter are kept alive at once,
//! in a small ring buffer, so memory stays proportional to
//! `max_filter_height * output_width` no matter how tall the source is.
//!
//! # Fixed Point
//!
//! Filter weights are [`Fixed`] values with [`SHIFT_BITS`] fractional bits.
//! Each output channel is `clamp((sum of weight * byte) >> 14, 0, 255)`,
//! accumulated in `i32`.
//!
//! ```text
//! source rows ──► horizontal pass ──► ring buffer (max_y_filter rows)
//!                                         │
//!                                         ▼
//!                                   vertical pass ──► output row
//! ```
//!
//! # Example
//!
//! ```rust
//! use bgra_ops::convolver::{convolve_2d, ConvolutionFilter1D, FIXED_ONE};
//!
//! // Identity filters on a 2x1 opaque image.
//! let src = [1, 2, 3, 255, 4, 5, 6, 255];
//! let mut fx = ConvolutionFilter1D::new();
//! fx.add_filter(0, &[FIXED_ONE]);
//! fx.add_filter(1, &[FIXED_ONE]);
//! let mut fy = ConvolutionFilter1D::new();
//! fy.add_filter(0, &[FIXED_ONE]);
//!
//! let mut out = [0u8; 8];
//! convolve_2d(&src, 8, false, &fx, &fy, 8, &mut out);
//! assert_eq!(out, src);
//! ```

use tracing::trace;

/// Fixed-point filter weight.
pub type Fixed = i16;

/// Number of fractional bits in a [`Fixed`] weight.
pub const SHIFT_BITS: u32 = 14;

/// The fixed-point representation of 1.0.
pub const FIXED_ONE: Fixed = 1 << SHIFT_BITS;

/// Converts a float weight to fixed point, truncating toward zero.
#[inline]
pub fn float_to_fixed(f: f32) -> Fixed {
    (f * (1 << SHIFT_BITS) as f32) as Fixed
}

/// Converts a fixed-point weight back to a float.
#[inline]
pub fn fixed_to_float(x: Fixed) -> f32 {
    x as f32 / (1 << SHIFT_BITS) as f32
}

#[derive(Debug, Clone, Copy)]
struct FilterInstance {
    /// Index of the first weight in `filter_values`.
    data_location: usize,
    /// First source pixel covered.
    offset: usize,
    /// Number of weights (and source pixels).
    length: usize,
}

/// Per-output-pixel filter taps along one axis.
///
/// One filter is appended per output coordinate, in order. All weights
/// share one flat buffer; each filter records where its run starts.
///
/// # Example
///
/// ```rust
/// use bgra_ops::convolver::ConvolutionFilter1D;
///
/// let mut f = ConvolutionFilter1D::new();
/// f.add_filter(0, &[8192, 8192]);
/// f.add_filter(2, &[4096, 8192, 4096]);
///
/// assert_eq!(f.num_values(), 2);
/// assert_eq!(f.max_filter(), 3);
/// let (weights, offset, len) = f.filter_for(1);
/// assert_eq!((weights, offset, len), (&[4096, 8192, 4096][..], 2, 3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConvolutionFilter1D {
    filters: Vec<FilterInstance>,
    filter_values: Vec<Fixed>,
    max_filter: usize,
}

impl ConvolutionFilter1D {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves room for `filter_count` more filters holding
    /// `filter_value_count` weights in total.
    pub fn reserve_additional(&mut self, filter_count: usize, filter_value_count: usize) {
        self.filters.reserve(filter_count);
        self.filter_values.reserve(filter_value_count);
    }

    /// Appends the filter for the next output coordinate.
    ///
    /// `offset` is the first source pixel that `weights[0]` applies to.
    /// Leading and trailing zero weights are dropped (and `offset` moved
    /// forward to match) since they contribute nothing. A filter made only
    /// of zeros keeps a single tap.
    ///
    /// # Panics
    ///
    /// Panics if `weights` is empty.
    pub fn add_filter(&mut self, offset: usize, weights: &[Fixed]) {
        assert!(!weights.is_empty(), "convolution filter must have at least one tap");

        let (first, last) = match weights.iter().position(|&w| w != 0) {
            Some(first) => {
                let last = weights.iter().rposition(|&w| w != 0).unwrap_or(first);
                (first, last)
            }
            None => (0, 0),
        };
        let kept = &weights[first..=last];

        self.filters.push(FilterInstance {
            data_location: self.filter_values.len(),
            offset: offset + first,
            length: kept.len(),
        });
        self.filter_values.extend_from_slice(kept);
        self.max_filter = self.max_filter.max(kept.len());
    }

    /// Returns `(weights, offset, length)` for output coordinate `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value >= num_values()`.
    #[inline]
    pub fn filter_for(&self, value: usize) -> (&[Fixed], usize, usize) {
        let f = self.filters[value];
        (
            &self.filter_values[f.data_location..f.data_location + f.length],
            f.offset,
            f.length,
        )
    }

    /// Number of output coordinates configured.
    #[inline]
    pub fn num_values(&self) -> usize {
        self.filters.len()
    }

    /// Length of the longest filter added so far.
    #[inline]
    pub fn max_filter(&self) -> usize {
        self.max_filter
    }
}

#[inline(always)]
fn clamp_to_u8(a: i32) -> u8 {
    a.clamp(0, 255) as u8
}

/// Convolves one source row with `filter` into `out_row`.
///
/// Without alpha the alpha byte of `out_row` is left untouched; the
/// vertical pass overwrites it.
fn convolve_horizontally<const HAS_ALPHA: bool>(
    src_row: &[u8],
    filter: &ConvolutionFilter1D,
    out_row: &mut [u8],
) {
    for (out_x, out) in out_row.chunks_exact_mut(4).enumerate() {
        let (weights, offset, length) = filter.filter_for(out_x);
        let taps = &src_row[offset * 4..(offset + length) * 4];

        let mut accum = [0i32; 4];
        for (&w, px) in weights.iter().zip(taps.chunks_exact(4)) {
            let w = w as i32;
            accum[0] += w * px[0] as i32;
            accum[1] += w * px[1] as i32;
            accum[2] += w * px[2] as i32;
            if HAS_ALPHA {
                accum[3] += w * px[3] as i32;
            }
        }

        out[0] = clamp_to_u8(accum[0] >> SHIFT_BITS);
        out[1] = clamp_to_u8(accum[1] >> SHIFT_BITS);
        out[2] = clamp_to_u8(accum[2] >> SHIFT_BITS);
        if HAS_ALPHA {
            out[3] = clamp_to_u8(accum[3] >> SHIFT_BITS);
        }
    }
}

/// Convolves the same column of `rows` with `weights` into `out_row`.
///
/// `rows[j]` is the horizontally convolved row that `weights[j]` applies
/// to. With alpha, the result alpha is raised to at least the largest
/// colour channel so the pixel stays a valid premultiplied colour even
/// when independent per-channel rounding would break that. Without alpha
/// the result is opaque.
fn convolve_vertically<const HAS_ALPHA: bool>(weights: &[Fixed], rows: &[&[u8]], out_row: &mut [u8]) {
    for (out_x, out) in out_row.chunks_exact_mut(4).enumerate() {
        let byte_offset = out_x * 4;

        let mut accum = [0i32; 4];
        for (&w, row) in weights.iter().zip(rows) {
            let w = w as i32;
            let px = &row[byte_offset..byte_offset + 4];
            accum[0] += w * px[0] as i32;
            accum[1] += w * px[1] as i32;
            accum[2] += w * px[2] as i32;
            if HAS_ALPHA {
                accum[3] += w * px[3] as i32;
            }
        }

        let b = clamp_to_u8(accum[0] >> SHIFT_BITS);
        let g = clamp_to_u8(accum[1] >> SHIFT_BITS);
        let r = clamp_to_u8(accum[2] >> SHIFT_BITS);
        out[0] = b;
        out[1] = g;
        out[2] = r;
        out[3] = if HAS_ALPHA {
            clamp_to_u8(accum[3] >> SHIFT_BITS).max(b.max(g).max(r))
        } else {
            0xFF
        };
    }
}

/// Ring of horizontally convolved rows.
///
/// Holds exactly `capacity` rows; logical source row `c` lives in slot
/// `c % capacity`. Advancing past the end overwrites the oldest row.
struct RowBuffer {
    rows: Vec<Vec<u8>>,
    /// Logical source row the next call to `advance_row` fills.
    next_row_coordinate: usize,
}

impl RowBuffer {
    fn new(row_byte_width: usize, capacity: usize, first_input_row: usize) -> Self {
        Self {
            rows: vec![vec![0u8; row_byte_width]; capacity],
            next_row_coordinate: first_input_row,
        }
    }

    /// Hands out the slot for the next logical row.
    fn advance_row(&mut self) -> &mut [u8] {
        let slot = self.next_row_coordinate % self.rows.len();
        self.next_row_coordinate += 1;
        &mut self.rows[slot]
    }

    /// Buffered rows `first..first + count`, in order.
    fn window(&self, first: usize, count: usize) -> Vec<&[u8]> {
        debug_assert!(
            first + count <= self.next_row_coordinate
                && first + self.rows.len() >= self.next_row_coordinate,
            "rows {first}..{} not buffered (next {}, capacity {})",
            first + count,
            self.next_row_coordinate,
            self.rows.len()
        );
        (first..first + count)
            .map(|c| self.rows[c % self.rows.len()].as_slice())
            .collect()
    }
}

/// First source row to convolve and the ring capacity for `filter_y`.
///
/// Filters from [`crate::resize_filter`] move monotonically down the
/// source, in which case the capacity is exactly `max_filter()`. Zero-tap
/// trimming can leave a filter ending above its predecessor; the ring then
/// has to span from each filter's offset to the furthest row converted so
/// far.
fn ring_geometry(filter_y: &ConvolutionFilter1D) -> (usize, usize) {
    let first = (0..filter_y.num_values())
        .map(|y| filter_y.filter_for(y).1)
        .min()
        .unwrap_or(0);
    let mut furthest = first;
    let mut capacity = filter_y.max_filter();
    for y in 0..filter_y.num_values() {
        let (_, offset, length) = filter_y.filter_for(y);
        furthest = furthest.max(offset + length);
        capacity = capacity.max(furthest - offset);
    }
    (first, capacity)
}

/// Applies `filter_x` then `filter_y` to a BGRA source.
///
/// Produces `filter_x.num_values()` x `filter_y.num_values()` pixels into
/// `output`, whose rows start `output_stride` bytes apart. Source row `r`
/// starts at `source[r * source_stride]`.
///
/// With `source_has_alpha == false` alpha is never convolved and every
/// output alpha byte is 255.
///
/// # Panics
///
/// Panics if a filter reaches past the end of `source`, or if `output` is
/// too small for the result.
pub fn convolve_2d(
    source: &[u8],
    source_stride: usize,
    source_has_alpha: bool,
    filter_x: &ConvolutionFilter1D,
    filter_y: &ConvolutionFilter1D,
    output_stride: usize,
    output: &mut [u8],
) {
    if source_has_alpha {
        convolve_2d_impl::<true>(source, source_stride, filter_x, filter_y, output_stride, output);
    } else {
        convolve_2d_impl::<false>(source, source_stride, filter_x, filter_y, output_stride, output);
    }
}

fn convolve_2d_impl<const HAS_ALPHA: bool>(
    source: &[u8],
    source_stride: usize,
    filter_x: &ConvolutionFilter1D,
    filter_y: &ConvolutionFilter1D,
    output_stride: usize,
    output: &mut [u8],
) {
    let num_output_rows = filter_y.num_values();
    let row_byte_width = filter_x.num_values() * 4;
    trace!(
        out_w = filter_x.num_values(),
        out_h = num_output_rows,
        max_x_filter = filter_x.max_filter(),
        max_y_filter = filter_y.max_filter(),
        has_alpha = HAS_ALPHA,
        "convolve_2d"
    );
    if num_output_rows == 0 {
        return;
    }

    // Start at the first source row any vertical filter needs; when only a
    // subset is computed, rows above it are never touched.
    let (first_offset, capacity) = ring_geometry(filter_y);
    let mut next_x_row = first_offset;
    let mut row_buffer = RowBuffer::new(row_byte_width, capacity, first_offset);

    for out_y in 0..num_output_rows {
        let (weights, offset, length) = filter_y.filter_for(out_y);

        while next_x_row < offset + length {
            let src_start = next_x_row * source_stride;
            let src_row = &source[src_start..];
            convolve_horizontally::<HAS_ALPHA>(src_row, filter_x, row_buffer.advance_row());
            next_x_row += 1;
        }

        let out_start = out_y * output_stride;
        let out_row = &mut output[out_start..out_start + row_byte_width];
        let rows = row_buffer.window(offset, length);
        convolve_vertically::<HAS_ALPHA>(weights, &rows, out_row);
    }
}
