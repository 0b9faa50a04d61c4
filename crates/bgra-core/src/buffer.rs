//! BGRA8888 pixel buffers.
//!
//! - [`PixelBuffer`] - owned, tightly packed buffer returned by operations
//! - [`PixelBufferRef`] - borrowed, possibly strided view used as input
//!
//! # Memory Layout
//!
//! Rows are stored top to bottom. Each row starts `stride` bytes after the
//! previous one and holds `width * 4` meaningful bytes; anything between
//! the end of the pixels and the next row is padding and is never read.
//!
//! ```text
//! [B G R A B G R A ... pad]  <- row 0
//! [B G R A B G R A ... pad]  <- row 1
//! ```
//!
//! Owned buffers are always packed (`stride == width * 4`). Borrowed views
//! accept any stride of at least `width * 4` so that platform bitmaps with
//! aligned rows can be passed in without copying.
//!
//! # Usage
//!
//! ```rust
//! use bgra_core::{PixelBuffer, PixelBufferRef};
//!
//! // A 2x2 platform bitmap whose rows are padded to 12 bytes.
//! let raw = vec![255u8; 12 * 2];
//! let view = PixelBufferRef::new(2, 2, 12, true, &raw).unwrap();
//! assert_eq!(view.row(1).len(), 8);
//!
//! let owned: PixelBuffer = view.to_buffer();
//! assert_eq!(owned.stride(), 8);
//! ```

use crate::pixel::{Bgra, BYTES_PER_PIXEL};
use crate::{Error, Rect, Result};

/// Minimum bytes a slice must hold for the given geometry.
///
/// The last row only needs its pixels, not the trailing padding.
fn required_len(width: u32, height: u32, stride: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Ok(0);
    }
    let row_bytes = (width as usize)
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(Error::Overflow { width, height })?;
    stride
        .checked_mul(height as usize - 1)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(Error::Overflow { width, height })
}

/// Owned, tightly packed BGRA8888 image.
///
/// `has_alpha` records whether the alpha bytes carry information. When it
/// is `false` every alpha byte is expected to be 255 and operations may skip
/// alpha work entirely.
///
/// # Example
///
/// ```rust
/// use bgra_core::PixelBuffer;
///
/// let mut img = PixelBuffer::new(4, 3, true);
/// img.set_pixel(1, 2, [10, 20, 30, 40]);
/// assert_eq!(img.pixel(1, 2), [10, 20, 30, 40]);
/// assert_eq!(img.data().len(), 4 * 3 * 4);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    has_alpha: bool,
}

impl PixelBuffer {
    /// Creates a zero-filled (transparent black) buffer.
    ///
    /// # Panics
    ///
    /// Panics if allocation fails (extremely large images).
    pub fn new(width: u32, height: u32, has_alpha: bool) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            data: vec![0; len],
            width,
            height,
            has_alpha,
        }
    }

    /// The explicitly empty result: zero width, zero height, no bytes.
    #[inline]
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
            has_alpha: false,
        }
    }

    /// Wraps packed BGRA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if `data.len()` is not exactly
    /// `width * height * 4`.
    pub fn from_data(width: u32, height: u32, has_alpha: bool, data: Vec<u8>) -> Result<Self> {
        let stride = width as usize * BYTES_PER_PIXEL;
        let required = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(BYTES_PER_PIXEL))
            .ok_or(Error::Overflow { width, height })?;
        if data.len() != required {
            return Err(Error::buffer_too_small(data.len(), required, width, height, stride));
        }
        Ok(Self {
            data,
            width,
            height,
            has_alpha,
        })
    }

    /// Creates a buffer with every pixel set to `pixel`.
    ///
    /// ```rust
    /// use bgra_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::filled(3, 3, [0, 0, 255, 255], false);
    /// assert_eq!(img.pixel(2, 2), [0, 0, 255, 255]);
    /// ```
    pub fn filled(width: u32, height: u32, pixel: Bgra, has_alpha: bool) -> Self {
        let mut img = Self::new(width, height, has_alpha);
        for chunk in img.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&pixel);
        }
        img
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row. Always `width * 4`.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Whether alpha bytes carry information.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Updates the alpha flag without touching pixel data.
    #[inline]
    pub fn set_has_alpha(&mut self, has_alpha: bool) {
        self.has_alpha = has_alpha;
    }

    /// Rectangle covering the whole image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw packed bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw packed bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of row `y`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Mutable bytes of row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Bgra {
        self.view().pixel(x, y)
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Bgra) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let offset = y as usize * self.stride() + x as usize * BYTES_PER_PIXEL;
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&pixel);
    }

    /// Borrowed view of the whole buffer.
    #[inline]
    pub fn view(&self) -> PixelBufferRef<'_> {
        PixelBufferRef {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.stride(),
            has_alpha: self.has_alpha,
        }
    }

    /// Iterates over every pixel with its coordinates, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Bgra)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Applies `f` to every pixel in place.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(Bgra) -> Bgra,
    {
        for chunk in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            let px = [chunk[0], chunk[1], chunk[2], chunk[3]];
            chunk.copy_from_slice(&f(px));
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_alpha", &self.has_alpha)
            .finish_non_exhaustive()
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

/// Borrowed BGRA8888 pixels with an arbitrary row stride.
///
/// This is the form in which bitmaps owned by someone else (a canvas, a
/// decoder, a platform surface) are handed to operations. The view is
/// `Copy` and holds only a shared slice, so it can be sent to other
/// threads freely.
///
/// # Example
///
/// ```rust
/// use bgra_core::{PixelBufferRef, Rect};
///
/// let raw: Vec<u8> = (0..4 * 4 * 4).map(|i| i as u8).collect();
/// let view = PixelBufferRef::new(4, 4, 16, true, &raw).unwrap();
/// let inner = view.subview(Rect::new(1, 1, 2, 2)).unwrap();
/// assert_eq!(inner.pixel(0, 0), view.pixel(1, 1));
/// ```
#[derive(Clone, Copy)]
pub struct PixelBufferRef<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    stride: usize,
    has_alpha: bool,
}

impl<'a> PixelBufferRef<'a> {
    /// Wraps borrowed bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidStride`] if `stride < width * 4`
    /// - [`Error::BufferTooSmall`] if `data` cannot hold every row
    pub fn new(width: u32, height: u32, stride: usize, has_alpha: bool, data: &'a [u8]) -> Result<Self> {
        if stride < width as usize * BYTES_PER_PIXEL {
            return Err(Error::invalid_stride(stride, width));
        }
        let required = required_len(width, height, stride)?;
        if data.len() < required {
            return Err(Error::buffer_too_small(data.len(), required, width, height, stride));
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            has_alpha,
        })
    }

    /// Wraps packed bytes (`stride == width * 4`).
    pub fn packed(width: u32, height: u32, has_alpha: bool, data: &'a [u8]) -> Result<Self> {
        Self::new(width, height, width as usize * BYTES_PER_PIXEL, has_alpha, data)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes from the start of one row to the start of the next.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether alpha bytes carry information.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Rectangle covering the whole view.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns `true` if the view has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The underlying slice, starting at pixel (0, 0).
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The `width * 4` pixel bytes of row `y`, without padding.
    #[inline]
    pub fn row(&self, y: u32) -> &'a [u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.stride;
        &self.data[start..start + self.width as usize * BYTES_PER_PIXEL]
    }

    /// Pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Bgra {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let o = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// A view of `region`, sharing the same bytes and stride.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if `region` is not inside the view.
    pub fn subview(&self, region: Rect) -> Result<PixelBufferRef<'a>> {
        if !self.bounds().contains_rect(&region) {
            return Err(Error::invalid_region(region, self.width, self.height));
        }
        if region.is_empty() {
            return Ok(Self {
                data: &[],
                width: region.width,
                height: region.height,
                stride: self.stride,
                has_alpha: self.has_alpha,
            });
        }
        let start = region.y as usize * self.stride + region.x as usize * BYTES_PER_PIXEL;
        Ok(Self {
            data: &self.data[start..],
            width: region.width,
            height: region.height,
            stride: self.stride,
            has_alpha: self.has_alpha,
        })
    }

    /// Copies the view into a packed [`PixelBuffer`].
    pub fn to_buffer(&self) -> PixelBuffer {
        let mut out = PixelBuffer::new(self.width, self.height, self.has_alpha);
        for y in 0..self.height {
            out.row_mut(y).copy_from_slice(self.row(y));
        }
        out
    }
}

impl std::fmt::Debug for PixelBufferRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBufferRef")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("has_alpha", &self.has_alpha)
            .finish_non_exhaustive()
    }
}

impl<'a> From<&'a PixelBuffer> for PixelBufferRef<'a> {
    fn from(buffer: &'a PixelBuffer) -> Self {
        buffer.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let img = PixelBuffer::new(3, 2, true);
        assert_eq!(img.data().len(), 24);
        assert!(img.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_empty() {
        let img = PixelBuffer::empty();
        assert!(img.is_empty());
        assert_eq!(img.dimensions(), (0, 0));
        assert!(img.data().is_empty());
    }

    #[test]
    fn test_from_data_length_mismatch() {
        let err = PixelBuffer::from_data(2, 2, true, vec![0; 15]).unwrap_err();
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_ref_rejects_short_stride() {
        let raw = vec![0u8; 64];
        let err = PixelBufferRef::new(4, 2, 15, true, &raw).unwrap_err();
        assert!(matches!(err, Error::InvalidStride { min_stride: 16, .. }));
    }

    #[test]
    fn test_ref_last_row_needs_no_padding() {
        // Two rows, stride 12, width 2: 12 + 8 bytes is enough.
        let raw = vec![7u8; 20];
        let view = PixelBufferRef::new(2, 2, 12, false, &raw).unwrap();
        assert_eq!(view.row(1), &[7u8; 8]);
        assert!(PixelBufferRef::new(2, 2, 12, false, &raw[..19]).is_err());
    }

    #[test]
    fn test_strided_to_buffer_drops_padding() {
        let mut raw = vec![0xEEu8; 12 * 2];
        raw[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        raw[12..20].copy_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]);
        let owned = PixelBufferRef::new(2, 2, 12, true, &raw).unwrap().to_buffer();
        assert_eq!(owned.data(), &(1..=16).collect::<Vec<u8>>()[..]);
    }

    #[test]
    fn test_subview_out_of_bounds() {
        let img = PixelBuffer::new(4, 4, true);
        assert!(img.view().subview(Rect::new(2, 2, 3, 1)).is_err());
        assert!(img.view().subview(Rect::new(4, 4, 0, 0)).is_ok());
    }

    #[test]
    fn test_map_pixels() {
        let mut img = PixelBuffer::filled(2, 2, [1, 2, 3, 4], true);
        img.map_pixels(|[b, g, r, a]| [a, r, g, b]);
        assert!(img.pixels().all(|(_, _, px)| px == [4, 3, 2, 1]));
    }
}
