//! Error types for bgra-core operations.
//!
//! Errors here cover the ways a raw pixel buffer handed in by a caller can
//! be malformed. Geometry mistakes made by the caller (a subset outside the
//! destination, a pixel outside the image) are programming errors and are
//! asserted instead.
//!
//! # Usage
//!
//! ```rust
//! use bgra_core::{Error, PixelBufferRef};
//!
//! let data = vec![0u8; 15];
//! let err = PixelBufferRef::new(2, 2, 8, true, &data).unwrap_err();
//! assert!(matches!(err, Error::BufferTooSmall { .. }));
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while wrapping or building BGRA pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Stride is too small for the given width.
    ///
    /// Every row must hold at least `width * 4` bytes.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride in bytes
        stride: usize,
        /// Minimum required stride in bytes
        min_stride: usize,
        /// Image width in pixels
        width: u32,
    },

    /// Backing slice is shorter than the rows it must hold.
    #[error("buffer of {len} bytes is too small for {width}x{height} at stride {stride} (need {required})")]
    BufferTooSmall {
        /// Length of the provided slice
        len: usize,
        /// Bytes required by the geometry
        required: usize,
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
        /// Row stride in bytes
        stride: usize,
    },

    /// Width, height and stride overflow `usize` when multiplied out.
    #[error("dimensions {width}x{height} overflow the address space")]
    Overflow {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Region of interest extends beyond image bounds.
    #[error("region ({rx}, {ry}, {rw}x{rh}) exceeds image bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        rx: u32,
        /// Region Y origin
        ry: u32,
        /// Region width
        rw: u32,
        /// Region height
        rh: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidStride`] error.
    #[inline]
    pub fn invalid_stride(stride: usize, width: u32) -> Self {
        Self::InvalidStride {
            stride,
            min_stride: width as usize * crate::BYTES_PER_PIXEL,
            width,
        }
    }

    /// Creates an [`Error::BufferTooSmall`] error.
    #[inline]
    pub fn buffer_too_small(len: usize, required: usize, width: u32, height: u32, stride: usize) -> Self {
        Self::BufferTooSmall {
            len,
            required,
            width,
            height,
            stride,
        }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(region: crate::Rect, width: u32, height: u32) -> Self {
        Self::InvalidRegion {
            rx: region.x,
            ry: region.y,
            rw: region.width,
            rh: region.height,
            width,
            height,
        }
    }

    /// Returns `true` if this error describes a bad buffer layout.
    #[inline]
    pub fn is_layout_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidStride { .. } | Self::BufferTooSmall { .. } | Self::Overflow { .. }
        )
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::InvalidRegion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;

    #[test]
    fn test_invalid_stride_message() {
        let err = Error::invalid_stride(12, 4);
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("16"));
        assert!(err.is_layout_error());
    }

    #[test]
    fn test_invalid_region() {
        let err = Error::invalid_region(Rect::new(5, 5, 10, 10), 8, 8);
        assert!(err.is_bounds_error());
        assert!(!err.is_layout_error());
        assert!(err.to_string().contains("8x8"));
    }
}
