//! # bgra-core
//!
//! Core types for BGRA8888 bitmap processing.
//!
//! - [`PixelBuffer`] - Owned, tightly packed image returned by operations
//! - [`PixelBufferRef`] - Borrowed, possibly strided input view
//! - [`Rect`] - Destination subsets and crop regions
//! - [`pixel`] - Channel layout and premultiplication helpers
//! - [`Error`] - Buffer layout errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The operation crate builds on
//! it:
//!
//! ```text
//! bgra-core (this crate)
//!    ^
//!    |
//!    +-- bgra-ops (resampling, compositing)
//! ```
//!
//! ## Pixel Convention
//!
//! Bytes are blue, green, red, alpha in memory order. Buffers that carry
//! alpha hold premultiplied colour; buffers that do not are opaque and
//! their alpha bytes are 255.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;
pub mod rect;

// Re-exports for convenience
pub use buffer::{PixelBuffer, PixelBufferRef};
pub use error::{Error, Result};
pub use pixel::{Bgra, BYTES_PER_PIXEL};
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use bgra_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{PixelBuffer, PixelBufferRef};
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{Bgra, BYTES_PER_PIXEL};
    pub use crate::rect::Rect;
}
