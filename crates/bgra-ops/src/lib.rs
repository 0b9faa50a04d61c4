//! # bgra-ops
//!
//! Resampling and compositing operations for BGRA8888 bitmaps.
//!
//! Sources are borrowed [`bgra_core::PixelBufferRef`] views, results are
//! owned, tightly packed [`bgra_core::PixelBuffer`]s. Buffers that carry
//! alpha hold premultiplied colour.
//!
//! # Modules
//!
//! - [`convolver`] - Fixed-point separable convolution engine
//! - [`resize_filter`] - Box and Lanczos3 weight tables
//! - [`resize`] - Image scaling, whole or by destination subset
//! - [`composite`] - Alpha blending and masking
//! - [`blur`] - Box blur with wraparound
//! - [`hsl`] - Hue, saturation and lightness shifts
//! - [`transform`] - Tiling, 2x downsampling and cropping
//! - `parallel` - Banded multi-threaded resize (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use bgra_core::PixelBuffer;
//! use bgra_ops::{resize, ResizeMethod};
//!
//! let src = PixelBuffer::filled(100, 50, [10, 20, 30, 255], false);
//! let thumb = resize(src.view(), ResizeMethod::Lanczos3, 40, 20);
//! assert_eq!(thumb.dimensions(), (40, 20));
//! ```
//!
//! # Common Operations
//!
//! ## Resize a dirty region
//!
//! ```rust,ignore
//! use bgra_ops::resize::{resize_subset, ResizeMethod};
//!
//! let tile = resize_subset(src.view(), ResizeMethod::Lanczos3, 1920, 1080, dirty)?;
//! ```
//!
//! ## Composite
//!
//! ```rust,ignore
//! use bgra_ops::composite::{blend, masked};
//!
//! let mixed = blend(a.view(), b.view(), 0.25)?;
//! let cut = masked(photo.view(), mask.view())?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blur;
pub mod composite;
pub mod convolver;
pub mod hsl;
pub mod resize;
pub mod resize_filter;
pub mod transform;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use resize::{resize, resize_subset};
pub use resize_filter::ResizeMethod;
