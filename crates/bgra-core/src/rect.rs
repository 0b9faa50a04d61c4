//! Axis-aligned pixel rectangles.
//!
//! [`Rect`] is used to name the part of a destination image that a
//! resampling call should actually compute, and to address sub-regions
//! of a [`PixelBuffer`](crate::PixelBuffer) when cropping.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) is the **top-left** corner
//! - X grows to the right, Y grows downward
//! - Left/top edges are inclusive, right/bottom edges are exclusive
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  subset  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use bgra_core::Rect;
//!
//! let dest = Rect::from_size(640, 480);
//! let subset = Rect::new(32, 16, 128, 64);
//! assert!(dest.contains_rect(&subset));
//! assert_eq!(subset.right(), 160);
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// A rectangle with zero width or height is empty.
///
/// # Example
///
/// ```rust
/// use bgra_core::Rect;
///
/// let rect = Rect::new(10, 20, 100, 50);
/// assert_eq!(rect.right(), 110);
/// assert_eq!(rect.bottom(), 70);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin covering `width` x `height`.
    ///
    /// ```rust
    /// use bgra_core::Rect;
    ///
    /// let rect = Rect::from_size(1920, 1080);
    /// assert_eq!((rect.x, rect.y), (0, 0));
    /// ```
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if this rectangle fully contains `other`.
    ///
    /// Edges are compared in `u64` so rectangles near `u32::MAX` do not
    /// wrap around.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x as u64 + other.width as u64 <= self.x as u64 + self.width as u64
            && other.y as u64 + other.height as u64 <= self.y as u64 + self.height as u64
    }

    /// Splits the rectangle into horizontal bands of at most `rows` rows.
    ///
    /// Bands keep the full width and are returned top to bottom. The last
    /// band holds the remainder.
    ///
    /// ```rust
    /// use bgra_core::Rect;
    ///
    /// let bands = Rect::new(4, 10, 8, 5).row_bands(2);
    /// assert_eq!(bands, vec![
    ///     Rect::new(4, 10, 8, 2),
    ///     Rect::new(4, 12, 8, 2),
    ///     Rect::new(4, 14, 8, 1),
    /// ]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `rows` is zero.
    pub fn row_bands(&self, rows: u32) -> Vec<Rect> {
        assert!(rows > 0, "band height must be > 0");
        let mut bands = Vec::with_capacity(self.height.div_ceil(rows) as usize);
        let mut y = self.y;
        while y < self.bottom() {
            let h = rows.min(self.bottom() - y);
            bands.push(Rect::new(self.x, y, self.width, h));
            y += h;
        }
        bands
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}
