//! Geometric primitives for drawing-part positioning.
//!
//! All values are expressed in English Metric Units (EMU), the integer unit
//! used throughout DrawingML (914400 EMU per inch, 12700 EMU per point).
//!
//! # Overview
//!
//! - [`Point2D`] - An offset within the drawing (`a:off`)
//! - [`PositiveSize2D`] - An extent (`a:ext`)
//! - [`Transform2D`] - Offset and extent together (`xdr:xfrm`)

/// Number of EMU in one inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Number of EMU in one typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// A 2D offset in EMU.
///
/// # Examples
///
/// ```
/// # use sheetframe_core::geometry::Point2D;
/// let p = Point2D::new(10, 20);
/// assert_eq!(p.x(), 10);
/// assert_eq!(p.y(), 20);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point2D {
    x: i64,
    y: i64,
}

impl Point2D {
    /// Creates a new point from its coordinates.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the x coordinate.
    pub fn x(self) -> i64 {
        self.x
    }

    /// Returns the y coordinate.
    pub fn y(self) -> i64 {
        self.y
    }
}

/// A width/height pair in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PositiveSize2D {
    cx: i64,
    cy: i64,
}

impl PositiveSize2D {
    /// Creates a new extent.
    pub fn new(cx: i64, cy: i64) -> Self {
        Self { cx, cy }
    }

    /// Returns the horizontal extent.
    pub fn cx(self) -> i64 {
        self.cx
    }

    /// Returns the vertical extent.
    pub fn cy(self) -> i64 {
        self.cy
    }

    /// Returns true if both dimensions are zero.
    pub fn is_zero(self) -> bool {
        self.cx == 0 && self.cy == 0
    }
}

/// Offset and extent of a drawing object.
///
/// The default value is the all-zero transform a freshly created frame
/// carries.
///
/// # Examples
///
/// ```
/// # use sheetframe_core::geometry::{Point2D, PositiveSize2D, Transform2D};
/// let xfrm = Transform2D::default()
///     .with_offset(Point2D::new(5, 5))
///     .with_extent(PositiveSize2D::new(100, 50));
/// assert_eq!(xfrm.offset().x(), 5);
/// assert_eq!(xfrm.extent().cy(), 50);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Transform2D {
    offset: Point2D,
    extent: PositiveSize2D,
}

impl Transform2D {
    /// Creates a transform from an offset and an extent.
    pub fn new(offset: Point2D, extent: PositiveSize2D) -> Self {
        Self { offset, extent }
    }

    /// Sets the offset (builder style).
    pub fn with_offset(mut self, offset: Point2D) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the extent (builder style).
    pub fn with_extent(mut self, extent: PositiveSize2D) -> Self {
        self.extent = extent;
        self
    }

    pub fn offset(&self) -> Point2D {
        self.offset
    }

    pub fn extent(&self) -> PositiveSize2D {
        self.extent
    }
}
