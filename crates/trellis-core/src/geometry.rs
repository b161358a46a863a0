//! Geometry value types.
//!
//! All lengths are device-independent pixels stored as `f64`. A [`Size`]
//! component may be `f64::INFINITY` when used as a measurement hint, meaning
//! the axis is unconstrained. Arranged rectangles are always finite.

use glam::DVec2;

/// A position in the parent's client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Unconstrained on both axes.
    pub const INFINITY: Size = Size {
        width: f64::INFINITY,
        height: f64::INFINITY,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

impl From<DVec2> for Size {
    fn from(v: DVec2) -> Self {
        Self {
            width: v.x,
            height: v.y,
        }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its position and size.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle at `origin` with the given size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create a rectangle from position and size vectors.
    pub fn from_vecs(position: DVec2, size: DVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the right edge (left + width).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Get the bottom edge (top + height).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// The same rectangle with negative width/height clamped to zero.
    pub fn clamped(self) -> Rect {
        Rect::new(self.left, self.top, self.width.max(0.0), self.height.max(0.0))
    }

    /// Move the rectangle by `offset`.
    pub fn offset(self, offset: Point) -> Rect {
        Rect::new(self.left + offset.x, self.top + offset.y, self.width, self.height)
    }

    /// Check if a point is inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Compute union (bounding box) with another rectangle.
    pub fn union(&self, other: &Rect) -> Rect {
        let x1 = self.left.min(other.left);
        let y1 = self.top.min(other.top);
        let x2 = self.right().max(other.right());
        let y2 = self.bottom().max(other.bottom());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

/// Edge thickness, used for margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create uniform thickness.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Create symmetric thickness.
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Total horizontal thickness.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical thickness.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Subtract the thickness from `size`, clamping at zero.
    ///
    /// Infinite components stay infinite.
    pub fn shrink(&self, size: Size) -> Size {
        Size::new(
            (size.width - self.horizontal()).max(0.0),
            (size.height - self.vertical()).max(0.0),
        )
    }

    /// Add the thickness to `size`.
    pub fn grow(&self, size: Size) -> Size {
        Size::new(size.width + self.horizontal(), size.height + self.vertical())
    }
}
