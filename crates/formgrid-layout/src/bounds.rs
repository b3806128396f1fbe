//! Pixel rectangles and sizes.

use formgrid_core::Axis;
use glam::IVec2;

/// Axis-aligned rectangle in integer pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounds at the origin with the given size.
    pub const fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Create bounds from position and size vectors.
    pub fn from_vecs(position: IVec2, size: IVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Leading coordinate along `axis`.
    pub fn origin(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Column => self.x,
            Axis::Row => self.y,
        }
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Column => self.width,
            Axis::Row => self.height,
        }
    }

    /// Check if a point is inside the bounds.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether `other` lies completely inside these bounds.
    pub fn encloses(&self, other: &Bounds) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Width and height of a layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Column => self.width,
            Axis::Row => self.height,
        }
    }

    pub fn as_vec(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }
}

impl From<Dimension> for Bounds {
    fn from(size: Dimension) -> Self {
        Bounds::sized(size.width, size.height)
    }
}
