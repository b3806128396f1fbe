//! Core value types shared by the size model, the parser and the resolver.

use std::fmt;

use smallvec::SmallVec;

/// One of the two grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Horizontal axis; tracks are columns.
    Column,
    /// Vertical axis; tracks are rows.
    Row,
}

impl Axis {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Column)
    }

    /// The other axis.
    pub fn orthogonal(self) -> Axis {
        match self {
            Axis::Column => Axis::Row,
            Axis::Row => Axis::Column,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Column => f.write_str("column"),
            Axis::Row => f.write_str("row"),
        }
    }
}

/// Alignment of a component inside its cell.
///
/// `Left`/`Right` only apply to columns and `Top`/`Bottom` only to rows;
/// `Fill` and `Center` apply to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Stretch to the full cell extent
    Fill,
    /// Anchor at the leading horizontal edge
    Left,
    /// Anchor at the trailing horizontal edge
    Right,
    /// Anchor at the leading vertical edge
    Top,
    /// Anchor at the trailing vertical edge
    Bottom,
    /// Center within the cell
    Center,
}

impl Alignment {
    /// Whether this alignment may be used on tracks of `axis`.
    pub fn is_valid_for(self, axis: Axis) -> bool {
        match self {
            Alignment::Fill | Alignment::Center => true,
            Alignment::Left | Alignment::Right => axis == Axis::Column,
            Alignment::Top | Alignment::Bottom => axis == Axis::Row,
        }
    }

    /// Default alignment of a track on `axis`.
    pub fn default_for(axis: Axis) -> Alignment {
        match axis {
            Axis::Column => Alignment::Fill,
            Axis::Row => Alignment::Center,
        }
    }

    /// Anchors at the leading edge (left or top).
    pub fn is_leading(self) -> bool {
        matches!(self, Alignment::Left | Alignment::Top)
    }

    /// Anchors at the trailing edge (right or bottom).
    pub fn is_trailing(self) -> bool {
        matches!(self, Alignment::Right | Alignment::Bottom)
    }

    /// Short form used when encoding specs.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Alignment::Fill => "f",
            Alignment::Left => "l",
            Alignment::Right => "r",
            Alignment::Top => "t",
            Alignment::Bottom => "b",
            Alignment::Center => "c",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Fill => "fill",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Top => "top",
            Alignment::Bottom => "bottom",
            Alignment::Center => "center",
        };
        f.write_str(name)
    }
}

/// Handle of a component managed by a layout.
///
/// The layout never owns widgets; the host toolkit maps its widgets to
/// handles and answers measurement requests for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Empty space around a component inside its cell, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    pub const fn uniform(amount: i32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// Sum of the leading and trailing insets along `axis`.
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Column => self.left + self.right,
            Axis::Row => self.top + self.bottom,
        }
    }

    /// Leading inset along `axis`.
    pub fn leading(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Column => self.left,
            Axis::Row => self.top,
        }
    }
}

/// 1-based track indices that must resolve to the same size.
pub type TrackGroup = SmallVec<[usize; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_axis_validity() {
        assert!(Alignment::Left.is_valid_for(Axis::Column));
        assert!(!Alignment::Left.is_valid_for(Axis::Row));
        assert!(Alignment::Bottom.is_valid_for(Axis::Row));
        assert!(!Alignment::Top.is_valid_for(Axis::Column));
        assert!(Alignment::Center.is_valid_for(Axis::Row));
        assert!(Alignment::Fill.is_valid_for(Axis::Column));
    }

    #[test]
    fn test_default_alignment_per_axis() {
        assert_eq!(Alignment::default_for(Axis::Column), Alignment::Fill);
        assert_eq!(Alignment::default_for(Axis::Row), Alignment::Center);
    }

    #[test]
    fn test_insets_along_axis() {
        let insets = Insets::new(1, 2, 3, 4);
        assert_eq!(insets.along(Axis::Column), 6);
        assert_eq!(insets.along(Axis::Row), 4);
        assert_eq!(insets.leading(Axis::Column), 2);
        assert_eq!(insets.leading(Axis::Row), 1);
    }
}
