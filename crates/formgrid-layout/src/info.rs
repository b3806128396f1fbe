//! Results of a layout pass.

use formgrid_core::{Axis, ComponentId};
use indexmap::IndexMap;

use crate::bounds::{Bounds, Dimension};

/// Resolved track boundaries.
///
/// `column_origins[i]` is the x coordinate where column `i + 1` begins; the
/// last entry is the right edge of the grid. Rows likewise. An axis without
/// tracks holds a single origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutInfo {
    pub column_origins: Vec<i32>,
    pub row_origins: Vec<i32>,
}

impl LayoutInfo {
    pub(crate) fn new(column_origins: Vec<i32>, row_origins: Vec<i32>) -> Self {
        Self {
            column_origins,
            row_origins,
        }
    }

    pub fn origins(&self, axis: Axis) -> &[i32] {
        match axis {
            Axis::Column => &self.column_origins,
            Axis::Row => &self.row_origins,
        }
    }

    /// Left edge of the grid.
    pub fn x(&self) -> i32 {
        self.column_origins.first().copied().unwrap_or_default()
    }

    /// Top edge of the grid.
    pub fn y(&self) -> i32 {
        self.row_origins.first().copied().unwrap_or_default()
    }

    pub fn width(&self) -> i32 {
        span_of(&self.column_origins)
    }

    pub fn height(&self) -> i32 {
        span_of(&self.row_origins)
    }

    pub fn size(&self) -> Dimension {
        Dimension::new(self.width(), self.height())
    }

    /// Width of the 1-based column `index`, if it exists.
    pub fn column_size(&self, index: usize) -> Option<i32> {
        track_size(&self.column_origins, index)
    }

    /// Height of the 1-based row `index`, if it exists.
    pub fn row_size(&self, index: usize) -> Option<i32> {
        track_size(&self.row_origins, index)
    }

    pub fn track_size(&self, axis: Axis, index: usize) -> Option<i32> {
        track_size(self.origins(axis), index)
    }

    /// Sizes of all tracks along `axis` in order.
    pub fn track_sizes(&self, axis: Axis) -> Vec<i32> {
        self.origins(axis)
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }

    /// Bounds of the cell area covering `span` tracks from `origin` on both axes.
    pub fn cell_bounds(&self, column: usize, row: usize, column_span: usize, row_span: usize) -> Option<Bounds> {
        let x = *self.column_origins.get(column.checked_sub(1)?)?;
        let right = *self.column_origins.get(column - 1 + column_span)?;
        let y = *self.row_origins.get(row.checked_sub(1)?)?;
        let bottom = *self.row_origins.get(row - 1 + row_span)?;
        Some(Bounds::new(x, y, right - x, bottom - y))
    }
}

fn span_of(origins: &[i32]) -> i32 {
    match (origins.first(), origins.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0,
    }
}

fn track_size(origins: &[i32], index: usize) -> Option<i32> {
    let start = *origins.get(index.checked_sub(1)?)?;
    let end = *origins.get(index)?;
    Some(end - start)
}

/// Track boundaries plus the bounds of every placed component.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub info: LayoutInfo,
    /// Component bounds in placement order.
    pub components: IndexMap<ComponentId, Bounds>,
}

impl Layout {
    pub fn bounds(&self, component: ComponentId) -> Option<Bounds> {
        self.components.get(&component).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, Bounds)> + '_ {
        self.components.iter().map(|(&id, &bounds)| (id, bounds))
    }
}
