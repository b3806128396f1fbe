//! Cell constraints: where a component sits in the grid and how it is aligned.

use std::fmt;

use crate::errors::LayoutError;
use crate::types::{Alignment, Axis, Insets};

/// Placement of one component: 1-based origin, span, alignment overrides and insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellConstraints {
    pub column: usize,
    pub row: usize,
    pub column_span: usize,
    pub row_span: usize,
    /// Overrides the column's default alignment
    pub h_align: Option<Alignment>,
    /// Overrides the row's default alignment
    pub v_align: Option<Alignment>,
    pub insets: Insets,
}

impl CellConstraints {
    /// A single cell.
    pub fn xy(column: usize, row: usize) -> Self {
        Self::xywh(column, row, 1, 1)
    }

    /// A cell range of `column_span` columns and `row_span` rows.
    pub fn xywh(column: usize, row: usize, column_span: usize, row_span: usize) -> Self {
        Self {
            column,
            row,
            column_span,
            row_span,
            h_align: None,
            v_align: None,
            insets: Insets::default(),
        }
    }

    /// A single-row range spanning `column_span` columns.
    pub fn xyw(column: usize, row: usize, column_span: usize) -> Self {
        Self::xywh(column, row, column_span, 1)
    }

    pub fn with_alignment(mut self, h_align: Alignment, v_align: Alignment) -> Self {
        self.h_align = Some(h_align);
        self.v_align = Some(v_align);
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn origin(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column => self.column,
            Axis::Row => self.row,
        }
    }

    pub fn span(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column => self.column_span,
            Axis::Row => self.row_span,
        }
    }

    /// Last track covered along `axis`, inclusive.
    pub fn end(&self, axis: Axis) -> usize {
        self.origin(axis) + self.span(axis).saturating_sub(1)
    }

    pub fn alignment(&self, axis: Axis) -> Option<Alignment> {
        match axis {
            Axis::Column => self.h_align,
            Axis::Row => self.v_align,
        }
    }

    pub(crate) fn origin_mut(&mut self, axis: Axis) -> &mut usize {
        match axis {
            Axis::Column => &mut self.column,
            Axis::Row => &mut self.row,
        }
    }

    pub(crate) fn span_mut(&mut self, axis: Axis) -> &mut usize {
        match axis {
            Axis::Column => &mut self.column_span,
            Axis::Row => &mut self.row_span,
        }
    }

    /// Shift this placement for a track inserted at `index` along `axis`.
    ///
    /// Placements starting at or after the index move by one; placements
    /// spanning across it widen by one.
    pub fn track_inserted(&mut self, axis: Axis, index: usize) {
        if self.origin(axis) >= index {
            *self.origin_mut(axis) += 1;
        } else if self.end(axis) >= index {
            *self.span_mut(axis) += 1;
        }
    }

    /// Shift this placement for the track at `index` being removed.
    ///
    /// Fails if the placement starts in the removed track.
    pub fn track_removed(&mut self, axis: Axis, index: usize) -> Result<(), LayoutError> {
        if self.origin(axis) == index {
            return Err(LayoutError::TrackHoldsComponent { axis, index });
        }
        if self.origin(axis) > index {
            *self.origin_mut(axis) -= 1;
        } else if self.end(axis) >= index {
            *self.span_mut(axis) -= 1;
        }
        Ok(())
    }

    /// Check the placement against the track counts of a grid.
    pub fn validate(&self, column_count: usize, row_count: usize) -> Result<(), LayoutError> {
        for (axis, count) in [(Axis::Column, column_count), (Axis::Row, row_count)] {
            let origin = self.origin(axis);
            let span = self.span(axis);
            if origin == 0 {
                return Err(LayoutError::InvalidOrigin { axis, origin });
            }
            if span == 0 {
                return Err(LayoutError::InvalidSpan { axis, span });
            }
            if self.end(axis) > count {
                return Err(LayoutError::PlacementOutOfRange {
                    axis,
                    start: origin,
                    end: self.end(axis),
                    count,
                });
            }
            if let Some(alignment) = self.alignment(axis) {
                if !alignment.is_valid_for(axis) {
                    return Err(LayoutError::AlignmentAxisMismatch {
                        axis,
                        alignment: alignment.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for CellConstraints {
    fn default() -> Self {
        Self::xy(1, 1)
    }
}

impl fmt::Display for CellConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.column, self.row, self.column_span, self.row_span
        )?;
        if self.h_align.is_some() || self.v_align.is_some() {
            let encode = |alignment: Option<Alignment>| {
                alignment.map_or_else(|| "default".to_string(), |alignment| alignment.to_string())
            };
            write!(f, ", {}, {}", encode(self.h_align), encode(self.v_align))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_in_range() {
        assert!(CellConstraints::xy(1, 1).validate(1, 1).is_ok());
        assert!(CellConstraints::xywh(2, 1, 2, 3).validate(3, 3).is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_span() {
        let err = CellConstraints::xyw(2, 1, 3).validate(3, 1).unwrap_err();
        assert_eq!(
            err,
            LayoutError::PlacementOutOfRange {
                axis: Axis::Column,
                start: 2,
                end: 4,
                count: 3,
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_origin_and_span() {
        assert!(matches!(
            CellConstraints::xy(0, 1).validate(2, 2),
            Err(LayoutError::InvalidOrigin { axis: Axis::Column, .. })
        ));
        assert!(matches!(
            CellConstraints::xywh(1, 1, 1, 0).validate(2, 2),
            Err(LayoutError::InvalidSpan { axis: Axis::Row, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_foreign_alignment() {
        let cc = CellConstraints::xy(1, 1).with_alignment(Alignment::Top, Alignment::Center);
        assert!(cc.validate(1, 1).is_err());
    }

    #[test]
    fn test_track_inserted_shifts_and_widens() {
        let mut after = CellConstraints::xy(3, 1);
        after.track_inserted(Axis::Column, 2);
        assert_eq!(after.column, 4);

        let mut across = CellConstraints::xyw(1, 1, 3);
        across.track_inserted(Axis::Column, 2);
        assert_eq!((across.column, across.column_span), (1, 4));

        let mut before = CellConstraints::xy(1, 1);
        before.track_inserted(Axis::Column, 2);
        assert_eq!((before.column, before.column_span), (1, 1));
    }

    #[test]
    fn test_track_removed() {
        let mut origin = CellConstraints::xy(2, 1);
        assert_eq!(
            origin.track_removed(Axis::Column, 2),
            Err(LayoutError::TrackHoldsComponent {
                axis: Axis::Column,
                index: 2
            })
        );

        let mut across = CellConstraints::xywh(1, 1, 1, 3);
        across.track_removed(Axis::Row, 2).unwrap();
        assert_eq!((across.row, across.row_span), (1, 2));

        let mut after = CellConstraints::xy(1, 4);
        after.track_removed(Axis::Row, 2).unwrap();
        assert_eq!(after.row, 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellConstraints::xy(2, 3).to_string(), "2, 3, 1, 1");
        let cc = CellConstraints::xyw(1, 1, 2).with_alignment(Alignment::Right, Alignment::Top);
        assert_eq!(cc.to_string(), "1, 1, 2, 1, right, top");

        let cc = CellConstraints {
            v_align: Some(Alignment::Top),
            ..CellConstraints::xy(1, 1)
        };
        assert_eq!(cc.to_string(), "1, 1, 1, 1, default, top");
    }
}
