//! Column and row specifications.

use std::fmt;

use crate::errors::LayoutError;
use crate::size::Size;
use crate::types::{Alignment, Axis};

/// Resize weight of tracks that never grow.
pub const NO_GROW: f64 = 0.0;

/// Resize weight assigned by a bare `grow`.
pub const DEFAULT_GROW: f64 = 1.0;

/// Specification of one column or row: default alignment, size and resize weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TrackSpecFields"))]
pub struct TrackSpec {
    axis: Axis,
    alignment: Alignment,
    size: Size,
    resize_weight: f64,
}

/// Deserialized fields, checked by [`TrackSpec::new`] before use.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TrackSpecFields {
    axis: Axis,
    alignment: Alignment,
    size: Size,
    resize_weight: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<TrackSpecFields> for TrackSpec {
    type Error = LayoutError;

    fn try_from(fields: TrackSpecFields) -> Result<Self, Self::Error> {
        Self::new(fields.axis, fields.alignment, fields.size, fields.resize_weight)
    }
}

impl TrackSpec {
    /// Create a spec, validating the alignment and the resize weight.
    pub fn new(
        axis: Axis,
        alignment: Alignment,
        size: Size,
        resize_weight: f64,
    ) -> Result<Self, LayoutError> {
        if !alignment.is_valid_for(axis) {
            return Err(LayoutError::AlignmentAxisMismatch {
                axis,
                alignment: alignment.to_string(),
            });
        }
        if !resize_weight.is_finite() || resize_weight < 0.0 {
            return Err(LayoutError::NegativeResizeWeight {
                weight: resize_weight,
            });
        }
        Ok(Self {
            axis,
            alignment,
            size,
            resize_weight,
        })
    }

    /// A non-growing column with the default column alignment.
    pub fn column(size: Size) -> Self {
        Self {
            axis: Axis::Column,
            alignment: Alignment::default_for(Axis::Column),
            size,
            resize_weight: NO_GROW,
        }
    }

    /// A non-growing row with the default row alignment.
    pub fn row(size: Size) -> Self {
        Self {
            axis: Axis::Row,
            alignment: Alignment::default_for(Axis::Row),
            size,
            resize_weight: NO_GROW,
        }
    }

    /// A zero-sized track that absorbs extra space.
    pub fn glue(axis: Axis) -> Self {
        Self {
            axis,
            alignment: Alignment::default_for(axis),
            size: Size::ZERO,
            resize_weight: DEFAULT_GROW,
        }
    }

    pub fn with_alignment(self, alignment: Alignment) -> Result<Self, LayoutError> {
        Self::new(self.axis, alignment, self.size, self.resize_weight)
    }

    pub fn with_resize_weight(self, weight: f64) -> Result<Self, LayoutError> {
        Self::new(self.axis, self.alignment, self.size, weight)
    }

    /// Shorthand for a resize weight of [`DEFAULT_GROW`].
    pub fn grow(mut self) -> Self {
        self.resize_weight = DEFAULT_GROW;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn size(&self) -> &Size {
        &self.size
    }

    pub fn resize_weight(&self) -> f64 {
        self.resize_weight
    }

    pub fn can_grow(&self) -> bool {
        self.resize_weight != NO_GROW
    }
}

impl fmt::Display for TrackSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alignment != Alignment::default_for(self.axis) {
            write!(f, "{}:", self.alignment.abbreviation())?;
        }
        write!(f, "{}", self.size)?;
        if self.resize_weight == DEFAULT_GROW {
            f.write_str(":g")?;
        } else if self.resize_weight != NO_GROW {
            write!(f, ":g({})", self.resize_weight)?;
        }
        Ok(())
    }
}
