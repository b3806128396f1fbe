//! The size model of column and row specifications.
//!
//! A [`Size`] is a small expression tree: constants convert through the
//! [`UnitConverter`], component sizes ask a [`Measure`] for the components of
//! a track, and bounded sizes clamp a basis between optional bounds.

use std::fmt;

use crate::measure::{Measure, MeasureMode};
use crate::types::{Axis, ComponentId};
use crate::units::{Unit, UnitConverter};

/// A length with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantSize {
    pub value: f64,
    pub unit: Unit,
}

impl ConstantSize {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn pixels(value: f64) -> Self {
        Self::new(value, Unit::Pixel)
    }

    pub const fn dialog_units(value: f64) -> Self {
        Self::new(value, Unit::DialogUnit)
    }

    /// Size in pixels along `axis`.
    pub fn pixel_size(&self, axis: Axis, converter: &UnitConverter) -> i32 {
        converter.to_pixels(self.value, self.unit, axis)
    }
}

impl fmt::Display for ConstantSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Sizes computed from the components in a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentSize {
    /// Largest minimum size
    Minimum,
    /// Largest preferred size
    Preferred,
    /// Preferred size that may shrink down to the minimum size
    Default,
}

impl ComponentSize {
    pub fn keyword(self) -> &'static str {
        match self {
            ComponentSize::Minimum => "min",
            ComponentSize::Preferred => "pref",
            ComponentSize::Default => "default",
        }
    }
}

impl fmt::Display for ComponentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A basis size clamped by optional lower and upper bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundedSize {
    pub basis: Size,
    pub lower: Option<Size>,
    pub upper: Option<Size>,
}

/// Size of a column or row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Size {
    Constant(ConstantSize),
    Component(ComponentSize),
    Bounded(Box<BoundedSize>),
}

impl Size {
    pub const MINIMUM: Size = Size::Component(ComponentSize::Minimum);
    pub const PREFERRED: Size = Size::Component(ComponentSize::Preferred);
    pub const DEFAULT: Size = Size::Component(ComponentSize::Default);
    pub const ZERO: Size = Size::Constant(ConstantSize::pixels(0.0));

    pub fn constant(value: f64, unit: Unit) -> Self {
        Size::Constant(ConstantSize::new(value, unit))
    }

    pub fn pixels(value: f64) -> Self {
        Size::Constant(ConstantSize::pixels(value))
    }

    pub fn dialog_units(value: f64) -> Self {
        Size::Constant(ConstantSize::dialog_units(value))
    }

    pub fn bounded(basis: Size, lower: Option<Size>, upper: Option<Size>) -> Self {
        Size::Bounded(Box::new(BoundedSize { basis, lower, upper }))
    }

    /// At least `lower`.
    pub fn at_least(basis: Size, lower: Size) -> Self {
        Self::bounded(basis, Some(lower), None)
    }

    /// At most `upper`.
    pub fn at_most(basis: Size, upper: Size) -> Self {
        Self::bounded(basis, None, Some(upper))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Size::Constant(_))
    }

    /// Whether the size never depends on components, bounds included.
    pub fn is_fixed(&self) -> bool {
        match self {
            Size::Constant(_) => true,
            Size::Component(_) => false,
            Size::Bounded(bounded) => {
                bounded.basis.is_fixed()
                    && bounded.lower.as_ref().map_or(true, Size::is_fixed)
                    && bounded.upper.as_ref().map_or(true, Size::is_fixed)
            }
        }
    }

    /// Whether the resolver may shrink this size below its preferred value
    /// when the container is too small.
    pub fn compressible(&self) -> bool {
        match self {
            Size::Component(ComponentSize::Default) => true,
            Size::Bounded(bounded) => bounded.basis.compressible(),
            _ => false,
        }
    }

    /// Resolve to pixels for a track holding `components`.
    ///
    /// Only single-span components belong in `components`; spanning
    /// components are accounted for by the resolver afterwards.
    pub fn maximum_size(&self, ctx: &SizeContext<'_>, components: &[ComponentId]) -> i32 {
        match self {
            Size::Constant(constant) => constant.pixel_size(ctx.axis, ctx.converter),
            Size::Component(ComponentSize::Minimum) => {
                ctx.largest(components, MeasureMode::Minimum)
            }
            Size::Component(ComponentSize::Preferred) => {
                ctx.largest(components, MeasureMode::Preferred)
            }
            Size::Component(ComponentSize::Default) => ctx.largest(components, ctx.default_mode),
            Size::Bounded(bounded) => {
                let mut size = bounded.basis.maximum_size(ctx, components);
                if let Some(lower) = &bounded.lower {
                    size = size.max(lower.maximum_size(ctx, components));
                }
                if let Some(upper) = &bounded.upper {
                    size = size.min(upper.maximum_size(ctx, components));
                }
                size
            }
        }
    }
}

impl From<ConstantSize> for Size {
    fn from(constant: ConstantSize) -> Self {
        Size::Constant(constant)
    }
}

impl From<ComponentSize> for Size {
    fn from(size: ComponentSize) -> Self {
        Size::Component(size)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Constant(constant) => constant.fmt(f),
            Size::Component(size) => size.fmt(f),
            Size::Bounded(bounded) => {
                f.write_str("[")?;
                if let Some(lower) = &bounded.lower {
                    write!(f, "{lower},")?;
                }
                write!(f, "{}", bounded.basis)?;
                if let Some(upper) = &bounded.upper {
                    write!(f, ",{upper}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Everything a size needs to resolve itself along one axis.
pub struct SizeContext<'a> {
    pub axis: Axis,
    pub converter: &'a UnitConverter,
    pub measure: &'a dyn Measure,
    /// Measure used for [`ComponentSize::Default`]: preferred for the
    /// preferred layout, minimum for the minimum layout.
    pub default_mode: MeasureMode,
}

impl<'a> SizeContext<'a> {
    pub fn new(axis: Axis, converter: &'a UnitConverter, measure: &'a dyn Measure) -> Self {
        Self {
            axis,
            converter,
            measure,
            default_mode: MeasureMode::Preferred,
        }
    }

    pub fn with_default_mode(mut self, mode: MeasureMode) -> Self {
        self.default_mode = mode;
        self
    }

    fn largest(&self, components: &[ComponentId], mode: MeasureMode) -> i32 {
        components
            .iter()
            .map(|&component| self.measure.measure(component, self.axis, mode))
            .max()
            .unwrap_or(0)
            .max(0)
    }
}
