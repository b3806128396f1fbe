//! Error types for formgrid.

use thiserror::Error;

use crate::types::Axis;

/// Top-level error type for formgrid.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors while decoding encoded column, row or cell specifications.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Illegal {axis} specification '{input}': {reason}")]
    MalformedSpec {
        axis: Axis,
        input: String,
        reason: String,
    },

    #[error("Unknown unit '{unit}' in '{input}'")]
    UnknownUnit { unit: String, input: String },

    #[error("Invalid number '{value}'")]
    InvalidNumber { value: String },

    #[error("Unknown {axis} alignment '{token}'")]
    UnknownAlignment { axis: Axis, token: String },

    #[error("Invalid resize weight '{token}': {reason}")]
    InvalidResizeWeight { token: String, reason: String },

    #[error(
        "Illegal bounded size '{input}'. Must be one of: [const,logical], [logical,const], \
         [const,logical,const], max(const;logical) or min(logical;const)"
    )]
    IllegalBoundedSize { input: String },

    #[error("Unknown {axis} variable '${name}'")]
    MissingVariable { axis: Axis, name: String },

    #[error("Recursive {axis} variable '${name}'")]
    RecursiveVariable { axis: Axis, name: String },

    #[error("Illegal multiplier expression '{input}': {reason}")]
    MalformedMultiplier { input: String, reason: String },

    #[error("Illegal cell constraints '{input}': {reason}")]
    MalformedCellConstraints { input: String, reason: String },
}

/// Errors while mutating a grid definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("The {axis} span must be at least 1, found {span}")]
    InvalidSpan { axis: Axis, span: usize },

    #[error("The {axis} origin must be at least 1, found {origin}")]
    InvalidOrigin { axis: Axis, origin: usize },

    #[error("The {axis} range {start}..={end} exceeds the {axis} count {count}")]
    PlacementOutOfRange {
        axis: Axis,
        start: usize,
        end: usize,
        count: usize,
    },

    #[error("The {axis} index {index} must be within [1, {count}]")]
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        count: usize,
    },

    #[error("Invalid {axis} group index {index}; it must be within [1, {count}]")]
    InvalidGroupIndex {
        axis: Axis,
        index: usize,
        count: usize,
    },

    #[error("The removed {axis} {index} must not contain component origins")]
    TrackHoldsComponent { axis: Axis, index: usize },

    #[error("The removed {axis} index {index} must not be grouped")]
    TrackIsGrouped { axis: Axis, index: usize },

    #[error("The resize weight must be a finite, non-negative number, found {weight}")]
    NegativeResizeWeight { weight: f64 },

    #[error("The alignment {alignment} cannot be used on the {axis} axis")]
    AlignmentAxisMismatch { axis: Axis, alignment: String },

    #[error("The {axis} spec {index} must match the axis it is stored on")]
    SpecAxisMismatch { axis: Axis, index: usize },

    #[error("Unknown component {component}")]
    UnknownComponent { component: String },
}
