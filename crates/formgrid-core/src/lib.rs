//! Core types, size model, and unit conversion for formgrid layouts.
//!
//! This crate provides the foundational types used across the other formgrid crates:
//! - Value types (axes, alignments, cell constraints, track groups)
//! - The size model (constant, component-measured and bounded sizes)
//! - Column and row specifications
//! - Unit conversion, including font-relative dialog units
//! - Platform layout style (default gaps and margins)
//! - Error types

pub mod cell;
pub mod errors;
pub mod measure;
pub mod size;
pub mod style;
pub mod track;
pub mod types;
pub mod units;

pub use cell::*;
pub use errors::*;
pub use measure::*;
pub use size::*;
pub use style::*;
pub use track::*;
pub use types::*;
pub use units::*;
