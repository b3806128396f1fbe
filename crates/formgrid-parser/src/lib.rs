//! Parser for encoded formgrid specifications.
//!
//! This crate decodes the compact text form of column and row specs
//! (`"right:max(40dlu;pref):grow"`), lists of them with variables and
//! multipliers (`"pref, $lcgap, 2*(50dlu, 3dlu)"`), and cell constraints
//! (`"1, 3, 2, 1, left, top"`). Built on `nom`.

mod grammar;
mod lexer;
mod variables;

pub use grammar::{
    parse_cell_constraints, parse_size, parse_track_spec, parse_track_specs, ParseOptions,
    MAX_TRACKS,
};
pub use variables::LayoutMap;

use formgrid_core::{Axis, ParseError, TrackSpec};

/// Decode a single column spec with default options.
///
/// # Example
///
/// ```
/// use formgrid_core::{Alignment, Size};
///
/// let spec = formgrid_parser::parse_column_spec("right:pref:grow").unwrap();
/// assert_eq!(spec.alignment(), Alignment::Right);
/// assert_eq!(spec.size(), &Size::PREFERRED);
/// ```
pub fn parse_column_spec(input: &str) -> Result<TrackSpec, ParseError> {
    parse_track_spec(Axis::Column, input, &ParseOptions::default())
}

/// Decode a single row spec with default options.
pub fn parse_row_spec(input: &str) -> Result<TrackSpec, ParseError> {
    parse_track_spec(Axis::Row, input, &ParseOptions::default())
}

/// Decode a column spec list against `map`.
pub fn parse_column_specs(input: &str, map: &LayoutMap) -> Result<Vec<TrackSpec>, ParseError> {
    parse_track_specs(Axis::Column, input, map, &ParseOptions::default())
}

/// Decode a row spec list against `map`.
pub fn parse_row_specs(input: &str, map: &LayoutMap) -> Result<Vec<TrackSpec>, ParseError> {
    parse_track_specs(Axis::Row, input, map, &ParseOptions::default())
}
