//! Grammar rules for encoded column, row and cell specifications.
//!
//! A track spec reads `[alignment:]size[:resize]`. Lists of specs are comma
//! separated and may repeat a group with `n*(...)`. Decoding is ASCII
//! case-insensitive and numbers always use `.` as decimal separator.

use nom::combinator::all_consuming;

use formgrid_core::{
    Alignment, Axis, CellConstraints, ComponentSize, ParseError, Size, TrackSpec, Unit,
    DEFAULT_GROW, NO_GROW,
};

use crate::lexer::*;
use crate::variables::LayoutMap;

/// Most specs a single list may expand to.
pub const MAX_TRACKS: usize = 4096;

/// Options that affect decoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParseOptions {
    /// Unit of numbers written without a suffix
    pub default_unit: Unit,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_unit: Unit::DialogUnit,
        }
    }
}

/// Decode a single column or row spec.
pub fn parse_track_spec(
    axis: Axis,
    input: &str,
    options: &ParseOptions,
) -> Result<TrackSpec, ParseError> {
    let lowered = input.trim().to_ascii_lowercase();
    SpecParser::new(axis, &lowered, options).track_spec()
}

/// Decode a comma separated list of column or row specs.
///
/// Variables are expanded from `map` first, then multipliers.
pub fn parse_track_specs(
    axis: Axis,
    input: &str,
    map: &LayoutMap,
    options: &ParseOptions,
) -> Result<Vec<TrackSpec>, ParseError> {
    let expanded = map.expand(axis, input)?.to_ascii_lowercase();
    let mut specs = Vec::new();
    collect_specs(axis, &expanded, options, &mut specs)?;
    Ok(specs)
}

/// Decode a single size expression such as `pref`, `3dlu` or `[40dlu,pref]`.
pub fn parse_size(axis: Axis, input: &str, options: &ParseOptions) -> Result<Size, ParseError> {
    let lowered = input.trim().to_ascii_lowercase();
    SpecParser::new(axis, &lowered, options).size(&lowered)
}

fn collect_specs(
    axis: Axis,
    input: &str,
    options: &ParseOptions,
    specs: &mut Vec<TrackSpec>,
) -> Result<(), ParseError> {
    if input.trim().is_empty() {
        return Ok(());
    }

    for item in split_top_level(input, ',') {
        if item.is_empty() {
            return Err(ParseError::MalformedSpec {
                axis,
                input: input.to_string(),
                reason: "empty element in spec list".to_string(),
            });
        }

        match multiplier(item) {
            Ok((body, count)) => {
                if count == 0 {
                    return Err(ParseError::MalformedMultiplier {
                        input: item.to_string(),
                        reason: "the multiplier must be at least 1".to_string(),
                    });
                }
                let body = body.trim();
                let group = match body.strip_prefix('(') {
                    Some(inner) => inner.strip_suffix(')').ok_or_else(|| {
                        ParseError::MalformedMultiplier {
                            input: item.to_string(),
                            reason: "missing closing parenthesis".to_string(),
                        }
                    })?,
                    None => body,
                };
                let mut repeated = Vec::new();
                collect_specs(axis, group, options, &mut repeated)?;
                if repeated.is_empty() {
                    return Err(ParseError::MalformedMultiplier {
                        input: item.to_string(),
                        reason: "nothing to repeat".to_string(),
                    });
                }
                let total = count
                    .checked_mul(repeated.len())
                    .and_then(|added| added.checked_add(specs.len()))
                    .filter(|&total| total <= MAX_TRACKS);
                if total.is_none() {
                    return Err(ParseError::MalformedMultiplier {
                        input: item.to_string(),
                        reason: format!("expands to more than {MAX_TRACKS} specs"),
                    });
                }
                for _ in 0..count {
                    specs.extend(repeated.iter().cloned());
                }
            }
            Err(_) => specs.push(SpecParser::new(axis, item, options).track_spec()?),
        }
    }
    Ok(())
}

/// Parser for one lowercase spec.
struct SpecParser<'a> {
    axis: Axis,
    input: &'a str,
    options: &'a ParseOptions,
}

impl<'a> SpecParser<'a> {
    fn new(axis: Axis, input: &'a str, options: &'a ParseOptions) -> Self {
        Self { axis, input, options }
    }

    fn malformed(&self, reason: impl Into<String>) -> ParseError {
        ParseError::MalformedSpec {
            axis: self.axis,
            input: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn track_spec(&self) -> Result<TrackSpec, ParseError> {
        let tokens = split_top_level(self.input, ':');
        let default_alignment = Alignment::default_for(self.axis);

        let (alignment, size, weight) = match tokens.as_slice() {
            [size] => (default_alignment, self.size(size)?, NO_GROW),
            [first, second] => match self.alignment(first)? {
                Some(alignment) => (alignment, self.size(second)?, NO_GROW),
                None => (default_alignment, self.size(first)?, self.resize_weight(second)?),
            },
            [alignment, size, weight] => {
                let alignment = self.alignment(alignment)?.ok_or_else(|| {
                    ParseError::UnknownAlignment {
                        axis: self.axis,
                        token: alignment.to_string(),
                    }
                })?;
                (alignment, self.size(size)?, self.resize_weight(weight)?)
            }
            _ => return Err(self.malformed("expected [alignment:]size[:resize]")),
        };

        TrackSpec::new(self.axis, alignment, size, weight).map_err(|err| self.malformed(err.to_string()))
    }

    /// Decode an alignment token.
    ///
    /// Returns `Ok(None)` for tokens that are not alignments at all, and an
    /// error for alignments that belong to the other axis.
    fn alignment(&self, token: &str) -> Result<Option<Alignment>, ParseError> {
        let Some(alignment) = alignment_token(token) else {
            return Ok(None);
        };
        if alignment.is_valid_for(self.axis) {
            Ok(Some(alignment))
        } else {
            Err(ParseError::UnknownAlignment {
                axis: self.axis,
                token: token.to_string(),
            })
        }
    }

    fn size(&self, token: &str) -> Result<Size, ParseError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(self.malformed("missing size"));
        }

        if token.starts_with('[') {
            return self.bracketed_size(token);
        }
        if token.starts_with("max(") || token.starts_with("min(") {
            return self.legacy_bounded_size(token);
        }
        self.atomic_size(token)
    }

    /// A constant or a component size keyword.
    fn atomic_size(&self, token: &str) -> Result<Size, ParseError> {
        let token = token.trim();
        if let Some(size) = component_size_token(token) {
            return Ok(Size::Component(size));
        }

        let (value, suffix) = match all_consuming(number_with_unit)(token) {
            Ok((_, parts)) => parts,
            Err(_) => return Err(self.malformed(format!("illegal size '{token}'"))),
        };
        let value: f64 = value.parse().map_err(|_| ParseError::InvalidNumber {
            value: value.to_string(),
        })?;
        let unit = if suffix.is_empty() {
            self.options.default_unit
        } else {
            Unit::from_abbreviation(suffix).ok_or_else(|| ParseError::UnknownUnit {
                unit: suffix.to_string(),
                input: token.to_string(),
            })?
        };
        Ok(Size::constant(value, unit))
    }

    /// `max(a;b)` is at least the constant, `min(a;b)` at most the constant.
    fn legacy_bounded_size(&self, token: &str) -> Result<Size, ParseError> {
        let illegal = || ParseError::IllegalBoundedSize {
            input: token.to_string(),
        };
        let (_, (function, first, second)) = all_consuming(legacy_bound)(token).map_err(|_| illegal())?;
        let first = self.atomic_size(first)?;
        let second = self.atomic_size(second)?;

        let (basis, constant) = match (first.is_constant(), second.is_constant()) {
            (true, false) => (second, first),
            (false, true) => (first, second),
            _ => return Err(illegal()),
        };

        if function == "max" {
            Ok(Size::at_least(basis, constant))
        } else {
            Ok(Size::at_most(basis, constant))
        }
    }

    /// `[const,logical]`, `[logical,const]` or `[const,logical,const]`.
    fn bracketed_size(&self, token: &str) -> Result<Size, ParseError> {
        let illegal = || ParseError::IllegalBoundedSize {
            input: token.to_string(),
        };
        let (_, body) = all_consuming(bracketed)(token).map_err(|_| illegal())?;
        let parts: Vec<&str> = body
            .split(|c: char| c == ',' || c == ';')
            .map(str::trim)
            .collect();

        let (lower, basis, upper) = match parts.as_slice() {
            [first, second] => {
                let first = self.atomic_size(first)?;
                let second = self.atomic_size(second)?;
                if first.is_constant() {
                    (Some(first), second, None)
                } else {
                    (None, first, Some(second))
                }
            }
            [lower, basis, upper] => (
                Some(self.atomic_size(lower)?),
                self.atomic_size(basis)?,
                Some(self.atomic_size(upper)?),
            ),
            _ => return Err(illegal()),
        };

        let bounds_are_constant = lower.as_ref().map_or(true, Size::is_constant)
            && upper.as_ref().map_or(true, Size::is_constant);
        if basis.is_constant() || !bounds_are_constant {
            return Err(illegal());
        }
        Ok(Size::bounded(basis, lower, upper))
    }

    fn resize_weight(&self, token: &str) -> Result<f64, ParseError> {
        let token = token.trim();
        match token {
            "g" | "grow" => return Ok(DEFAULT_GROW),
            "n" | "none" | "nogrow" => return Ok(NO_GROW),
            _ => {}
        }

        let text = all_consuming(call("grow"))(token)
            .or_else(|_| all_consuming(call("g"))(token))
            .map(|(_, args)| args.trim())
            .unwrap_or(token);

        let invalid = |reason: &str| ParseError::InvalidResizeWeight {
            token: token.to_string(),
            reason: reason.to_string(),
        };
        let (_, number) = all_consuming(signed_number)(text).map_err(|_| invalid("not a number"))?;
        let weight: f64 = number.parse().map_err(|_| invalid("not a number"))?;
        if weight < 0.0 {
            return Err(invalid("the resize weight must not be negative"));
        }
        Ok(weight)
    }
}

fn alignment_token(token: &str) -> Option<Alignment> {
    let alignment = match token.trim() {
        "f" | "fill" => Alignment::Fill,
        "l" | "left" => Alignment::Left,
        "r" | "right" => Alignment::Right,
        "t" | "top" => Alignment::Top,
        "b" | "bottom" => Alignment::Bottom,
        "c" | "center" => Alignment::Center,
        _ => return None,
    };
    Some(alignment)
}

fn component_size_token(token: &str) -> Option<ComponentSize> {
    let size = match token {
        "m" | "min" => ComponentSize::Minimum,
        "p" | "pref" => ComponentSize::Preferred,
        "d" | "default" => ComponentSize::Default,
        _ => return None,
    };
    Some(size)
}

/// Decode encoded cell constraints.
///
/// Accepted forms are `"col, row"`, `"col, row, colSpan, rowSpan"`, each
/// optionally followed by `"hAlign, vAlign"`. The alignment `default` (`d`)
/// keeps the track's own alignment.
pub fn parse_cell_constraints(input: &str) -> Result<CellConstraints, ParseError> {
    let lowered = input.trim().to_ascii_lowercase();
    let malformed = |reason: &str| ParseError::MalformedCellConstraints {
        input: input.to_string(),
        reason: reason.to_string(),
    };
    let parts: Vec<&str> = lowered.split(',').map(str::trim).collect();

    let int = |token: &str| -> Result<usize, ParseError> {
        all_consuming(integer)(token)
            .map(|(_, value)| value)
            .map_err(|_| malformed("expected an integer"))
    };
    let align = |token: &str, axis: Axis| -> Result<Option<Alignment>, ParseError> {
        if token == "d" || token == "default" {
            return Ok(None);
        }
        match alignment_token(token) {
            Some(alignment) if alignment.is_valid_for(axis) => Ok(Some(alignment)),
            _ => Err(ParseError::UnknownAlignment {
                axis,
                token: token.to_string(),
            }),
        }
    };

    let mut cc = match *parts.as_slice() {
        [col, row] | [col, row, _, _] | [col, row, _, _, _, _] => {
            CellConstraints::xy(int(col)?, int(row)?)
        }
        _ => return Err(malformed("expected 2, 4 or 6 elements")),
    };

    match *parts.as_slice() {
        [_, _] => {}
        [_, _, third, fourth] => {
            if all_consuming(integer)(third).is_ok() {
                cc.column_span = int(third)?;
                cc.row_span = int(fourth)?;
            } else {
                cc.h_align = align(third, Axis::Column)?;
                cc.v_align = align(fourth, Axis::Row)?;
            }
        }
        [_, _, col_span, row_span, h_align, v_align] => {
            cc.column_span = int(col_span)?;
            cc.row_span = int(row_span)?;
            cc.h_align = align(h_align, Axis::Column)?;
            cc.v_align = align(v_align, Axis::Row)?;
        }
        _ => unreachable!("element count checked above"),
    }

    if cc.column == 0 || cc.row == 0 || cc.column_span == 0 || cc.row_span == 0 {
        return Err(malformed("origins and spans must be at least 1"));
    }
    Ok(cc)
}
