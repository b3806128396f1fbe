//! Lexical building blocks for encoded specs.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while1},
    character::complete::{alpha0, char, digit0, digit1, multispace0},
    combinator::{map_res, opt, recognize},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

/// Parse an unsigned decimal number. The separator is always `.`.
pub fn number(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))(input)
}

/// Parse a decimal number with an optional sign.
pub fn signed_number(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(alt((char('-'), char('+')))), number))(input)
}

/// Parse a number immediately followed by an optional unit suffix.
pub fn number_with_unit(input: &str) -> IResult<&str, (&str, &str)> {
    pair(number, alpha0)(input)
}

/// Parse an unsigned integer.
pub fn integer(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>())(input)
}

/// Parse `name(args)` and return the raw arguments.
pub fn call<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(
        tag(name),
        delimited(char('('), take_until(")"), char(')')),
    )
}

/// Parse a legacy bound expression `max(a;b)` or `min(a;b)`.
pub fn legacy_bound(input: &str) -> IResult<&str, (&str, &str, &str)> {
    tuple((
        alt((tag("max"), tag("min"))),
        preceded(char('('), take_until(";")),
        delimited(char(';'), take_until(")"), char(')')),
    ))(input)
}

/// Parse the body of a bracketed bound expression `[a,b]` or `[a;b;c]`.
pub fn bracketed(input: &str) -> IResult<&str, &str> {
    delimited(char('['), take_until("]"), char(']'))(input)
}

/// Parse a multiplier prefix `n*`.
pub fn multiplier(input: &str) -> IResult<&str, usize> {
    terminated(
        delimited(multispace0, integer, multispace0),
        char('*'),
    )(input)
}

/// Parse a variable reference `$name` or `${name}`, returning the name.
pub fn variable(input: &str) -> IResult<&str, &str> {
    preceded(
        char('$'),
        alt((
            delimited(char('{'), take_while1(|c: char| c != '}'), char('}')),
            take_while1(is_variable_char),
        )),
    )(input)
}

pub fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Split at top-level occurrences of `separator`, ignoring separators nested
/// in parentheses or brackets. Parts are trimmed.
pub fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(input[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(input[start..].trim());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(number("12.5dlu"), Ok(("dlu", "12.5")));
        assert_eq!(number("3px"), Ok(("px", "3")));
        assert_eq!(number(".5in"), Ok(("in", ".5")));
        assert!(number("px").is_err());
    }

    #[test]
    fn test_signed_number() {
        assert_eq!(signed_number("-1"), Ok(("", "-1")));
        assert_eq!(signed_number("+0.25"), Ok(("", "+0.25")));
    }

    #[test]
    fn test_number_with_unit() {
        assert_eq!(number_with_unit("40dlu"), Ok(("", ("40", "dlu"))));
        assert_eq!(number_with_unit("0"), Ok(("", ("0", ""))));
    }

    #[test]
    fn test_legacy_bound() {
        assert_eq!(legacy_bound("max(40dlu;pref)"), Ok(("", ("max", "40dlu", "pref"))));
        assert_eq!(legacy_bound("min(pref;80px)"), Ok(("", ("min", "pref", "80px"))));
    }

    #[test]
    fn test_call() {
        assert_eq!(call("grow")("grow(0.5)"), Ok(("", "0.5")));
        assert!(call("grow")("g(0.5)").is_err());
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(multiplier("3*(pref, 4dlu)"), Ok(("(pref, 4dlu)", 3)));
        assert_eq!(multiplier(" 2 *pref"), Ok(("pref", 2)));
    }

    #[test]
    fn test_variable() {
        assert_eq!(variable("$lcgap, pref"), Ok((", pref", "lcgap")));
        assert_eq!(variable("${related-gap}x"), Ok(("x", "related-gap")));
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(
            split_top_level("pref, [3dlu,pref], 2*(p, 4dlu)", ','),
            vec!["pref", "[3dlu,pref]", "2*(p, 4dlu)"]
        );
        assert_eq!(split_top_level("r:max(4dlu;p):g", ':'), vec!["r", "max(4dlu;p)", "g"]);
    }
}
