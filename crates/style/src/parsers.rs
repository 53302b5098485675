//! Low-level nom parser functions for CSS-like configuration values.
//!
//! Block configuration arrives from editors as JSON; lengths, padding and font
//! sizes may be given as short strings (`"40%"`, `"2mm 3mm"`, `"6pt"`).

use crate::dimension::{Length, LengthUnit, Padding};
use crate::font::FontSizeUnit;
use carelabel_types::units::{PX_PER_MM, pt_to_mm};
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{char, space0, space1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during configuration value parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

/// Runs `parser` over the whole of `input`, allowing surrounding whitespace.
pub fn run_parser<'a, O, P>(parser: P, input: &'a str) -> Result<O, StyleParseError>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    all_consuming(delimited(space0, parser, space0))
        .parse(input)
        .map(|(_, out)| out)
        .map_err(|e| StyleParseError::Parse(format!("'{}': {}", input, e)))
}

fn digits(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_digit()).parse(input)
}

fn parse_f64(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digits, opt((char('.'), digits)))),
                recognize((char('.'), digits)),
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

// --- Unit & Length Parsers ---

/// Parses an absolute unit and returns its millimeter multiplier.
fn parse_absolute_unit(input: &str) -> IResult<&str, f64> {
    alt((
        value(1.0, tag_no_case("mm")),
        value(10.0, tag_no_case("cm")),
        value(25.4, tag_no_case("in")),
        value(pt_to_mm(1.0), tag_no_case("pt")),
        value(1.0 / PX_PER_MM, tag_no_case("px")),
    ))
    .parse(input)
}

/// Parses an absolute length and converts it to millimeters (unitless means mm).
pub fn parse_absolute_length(input: &str) -> IResult<&str, f64> {
    let (input, amount) = parse_f64(input)?;
    let (input, multiplier) = opt(parse_absolute_unit).parse(input)?;
    Ok((input, amount * multiplier.unwrap_or(1.0)))
}

/// Parses a block length: a percentage of the region or an absolute length.
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    alt((
        map((parse_f64, char('%')), |(amount, _)| Length::percent(amount)),
        map(parse_absolute_length, Length::mm),
    ))
    .parse(input)
}

/// Parses a font size with an optional unit; a bare number is pixels.
pub fn parse_font_size(input: &str) -> IResult<&str, (f64, FontSizeUnit)> {
    let (input, amount) = parse_f64(input)?;
    let (input, unit) = opt(alt((
        value(FontSizeUnit::Px, tag_no_case("px")),
        value(FontSizeUnit::Pt, tag_no_case("pt")),
        value(FontSizeUnit::Mm, tag_no_case("mm")),
    )))
    .parse(input)?;
    Ok((input, (amount, unit.unwrap_or_default())))
}

/// Parses CSS shorthand padding (1, 2, or 4 values).
pub fn parse_shorthand_padding(input: &str) -> Result<Padding, StyleParseError> {
    let parts = run_parser(separated_list1(space1, parse_absolute_length), input)?;

    match parts.len() {
        1 => Ok(Padding::all(parts[0])),
        2 => Ok(Padding {
            top: parts[0],
            right: parts[1],
            bottom: parts[0],
            left: parts[1],
        }),
        4 => Ok(Padding {
            top: parts[0],
            right: parts[1],
            bottom: parts[2],
            left: parts[3],
        }),
        _ => Err(StyleParseError::Parse(format!(
            "Invalid number of values for padding shorthand: got {}, expected 1, 2, or 4.",
            parts.len()
        ))),
    }
}

/// Parses a percentage string such as `"40%"` into its number.
pub fn parse_percentage(property: &str, input: &str) -> Result<f64, StyleParseError> {
    match run_parser(parse_length, input) {
        Ok(Length {
            value,
            unit: LengthUnit::Percent,
        }) => Ok(value),
        _ => Err(StyleParseError::InvalidValue {
            property: property.to_string(),
            value: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_absolute_length() {
        assert!(close(run_parser(parse_absolute_length, "12mm").unwrap(), 12.0));
        assert!(close(run_parser(parse_absolute_length, " 1in ").unwrap(), 25.4));
        assert!(close(run_parser(parse_absolute_length, "2cm").unwrap(), 20.0));
        assert!(close(run_parser(parse_absolute_length, "72pt").unwrap(), 25.4));
        assert!(close(run_parser(parse_absolute_length, "96px").unwrap(), 25.4));
        assert!(close(run_parser(parse_absolute_length, "10").unwrap(), 10.0));
        assert!(run_parser(parse_absolute_length, "abc").is_err());
    }

    #[test]
    fn test_parse_length() {
        assert_eq!(
            run_parser(parse_length, "40%").unwrap(),
            Length::percent(40.0)
        );
        assert_eq!(run_parser(parse_length, ".5").unwrap(), Length::mm(0.5));
        assert!(run_parser(parse_length, "40%%").is_err());
    }

    #[test]
    fn test_parse_font_size() {
        assert_eq!(
            run_parser(parse_font_size, "6pt").unwrap(),
            (6.0, FontSizeUnit::Pt)
        );
        assert_eq!(
            run_parser(parse_font_size, "14").unwrap(),
            (14.0, FontSizeUnit::Px)
        );
        assert_eq!(
            run_parser(parse_font_size, "3.5MM").unwrap(),
            (3.5, FontSizeUnit::Mm)
        );
    }

    #[test]
    fn test_parse_shorthand_padding() {
        assert_eq!(parse_shorthand_padding("2mm").unwrap(), Padding::all(2.0));

        let two = parse_shorthand_padding("1mm 3mm").unwrap();
        assert_eq!((two.top, two.right, two.bottom, two.left), (1.0, 3.0, 1.0, 3.0));

        let four = parse_shorthand_padding("1 2 3 4").unwrap();
        assert_eq!(
            (four.top, four.right, four.bottom, four.left),
            (1.0, 2.0, 3.0, 4.0)
        );

        assert!(parse_shorthand_padding("1 2 3").is_err());
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("share", "60%").unwrap(), 60.0);
        assert!(matches!(
            parse_percentage("share", "60mm"),
            Err(StyleParseError::InvalidValue { .. })
        ));
    }
}
