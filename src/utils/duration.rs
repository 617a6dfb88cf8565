use std::convert::TryFrom;
use std::time::Duration;

use nom::{branch::alt, bytes::complete::tag, character::complete::digit1, combinator::eof};

use super::parse::{IResult, ParseError, Span};
use crate::error::{Error, Result};

pub fn parse_duration(s: &str) -> Result<Duration> {
    match duration(Span::new(s)) {
        Ok((_, d)) => Ok(d),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(Error::from(format!(
            "{} at offset {}",
            e.message(),
            e.offset()
        ))),
        Err(nom::Err::Incomplete(_)) => Err(Error::new("incomplete duration literal")),
    }
}

/// Parse Go-like duration string: `100ms`, `1m30s`.
/// - Only positive durations.
/// - No fractional units.
/// - Units are always ordered from longest to shortest.
fn duration(input: Span) -> IResult<Duration> {
    let (rest, duration) = duration_inner(input, Unit::Hour)?;
    let (rest, _) = eof(rest)?;

    if duration.eq(&Duration::from_millis(0)) {
        return Err(nom::Err::Failure(ParseError::new(
            "duration must be greater than 0".to_owned(),
            input,
        )));
    }

    Ok((rest, duration))
}

enum Unit {
    Millisecond,
    Second, // 1000 milliseconds
    Minute, // 60 seconds
    Hour,   // 60 minutes
}

impl Unit {
    fn milliseconds(&self) -> u64 {
        use Unit::*;
        match self {
            Millisecond => 1,
            Second => 1000,
            Minute => 60 * 1000,
            Hour => 60 * 60 * 1000,
        }
    }

    fn descendant(&self) -> Option<Self> {
        use Unit::*;
        match self {
            Millisecond => None,
            Second => Some(Millisecond),
            Minute => Some(Second),
            Hour => Some(Minute),
        }
    }
}

impl TryFrom<&str> for Unit {
    type Error = Error;

    fn try_from(u: &str) -> Result<Self> {
        use Unit::*;

        match u {
            "h" => Ok(Hour),
            "m" => Ok(Minute),
            "s" => Ok(Second),
            "ms" => Ok(Millisecond),
            _ => Err(Error::new("unknown duration unit")),
        }
    }
}

fn duration_inner(input: Span, max_allowed_unit: Unit) -> IResult<Duration> {
    let (rest, multiplier) = digit1(input)?;

    let (rest, unit) = alt((tag("ms"), tag("s"), tag("m"), tag("h")))(rest)?;

    let unit = Unit::try_from(*unit)
        .map_err(|e| nom::Err::Failure(ParseError::new(e.message().to_owned(), input)))?;
    if unit.milliseconds() > max_allowed_unit.milliseconds() {
        return Err(nom::Err::Failure(ParseError::new(
            "invalid duration literal".to_owned(),
            input,
        )));
    }

    let overflow = || {
        nom::Err::Failure(ParseError::new(
            "duration overflow occurred".to_owned(),
            input,
        ))
    };

    let multiplier = multiplier.parse::<u32>().map_err(|_| overflow())?;
    let duration = Duration::from_millis(unit.milliseconds())
        .checked_mul(multiplier)
        .ok_or_else(overflow)?;

    match unit.descendant() {
        Some(next_unit) => {
            let (rest, more_duration) = match duration_inner(rest, next_unit) {
                Ok((rest, more_duration)) => (rest, more_duration),
                Err(nom::Err::Error(_)) => (rest, Duration::from_millis(0)),
                Err(e) => return Err(e),
            };
            Ok((
                rest,
                duration.checked_add(more_duration).ok_or_else(overflow)?,
            ))
        }
        None => Ok((rest, duration)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_duration() -> std::result::Result<(), String> {
        #[rustfmt::skip]
        let tests = [
            ("1ms", Duration::from_millis(1)),
            ("100ms", Duration::from_millis(100)),
            ("10s", Duration::from_millis(10000)),
            ("0s500ms", Duration::from_millis(500)),
            ("1m30s", Duration::from_millis(90000)),
            ("1h2m3s4ms", Duration::from_millis(3723004)),
        ];

        for (input, expected_duration) in &tests {
            let actual_duration = parse_duration(input)?;
            assert_eq!(
                expected_duration, &actual_duration,
                "while parsing {}",
                input
            );
        }
        Ok(())
    }

    #[test]
    fn test_invalid_duration() {
        #[rustfmt::skip]
        let tests = [
            "",
            "foo",
            "0",
            "0ms",
            "1ns",
            "1d",
            "0s0ms",
            "10m2h",
            "100ms ",
            "99999999999h",
        ];

        for input in &tests {
            let ret = parse_duration(input);
            assert!(
                ret.is_err(),
                "Expected error, got {:?} while parsing {}",
                ret,
                input
            );
        }
    }
}
