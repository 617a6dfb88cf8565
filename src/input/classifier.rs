use lazy_static::lazy_static;
use nom::{
    character::complete::{digit1, space1},
    combinator::all_consuming,
    sequence::separated_pair,
};
use regex;

use crate::model::{MalformedLine, Sample, SampleValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Two whitespace-separated digit runs, nothing else.
    DataRow,
    /// Two tokens that look like a row but aren't numeric.
    Malformed,
    Boundary,
}

/// Decides what a raw line is. Trailing whitespace (including the line
/// delimiter) is ignored.
pub fn classify(line: &str) -> Classification {
    lazy_static! {
        static ref DATA_ROW: regex::Regex = regex::Regex::new(r"^\s*\d+\s+\d+$").unwrap();
    }

    let line = line.trim_end();
    if DATA_ROW.is_match(line) {
        return Classification::DataRow;
    }

    if line.split_whitespace().count() == 2 {
        return Classification::Malformed;
    }

    Classification::Boundary
}

/// Strict second-phase parse of a line previously classified as a data row.
pub fn parse_sample(line: &str) -> std::result::Result<Sample, MalformedLine> {
    let trimmed = line.trim();

    let parsed: nom::IResult<&str, (&str, &str)> =
        all_consuming(separated_pair(digit1, space1, digit1))(trimmed);

    let (bucket, value) = match parsed {
        Ok((_, fields)) => fields,
        Err(_) => return Err(MalformedLine::new(trimmed, "expected two decimal fields")),
    };

    let value = value
        .parse::<SampleValue>()
        .map_err(|_| MalformedLine::new(trimmed, "value out of range"))?;

    Ok(Sample::new(bucket.to_owned(), value))
}
