use super::types::{Bucket, SampleValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    bucket: Bucket,
    value: SampleValue,
}

impl Sample {
    pub fn new(bucket: Bucket, value: SampleValue) -> Self {
        Self { bucket, value }
    }

    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    #[inline]
    pub fn value(&self) -> SampleValue {
        self.value
    }
}

/// A data row that looked like a sample but failed the strict parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    line: String,
    reason: String,
}

impl MalformedLine {
    pub fn new(line: &str, reason: &str) -> Self {
        Self {
            line: line.to_owned(),
            reason: reason.to_owned(),
        }
    }

    #[inline]
    pub fn line(&self) -> &str {
        &self.line
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// One aggregation dump of the upstream sampler.
///
/// A tick may hold no samples at all if every buffered row was dropped
/// while closing it. The lines dropped that way travel along with the tick
/// so the caller can report them.
#[derive(Debug, Default, PartialEq)]
pub struct Tick {
    samples: Vec<Sample>,
    malformed: Vec<MalformedLine>,
}

impl Tick {
    pub fn new(samples: Vec<Sample>, malformed: Vec<MalformedLine>) -> Self {
        Self { samples, malformed }
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[inline]
    pub fn malformed(&self) -> &[MalformedLine] {
        &self.malformed
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
