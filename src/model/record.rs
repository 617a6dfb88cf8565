use std::fmt;

use super::types::{SampleValue, Timestamp};

/// The unit the collector receives: one per bucket per flush.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRecord {
    metric_path: String,
    value: SampleValue,
    timestamp: Timestamp,
    source: String,
}

impl MetricRecord {
    pub fn new(
        prefix: &str,
        bucket: &str,
        value: SampleValue,
        timestamp: Timestamp,
        source: &str,
    ) -> Self {
        Self {
            metric_path: format!("{}.{}", prefix, bucket),
            value,
            timestamp,
            source: source.to_owned(),
        }
    }

    #[inline]
    pub fn metric_path(&self) -> &str {
        &self.metric_path
    }

    #[inline]
    pub fn value(&self) -> SampleValue {
        self.value
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for MetricRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} source={}",
            self.metric_path, self.value, self.timestamp, self.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_record_display() {
        let record = MetricRecord::new("interrupts.cpu", "1024", 42, 1609459200, "box01");
        assert_eq!(record.metric_path(), "interrupts.cpu.1024");
        assert_eq!(
            record.to_string(),
            "interrupts.cpu.1024 42 1609459200 source=box01"
        );
    }
}
