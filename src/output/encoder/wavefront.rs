use super::encoder::Encoder;
use crate::model::MetricRecord;

/// Wavefront data format, one point per line (the delimiter is the
/// writer's business):
///
/// `<metricName> <metricValue> [<timestamp>] source=<source>`
///
/// Prefix and source tag are checked once at startup, so encoding can't fail.
pub struct WavefrontEncoder {}

impl WavefrontEncoder {
    pub fn new() -> Self {
        Self {}
    }
}

impl Encoder for WavefrontEncoder {
    fn encode(&self, record: &MetricRecord) -> Vec<u8> {
        String::into_bytes(record.to_string())
    }
}
