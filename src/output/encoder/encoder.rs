use crate::model::MetricRecord;

pub trait Encoder {
    fn encode(&self, record: &MetricRecord) -> Vec<u8>;
}
