use std::collections::BTreeMap;

/// First field of a data row, kept verbatim.
pub type Bucket = String;

pub type SampleValue = u64;

/// Unix seconds.
pub type Timestamp = i64;

/// Bucket to accumulated sum, ordered by bucket name.
pub type Chunk = BTreeMap<Bucket, SampleValue>;
