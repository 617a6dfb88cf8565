use super::classifier::{classify, parse_sample, Classification};
use crate::model::{MalformedLine, Tick};

/// Groups data rows into ticks.
///
/// Rows are kept as raw text until the tick closes; only then are they
/// parsed strictly. A boundary arriving with nothing buffered is a no-op.
#[derive(Debug, Default)]
pub struct TickAccumulator {
    buffer: Vec<String>,
    malformed: Vec<MalformedLine>,
}

impl TickAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) -> Option<Tick> {
        match classify(line) {
            Classification::DataRow => {
                self.buffer.push(line.trim().to_owned());
                None
            }
            Classification::Malformed if !self.is_empty() => {
                self.malformed
                    .push(MalformedLine::new(line.trim(), "not a two-column numeric row"));
                self.close()
            }
            Classification::Malformed | Classification::Boundary => self.close(),
        }
    }

    /// Closes the pending tick as if a boundary line had been seen.
    pub fn finish(&mut self) -> Option<Tick> {
        self.close()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn close(&mut self) -> Option<Tick> {
        if self.buffer.is_empty() {
            return None;
        }

        let mut samples = Vec::with_capacity(self.buffer.len());
        let mut malformed = Vec::new();
        for raw in self.buffer.drain(..) {
            match parse_sample(&raw) {
                Ok(sample) => samples.push(sample),
                Err(e) => malformed.push(e),
            }
        }
        malformed.append(&mut self.malformed);

        Some(Tick::new(samples, malformed))
    }
}
