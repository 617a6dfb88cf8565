use std::num::NonZeroUsize;

use crate::model::{Chunk, Tick};

/// Sums bucket values over a fixed number of ticks.
#[derive(Debug)]
pub struct ChunkAggregator {
    ticks_per_chunk: usize,
    ticks: usize,
    sums: Chunk,
}

impl ChunkAggregator {
    pub fn new(ticks_per_chunk: NonZeroUsize) -> Self {
        Self {
            ticks_per_chunk: ticks_per_chunk.get(),
            ticks: 0,
            sums: Chunk::new(),
        }
    }

    /// Adds every sample of the tick to the running sums. An empty tick
    /// still counts toward the threshold.
    pub fn fold(&mut self, tick: &Tick) {
        for sample in tick.samples() {
            let sum = self.sums.entry(sample.bucket().to_owned()).or_insert(0);
            *sum = sum.saturating_add(sample.value());
        }
        self.ticks += 1;
    }

    pub fn ready(&self) -> bool {
        self.ticks == self.ticks_per_chunk
    }

    /// Hands over the accumulated sums and starts a new chunk. Callers check
    /// `ready()` first.
    pub fn drain(&mut self) -> Chunk {
        self.ticks = 0;
        std::mem::take(&mut self.sums)
    }

    pub fn pending_ticks(&self) -> usize {
        self.ticks
    }
}
