use std::fmt;
use std::num::NonZeroUsize;

use crate::aggregator::ChunkAggregator;
use crate::config::Config;
use crate::error::Result;
use crate::input::{FifoSource, PipeReader, StreamEvent, StreamSource, TickAccumulator};
use crate::model::Tick;
use crate::output::{Connector, Flush, MetricsForwarder, TcpConnector, WavefrontEncoder};

// PipeReader -> TickAccumulator -> ChunkAggregator -> MetricsForwarder
//
// fifo
//   -> Line (a String, delimiter included)
//     -> Tick (samples of one aggregation dump)
//       -> Chunk (bucket sums over N ticks)
//         -> MetricRecord lines
//           -> tcp

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub ticks: usize,
    pub malformed: usize,
    pub flushes: usize,
    pub interrupted: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ticks, {} malformed lines, {} flushes, {} interrupted",
            self.ticks, self.malformed, self.flushes, self.interrupted
        )
    }
}

pub struct Runner<S, C> {
    reader: PipeReader<S>,
    ticks: TickAccumulator,
    aggregator: ChunkAggregator,
    forwarder: MetricsForwarder<C>,
    stats: Stats,
}

impl Runner<FifoSource, TcpConnector> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PipeReader::new(FifoSource::new(&config.fifo), config.poll_interval),
            MetricsForwarder::new(
                TcpConnector::new(&config.endpoint, config.port),
                Box::new(WavefrontEncoder::new()),
                &config.prefix,
                &config.source,
            ),
            config.ticks_per_chunk,
        )
    }
}

impl<S: StreamSource, C: Connector> Runner<S, C> {
    pub fn new(
        reader: PipeReader<S>,
        forwarder: MetricsForwarder<C>,
        ticks_per_chunk: NonZeroUsize,
    ) -> Self {
        Self {
            reader,
            ticks: TickAccumulator::new(),
            aggregator: ChunkAggregator::new(ticks_per_chunk),
            forwarder,
            stats: Stats::default(),
        }
    }

    /// Runs until a fatal error occurs.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.step()?;
        }
    }

    /// Consumes one stream event.
    pub fn step(&mut self) -> Result<()> {
        let tick = match self.reader.next_event()? {
            StreamEvent::Line(line) => self.ticks.push(&line),
            // The writer is gone; whatever it sent so far is a complete tick.
            StreamEvent::EndOfStream => {
                let tick = self.ticks.finish();
                log::debug!(
                    "writer detached after {} lines ({})",
                    self.lines_read(),
                    self.stats()
                );
                tick
            }
        };

        match tick {
            Some(tick) => self.complete(tick),
            None => Ok(()),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn lines_read(&self) -> usize {
        self.reader.line_no()
    }

    fn complete(&mut self, tick: Tick) -> Result<()> {
        for bad in tick.malformed() {
            log::warn!("could not process '{}': {}", bad.line(), bad.reason());
        }
        self.stats.malformed += tick.malformed().len();
        self.stats.ticks += 1;

        log::debug!("tick closed with {} samples", tick.samples().len());
        self.aggregator.fold(&tick);
        if !self.aggregator.ready() {
            return Ok(());
        }

        let chunk = self.aggregator.drain();
        match self.forwarder.send(&chunk)? {
            Flush::Skipped => log::debug!("nothing to send"),
            Flush::Sent { lines } => {
                self.stats.flushes += 1;
                log::debug!("sent {} points ({})", lines, self.stats);
            }
            Flush::Interrupted { sent, total, error } => {
                self.stats.interrupted += 1;
                log::warn!(
                    "could not send metrics ({} of {} points sent): {}",
                    sent,
                    total,
                    error
                );
            }
        }
        Ok(())
    }
}
