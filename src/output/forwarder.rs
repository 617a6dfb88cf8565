use std::io;

use chrono::prelude::*;

use super::connector::Connector;
use super::encoder::Encoder;
use super::writer::{LineWriter, Writer};
use crate::error::{Error, Result};
use crate::model::{Chunk, MetricRecord, Timestamp};

/// What happened to a chunk handed to `MetricsForwarder::send`.
#[derive(Debug)]
pub enum Flush {
    /// Nothing to send; no connection was made.
    Skipped,
    Sent { lines: usize },
    /// The connection broke mid-flush. The rest of the chunk is lost.
    Interrupted {
        sent: usize,
        total: usize,
        error: io::Error,
    },
}

pub struct MetricsForwarder<C> {
    connector: C,
    encoder: Box<dyn Encoder>,
    prefix: String,
    source: String,
    clock: fn() -> Timestamp,
}

impl<C: Connector> MetricsForwarder<C> {
    pub fn new(connector: C, encoder: Box<dyn Encoder>, prefix: &str, source: &str) -> Self {
        Self {
            connector,
            encoder,
            prefix: prefix.to_owned(),
            source: source.to_owned(),
            clock: now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Writes one line per bucket over a fresh connection.
    ///
    /// Failing to connect is the only error; a broken connection is
    /// reported through `Flush::Interrupted`.
    pub fn send(&mut self, chunk: &Chunk) -> Result<Flush> {
        if chunk.is_empty() {
            return Ok(Flush::Skipped);
        }

        let timestamp = (self.clock)();
        let lines = chunk
            .iter()
            .map(|(bucket, sum)| {
                self.encoder.encode(&MetricRecord::new(
                    &self.prefix,
                    bucket,
                    *sum,
                    timestamp,
                    &self.source,
                ))
            })
            .collect::<Vec<_>>();

        let conn = self.connector.connect().map_err(|e| {
            Error::connection(
                &format!("cannot open socket to {}", self.connector.describe()),
                e,
            )
        })?;
        let mut writer = LineWriter::new(conn);

        for (sent, line) in lines.iter().enumerate() {
            if let Err(error) = writer.write(line) {
                return Ok(Flush::Interrupted {
                    sent,
                    total: lines.len(),
                    error,
                });
            }
        }

        Ok(Flush::Sent { lines: lines.len() })
    }
}

fn now() -> Timestamp {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::super::connector::testing::{MemoryConnector, RefusingConnector};
    use super::super::encoder::WavefrontEncoder;
    use super::*;
    use crate::error::ErrorKind;

    fn chunk(items: &[(&str, u64)]) -> Chunk {
        items.iter().map(|(b, v)| (b.to_string(), *v)).collect()
    }

    fn fixed_clock() -> Timestamp {
        1609459200
    }

    #[test]
    fn test_send() -> Result<()> {
        let connector = MemoryConnector::new();
        let mut fwd = MetricsForwarder::new(
            connector.clone(),
            Box::new(WavefrontEncoder::new()),
            "interrupts.cpu",
            "box01",
        )
        .with_clock(fixed_clock);

        match fwd.send(&chunk(&[("20", 3), ("10", 5)]))? {
            Flush::Sent { lines } => assert_eq!(lines, 2),
            other => panic!("unexpected flush outcome {:?}", other),
        }

        assert_eq!(
            connector.lines(),
            vec![
                "interrupts.cpu.10 5 1609459200 source=box01",
                "interrupts.cpu.20 3 1609459200 source=box01",
            ]
        );
        assert_eq!(*connector.connections.borrow(), 1);
        Ok(())
    }

    #[test]
    fn test_send_empty_chunk_skips_connection() -> Result<()> {
        let connector = MemoryConnector::new();
        let mut fwd = MetricsForwarder::new(
            connector.clone(),
            Box::new(WavefrontEncoder::new()),
            "p",
            "h",
        );

        assert!(matches!(fwd.send(&Chunk::new())?, Flush::Skipped));
        assert_eq!(*connector.connections.borrow(), 0);
        Ok(())
    }

    #[test]
    fn test_send_connection_refused() {
        let mut fwd = MetricsForwarder::new(
            RefusingConnector,
            Box::new(WavefrontEncoder::new()),
            "p",
            "h",
        );

        match fwd.send(&chunk(&[("10", 1)])) {
            Err(e) => {
                assert_eq!(e.error_kind(), ErrorKind::Connection);
                assert_eq!(e.message(), "cannot open socket to wavefront.localnet:2878");
            }
            Ok(flush) => panic!("expected error but got {:?}", flush),
        }
    }

    #[test]
    fn test_send_interrupted() -> Result<()> {
        // Each line goes out in a single write.
        let connector = MemoryConnector::failing_after(1);
        let mut fwd = MetricsForwarder::new(
            connector.clone(),
            Box::new(WavefrontEncoder::new()),
            "p",
            "h",
        )
        .with_clock(fixed_clock);

        match fwd.send(&chunk(&[("10", 1), ("20", 2), ("30", 3)]))? {
            Flush::Interrupted { sent, total, error } => {
                assert_eq!(sent, 1);
                assert_eq!(total, 3);
                assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected flush outcome {:?}", other),
        }
        assert_eq!(connector.lines(), vec!["p.10 1 1609459200 source=h"]);
        Ok(())
    }

    #[test]
    fn test_send_unchecked_source_is_not_fatal() -> Result<()> {
        let connector = MemoryConnector::new();
        let mut fwd = MetricsForwarder::new(
            connector.clone(),
            Box::new(WavefrontEncoder::new()),
            "p",
            "db 01",
        )
        .with_clock(fixed_clock);

        match fwd.send(&chunk(&[("10", 1)]))? {
            Flush::Sent { lines } => assert_eq!(lines, 1),
            other => panic!("unexpected flush outcome {:?}", other),
        }
        assert_eq!(connector.lines(), vec!["p.10 1 1609459200 source=db 01"]);
        Ok(())
    }
}
