use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use super::line::{DelimReader, LineReader};
use crate::error::{Error, Result};

/// Something that can be opened for reading over and over again.
pub trait StreamSource {
    fn open(&mut self) -> std::io::Result<Box<dyn LineReader>>;

    fn describe(&self) -> String;
}

/// A named pipe on the local filesystem.
///
/// Opening blocks until a writer attaches; reading returns EOF once the
/// last writer closes its end.
pub struct FifoSource {
    path: PathBuf,
}

impl FifoSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

impl StreamSource for FifoSource {
    fn open(&mut self) -> std::io::Result<Box<dyn LineReader>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(DelimReader::new(BufReader::new(file))))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum StreamEvent {
    Line(String),
    /// The writer went away (or the read failed). The handle is already
    /// closed when this is returned.
    EndOfStream,
}

enum Session {
    /// Never opened.
    Idle,
    Streaming(Box<dyn LineReader>),
    /// The last session ended; reopening waits for the poll interval.
    Drained,
}

/// Drives the open/read/close/reopen cycle of a stream source.
pub struct PipeReader<S> {
    source: S,
    session: Session,
    poll_interval: Duration,
    line_no: usize,
}

impl<S: StreamSource> PipeReader<S> {
    pub fn new(source: S, poll_interval: Duration) -> Self {
        Self {
            source,
            session: Session::Idle,
            poll_interval,
            line_no: 0,
        }
    }

    /// Returns the next line, or `EndOfStream` when the current session ends.
    /// The following call waits for the poll interval and reopens the stream.
    ///
    /// Only a failure to open the stream is an error.
    pub fn next_event(&mut self) -> Result<StreamEvent> {
        if !self.is_streaming() {
            if let Session::Drained = self.session {
                thread::sleep(self.poll_interval);
            }

            let reader = self.source.open().map_err(|e| {
                Error::stream(&format!("cannot open stream '{}'", self.source.describe()), e)
            })?;
            log::debug!("opened stream '{}'", self.source.describe());
            self.session = Session::Streaming(reader);
        }

        let reader = match &mut self.session {
            Session::Streaming(reader) => reader,
            _ => unreachable!(),
        };

        let mut buf = Vec::new();
        match reader.read(&mut buf) {
            Ok(0) => {
                log::debug!("end of stream '{}'", self.source.describe());
            }
            Ok(_) => {
                self.line_no += 1;
                return Ok(StreamEvent::Line(String::from_utf8_lossy(&buf).into_owned()));
            }
            Err(e) => {
                log::warn!(
                    "reading stream '{}' failed after line {}: {}",
                    self.source.describe(),
                    self.line_no,
                    e
                );
            }
        };

        // Dropping the reader closes the handle.
        self.session = Session::Drained;
        Ok(StreamEvent::EndOfStream)
    }

    /// Lines read so far, across all sessions.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self.session, Session::Streaming(_))
    }
}
