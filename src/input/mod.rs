mod classifier;
mod line;
mod reader;
mod tick;

pub use classifier::{classify, parse_sample, Classification};
pub use line::{DelimReader, LineReader};
pub use reader::{FifoSource, PipeReader, StreamEvent, StreamSource};
pub use tick::TickAccumulator;

#[cfg(test)]
pub(crate) use reader::testing;
