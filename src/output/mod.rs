mod connector;
pub mod encoder;
mod forwarder;
mod writer;

pub use connector::{Connector, TcpConnector};
pub use encoder::{Encoder, WavefrontEncoder};
pub use forwarder::{Flush, MetricsForwarder};
pub use writer::{LineWriter, Writer};

#[cfg(test)]
pub(crate) use connector::testing;
