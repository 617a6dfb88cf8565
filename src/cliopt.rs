use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use crate::utils::parse_duration;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fifo2wf",
    about = "Forward two-column aggregations from a named pipe to a Wavefront proxy"
)]
pub struct CliOpt {
    /// Named pipe the sampler writes to. Its file name becomes the metric prefix.
    #[structopt(parse(from_os_str))]
    pub fifo: PathBuf,

    /// Overrides the metric path prefix.
    #[structopt(long = "prefix")]
    pub prefix: Option<String>,

    /// Number of aggregation dumps summed up before each send.
    #[structopt(long = "ticks-per-chunk", short = "n", default_value = "1")]
    pub ticks_per_chunk: usize,

    /// Delay before reopening the pipe once the writer goes away.
    #[structopt(long = "poll-interval", short = "p", default_value = "100ms", parse(try_from_str = parse_duration))]
    pub poll_interval: Duration,

    #[structopt(long = "endpoint", short = "e", default_value = "wavefront.localnet")]
    pub endpoint: String,

    #[structopt(long = "port", default_value = "2878")]
    pub port: u16,

    /// Source tag of every point. Defaults to the local hostname.
    #[structopt(long = "source", short = "s")]
    pub source: Option<String>,

    #[structopt(long = "verbose", short = "v")]
    pub verbose: bool,
}
