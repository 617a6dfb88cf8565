use std::process;

use structopt::StructOpt;

use fifo2wf::cliopt::CliOpt;
use fifo2wf::config::Config;
use fifo2wf::error::Result;
use fifo2wf::runner::Runner;

fn main() {
    let opt = CliOpt::from_args();

    let level = if opt.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(opt) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run(opt: CliOpt) -> Result<()> {
    let config = Config::from_opt(opt)?;
    config.check_fifo()?;

    log::info!(
        "forwarding '{}' as '{}.*' to {}:{} (source={}, ticks per chunk={})",
        config.fifo.display(),
        config.prefix,
        config.endpoint,
        config.port,
        config.source,
        config.ticks_per_chunk,
    );

    Runner::from_config(&config).run()
}
