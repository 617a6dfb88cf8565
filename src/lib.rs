pub mod aggregator;
pub mod cliopt;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod runner;
pub mod utils;
