mod record;
mod sample;
mod types;

pub use record::*;
pub use sample::*;
pub use types::*;
