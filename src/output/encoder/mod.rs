mod encoder;
mod wavefront;

pub use encoder::Encoder;
pub use wavefront::WavefrontEncoder;
