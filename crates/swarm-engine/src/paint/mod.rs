//! Color types uploaded to the GPU.

mod rgba8;

pub use rgba8::Rgba8;
