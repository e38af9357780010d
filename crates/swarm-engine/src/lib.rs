//! Swarm engine crate.
//!
//! Owns the GPU runtime, the circle mesh, the per-object simulation and the
//! instanced renderer that draws every object with a single draw call.

pub mod device;
pub mod window;
pub mod time;

pub mod error;
pub mod logging;
pub mod coords;
pub mod paint;
pub mod geometry;
pub mod sim;
pub mod render;

pub use error::RendererError;
