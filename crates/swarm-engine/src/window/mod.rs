//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window and drives the renderer once per
//! redraw, re-arming the next redraw after every frame.

mod runtime;
mod status;

pub use runtime::{Runtime, RuntimeConfig};
pub use status::StatusLine;
