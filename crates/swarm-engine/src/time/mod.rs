//! Time subsystem.
//!
//! One `FrameClock` per renderer; call `tick()` once per rendered frame to
//! obtain the delta time used to advance the simulation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
