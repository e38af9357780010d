//! GPU rendering subsystem.
//!
//! `InstancedCircleRenderer` owns the device, the pipeline and three vertex
//! buffers, and draws every active object with one instanced draw call:
//! - slot 0: circle mesh (per vertex, uploaded once)
//! - slot 1: object colors (per instance, uploaded once)
//! - slot 2: object transforms (per instance, uploaded every frame)

mod config;
mod instanced;
mod layout;
mod shader;

pub use config::{RendererConfig, DEFAULT_MAX_OBJECTS, DEFAULT_SEED};
pub use instanced::{FrameOutcome, FrameStats, InstancedCircleRenderer};
pub use shader::{validate_wgsl, ShaderSource, CIRCLES_WGSL};
