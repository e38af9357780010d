use std::time::Duration;

use crate::device::GpuInit;
use crate::error::{RendererError, Result};
use crate::geometry::CircleMeshDesc;
use crate::sim::SpawnRanges;
use crate::time::FrameClock;

use super::shader::ShaderSource;

/// Instance capacity reserved at init.
pub const DEFAULT_MAX_OBJECTS: usize = 10_000;

/// Seed used unless the caller injects one.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Instance buffer capacity. Fixed for the renderer's lifetime.
    pub max_objects: usize,
    /// Objects simulated and drawn each frame; at most `max_objects`.
    pub active_objects: usize,
    /// Seed for initial colors and motion.
    pub seed: u64,
    /// Upper bound on the simulated step per frame. `None` advances objects by
    /// the full wall-clock time since the previous frame.
    pub max_frame_dt: Option<Duration>,
    pub mesh: CircleMeshDesc,
    pub spawn: SpawnRanges,
    pub clear_color: wgpu::Color,
    pub shader: ShaderSource,
    pub gpu: GpuInit,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_objects: DEFAULT_MAX_OBJECTS,
            active_objects: 100,
            seed: DEFAULT_SEED,
            max_frame_dt: None,
            mesh: CircleMeshDesc::default(),
            spawn: SpawnRanges::default(),
            clear_color: wgpu::Color {
                r: 0.3,
                g: 0.3,
                b: 0.3,
                a: 1.0,
            },
            shader: ShaderSource::default(),
            gpu: GpuInit::default(),
        }
    }
}

impl RendererConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_objects == 0 {
            return Err(RendererError::InvalidConfig("max_objects must be at least 1".into()));
        }
        if self.active_objects > self.max_objects {
            return Err(RendererError::BufferOverflow {
                requested: self.active_objects,
                capacity: self.max_objects,
            });
        }
        self.mesh.validate()?;
        self.spawn.validate()
    }

    /// Clock driving the simulation, clamped only if `max_frame_dt` is set.
    pub(crate) fn frame_clock(&self) -> FrameClock {
        match self.max_frame_dt {
            Some(max) => FrameClock::with_clamps(Duration::ZERO, max),
            None => FrameClock::new(),
        }
    }
}
