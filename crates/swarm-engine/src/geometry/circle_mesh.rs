use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

use crate::error::{RendererError, Result};
use crate::paint::Rgba8;

/// Parameters of a ring (or disc, when `inner_radius == 0`) mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMeshDesc {
    pub radius: f32,
    pub inner_radius: f32,
    pub subdivisions: u32,
    /// Start of the angular span, radians.
    pub start_angle: f32,
    /// End of the angular span, radians.
    pub end_angle: f32,
    /// Color of vertices on the outer edge. Only RGB is stored per vertex.
    pub outer_color: Rgba8,
    /// Color of vertices on the inner edge.
    pub inner_color: Rgba8,
}

impl Default for CircleMeshDesc {
    fn default() -> Self {
        Self {
            radius: 0.5,
            inner_radius: 0.25,
            subdivisions: 24,
            start_angle: 0.0,
            end_angle: TAU,
            outer_color: Rgba8::from_unit(0.1, 0.1, 0.1, 1.0),
            inner_color: Rgba8::WHITE,
        }
    }
}

impl CircleMeshDesc {
    pub fn validate(&self) -> Result<()> {
        if self.subdivisions == 0 {
            return Err(RendererError::InvalidConfig(
                "circle mesh needs at least one subdivision".into(),
            ));
        }
        let radii_ok = self.radius.is_finite()
            && self.inner_radius.is_finite()
            && self.inner_radius >= 0.0
            && self.inner_radius <= self.radius;
        if !radii_ok {
            return Err(RendererError::InvalidConfig(format!(
                "circle mesh radii must satisfy 0 <= inner ({}) <= outer ({})",
                self.inner_radius, self.radius
            )));
        }
        if !self.start_angle.is_finite() || !self.end_angle.is_finite() {
            return Err(RendererError::InvalidConfig(
                "circle mesh angles must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// One mesh vertex, 12 bytes:
///
///  offset  0  position  [f32; 2]   loc 0  (float32x2)
///  offset  8  color     [u8; 3]    loc 1  (unorm8x4, alpha byte ignored)
///  offset 11  _pad      u8
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 2],
    pub color: [u8; 3],
    _pad: u8,
}

impl MeshVertex {
    pub const POSITION_OFFSET: usize = 0;
    pub const COLOR_OFFSET: usize = 8;
    pub const STRIDE: usize = 12;

    #[inline]
    pub fn new(x: f32, y: f32, color: Rgba8) -> Self {
        Self {
            position: [x, y],
            color: [color.r, color.g, color.b],
            _pad: 0,
        }
    }
}

const _: () = {
    assert!(std::mem::offset_of!(MeshVertex, position) == MeshVertex::POSITION_OFFSET);
    assert!(std::mem::offset_of!(MeshVertex, color) == MeshVertex::COLOR_OFFSET);
    assert!(std::mem::size_of::<MeshVertex>() == MeshVertex::STRIDE);
};

/// Unindexed triangle list forming an annulus.
#[derive(Debug, Clone)]
pub struct CircleMesh {
    vertices: Vec<MeshVertex>,
    subdivisions: u32,
    radius: f32,
    inner_radius: f32,
}

impl CircleMesh {
    /// Builds the triangle list for `desc`.
    ///
    /// Each angular step emits two triangles:
    /// `(outer@a1, outer@a2, inner@a1)` and `(inner@a1, outer@a2, inner@a2)`.
    /// `subdivisions == 0` yields an empty mesh; `CircleMeshDesc::validate`
    /// rejects it before GPU upload.
    pub fn generate(desc: &CircleMeshDesc) -> Self {
        let n = desc.subdivisions;
        let span = desc.end_angle - desc.start_angle;
        let mut vertices = Vec::with_capacity(n as usize * 6);

        let outer = |c: f32, s: f32| MeshVertex::new(c * desc.radius, s * desc.radius, desc.outer_color);
        let inner = |c: f32, s: f32| {
            MeshVertex::new(c * desc.inner_radius, s * desc.inner_radius, desc.inner_color)
        };

        for i in 0..n {
            let a1 = desc.start_angle + i as f32 * span / n as f32;
            let a2 = desc.start_angle + (i + 1) as f32 * span / n as f32;
            let (s1, c1) = a1.sin_cos();
            let (s2, c2) = a2.sin_cos();

            vertices.extend_from_slice(&[
                outer(c1, s1),
                outer(c2, s2),
                inner(c1, s1),
                inner(c1, s1),
                outer(c2, s2),
                inner(c2, s2),
            ]);
        }

        Self {
            vertices,
            subdivisions: n,
            radius: desc.radius,
            inner_radius: desc.inner_radius,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Raw bytes in the `MeshVertex` layout, ready for a vertex buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }
}
