//! Vertex buffer layouts for the three input streams.

use crate::error::{RendererError, Result};
use crate::geometry::MeshVertex;
use crate::paint::Rgba8;
use crate::sim::InstanceTransform;

/// Buffer slots, matching `set_vertex_buffer` indices.
pub(super) const MESH_SLOT: u32 = 0;
pub(super) const COLOR_SLOT: u32 = 1;
pub(super) const TRANSFORM_SLOT: u32 = 2;

const MESH_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x2, // position
    1 => Unorm8x4   // gradient color (alpha byte is padding)
];

const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![
    2 => Unorm8x4 // instance color
];

const TRANSFORM_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    3 => Float32x2, // offset
    4 => Float32x2  // scale
];

pub(super) fn mesh_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: MeshVertex::STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &MESH_ATTRS,
    }
}

pub(super) fn color_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Rgba8>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &COLOR_ATTRS,
    }
}

pub(super) fn transform_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: InstanceTransform::STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &TRANSFORM_ATTRS,
    }
}

/// Shader locations fed by the three buffers.
pub(super) fn vertex_locations() -> Vec<u32> {
    MESH_ATTRS
        .iter()
        .chain(&COLOR_ATTRS)
        .chain(&TRANSFORM_ATTRS)
        .map(|a| a.shader_location)
        .collect()
}

/// Rejects capacities whose transform buffer would exceed the device's
/// `max_buffer_size`. The color buffer is smaller per object.
pub(super) fn check_instance_capacity(capacity: usize, max_buffer_size: u64) -> Result<()> {
    let fits = (max_buffer_size / InstanceTransform::STRIDE as u64).min(usize::MAX as u64) as usize;
    if capacity > fits {
        return Err(RendererError::BufferOverflow {
            requested: capacity,
            capacity: fits,
        });
    }
    Ok(())
}
