use std::time::Duration;

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::error::{RendererError, Result};
use crate::geometry::CircleMesh;
use crate::sim::ObjectField;
use crate::time::FrameClock;

use super::config::RendererConfig;
use super::layout::{self, COLOR_SLOT, MESH_SLOT, TRANSFORM_SLOT};
use super::shader::{self, FRAGMENT_ENTRY, VERTEX_ENTRY};

/// Per-frame statistics reported by [`InstancedCircleRenderer::render`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameStats {
    pub frame_index: u64,
    /// Seconds the simulation advanced this frame.
    pub dt: f32,
    pub objects_drawn: u32,
    pub vertex_count: u32,
    /// Bytes written to the transform buffer (`objects_drawn * 16`).
    pub bytes_uploaded: u64,
    /// Wall-clock time spent inside `render`.
    pub cpu_time: Duration,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameOutcome {
    Presented(FrameStats),
    /// The surface was unavailable (resize in flight, minimized, timeout).
    /// The simulation still advanced.
    Skipped,
}

/// Draws up to `max_objects` copies of one circle mesh with a single
/// instanced draw call per frame.
///
/// Not reentrant: `render` takes `&mut self`.
pub struct InstancedCircleRenderer<'w> {
    gpu: Gpu<'w>,
    pipeline: wgpu::RenderPipeline,

    mesh_vbo: wgpu::Buffer,
    color_vbo: wgpu::Buffer,
    transform_vbo: wgpu::Buffer,
    vertex_count: u32,

    objects: ObjectField,
    clock: FrameClock,
    clear_color: wgpu::Color,
}

impl<'w> InstancedCircleRenderer<'w> {
    /// Acquires the device, builds the pipeline and fills every buffer.
    ///
    /// Any failure is final for this call; nothing is retried.
    pub async fn init(window: &'w Window, config: RendererConfig) -> Result<Self> {
        config.validate()?;

        let source = config.shader.load()?;
        shader::validate_wgsl(&source)?;

        let gpu = Gpu::new(window, config.gpu.clone()).await?;
        let device = gpu.device();
        layout::check_instance_capacity(config.max_objects, device.limits().max_buffer_size)?;

        let mesh = CircleMesh::generate(&config.mesh);
        let objects = ObjectField::spawn(
            config.max_objects,
            config.active_objects,
            &config.spawn,
            config.seed,
        )?;

        let pipeline = create_pipeline(device, gpu.surface_format(), &source);

        let mesh_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("swarm mesh vbo"),
            contents: mesh.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let color_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("swarm color vbo"),
            contents: bytemuck::cast_slice(&objects.colors()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let transform_vbo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("swarm transform vbo"),
            size: (objects.capacity() * crate::sim::InstanceTransform::STRIDE) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!(
            "renderer ready: {} of {} objects, {} mesh vertices, seed {:#x}",
            objects.active(),
            objects.capacity(),
            mesh.vertex_count(),
            config.seed,
        );

        Ok(Self {
            gpu,
            pipeline,
            mesh_vbo,
            color_vbo,
            transform_vbo,
            vertex_count: mesh.vertex_count(),
            objects,
            clock: config.frame_clock(),
            clear_color: config.clear_color,
        })
    }

    /// Advances the simulation by the time since the previous call, uploads the
    /// active transforms and draws one frame.
    pub fn render(&mut self) -> Result<FrameOutcome> {
        let time = self.clock.tick();
        let started = time.now;

        self.objects.step(time.dt);

        let transforms = self.objects.write_transforms(self.gpu.aspect_ratio());
        let instance_count = transforms.len() as u32;
        let bytes: &[u8] = bytemuck::cast_slice(transforms);
        if !bytes.is_empty() {
            self.gpu.queue().write_buffer(&self.transform_vbo, 0, bytes);
        }
        let bytes_uploaded = bytes.len() as u64;

        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return Ok(FrameOutcome::Skipped);
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => Err(RendererError::SurfaceLost),
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Ok(FrameOutcome::Skipped)
                    }
                };
            }
        };

        // Pass is dropped before the encoder moves into submit().
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("swarm circles pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if instance_count > 0 {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_vertex_buffer(MESH_SLOT, self.mesh_vbo.slice(..));
                rpass.set_vertex_buffer(COLOR_SLOT, self.color_vbo.slice(..));
                rpass.set_vertex_buffer(TRANSFORM_SLOT, self.transform_vbo.slice(..));
                rpass.draw(0..self.vertex_count, 0..instance_count);
            }
        }

        self.gpu.submit(frame);

        Ok(FrameOutcome::Presented(FrameStats {
            frame_index: time.frame_index,
            dt: time.dt,
            objects_drawn: instance_count,
            vertex_count: self.vertex_count,
            bytes_uploaded,
            cpu_time: started.elapsed(),
        }))
    }

    /// Changes how many objects are simulated and drawn.
    pub fn set_active_objects(&mut self, active: usize) -> Result<()> {
        self.objects.set_active(active)?;
        log::debug!("active objects set to {active}");
        Ok(())
    }

    pub fn active_objects(&self) -> usize {
        self.objects.active()
    }

    pub fn max_objects(&self) -> usize {
        self.objects.capacity()
    }

    /// Mesh vertices drawn per instance.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn objects(&self) -> &ObjectField {
        &self.objects
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    /// Restarts delta-time measurement, e.g. after the window was hidden.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    source: &str,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("swarm circles shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("swarm circles pipeline layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("swarm circles pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(VERTEX_ENTRY),
            compilation_options: Default::default(),
            buffers: &[
                layout::mesh_layout(),
                layout::color_layout(),
                layout::transform_layout(),
            ],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(FRAGMENT_ENTRY),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
