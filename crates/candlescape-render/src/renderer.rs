//! Scene renderer coordination.

use wgpu::util::DeviceExt;

use candlescape_core::Candle;

use crate::camera::{Camera, CameraUniform};
use crate::gpu_types::{InstanceGpu, LightUniform};
use crate::mesh;
use crate::pipeline::{CubePipeline, InstancedMeshPipeline, DEPTH_FORMAT};
use crate::scene::InstanceBuilder;

/// Shared cube geometry uploaded once.
pub struct MeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl MeshBuffers {
    pub fn unit_cube(device: &wgpu::Device) -> Self {
        let (vertices, indices) = mesh::unit_cube();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// Per-instance data on the GPU.
///
/// An empty candle sequence has nothing to upload; the renderer clears the
/// frame and skips the draw.
pub enum InstanceBuffer {
    Empty,
    Ready { buffer: wgpu::Buffer, count: u32 },
}

impl InstanceBuffer {
    pub fn count(&self) -> u32 {
        match self {
            InstanceBuffer::Empty => 0,
            InstanceBuffer::Ready { count, .. } => *count,
        }
    }
}

/// Depth attachment sized to the surface.
pub struct DepthTarget {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthTarget {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.texture.width() == width.max(1) && self.texture.height() == height.max(1)
    }
}

/// Owns the GPU resources for the candle scene and records its draw.
pub struct SceneRenderer {
    pub cube_pipeline: CubePipeline,
    pub mesh: MeshBuffers,
    pub instances: InstanceBuffer,
    pub builder: InstanceBuilder,

    pub camera_uniform: CameraUniform,
    pub camera_buffer: wgpu::Buffer,
    pub light_buffer: wgpu::Buffer,
    pub scene_bind_group: wgpu::BindGroup,

    pub depth: DepthTarget,
    pub clear_color: wgpu::Color,

    config_width: u32,
    config_height: u32,
}

impl SceneRenderer {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        builder: InstanceBuilder,
        light: LightUniform,
        clear_color: wgpu::Color,
        candles: &[Candle],
    ) -> Self {
        let cube_pipeline = CubePipeline::new(device, format);
        let mesh = MeshBuffers::unit_cube(device);

        let camera_uniform = CameraUniform::new();
        let camera_buffer = cube_pipeline.create_camera_buffer(device, &camera_uniform);
        let light_buffer = cube_pipeline.create_light_buffer(device, &light);
        let scene_bind_group = cube_pipeline.create_bind_group(device, &camera_buffer, &light_buffer);

        let mut renderer = Self {
            cube_pipeline,
            mesh,
            instances: InstanceBuffer::Empty,
            builder,
            camera_uniform,
            camera_buffer,
            light_buffer,
            scene_bind_group,
            depth: DepthTarget::new(device, width, height),
            clear_color,
            config_width: width.max(1),
            config_height: height.max(1),
        };
        renderer.set_candles(device, candles);
        renderer
    }

    /// Rebuild and upload the full instance set, replacing the previous one.
    pub fn set_candles(&mut self, device: &wgpu::Device, candles: &[Candle]) {
        let instances: Vec<InstanceGpu> = self
            .builder
            .build(candles)
            .iter()
            .map(|instance| instance.to_gpu())
            .collect();

        self.instances = if instances.is_empty() {
            InstanceBuffer::Empty
        } else {
            InstanceBuffer::Ready {
                buffer: self.cube_pipeline.create_instance_buffer(device, &instances),
                count: instances.len() as u32,
            }
        };

        log::info!(
            "Uploaded {} instances for {} candles",
            self.instances.count(),
            candles.len()
        );
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.config_width = width.max(1);
        self.config_height = height.max(1);
        if !self.depth.matches(width, height) {
            self.depth = DepthTarget::new(device, width, height);
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.config_width as f32 / self.config_height as f32
    }

    pub fn update_camera(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        self.camera_uniform.update_view_proj(camera, self.aspect_ratio());
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Clear the target and draw every instance.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if let InstanceBuffer::Ready { buffer, count } = &self.instances {
            self.cube_pipeline.render_instances(
                &mut render_pass,
                &self.scene_bind_group,
                &self.mesh.vertex_buffer,
                &self.mesh.index_buffer,
                self.mesh.index_count,
                buffer,
                *count,
            );
        }
    }
}
