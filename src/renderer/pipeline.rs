//! wgpu render pipeline for instanced unit cubes

use std::sync::Arc;

use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::vertex::{CUBE_INDICES, CUBE_VERTICES, CubeInstance, Vertex, colors};
use super::{CubeRenderer, Rgb};
use crate::error::InitError;
use crate::settings::Settings;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Initial instance buffer size; grows by powers of two
const INITIAL_INSTANCE_CAPACITY: usize = 256;

/// Cube instances queued for one frame, split into depth layers.
///
/// Each draw bakes the current view and projection into its instance. A
/// projection change after draws have been queued starts a new layer, which
/// is rendered in its own pass over a fresh depth buffer so it lands on top.
#[derive(Debug)]
pub struct DrawQueue {
    view: Mat4,
    projection: Mat4,
    layers: Vec<Vec<CubeInstance>>,
}

impl Default for DrawQueue {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            layers: vec![Vec::new()],
        }
    }
}

impl DrawQueue {
    pub fn reset(&mut self) {
        self.layers.clear();
        self.layers.push(Vec::new());
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
        if self.layers.last().is_some_and(|layer| !layer.is_empty()) {
            self.layers.push(Vec::new());
        }
    }

    pub fn push(&mut self, model: Mat4, color: Rgb) {
        let instance = CubeInstance::new(self.projection * self.view * model, color);
        match self.layers.last_mut() {
            Some(layer) => layer.push(instance),
            None => self.layers.push(vec![instance]),
        }
    }

    /// All instances in upload order
    pub fn instances(&self) -> Vec<CubeInstance> {
        self.layers.iter().flatten().copied().collect()
    }

    /// Instance count of each layer, in draw order
    pub fn layer_sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.layers.iter().map(|layer| layer.len() as u32)
    }
}

/// Main render state
pub struct CubeRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    depth_view: wgpu::TextureView,
    /// Surface expects linear color and encodes to sRGB itself
    srgb_target: bool,
    /// Viewport size in pixels
    pub size: (u32, u32),
    draws: DrawQueue,
}

impl CubeRenderState {
    pub async fn new(window: Arc<Window>, settings: &Settings) -> Result<Self, InitError> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("stacker-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        log::debug!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(InitError::NoSurfaceFormat)?;
        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: settings.present_mode(),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("Surface config: {}x{}, {:?}", width, height, config.present_mode);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("cube.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cube_pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), CubeInstance::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Index winding is mixed across faces
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertices"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_indices"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = Self::create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);
        let depth_view = Self::create_depth_view(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            depth_view,
            srgb_target: surface_format.is_srgb(),
            size: (width, height),
            draws: DrawQueue::default(),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = Self::create_depth_view(&self.device, new_width, new_height);
        }
    }

    /// Reconfigure after the surface was lost or went stale
    pub fn reconfigure(&mut self) {
        let (width, height) = self.size;
        self.resize(width, height);
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cube_instances"),
            size: (std::mem::size_of::<CubeInstance>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        depth_texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn ensure_instance_capacity(&mut self, needed: usize) {
        if needed > self.instance_capacity {
            self.instance_capacity = needed.next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(&self.device, self.instance_capacity);
            log::debug!("Instance buffer grown to {}", self.instance_capacity);
        }
    }

    fn target_color(&self, color: Rgb) -> Rgb {
        if self.srgb_target {
            colors::srgb_to_linear(color)
        } else {
            color
        }
    }
}

impl CubeRenderer for CubeRenderState {
    type Error = wgpu::SurfaceError;

    fn clear(&mut self) {
        self.draws.reset();
    }

    fn set_view(&mut self, view: Mat4) {
        self.draws.set_view(view);
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.draws.set_projection(projection);
    }

    fn draw_cube(&mut self, model: Mat4, color: Rgb) {
        let color = self.target_color(color);
        self.draws.push(model, color);
    }

    fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let instances = self.draws.instances();
        self.ensure_instance_capacity(instances.len());
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        let background = self.target_color(colors::BACKGROUND);
        let index_count = CUBE_INDICES.len() as u32;
        let mut first_instance = 0u32;

        for (i, count) in self.draws.layer_sizes().enumerate() {
            let load = if i == 0 {
                wgpu::LoadOp::Clear(wgpu::Color {
                    r: background[0] as f64,
                    g: background[1] as f64,
                    b: background[2] as f64,
                    a: 1.0,
                })
            } else {
                wgpu::LoadOp::Load
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cube_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..index_count, 0, first_instance..first_instance + count);
            }
            first_instance += count;
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_draws_bake_current_matrices() {
        let mut queue = DrawQueue::default();
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let projection = Mat4::from_scale(Vec3::splat(2.0));
        queue.set_view(view);
        queue.set_projection(projection);
        queue.push(Mat4::IDENTITY, [1.0, 0.0, 0.0]);

        let instances = queue.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].mvp, (projection * view).to_cols_array_2d());
    }

    #[test]
    fn test_projection_after_draws_opens_layer() {
        let mut queue = DrawQueue::default();
        // Projection before any draw stays in the first layer
        queue.set_view(Mat4::IDENTITY);
        queue.set_projection(Mat4::IDENTITY);
        queue.push(Mat4::IDENTITY, [0.0; 3]);
        queue.push(Mat4::IDENTITY, [0.0; 3]);
        queue.set_projection(Mat4::ZERO);
        queue.set_view(Mat4::IDENTITY);
        queue.push(Mat4::IDENTITY, [1.0; 3]);

        assert_eq!(queue.layer_sizes().collect::<Vec<_>>(), vec![2, 1]);
        let instances = queue.instances();
        assert_eq!(instances[2].color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(instances[2].mvp, Mat4::ZERO.to_cols_array_2d());
    }

    #[test]
    fn test_reset_empties_queue() {
        let mut queue = DrawQueue::default();
        queue.push(Mat4::IDENTITY, [0.0; 3]);
        queue.set_projection(Mat4::IDENTITY);
        queue.push(Mat4::IDENTITY, [0.0; 3]);
        queue.reset();

        assert!(queue.instances().is_empty());
        assert_eq!(queue.layer_sizes().collect::<Vec<_>>(), vec![0]);
    }
}
