//! WGPU-based rendering engine
//!
//! Owns the surface, device, and the four pipelines the scene needs:
//! opaque surfaces, translucent overlays, the additive sun glow, and the
//! instanced star-field. UI overlay rendering is delegated to a callback.

use std::sync::Arc;

use bytemuck::Zeroable;
use thiserror::Error;
use wgpu::TextureFormat;

use crate::gfx::{
    camera::orbit_camera::OrbitCamera,
    resources::texture_resource::TextureResource,
    scene::{
        scene::{DrawNode, Scene},
        vertex::{StarInstance, Vertex3D},
        RenderKind,
    },
};
use cgmath::InnerSpace;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to acquire surface frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Global per-frame uniform shared by every pipeline.
///
/// `ambient.w` carries the star-field rotation angle; `light_color.w` is the
/// light intensity scalar.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalUniform {
    view_proj: [[f32; 4]; 4],
    view_position: [f32; 4],
    light_position: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
}

/// Light and ambient configuration, set by the scene builder.
#[derive(Debug, Clone, Copy)]
pub struct LightConfig {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub ambient: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            color: [1.0, 0.98, 0.92],
            intensity: 1.2,
            ambient: [0.08, 0.08, 0.10],
        }
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,

    global_buffer: wgpu::Buffer,
    global_bind_group: wgpu::BindGroup,

    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,

    light_config: LightConfig,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Panics
    /// Panics if unable to create a wgpu adapter or device.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> RenderEngine {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to request adapter!");

        let (device, queue) = {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("WGPU Device"),
                    required_features: wgpu::Features::default(),
                    required_limits: wgpu::Limits {
                        max_texture_dimension_2d: 4096,
                        ..wgpu::Limits::downlevel_defaults()
                    },
                    memory_hints: wgpu::MemoryHints::default(),
                    trace: wgpu::Trace::Off,
                })
                .await
                .expect("Failed to request a device!")
        };

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        // Global uniform buffer and bind group
        let global_buffer = wgpu::util::DeviceExt::create_buffer_init(
            &device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Global Uniform Buffer"),
                contents: bytemuck::bytes_of(&GlobalUniform::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Global Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        let node_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Node Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Node Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });
        let glow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Glow Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("glow.wgsl").into()),
        });
        let star_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Star Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("stars.wgsl").into()),
        });

        let scene_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[&global_layout, &node_layout, &texture_layout],
                push_constant_ranges: &[],
            });
        let glow_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Glow Pipeline Layout"),
                bind_group_layouts: &[&global_layout, &node_layout],
                push_constant_ranges: &[],
            });
        let star_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Star Pipeline Layout"),
                bind_group_layouts: &[&global_layout],
                push_constant_ranges: &[],
            });

        let opaque_pipeline = Self::create_pipeline(
            &device,
            "Opaque Pipeline",
            &scene_pipeline_layout,
            &scene_shader,
            &[Vertex3D::desc()],
            format,
            None,
            Some(wgpu::Face::Back),
            true,
        );
        let translucent_pipeline = Self::create_pipeline(
            &device,
            "Translucent Pipeline",
            &scene_pipeline_layout,
            &scene_shader,
            &[Vertex3D::desc()],
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            None,
            false,
        );
        let glow_pipeline = Self::create_pipeline(
            &device,
            "Glow Pipeline",
            &glow_pipeline_layout,
            &glow_shader,
            &[Vertex3D::desc()],
            format,
            Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
            Some(wgpu::Face::Front),
            false,
        );
        let star_pipeline = Self::create_pipeline(
            &device,
            "Star Pipeline",
            &star_pipeline_layout,
            &star_shader,
            &[StarInstance::desc()],
            format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            None,
            false,
        );

        RenderEngine {
            surface,
            device: device.into(),
            queue: queue.into(),
            config,
            depth_texture,
            format,
            global_buffer,
            global_bind_group,
            opaque_pipeline,
            translucent_pipeline,
            glow_pipeline,
            star_pipeline,
            light_config: LightConfig::default(),
            clear_color: wgpu::Color {
                r: 0.01,
                g: 0.01,
                b: 0.03,
                a: 1.0,
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        buffers: &[wgpu::VertexBufferLayout],
        format: TextureFormat,
        blend: Option<wgpu::BlendState>,
        cull_mode: Option<wgpu::Face>,
        depth_write: bool,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: depth_write,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Writes the per-frame global uniform from the current camera state.
    pub fn update(&mut self, camera: &OrbitCamera, starfield_angle: f32) {
        let forward = (camera.target - camera.eye).normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);

        let light = self.light_config;
        let uniform = GlobalUniform {
            view_proj: camera.uniform.view_proj,
            view_position: camera.uniform.view_position,
            light_position: [
                light.position[0],
                light.position[1],
                light.position[2],
                1.0,
            ],
            light_color: [light.color[0], light.color[1], light.color[2], light.intensity],
            ambient: [
                light.ambient[0],
                light.ambient[1],
                light.ambient[2],
                starfield_angle,
            ],
            camera_right: [right.x, right.y, right.z, 0.0],
            camera_up: [up.x, up.y, up.z, 0.0],
        };
        self.queue
            .write_buffer(&self.global_buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn set_light(&mut self, light_config: LightConfig) {
        self.light_config = light_config;
    }

    pub fn set_clear_color(&mut self, color: wgpu::Color) {
        self.clear_color = color;
    }

    /// Renders one frame: opaque bodies, star-field, translucent overlays,
    /// sun glow, then the UI overlay callback.
    pub fn render_frame<F>(&mut self, scene: &Scene, ui_callback: Option<F>) -> Result<(), RenderError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.global_bind_group, &[]);

            render_pass.set_pipeline(&self.opaque_pipeline);
            for index in scene.nodes_of_kind(RenderKind::Lit) {
                render_pass.draw_node(&scene.nodes[index]);
            }
            for index in scene.nodes_of_kind(RenderKind::Emissive) {
                render_pass.draw_node(&scene.nodes[index]);
            }

            if let Some(star_buffer) = &scene.star_buffer {
                render_pass.set_pipeline(&self.star_pipeline);
                render_pass.set_vertex_buffer(0, star_buffer.slice(..));
                render_pass.draw(0..6, 0..scene.star_instances.len() as u32);
            }

            render_pass.set_pipeline(&self.translucent_pipeline);
            for index in scene.nodes_of_kind(RenderKind::Translucent) {
                render_pass.draw_node(&scene.nodes[index]);
            }

            render_pass.set_pipeline(&self.glow_pipeline);
            for index in scene.nodes_of_kind(RenderKind::Glow) {
                render_pass.draw_node(&scene.nodes[index]);
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface and recreates the depth buffer.
    /// Zero-sized requests are ignored (minimized window).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reconfigures the surface after a lost or outdated frame.
    pub fn reconfigure_surface(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
