//! Scene graph nodes and their GPU-side mesh resources.

use cgmath::Matrix4;
use wgpu::Device;

use crate::gfx::geometry::GeometryData;
use crate::gfx::resources::texture_resource::TextureResource;
use crate::gfx::scene::vertex::Vertex3D;
use crate::texture::PixelBuffer;

/// Handle into the scene's node arena.
pub type NodeIndex = usize;

/// Which pipeline a node is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// Textured, lit by the sun's point light.
    Lit,
    /// Textured, fullbright (the sun itself).
    Emissive,
    /// Alpha-blended, no depth write (atmosphere, rings, orbit guides).
    Translucent,
    /// Additive rim shell rendered with front-face culling (sun glow).
    Glow,
}

/// Indexed triangle mesh with lazily created GPU buffers.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    pub(crate) vertex_buffer: Option<wgpu::Buffer>,
    pub(crate) index_buffer: Option<wgpu::Buffer>,
    pub index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );
        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// Per-node uniform contents: model matrix plus material parameters.
///
/// `params[0]` selects emissive shading, `params[1]` is the alpha applied by
/// the translucent pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub params: [f32; 4],
}

/// GPU resources created once per node at init time.
pub struct NodeGpuResources {
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
    pub texture_bind_group: wgpu::BindGroup,
}

/// One node in the scene graph.
///
/// Transforms compose through the `parent` chain; a node without a mesh is a
/// pure pivot. Pickable nodes are hit-tested as spheres by the picking
/// module.
pub struct Node {
    pub name: String,
    pub parent: Option<NodeIndex>,
    pub transform: Matrix4<f32>,
    pub mesh: Option<Mesh>,
    /// CPU pixels; uploaded at GPU init. Nodes without a surface get a
    /// single white texel so every node binds the same layout.
    pub pixels: Option<PixelBuffer>,
    pub texture: Option<TextureResource>,
    pub kind: RenderKind,
    pub tint: [f32; 4],
    pub visible: bool,
    pub pickable: bool,
    pub gpu_resources: Option<NodeGpuResources>,
}

impl Node {
    pub fn uniform(&self, world: Matrix4<f32>) -> NodeUniform {
        NodeUniform {
            model: world.into(),
            tint: self.tint,
            params: [
                if self.kind == RenderKind::Emissive {
                    1.0
                } else {
                    0.0
                },
                self.tint[3],
                0.0,
                0.0,
            ],
        }
    }
}
