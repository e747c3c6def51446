//! The scene: a flat node arena plus camera and star-field state.

use cgmath::Matrix4;
use cgmath::SquareMatrix;
use wgpu::{Device, Queue};

use crate::gfx::camera::camera_utils::CameraManager;
use crate::gfx::resources::texture_resource::TextureResource;
use crate::gfx::scene::node::{Mesh, Node, NodeGpuResources, NodeIndex, NodeUniform, RenderKind};
use crate::gfx::scene::vertex::StarInstance;
use crate::texture::PixelBuffer;

pub struct Scene {
    /// Node arena. Parents are always inserted before their children, so a
    /// single in-order pass resolves world transforms.
    pub nodes: Vec<Node>,
    pub camera_manager: CameraManager,
    /// Star billboard instances, uploaded once at GPU init.
    pub star_instances: Vec<StarInstance>,
    pub star_buffer: Option<wgpu::Buffer>,
    /// Slow Y rotation applied to the whole star-field in the star shader.
    pub starfield_angle: f32,
    world_transforms: Vec<Matrix4<f32>>,
}

impl Scene {
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            nodes: Vec::new(),
            camera_manager,
            star_instances: Vec::new(),
            star_buffer: None,
            starfield_angle: 0.0,
            world_transforms: Vec::new(),
        }
    }

    /// Adds a node and returns its handle.
    ///
    /// # Panics
    /// Panics if `parent` refers to a node added after this one would be;
    /// parents must be inserted first.
    pub fn add_node(
        &mut self,
        name: &str,
        parent: Option<NodeIndex>,
        mesh: Option<Mesh>,
        pixels: Option<PixelBuffer>,
        kind: RenderKind,
        tint: [f32; 4],
        pickable: bool,
    ) -> NodeIndex {
        if let Some(p) = parent {
            assert!(p < self.nodes.len(), "parent must be added before child");
        }
        self.nodes.push(Node {
            name: name.to_owned(),
            parent,
            transform: Matrix4::identity(),
            mesh,
            pixels,
            texture: None,
            kind,
            tint,
            visible: true,
            pickable,
            gpu_resources: None,
        });
        self.nodes.len() - 1
    }

    pub fn set_transform(&mut self, index: NodeIndex, transform: Matrix4<f32>) {
        self.nodes[index].transform = transform;
    }

    /// World transform of a node, composed through its parent chain.
    pub fn world_transform(&self, index: NodeIndex) -> Matrix4<f32> {
        let mut world = self.nodes[index].transform;
        let mut current = self.nodes[index].parent;
        while let Some(parent) = current {
            world = self.nodes[parent].transform * world;
            current = self.nodes[parent].parent;
        }
        world
    }

    /// World-space position of a node's origin.
    pub fn world_position(&self, index: NodeIndex) -> cgmath::Vector3<f32> {
        let world = self.world_transform(index);
        cgmath::Vector3::new(world.w.x, world.w.y, world.w.z)
    }

    /// Creates all GPU buffers, textures, and bind groups.
    ///
    /// Nodes without surface pixels get a single white texel so every node
    /// binds the same texture layout.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &Queue) {
        let uniform_layout = Self::node_uniform_layout(device);
        let texture_layout = Self::texture_layout(device);

        for node in &mut self.nodes {
            let Some(mesh) = node.mesh.as_mut() else {
                continue;
            };
            mesh.init_gpu_resources(device);

            let texture = match &node.pixels {
                Some(pixels) => TextureResource::create_from_rgba_data(
                    device,
                    queue,
                    pixels.bytes(),
                    pixels.width,
                    pixels.height,
                    &node.name,
                ),
                None => TextureResource::create_from_rgba_data(
                    device,
                    queue,
                    &[255, 255, 255, 255],
                    1,
                    1,
                    "white",
                ),
            };

            let uniform = node.uniform(node.transform);
            let uniform_buffer = wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Node Uniform Buffer"),
                    contents: bytemuck::bytes_of(&uniform),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                },
            );

            let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Node Uniform Bind Group"),
                layout: &uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

            let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Node Texture Bind Group"),
                layout: &texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            });

            node.texture = Some(texture);
            node.gpu_resources = Some(NodeGpuResources {
                uniform_buffer,
                uniform_bind_group,
                texture_bind_group,
            });
        }

        if !self.star_instances.is_empty() {
            self.star_buffer = Some(wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some("Star Instance Buffer"),
                    contents: bytemuck::cast_slice(&self.star_instances),
                    usage: wgpu::BufferUsages::VERTEX,
                },
            ));
        }
    }

    /// Recomputes world transforms and writes every node uniform.
    pub fn update_gpu(&mut self, queue: &Queue) {
        self.world_transforms.clear();
        for i in 0..self.nodes.len() {
            let node = &self.nodes[i];
            let world = match node.parent {
                // parent precedes child in the arena
                Some(parent) => self.world_transforms[parent] * node.transform,
                None => node.transform,
            };
            self.world_transforms.push(world);
        }

        for (node, world) in self.nodes.iter().zip(&self.world_transforms) {
            if let Some(gpu) = &node.gpu_resources {
                let uniform: NodeUniform = node.uniform(*world);
                queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
            }
        }
    }

    /// Indices of visible mesh nodes drawn by a given pipeline.
    pub fn nodes_of_kind(&self, kind: RenderKind) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.visible && n.mesh.is_some() && n.kind == kind)
            .map(|(i, _)| i)
    }

    fn node_uniform_layout(device: &Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        })
    }

    fn texture_layout(device: &Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        })
    }
}

/// Draws a node's mesh if its buffers are uploaded.
pub trait DrawNode<'a> {
    fn draw_node(&mut self, node: &'a Node);
}

impl<'a, 'b> DrawNode<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_node(&mut self, node: &'b Node) {
        let (Some(mesh), Some(gpu)) = (&node.mesh, &node.gpu_resources) else {
            return;
        };
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return;
        };

        self.set_bind_group(1, &gpu.uniform_bind_group, &[]);
        self.set_bind_group(2, &gpu.texture_bind_group, &[]);
        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{
        camera_controller::CameraController, orbit_camera::OrbitCamera,
    };
    use cgmath::{Rad, Vector3};

    fn empty_scene() -> Scene {
        let camera = OrbitCamera::new(380.0, 0.4, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.5);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn test_world_transform_composes_through_parents() {
        let mut scene = empty_scene();
        let pivot = scene.add_node(
            "pivot",
            None,
            None,
            None,
            RenderKind::Lit,
            [1.0; 4],
            false,
        );
        let child = scene.add_node(
            "child",
            Some(pivot),
            None,
            None,
            RenderKind::Lit,
            [1.0; 4],
            false,
        );

        scene.set_transform(pivot, Matrix4::from_angle_y(Rad(std::f32::consts::FRAC_PI_2)));
        scene.set_transform(
            child,
            Matrix4::from_translation(Vector3::new(10.0, 0.0, 0.0)),
        );

        let pos = scene.world_position(child);
        assert!(pos.x.abs() < 1e-4);
        assert!((pos.z + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_nodes_of_kind_skips_pivots_and_other_kinds() {
        let mut scene = empty_scene();
        let sphere = crate::gfx::geometry::generate_sphere(8, 6);

        scene.add_node("pivot", None, None, None, RenderKind::Lit, [1.0; 4], false);
        scene.add_node(
            "body",
            None,
            Some(Mesh::from_geometry(&sphere)),
            None,
            RenderKind::Lit,
            [1.0; 4],
            true,
        );
        scene.add_node(
            "shell",
            None,
            Some(Mesh::from_geometry(&sphere)),
            None,
            RenderKind::Glow,
            [1.0; 4],
            false,
        );

        assert_eq!(scene.nodes_of_kind(RenderKind::Lit).count(), 1);
        assert_eq!(scene.nodes_of_kind(RenderKind::Glow).count(), 1);
        assert_eq!(scene.nodes_of_kind(RenderKind::Translucent).count(), 0);
    }
}
