//! Graphics: camera, geometry, scene graph, picking, and the wgpu renderer.

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;
