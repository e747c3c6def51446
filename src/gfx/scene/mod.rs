//! Scene graph: node arena, vertex formats, and draw helpers.

pub mod node;
pub mod scene;
pub mod vertex;

pub use node::{Mesh, Node, NodeIndex, RenderKind};
pub use scene::{DrawNode, Scene};
