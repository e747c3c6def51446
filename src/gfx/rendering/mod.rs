//! WGPU rendering: engine setup, pipelines, and shaders.

pub mod render_engine;

pub use render_engine::{RenderEngine, RenderError};
