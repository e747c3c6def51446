//! # Helios
//!
//! An interactive 3D solar system running on wgpu and winit: eight planets
//! orbiting an animated sun inside a spherical star field, with an orbit
//! camera, hover picking, and an ImGui control panel.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     env_logger::init();
//!     let app = helios::default();
//!     app.run()
//! }
//! ```
//!
//! Use [`HeliosApp::with_seed`] for a reproducible sky and orbit phases.

pub mod app;
pub mod gfx;
pub mod system;
pub mod texture;
pub mod ui;

pub use app::HeliosApp;

/// Creates the application with entropy-seeded starting conditions.
pub fn default() -> HeliosApp {
    pollster::block_on(HeliosApp::new())
}
