//! ImGui overlay: integration plumbing and the control panels.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
