//! Orbit camera, its input controller, and shared camera types.

pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_camera;
