use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Damping factor applied to the rotation velocity each frame.
const ROTATE_DAMPING: f32 = 0.05;

/// Mouse input handling for the orbit camera.
///
/// Drag rotation feeds a velocity that is applied and decayed every frame in
/// [`CameraController::update`], so the camera keeps gliding briefly after
/// the pointer stops. Scroll zoom clamps at the distance bounds.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    is_mouse_pressed: bool,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            is_mouse_pressed: false,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    pub fn process_events(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.set_distance(
                    camera.distance * (1.1f32).powf(scroll_amount * self.zoom_speed),
                );
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    self.yaw_velocity -= delta.0 as f32 * self.rotate_speed;
                    self.pitch_velocity += delta.1 as f32 * self.rotate_speed;
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    /// Applies the accumulated rotation velocity and decays it.
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        if self.yaw_velocity.abs() > 1e-6 || self.pitch_velocity.abs() > 1e-6 {
            camera.add_yaw(self.yaw_velocity);
            camera.add_pitch(self.pitch_velocity);
        }
        self.yaw_velocity *= 1.0 - ROTATE_DAMPING;
        self.pitch_velocity *= 1.0 - ROTATE_DAMPING;
    }

    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;

    #[test]
    fn test_rotation_velocity_decays() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = OrbitCamera::new(380.0, 0.4, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.5);

        controller.yaw_velocity = 0.1;
        let start_yaw = camera.yaw;
        for _ in 0..200 {
            controller.update(&mut camera);
        }

        assert!(camera.yaw > start_yaw);
        assert!(controller.yaw_velocity < 1e-4);
    }

    #[test]
    fn test_update_without_input_leaves_camera_alone() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut camera = OrbitCamera::new(380.0, 0.4, 0.3, Vector3::new(0.0, 0.0, 0.0), 1.5);
        let (yaw, pitch) = (camera.yaw, camera.pitch);

        controller.update(&mut camera);

        assert_eq!(camera.yaw, yaw);
        assert_eq!(camera.pitch, pitch);
    }
}
