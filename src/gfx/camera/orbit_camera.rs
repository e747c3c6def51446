use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Spherical-coordinate camera orbiting a focus point.
///
/// `distance`, `pitch` and `yaw` are the authoritative state; `eye` is
/// recomputed from them after every change.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // recomputed by update()
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: cgmath::Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 2000.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.bounds.min_distance, self.bounds.max_distance);
        self.update();
    }

    /// Multiplies the distance by `factor`.
    ///
    /// If the result would leave the distance bounds the distance is left
    /// unchanged, so a zoom step near a limit is a no-op rather than a
    /// partial clamp.
    pub fn zoom_by(&mut self, factor: f32) {
        let next = self.distance * factor;
        if next >= self.bounds.min_distance && next <= self.bounds.max_distance {
            self.distance = next;
            self.update();
        }
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: 20.0,
            max_distance: 800.0,
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(380.0, 0.4, 0.0, Vector3::zero(), 1.5)
    }

    #[test]
    fn test_set_distance_clamps_to_bounds() {
        let mut cam = camera();
        cam.set_distance(1.0);
        assert_eq!(cam.distance, cam.bounds.min_distance);
        cam.set_distance(10_000.0);
        assert_eq!(cam.distance, cam.bounds.max_distance);
    }

    #[test]
    fn test_zoom_by_is_noop_when_leaving_bounds() {
        let mut cam = camera();

        cam.set_distance(cam.bounds.min_distance * 1.05);
        let near = cam.distance;
        cam.zoom_by(1.0 / 1.2);
        assert_eq!(cam.distance, near);

        cam.set_distance(cam.bounds.max_distance / 1.05);
        let far = cam.distance;
        cam.zoom_by(1.2);
        assert_eq!(cam.distance, far);

        cam.set_distance(100.0);
        cam.zoom_by(1.2);
        assert!((cam.distance - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_eye_tracks_spherical_state() {
        let mut cam = camera();
        cam.set_pitch(0.0);
        cam.set_yaw(0.0);
        cam.set_distance(100.0);
        assert!((cam.eye.x).abs() < 1e-4);
        assert!((cam.eye.y).abs() < 1e-4);
        assert!((cam.eye.z - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_stays_short_of_the_poles() {
        let mut cam = camera();
        cam.set_pitch(10.0);
        assert!(cam.pitch < std::f32::consts::PI / 2.0);
        cam.set_pitch(-10.0);
        assert!(cam.pitch > -std::f32::consts::PI / 2.0);
    }
}
