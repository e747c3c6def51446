//! # Hover Picking
//!
//! Converts pointer coordinates to a world-space ray and hit-tests it
//! against the celestial bodies, which are all spheres. The closest hit
//! drives the name tooltip.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use crate::gfx::{camera::orbit_camera::OrbitCamera, scene::Scene};
use crate::system::catalog::SUN_RADIUS;
use crate::system::state::{HoverTarget, SolarSystem};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Convert screen coordinates to a world-space ray.
///
/// Unprojects the near- and far-plane points under the cursor through the
/// inverse view-projection matrix.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &OrbitCamera,
) -> Ray {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;

    // Normalized device coordinates, Y flipped
    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height;

    let eye = cgmath::Point3::from_vec(camera.eye);
    let target = cgmath::Point3::from_vec(camera.target);
    let view_matrix = cgmath::Matrix4::look_at_rh(eye, target, camera.up);
    let proj_matrix = cgmath::perspective(camera.fovy, camera.aspect, camera.znear, camera.zfar);

    let view_proj_matrix = proj_matrix * view_matrix;
    let inv_view_proj = view_proj_matrix.invert().unwrap_or(Matrix4::from_scale(1.0));

    let near_point = Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
    let far_point = Vector4::new(ndc_x, ndc_y, 1.0, 1.0);

    let world_near = inv_view_proj * near_point;
    let world_far = inv_view_proj * far_point;

    let near_3d = Vector3::new(
        world_near.x / world_near.w,
        world_near.y / world_near.w,
        world_near.z / world_near.w,
    );
    let far_3d = Vector3::new(
        world_far.x / world_far.w,
        world_far.y / world_far.w,
        world_far.z / world_far.w,
    );

    Ray::new(near_3d, far_3d - near_3d)
}

/// Ray-sphere intersection.
/// Returns the distance to the nearest intersection in front of the origin.
pub fn ray_sphere(ray: &Ray, center: Vector3<f32>, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t_near = -b - sqrt_d;
    let t_far = -b + sqrt_d;
    if t_near >= 0.0 {
        Some(t_near)
    } else if t_far >= 0.0 {
        Some(t_far)
    } else {
        None
    }
}

/// Hit-tests the ray against every body and the sun, nearest first.
pub fn pick(ray: &Ray, system: &SolarSystem, scene: &Scene) -> Option<HoverTarget> {
    let mut closest: Option<(f32, HoverTarget)> = None;

    for (i, body) in system.bodies.iter().enumerate() {
        let Some(node) = body.node else {
            continue;
        };
        let center = scene.world_position(node);
        if let Some(t) = ray_sphere(ray, center, body.info().radius) {
            if closest.map_or(true, |(best, _)| t < best) {
                closest = Some((t, HoverTarget::Body(i)));
            }
        }
    }

    if let Some(t) = ray_sphere(ray, Vector3::new(0.0, 0.0, 0.0), SUN_RADIUS) {
        if closest.map_or(true, |(best, _)| t < best) {
            closest = Some((t, HoverTarget::Sun));
        }
    }

    closest.map(|(_, target)| target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{
        camera_controller::CameraController, camera_utils::CameraManager,
        orbit_camera::OrbitCamera,
    };
    use crate::system::{animation, state::SolarSystem};
    use cgmath::Zero;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, -10.0), Vector3::new(0.0, 0.0, 1.0));

        let hit = ray_sphere(&ray, Vector3::zero(), 1.0);
        assert!((hit.unwrap() - 9.0).abs() < 1e-4);

        let miss = ray_sphere(&ray, Vector3::new(5.0, 0.0, 0.0), 1.0);
        assert!(miss.is_none());
    }

    #[test]
    fn test_ray_inside_sphere_hits_forward() {
        let ray = Ray::new(Vector3::zero(), Vector3::new(1.0, 0.0, 0.0));
        let hit = ray_sphere(&ray, Vector3::zero(), 2.0);
        assert!((hit.unwrap() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_screen_center_ray_points_at_target() {
        let camera = OrbitCamera::new(380.0, 0.0, 0.0, Vector3::zero(), 1.5);
        let ray = screen_to_ray((400.0, 300.0), (800.0, 600.0), &camera);

        // Camera sits on +Z looking at the origin
        assert!(ray.direction.z < -0.99);
        assert!(ray.direction.x.abs() < 1e-2);
        assert!(ray.direction.y.abs() < 1e-2);
    }

    #[test]
    fn test_pick_reports_body_under_the_ray() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut system = SolarSystem::new(&mut rng);
        let camera = OrbitCamera::new(380.0, 0.4, 0.0, Vector3::zero(), 1.5);
        let controller = CameraController::new(0.005, 0.1);
        let mut scene = Scene::new(CameraManager::new(camera, controller));

        for body in &mut system.bodies {
            let pivot = scene.add_node(
                "pivot",
                None,
                None,
                None,
                crate::gfx::scene::RenderKind::Lit,
                [1.0; 4],
                false,
            );
            let node = scene.add_node(
                body.info().name,
                Some(pivot),
                None,
                None,
                crate::gfx::scene::RenderKind::Lit,
                [1.0; 4],
                true,
            );
            body.pivot = Some(pivot);
            body.node = Some(node);
            body.orbit_angle = 0.0;
        }
        animation::sync_to_scene(&system, &mut scene);

        // Earth sits at (10, 0, 0) with orbit angle zero; fire a ray at it.
        let earth_pos = scene.world_position(system.bodies[2].node.unwrap());
        let origin = Vector3::new(earth_pos.x, earth_pos.y, earth_pos.z + 50.0);
        let ray = Ray::new(origin, earth_pos - origin);

        let target = pick(&ray, &system, &scene).unwrap();
        assert_eq!(target.label(), "Earth");
    }

    #[test]
    fn test_pick_prefers_the_nearest_hit() {
        let mut rng = StdRng::seed_from_u64(1);
        let system = SolarSystem::new(&mut rng);
        let camera = OrbitCamera::new(380.0, 0.4, 0.0, Vector3::zero(), 1.5);
        let controller = CameraController::new(0.005, 0.1);
        let scene = Scene::new(CameraManager::new(camera, controller));

        // No body nodes built; only the sun is hit-testable.
        let ray = Ray::new(Vector3::new(0.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -1.0));
        let target = pick(&ray, &system, &scene).unwrap();
        assert_eq!(target.label(), "Sun");

        let miss = Ray::new(Vector3::new(500.0, 0.0, 100.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(pick(&miss, &system, &scene).is_none());
    }
}
