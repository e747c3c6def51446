//! Assembles the scene graph from the body catalog
//!
//! Node layout per body: a pivot at the origin whose Y rotation is the orbit
//! angle, with the body mesh offset from it by the orbital distance.
//! Decorations (atmosphere shell, ring annulus) are children of the body
//! node so they inherit its spin and radius scale.

use cgmath::Matrix4;
use rand::Rng;

use crate::gfx::camera::{
    camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
};
use crate::gfx::geometry::{generate_annulus, generate_sphere};
use crate::gfx::scene::{vertex::StarInstance, Mesh, RenderKind, Scene};
use crate::system::catalog::{BODIES, SUN_GLOW_RADIUS, SUN_RADIUS};
use crate::system::starfield::{self, STARFIELD_RADIUS, STAR_COUNT};
use crate::system::state::SolarSystem;
use crate::texture::generators;

/// Initial camera placement, looking down at the system from outside
/// Neptune's orbit.
const CAMERA_DISTANCE: f32 = 380.0;
const CAMERA_PITCH: f32 = 0.4;

const GLOW_TINT: [f32; 4] = [1.0, 0.55, 0.18, 1.0];
const ATMOSPHERE_TINT: [f32; 4] = [0.55, 0.75, 1.0, 0.25];
const RING_TINT: [f32; 4] = [0.78, 0.66, 0.45, 0.6];
const ORBIT_GUIDE_TINT: [f32; 4] = [1.0, 1.0, 1.0, 0.12];

/// Builds the complete scene and fills in the node handles on `system`.
pub fn build_scene(system: &mut SolarSystem, rng: &mut impl Rng) -> Scene {
    let camera = OrbitCamera::new(
        CAMERA_DISTANCE,
        CAMERA_PITCH,
        0.0,
        cgmath::Vector3::new(0.0, 0.0, 0.0),
        1.5,
    );
    let controller = CameraController::new(0.005, 0.1);
    let mut scene = Scene::new(CameraManager::new(camera, controller));

    let sphere = generate_sphere(48, 32);

    let sun = scene.add_node(
        "Sun",
        None,
        Some(Mesh::from_geometry(&sphere)),
        Some(generators::sun_surface(rng)),
        RenderKind::Emissive,
        [1.0, 1.0, 1.0, 1.0],
        true,
    );
    scene.set_transform(sun, Matrix4::from_scale(SUN_RADIUS));
    system.sun_node = Some(sun);

    let glow = scene.add_node(
        "Sun Glow",
        None,
        Some(Mesh::from_geometry(&sphere)),
        None,
        RenderKind::Glow,
        GLOW_TINT,
        false,
    );
    scene.set_transform(glow, Matrix4::from_scale(SUN_GLOW_RADIUS));
    system.glow_node = Some(glow);

    for i in 0..system.bodies.len() {
        let info = &BODIES[i];

        let pivot = scene.add_node(
            &format!("{} Pivot", info.name),
            None,
            None,
            None,
            RenderKind::Lit,
            [1.0; 4],
            false,
        );
        let node = scene.add_node(
            info.name,
            Some(pivot),
            Some(Mesh::from_geometry(&sphere)),
            Some(generators::texture_for(info, rng)),
            RenderKind::Lit,
            [1.0, 1.0, 1.0, 1.0],
            true,
        );
        system.bodies[i].pivot = Some(pivot);
        system.bodies[i].node = Some(node);

        // Decorations inherit the body node's spin and radius scale, so
        // their dimensions are relative to the planet radius.
        if info.has_atmosphere {
            let atmosphere = scene.add_node(
                &format!("{} Atmosphere", info.name),
                Some(node),
                Some(Mesh::from_geometry(&sphere)),
                None,
                RenderKind::Translucent,
                ATMOSPHERE_TINT,
                false,
            );
            scene.set_transform(atmosphere, Matrix4::from_scale(1.05));
        }

        if info.has_ring {
            let ring = generate_annulus(1.4, 2.3, 96);
            scene.add_node(
                &format!("{} Ring", info.name),
                Some(node),
                Some(Mesh::from_geometry(&ring)),
                None,
                RenderKind::Translucent,
                RING_TINT,
                false,
            );
        }

        let guide = generate_annulus(info.distance - 0.2, info.distance + 0.2, 160);
        scene.add_node(
            &format!("{} Orbit", info.name),
            None,
            Some(Mesh::from_geometry(&guide)),
            None,
            RenderKind::Translucent,
            ORBIT_GUIDE_TINT,
            false,
        );
    }

    scene.star_instances = starfield::generate(STAR_COUNT, STARFIELD_RADIUS, rng)
        .into_iter()
        .map(|star| StarInstance {
            position: star.position,
            size: star.size,
            color: star.color,
            _pad: 0.0,
        })
        .collect();

    crate::system::animation::sync_to_scene(system, &mut scene);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn built() -> (SolarSystem, Scene) {
        let mut rng = StdRng::seed_from_u64(13);
        let mut system = SolarSystem::new(&mut rng);
        let scene = build_scene(&mut system, &mut rng);
        (system, scene)
    }

    #[test]
    fn test_every_body_gets_pivot_and_node() {
        let (system, scene) = built();
        assert!(system.sun_node.is_some());
        assert!(system.glow_node.is_some());
        for body in &system.bodies {
            let pivot = body.pivot.unwrap();
            let node = body.node.unwrap();
            assert!(scene.nodes[node].parent == Some(pivot));
            assert!(scene.nodes[node].pickable);
            assert!(!scene.nodes[pivot].pickable);
        }
    }

    #[test]
    fn test_node_counts_match_the_catalog() {
        let (_, scene) = built();
        // sun + glow + 8 * (pivot + body + orbit guide) + atmosphere + ring
        assert_eq!(scene.nodes.len(), 2 + 8 * 3 + 2);

        let pickable = scene.nodes.iter().filter(|n| n.pickable).count();
        assert_eq!(pickable, 9);
    }

    #[test]
    fn test_starfield_is_populated() {
        let (_, scene) = built();
        assert_eq!(scene.star_instances.len(), STAR_COUNT);
    }

    #[test]
    fn test_bodies_start_on_their_orbits() {
        let (system, scene) = built();
        for body in &system.bodies {
            let pos = scene.world_position(body.node.unwrap());
            let planar = (pos.x * pos.x + pos.z * pos.z).sqrt();
            assert!((planar - body.info().distance).abs() < 1e-2);
            assert!(pos.y.abs() < 1e-4);
        }
    }
}
