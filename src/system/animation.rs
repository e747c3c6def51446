//! Per-frame orbital kinematics
//!
//! [`advance`] is a pure state update so the frame loop and the tests drive
//! the exact same code; [`sync_to_scene`] pushes the resulting angles into
//! scene node transforms afterward.

use std::f32::consts::TAU;

use cgmath::{Matrix4, Rad, Vector3};

use crate::gfx::scene::Scene;
use crate::system::catalog::{ORBIT_PACING, STARFIELD_SPIN_STEP, SUN_RADIUS, SUN_SPIN_STEP};
use crate::system::state::SolarSystem;

/// Advances all angles by one frame of `delta` seconds.
///
/// No-op while paused. The sun and star-field use small fixed per-frame
/// increments independent of `delta`; body orbits scale with elapsed time,
/// the global pacing constant, the catalog speed, and the user multiplier.
pub fn advance(system: &mut SolarSystem, delta: f32) {
    if system.state.paused {
        return;
    }

    system.state.sun_spin += SUN_SPIN_STEP;
    system.state.starfield_spin += STARFIELD_SPIN_STEP;

    for body in &mut system.bodies {
        let info = body.info();
        let step = delta * ORBIT_PACING * info.orbital_speed * body.speed_multiplier;
        body.orbit_angle = (body.orbit_angle + step).rem_euclid(TAU);
        body.spin_angle = (body.spin_angle + delta * info.rotation_speed).rem_euclid(TAU);
    }
}

/// Writes the current angles into the scene graph.
///
/// Orbiting is a single Y rotation of each body's pivot node; the body node
/// itself carries the orbital offset, self-rotation, and radius scale.
pub fn sync_to_scene(system: &SolarSystem, scene: &mut Scene) {
    for body in &system.bodies {
        let info = body.info();

        if let Some(pivot) = body.pivot {
            scene.set_transform(pivot, Matrix4::from_angle_y(Rad(body.orbit_angle)));
        }
        if let Some(node) = body.node {
            let local = Matrix4::from_translation(Vector3::new(info.distance, 0.0, 0.0))
                * Matrix4::from_angle_y(Rad(body.spin_angle))
                * Matrix4::from_scale(info.radius);
            scene.set_transform(node, local);
        }
    }

    if let Some(sun) = system.sun_node {
        let local = Matrix4::from_angle_y(Rad(system.state.sun_spin))
            * Matrix4::from_scale(SUN_RADIUS);
        scene.set_transform(sun, local);
    }

    scene.starfield_angle = system.state.starfield_spin;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn system() -> SolarSystem {
        let mut rng = StdRng::seed_from_u64(42);
        SolarSystem::new(&mut rng)
    }

    #[test]
    fn test_pause_freezes_angles() {
        let mut sys = system();
        sys.state.paused = true;
        let before: Vec<(f32, f32)> = sys
            .bodies
            .iter()
            .map(|b| (b.orbit_angle, b.spin_angle))
            .collect();

        for _ in 0..60 {
            advance(&mut sys, 1.0 / 60.0);
        }

        for (body, (orbit, spin)) in sys.bodies.iter().zip(&before) {
            assert_eq!(body.orbit_angle, *orbit);
            assert_eq!(body.spin_angle, *spin);
        }
        assert_eq!(sys.state.sun_spin, 0.0);
    }

    #[test]
    fn test_unpause_resumes_from_prior_angle() {
        let mut sys = system();
        advance(&mut sys, 0.1);
        let mid = sys.bodies[0].orbit_angle;

        sys.state.paused = true;
        advance(&mut sys, 10.0);
        assert_eq!(sys.bodies[0].orbit_angle, mid);

        sys.state.paused = false;
        advance(&mut sys, 0.1);
        assert!(sys.bodies[0].orbit_angle != mid);
    }

    #[test]
    fn test_earth_advance_matches_closed_form() {
        // 1 s at multiplier 2.0: 1.0 * 0.5 * 2.98 * 2.0 = 2.98 rad
        let mut sys = system();
        let earth = &mut sys.bodies[2];
        assert_eq!(earth.info().name, "Earth");
        earth.orbit_angle = 0.0;
        earth.speed_multiplier = 2.0;

        advance(&mut sys, 1.0);

        assert!((sys.bodies[2].orbit_angle - 2.98).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_angle_stays_wrapped() {
        let mut sys = system();
        for body in &mut sys.bodies {
            body.speed_multiplier = 5.0;
        }
        for _ in 0..1000 {
            advance(&mut sys, 0.25);
        }
        for body in &sys.bodies {
            assert!(body.orbit_angle >= 0.0 && body.orbit_angle < TAU);
            assert!(body.spin_angle >= 0.0 && body.spin_angle < TAU);
        }
    }

    #[test]
    fn test_fixed_increments_ignore_delta() {
        let mut a = system();
        let mut b = system();
        advance(&mut a, 0.001);
        advance(&mut b, 1.0);
        assert_eq!(a.state.sun_spin, b.state.sun_spin);
        assert_eq!(a.state.starfield_spin, b.state.starfield_spin);
    }
}
