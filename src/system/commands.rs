//! Typed commands for the interaction layer
//!
//! Every UI control maps to one [`Command`] applied through [`apply`],
//! keeping the control wiring independent of any live widget state and
//! testable without a window.

use crate::gfx::camera::orbit_camera::OrbitCamera;
use crate::system::state::SolarSystem;

/// Multiplicative camera zoom step per button press.
pub const ZOOM_FACTOR: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Set one body's speed multiplier (slider index, new value).
    SetSpeed(usize, f32),
    TogglePause,
    /// All speed multipliers back to 1.0.
    Reset,
    ToggleTheme,
    Zoom(ZoomDirection),
    TogglePanel,
}

/// Applies one command to the simulation context and camera.
pub fn apply(command: Command, system: &mut SolarSystem, camera: &mut OrbitCamera) {
    match command {
        Command::SetSpeed(index, value) => {
            if let Some(body) = system.bodies.get_mut(index) {
                body.set_speed_multiplier(value);
            }
        }
        Command::TogglePause => {
            system.state.paused = !system.state.paused;
            log::debug!(
                "animation {}",
                if system.state.paused { "paused" } else { "running" }
            );
        }
        Command::Reset => {
            for body in &mut system.bodies {
                body.speed_multiplier = 1.0;
            }
        }
        Command::ToggleTheme => {
            system.state.theme_dark = !system.state.theme_dark;
        }
        Command::Zoom(direction) => {
            let factor = match direction {
                ZoomDirection::In => 1.0 / ZOOM_FACTOR,
                ZoomDirection::Out => ZOOM_FACTOR,
            };
            camera.zoom_by(factor);
        }
        Command::TogglePanel => {
            system.state.panel_visible = !system.state.panel_visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture() -> (SolarSystem, OrbitCamera) {
        let mut rng = StdRng::seed_from_u64(11);
        let system = SolarSystem::new(&mut rng);
        let camera = OrbitCamera::new(380.0, 0.4, 0.2, Vector3::new(0.0, 0.0, 0.0), 1.5);
        (system, camera)
    }

    #[test]
    fn test_set_speed_updates_one_body() {
        let (mut system, mut camera) = fixture();
        apply(Command::SetSpeed(2, 3.0), &mut system, &mut camera);
        assert_eq!(system.bodies[2].speed_multiplier, 3.0);
        assert_eq!(system.bodies[3].speed_multiplier, 1.0);
    }

    #[test]
    fn test_set_speed_rejects_invalid_values() {
        let (mut system, mut camera) = fixture();
        apply(Command::SetSpeed(0, 4.0), &mut system, &mut camera);
        apply(Command::SetSpeed(0, f32::NAN), &mut system, &mut camera);
        apply(Command::SetSpeed(0, -2.0), &mut system, &mut camera);
        assert_eq!(system.bodies[0].speed_multiplier, 4.0);

        // Out-of-range index is ignored
        apply(Command::SetSpeed(99, 2.0), &mut system, &mut camera);
    }

    #[test]
    fn test_pause_toggles() {
        let (mut system, mut camera) = fixture();
        assert!(!system.state.paused);
        apply(Command::TogglePause, &mut system, &mut camera);
        assert!(system.state.paused);
        apply(Command::TogglePause, &mut system, &mut camera);
        assert!(!system.state.paused);
    }

    #[test]
    fn test_reset_restores_all_multipliers() {
        let (mut system, mut camera) = fixture();
        for i in 0..system.bodies.len() {
            apply(Command::SetSpeed(i, 0.25 + i as f32), &mut system, &mut camera);
        }
        apply(Command::Reset, &mut system, &mut camera);
        for body in &system.bodies {
            assert_eq!(body.speed_multiplier, 1.0);
        }
    }

    #[test]
    fn test_zoom_in_divides_distance() {
        let (mut system, mut camera) = fixture();
        let before = camera.distance;
        apply(Command::Zoom(ZoomDirection::In), &mut system, &mut camera);
        assert!((camera.distance - before / ZOOM_FACTOR).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_is_a_noop_at_the_bounds() {
        let (mut system, mut camera) = fixture();

        camera.set_distance(camera.bounds.min_distance * 1.05);
        let near = camera.distance;
        apply(Command::Zoom(ZoomDirection::In), &mut system, &mut camera);
        assert_eq!(camera.distance, near);

        camera.set_distance(camera.bounds.max_distance / 1.05);
        let far = camera.distance;
        apply(Command::Zoom(ZoomDirection::Out), &mut system, &mut camera);
        assert_eq!(camera.distance, far);
    }

    #[test]
    fn test_theme_and_panel_are_cosmetic() {
        let (mut system, mut camera) = fixture();
        let angles: Vec<f32> = system.bodies.iter().map(|b| b.orbit_angle).collect();

        apply(Command::ToggleTheme, &mut system, &mut camera);
        apply(Command::TogglePanel, &mut system, &mut camera);
        assert!(!system.state.theme_dark);
        assert!(!system.state.panel_visible);

        for (body, angle) in system.bodies.iter().zip(&angles) {
            assert_eq!(body.orbit_angle, *angle);
        }
    }
}
