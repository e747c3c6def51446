//! Runtime simulation state
//!
//! The [`SolarSystem`] is the explicit context object that owns all mutable
//! animation state. The scene graph owns the nodes; the context holds
//! non-owning [`NodeIndex`] handles into it, so simulation state and
//! rendering resources have independent lifetimes.

use std::f32::consts::TAU;

use rand::Rng;

use crate::gfx::scene::NodeIndex;
use crate::system::catalog::{BodyDescriptor, BODIES};

/// Mutable per-body state, one per catalog entry.
///
/// `orbit_angle` and `spin_angle` are advanced by the animation step;
/// `speed_multiplier` is set by the interaction layer.
#[derive(Debug, Clone)]
pub struct BodyState {
    /// Index into [`BODIES`].
    pub descriptor: usize,
    /// Orbit pivot node; its Y rotation is the orbit angle.
    pub pivot: Option<NodeIndex>,
    /// Body mesh node, offset from the pivot by the orbital distance.
    pub node: Option<NodeIndex>,
    /// Current position along the orbit, radians in [0, 2π).
    pub orbit_angle: f32,
    /// Current self-rotation, radians.
    pub spin_angle: f32,
    /// User-controlled scalar on the baseline orbital speed. Finite, >= 0.
    pub speed_multiplier: f32,
}

impl BodyState {
    pub fn info(&self) -> &'static BodyDescriptor {
        &BODIES[self.descriptor]
    }

    /// Replaces the speed multiplier, retaining the previous value when the
    /// new one is non-finite or negative.
    pub fn set_speed_multiplier(&mut self, value: f32) {
        if value.is_finite() && value >= 0.0 {
            self.speed_multiplier = value;
        } else {
            log::warn!(
                "ignoring invalid speed multiplier {} for {}",
                value,
                self.info().name
            );
        }
    }
}

/// Process-wide animation flags, page lifetime.
#[derive(Debug, Clone)]
pub struct AnimationState {
    /// When true, orbital and rotational angles stop advancing. Camera
    /// interaction and rendering continue regardless.
    pub paused: bool,
    pub theme_dark: bool,
    /// Control panel visibility (cosmetic only).
    pub panel_visible: bool,
    /// Sun self-rotation angle, radians.
    pub sun_spin: f32,
    /// Slow star-field background rotation, radians.
    pub starfield_spin: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            paused: false,
            theme_dark: true,
            panel_visible: true,
            sun_spin: 0.0,
            starfield_spin: 0.0,
        }
    }
}

/// What the pointer is currently hovering, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Body(usize),
    Sun,
}

impl HoverTarget {
    pub fn label(&self) -> &'static str {
        match self {
            HoverTarget::Body(i) => BODIES[*i].name,
            HoverTarget::Sun => "Sun",
        }
    }
}

/// The simulation context: all per-body state plus global animation flags.
pub struct SolarSystem {
    pub bodies: Vec<BodyState>,
    pub state: AnimationState,
    /// Sun mesh node, set by the scene builder.
    pub sun_node: Option<NodeIndex>,
    /// Glow shell node, set by the scene builder.
    pub glow_node: Option<NodeIndex>,
    /// Current hover hit, updated on pointer move.
    pub hovered: Option<HoverTarget>,
}

impl SolarSystem {
    /// Creates the context with every body at a random starting point along
    /// its orbit and a speed multiplier of 1.0. Node handles are filled in
    /// by the scene builder.
    pub fn new(rng: &mut impl Rng) -> Self {
        let bodies = (0..BODIES.len())
            .map(|descriptor| BodyState {
                descriptor,
                pivot: None,
                node: None,
                orbit_angle: rng.random_range(0.0..TAU),
                spin_angle: 0.0,
                speed_multiplier: 1.0,
            })
            .collect();

        Self {
            bodies,
            state: AnimationState::default(),
            sun_node: None,
            glow_node: None,
            hovered: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_initial_state_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let system = SolarSystem::new(&mut rng);

        assert_eq!(system.bodies.len(), BODIES.len());
        for body in &system.bodies {
            assert!(body.orbit_angle >= 0.0 && body.orbit_angle < TAU);
            assert_eq!(body.speed_multiplier, 1.0);
            assert_eq!(body.spin_angle, 0.0);
        }
        assert!(!system.state.paused);
    }

    #[test]
    fn test_invalid_multiplier_retains_previous() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut system = SolarSystem::new(&mut rng);

        let earth = &mut system.bodies[2];
        earth.set_speed_multiplier(2.5);
        assert_eq!(earth.speed_multiplier, 2.5);

        earth.set_speed_multiplier(f32::NAN);
        assert_eq!(earth.speed_multiplier, 2.5);
        earth.set_speed_multiplier(f32::INFINITY);
        assert_eq!(earth.speed_multiplier, 2.5);
        earth.set_speed_multiplier(-1.0);
        assert_eq!(earth.speed_multiplier, 2.5);

        earth.set_speed_multiplier(0.0);
        assert_eq!(earth.speed_multiplier, 0.0);
    }
}
