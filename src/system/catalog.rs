//! Static catalog of celestial body parameters
//!
//! All orbital and visual constants live here. Values are scaled for
//! visualization, not physical accuracy: radii are relative to Earth,
//! distances are compressed, and speeds are multipliers on a global
//! pacing constant applied by the animation step.

/// Orbit angle advance per simulated second is
/// `ORBIT_PACING * orbital_speed * speed_multiplier` radians.
pub const ORBIT_PACING: f32 = 0.5;

/// Fixed sun self-rotation increment per frame (radians).
pub const SUN_SPIN_STEP: f32 = 0.005;

/// Fixed star-field background rotation increment per frame (radians).
pub const STARFIELD_SPIN_STEP: f32 = 0.0001;

/// Visual radius of the sun sphere.
pub const SUN_RADIUS: f32 = 3.0;

/// Radius of the additive glow shell around the sun.
pub const SUN_GLOW_RADIUS: f32 = 3.5;

/// Which procedural texture generator a body uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Crater-stamped noise surface (rocky bodies).
    Mottled,
    /// Horizontal banding with occasional storm ellipses (gas giants).
    Banded,
    /// Hand-authored continents, ice caps, and cloud cover.
    EarthLike,
}

/// Immutable per-body parameters, one entry per planet.
///
/// Created once from [`BODIES`]; never mutated at runtime.
#[derive(Debug, Clone, Copy)]
pub struct BodyDescriptor {
    pub name: &'static str,
    /// Sphere radius relative to Earth (scaled for visibility).
    pub radius: f32,
    /// Orbital distance from the sun along the orbital plane.
    pub distance: f32,
    /// Baseline orbital speed multiplier.
    pub orbital_speed: f32,
    /// Self-rotation speed in radians per simulated second.
    pub rotation_speed: f32,
    /// Base surface color, linear RGB 0-1.
    pub base_color: [f32; 3],
    /// Accent color for craters, bands, or clouds.
    pub accent_color: [f32; 3],
    pub surface: SurfaceKind,
    /// Gets a translucent atmosphere shell child.
    pub has_atmosphere: bool,
    /// Gets a flat equatorial ring child.
    pub has_ring: bool,
}

/// The eight planets, inner to outer.
pub const BODIES: [BodyDescriptor; 8] = [
    BodyDescriptor {
        name: "Mercury",
        radius: 0.38,
        distance: 5.0,
        orbital_speed: 4.74,
        rotation_speed: 0.017,
        base_color: [0.66, 0.66, 0.66],
        accent_color: [0.42, 0.40, 0.38],
        surface: SurfaceKind::Mottled,
        has_atmosphere: false,
        has_ring: false,
    },
    BodyDescriptor {
        name: "Venus",
        radius: 0.95,
        distance: 7.0,
        orbital_speed: 3.5,
        rotation_speed: 0.004,
        base_color: [0.90, 0.85, 0.70],
        accent_color: [0.80, 0.68, 0.48],
        surface: SurfaceKind::Banded,
        has_atmosphere: false,
        has_ring: false,
    },
    BodyDescriptor {
        name: "Earth",
        radius: 1.0,
        distance: 10.0,
        orbital_speed: 2.98,
        rotation_speed: 0.1,
        base_color: [0.12, 0.35, 0.70],
        accent_color: [0.22, 0.55, 0.25],
        surface: SurfaceKind::EarthLike,
        has_atmosphere: true,
        has_ring: false,
    },
    BodyDescriptor {
        name: "Mars",
        radius: 0.53,
        distance: 15.0,
        orbital_speed: 2.41,
        rotation_speed: 0.097,
        base_color: [0.80, 0.36, 0.30],
        accent_color: [0.52, 0.22, 0.16],
        surface: SurfaceKind::Mottled,
        has_atmosphere: false,
        has_ring: false,
    },
    BodyDescriptor {
        name: "Jupiter",
        // 11.2 Earth radii, scaled down for framing
        radius: 11.2 * 0.3,
        distance: 50.0,
        orbital_speed: 1.31,
        rotation_speed: 0.24,
        base_color: [0.96, 0.73, 0.45],
        accent_color: [0.76, 0.50, 0.32],
        surface: SurfaceKind::Banded,
        has_atmosphere: false,
        has_ring: false,
    },
    BodyDescriptor {
        name: "Saturn",
        radius: 9.45 * 0.3,
        distance: 95.0,
        orbital_speed: 0.97,
        rotation_speed: 0.22,
        base_color: [0.85, 0.72, 0.45],
        accent_color: [0.70, 0.56, 0.32],
        surface: SurfaceKind::Banded,
        has_atmosphere: false,
        has_ring: true,
    },
    BodyDescriptor {
        name: "Uranus",
        radius: 4.0 * 0.5,
        distance: 192.0,
        orbital_speed: 0.68,
        rotation_speed: 0.14,
        base_color: [0.68, 0.85, 0.90],
        accent_color: [0.52, 0.72, 0.80],
        surface: SurfaceKind::Banded,
        has_atmosphere: false,
        has_ring: false,
    },
    BodyDescriptor {
        name: "Neptune",
        radius: 3.88 * 0.5,
        distance: 301.0,
        orbital_speed: 0.54,
        rotation_speed: 0.15,
        base_color: [0.25, 0.41, 0.88],
        accent_color: [0.16, 0.26, 0.62],
        surface: SurfaceKind::Banded,
        has_atmosphere: false,
        has_ring: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_bodies() {
        assert_eq!(BODIES.len(), 8);
    }

    #[test]
    fn test_distances_strictly_increase() {
        for pair in BODIES.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
        }
    }

    #[test]
    fn test_parameters_are_positive_and_finite() {
        for body in &BODIES {
            assert!(body.radius > 0.0 && body.radius.is_finite());
            assert!(body.distance > 0.0 && body.distance.is_finite());
            assert!(body.orbital_speed > 0.0);
            assert!(body.rotation_speed > 0.0);
        }
    }

    #[test]
    fn test_decoration_flags() {
        let earth = BODIES.iter().find(|b| b.name == "Earth").unwrap();
        assert!(earth.has_atmosphere);
        assert_eq!(earth.surface, SurfaceKind::EarthLike);

        let saturn = BODIES.iter().find(|b| b.name == "Saturn").unwrap();
        assert!(saturn.has_ring);

        assert_eq!(BODIES.iter().filter(|b| b.has_ring).count(), 1);
        assert_eq!(BODIES.iter().filter(|b| b.has_atmosphere).count(), 1);
    }
}
