//! Star-field backdrop generation
//!
//! Particles are distributed uniformly over a sphere surface via
//! inverse-transform sampling: theta uniform in [0, 2π), phi = acos(2u − 1).
//! Sampling phi uniformly instead would visibly cluster stars at the poles.

use std::f32::consts::TAU;

use rand::Rng;

/// Radius of the backdrop sphere, far outside the outermost orbit.
pub const STARFIELD_RADIUS: f32 = 1000.0;

/// Default particle count.
pub const STAR_COUNT: usize = 12_000;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const BLUE_TINT: [f32; 3] = [0.66, 0.76, 1.0];
const YELLOW_TINT: [f32; 3] = [1.0, 0.90, 0.62];

/// One background star particle.
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub position: [f32; 3],
    /// Billboard size in world units.
    pub size: f32,
    pub color: [f32; 3],
}

/// Generates `count` stars on a sphere of `radius`.
///
/// Color buckets are weighted roughly 60% white, 20% blue-tinted,
/// 20% yellow-tinted.
pub fn generate(count: usize, radius: f32, rng: &mut impl Rng) -> Vec<Star> {
    (0..count)
        .map(|_| {
            let theta = rng.random_range(0.0..TAU);
            let phi = (2.0 * rng.random::<f32>() - 1.0).acos();

            let position = [
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            ];

            let roll: f32 = rng.random();
            let color = if roll < 0.6 {
                WHITE
            } else if roll < 0.8 {
                BLUE_TINT
            } else {
                YELLOW_TINT
            };

            Star {
                position,
                size: rng.random_range(0.5..2.5),
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_stars_lie_on_the_sphere() {
        let mut rng = StdRng::seed_from_u64(17);
        for star in generate(500, STARFIELD_RADIUS, &mut rng) {
            let r = (star.position[0].powi(2)
                + star.position[1].powi(2)
                + star.position[2].powi(2))
            .sqrt();
            assert!((r - STARFIELD_RADIUS).abs() < 0.5);
            assert!(star.size >= 0.5 && star.size < 2.5);
        }
    }

    #[test]
    fn test_polar_angle_distribution_is_uniform_on_the_surface() {
        // cos(phi) of a uniform surface distribution is uniform on [-1, 1];
        // bin it and check no bin deviates far from the expectation.
        let mut rng = StdRng::seed_from_u64(23);
        let stars = generate(15_000, STARFIELD_RADIUS, &mut rng);

        let bins = 10usize;
        let mut counts = vec![0usize; bins];
        for star in &stars {
            let cos_phi = (star.position[1] / STARFIELD_RADIUS).clamp(-1.0, 1.0);
            let bin = (((cos_phi + 1.0) / 2.0) * bins as f32).min(bins as f32 - 1.0) as usize;
            counts[bin] += 1;
        }

        let expected = stars.len() / bins;
        for (i, &count) in counts.iter().enumerate() {
            let deviation = (count as f32 - expected as f32).abs() / expected as f32;
            assert!(
                deviation < 0.15,
                "bin {} holds {} stars, expected ~{}",
                i,
                count,
                expected
            );
        }

        // Uniform-angle sampling would put ~6% of stars within 0.2 rad of a
        // pole; the surface-uniform sampler puts ~1% there.
        let near_poles = stars
            .iter()
            .filter(|s| {
                let cos_phi = (s.position[1] / STARFIELD_RADIUS).abs();
                cos_phi > (0.2f32).cos()
            })
            .count();
        assert!(
            near_poles < 500,
            "{} stars clustered at the poles",
            near_poles
        );
    }

    #[test]
    fn test_color_bucket_weights() {
        let mut rng = StdRng::seed_from_u64(29);
        let stars = generate(15_000, STARFIELD_RADIUS, &mut rng);

        let white = stars.iter().filter(|s| s.color == WHITE).count();
        let blue = stars.iter().filter(|s| s.color == BLUE_TINT).count();
        let yellow = stars.iter().filter(|s| s.color == YELLOW_TINT).count();

        assert_eq!(white + blue + yellow, stars.len());
        assert!((white as f32 / stars.len() as f32 - 0.6).abs() < 0.05);
        assert!((blue as f32 / stars.len() as f32 - 0.2).abs() < 0.05);
        assert!((yellow as f32 / stars.len() as f32 - 0.2).abs() < 0.05);
    }
}
