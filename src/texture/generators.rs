//! The surface generator variants
//!
//! Three planet surfaces (mottled, banded, earth-like) plus the sun's radial
//! gradient. Generators are deterministic up to the injected RNG.

use rand::Rng;

use crate::system::catalog::{BodyDescriptor, SurfaceKind};
use crate::texture::{lerp_color, rgba, PixelBuffer, TEXTURE_HEIGHT, TEXTURE_WIDTH};

/// Fraction of pixels that seed a crater stamp on mottled surfaces.
const CRATER_DENSITY: f32 = 0.0012;

/// Per-scanline probability of a storm ellipse on banded surfaces.
const STORM_CHANCE: f32 = 0.02;

/// Smooth periodic noise in [0, 1] used to vary mottled shading.
fn surface_noise(x: f32, y: f32, scale: f32) -> f32 {
    let a = (x * scale).sin() * (y * scale * 1.7).cos();
    let b = (x * scale * 0.37 + y * scale * 0.61).sin();
    (a * 0.5 + b * 0.5) * 0.5 + 0.5
}

/// Dispatches to the right generator for a catalog entry.
pub fn texture_for(info: &BodyDescriptor, rng: &mut impl Rng) -> PixelBuffer {
    match info.surface {
        SurfaceKind::Mottled => mottled(info.base_color, info.accent_color, 0.11, rng),
        SurfaceKind::Banded => banded(info.base_color, info.accent_color, 0.18, rng),
        SurfaceKind::EarthLike => earth_like(rng),
    }
}

/// Crater-stamped rocky surface.
///
/// Base shading follows a smooth periodic noise of (x, y); a noise-weighted
/// random draw under [`CRATER_DENSITY`] stamps an accent circle of radius
/// 1-6 px.
pub fn mottled(
    base: [f32; 3],
    accent: [f32; 3],
    noise_scale: f32,
    rng: &mut impl Rng,
) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(TEXTURE_WIDTH, TEXTURE_HEIGHT, rgba(base));

    for y in 0..TEXTURE_HEIGHT {
        for x in 0..TEXTURE_WIDTH {
            let n = surface_noise(x as f32, y as f32, noise_scale);
            let shade = lerp_color(base, accent, n * 0.35);
            buf.set(x as i32, y as i32, rgba(shade));
        }
    }

    for y in 0..TEXTURE_HEIGHT {
        for x in 0..TEXTURE_WIDTH {
            let n = surface_noise(x as f32, y as f32, noise_scale);
            if rng.random::<f32>() * (0.5 + n) < CRATER_DENSITY {
                let radius = rng.random_range(1..=6);
                buf.fill_circle(x as i32, y as i32, radius, rgba(accent));
            }
        }
    }

    buf
}

/// Gas giant banding with occasional storms.
///
/// A periodic function of the scanline index selects accent bands; each
/// scanline also has a small chance of stamping a storm ellipse of random
/// size and position to break the uniformity.
pub fn banded(
    base: [f32; 3],
    accent: [f32; 3],
    band_scale: f32,
    rng: &mut impl Rng,
) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(TEXTURE_WIDTH, TEXTURE_HEIGHT, rgba(base));

    for y in 0..TEXTURE_HEIGHT {
        let wave = (y as f32 * band_scale).sin();
        let color = if wave > 0.25 {
            accent
        } else {
            // soften the transition between bands
            lerp_color(base, accent, (wave * 0.5 + 0.5) * 0.3)
        };
        let pixel = rgba(color);
        for x in 0..TEXTURE_WIDTH {
            buf.set(x as i32, y as i32, pixel);
        }

        if rng.random::<f32>() < STORM_CHANCE {
            let cx = rng.random_range(0..TEXTURE_WIDTH as i32);
            let rx = rng.random_range(8..30);
            let ry = rng.random_range(3..10);
            buf.fill_ellipse(cx, y as i32, rx, ry, rgba(accent));
        }
    }

    buf
}

/// Deep-ocean base color of the earth-like surface.
pub const OCEAN: [f32; 3] = [0.09, 0.28, 0.60];
const LAND: [f32; 3] = [0.22, 0.52, 0.24];
const ICE: [u8; 4] = [240, 246, 250, 255];

/// Hand-authored continent outlines in texture coordinates (512 x 256).
/// Rough equirectangular approximations, not cartography.
const CONTINENTS: [&[(f32, f32)]; 6] = [
    // North America
    &[
        (60.0, 52.0),
        (128.0, 44.0),
        (150.0, 70.0),
        (132.0, 102.0),
        (96.0, 120.0),
        (70.0, 96.0),
    ],
    // South America
    &[
        (118.0, 132.0),
        (142.0, 128.0),
        (150.0, 166.0),
        (132.0, 204.0),
        (118.0, 168.0),
    ],
    // Europe
    &[
        (244.0, 52.0),
        (280.0, 46.0),
        (290.0, 72.0),
        (258.0, 84.0),
        (240.0, 72.0),
    ],
    // Africa
    &[
        (244.0, 92.0),
        (290.0, 88.0),
        (302.0, 130.0),
        (278.0, 178.0),
        (252.0, 150.0),
        (240.0, 112.0),
    ],
    // Asia
    &[
        (296.0, 44.0),
        (400.0, 38.0),
        (432.0, 70.0),
        (404.0, 108.0),
        (344.0, 116.0),
        (300.0, 80.0),
    ],
    // Australia
    &[
        (408.0, 160.0),
        (452.0, 154.0),
        (462.0, 184.0),
        (426.0, 196.0),
    ],
];

/// Continents over ocean, polar ice caps, and semi-transparent cloud cover.
pub fn earth_like(rng: &mut impl Rng) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(TEXTURE_WIDTH, TEXTURE_HEIGHT, rgba(OCEAN));

    for outline in CONTINENTS {
        buf.fill_polygon(outline, rgba(LAND));
    }

    let w = TEXTURE_WIDTH as i32;
    let h = TEXTURE_HEIGHT as i32;
    buf.fill_circle(w / 2, 2, 26, ICE);
    buf.fill_circle(w / 2, h - 2, 26, ICE);

    for _ in 0..20 {
        let cx = rng.random_range(0..w);
        let cy = rng.random_range(0..h);
        let radius = rng.random_range(6..18);
        buf.blend_circle(cx, cy, radius, [255, 255, 255, 255], 0.45);
    }

    buf
}

const SUN_CENTER: [f32; 3] = [1.0, 0.95, 0.35];
const SUN_MID: [f32; 3] = [1.0, 0.55, 0.10];
const SUN_EDGE: [f32; 3] = [0.85, 0.18, 0.05];

/// Radial gradient (bright center, red rim) with scattered flare blobs.
pub fn sun_surface(rng: &mut impl Rng) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(TEXTURE_WIDTH, TEXTURE_HEIGHT, rgba(SUN_EDGE));

    let cx = TEXTURE_WIDTH as f32 / 2.0;
    let cy = TEXTURE_HEIGHT as f32 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt();

    for y in 0..TEXTURE_HEIGHT {
        for x in 0..TEXTURE_WIDTH {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let t = (dx * dx + dy * dy).sqrt() / max_dist;
            let color = if t < 0.5 {
                lerp_color(SUN_CENTER, SUN_MID, t * 2.0)
            } else {
                lerp_color(SUN_MID, SUN_EDGE, (t - 0.5) * 2.0)
            };
            buf.set(x as i32, y as i32, rgba(color));
        }
    }

    for _ in 0..40 {
        let fx = rng.random_range(0..TEXTURE_WIDTH as i32);
        let fy = rng.random_range(0..TEXTURE_HEIGHT as i32);
        let radius = rng.random_range(3..12);
        buf.blend_circle(fx, fy, radius, [255, 250, 200, 255], 0.6);
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::catalog::BODIES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generators_produce_expected_dimensions() {
        let mut rng = StdRng::seed_from_u64(3);
        for info in &BODIES {
            let buf = texture_for(info, &mut rng);
            assert_eq!(buf.width, TEXTURE_WIDTH);
            assert_eq!(buf.height, TEXTURE_HEIGHT);
            assert_eq!(
                buf.bytes().len(),
                (TEXTURE_WIDTH * TEXTURE_HEIGHT * 4) as usize
            );
        }
    }

    #[test]
    fn test_same_seed_same_texture() {
        let a = mottled([0.6, 0.6, 0.6], [0.3, 0.3, 0.3], 0.11, &mut StdRng::seed_from_u64(9));
        let b = mottled([0.6, 0.6, 0.6], [0.3, 0.3, 0.3], 0.11, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.bytes(), b.bytes());
    }

    #[test]
    fn test_mottled_contains_accent_craters() {
        let accent = [0.1, 0.1, 0.1];
        let buf = mottled([0.9, 0.9, 0.9], accent, 0.11, &mut StdRng::seed_from_u64(5));
        let target = rgba(accent);
        let hits = (0..TEXTURE_HEIGHT)
            .flat_map(|y| (0..TEXTURE_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.get(x, y) == target)
            .count();
        assert!(hits > 50, "expected crater pixels, found {}", hits);
    }

    #[test]
    fn test_banded_has_full_accent_scanlines() {
        let accent = [0.2, 0.1, 0.0];
        let buf = banded([0.9, 0.8, 0.6], accent, 0.18, &mut StdRng::seed_from_u64(5));
        let target = rgba(accent);
        let full_rows = (0..TEXTURE_HEIGHT)
            .filter(|&y| (0..TEXTURE_WIDTH).all(|x| buf.get(x, y) == target))
            .count();
        assert!(full_rows > 10, "expected accent bands, found {}", full_rows);
    }

    #[test]
    fn test_earth_open_sea_is_ocean_colored() {
        let buf = earth_like(&mut StdRng::seed_from_u64(1));
        // mid-Pacific corner of the map, far from every continent polygon
        let px = buf.get(10, 128);
        let ocean = rgba(OCEAN);
        // clouds may lighten it, but never below the ocean base
        assert!(px[2] >= ocean[2]);
        assert!(px[2] > px[0], "sea should stay blue-dominant: {:?}", px);
    }

    #[test]
    fn test_sun_center_brighter_than_rim() {
        let buf = sun_surface(&mut StdRng::seed_from_u64(2));
        let center = buf.get(TEXTURE_WIDTH / 2, TEXTURE_HEIGHT / 2);
        let rim = buf.get(2, 2);
        let brightness =
            |p: [u8; 4]| p[0] as u32 + p[1] as u32 + p[2] as u32;
        assert!(brightness(center) > brightness(rim));
    }
}
