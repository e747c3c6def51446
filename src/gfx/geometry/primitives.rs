//! # Primitive Shape Generation
//!
//! All shapes are generated with proper normals and texture coordinates.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    // Generate vertices
    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let sin_phi = phi.sin();
            let cos_phi = phi.cos();

            // Spherical to Cartesian coordinates
            let x = sin_theta * cos_phi;
            let y = cos_theta; // Y-up
            let z = sin_theta * sin_phi;

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]); // Normal is same as position for unit sphere

            let u = long as f32 / long_segs as f32;
            let v = lat as f32 / lat_segs as f32;
            data.tex_coords.push([u, v]);
        }
    }

    // Generate indices
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            // First triangle
            data.indices.push(first);
            data.indices.push(second);
            data.indices.push(first + 1);

            // Second triangle
            data.indices.push(second);
            data.indices.push(second + 1);
            data.indices.push(first + 1);
        }
    }

    data
}

/// Generate a flat annulus (ring) in the XZ plane
///
/// # Arguments
/// * `inner_radius` - Inner edge of the ring
/// * `outer_radius` - Outer edge of the ring
/// * `segments` - Number of angular segments
///
/// Used for planetary rings and orbit guide lines. Normals point up
/// (positive Y); the U coordinate runs radially so ring textures band
/// outward.
pub fn generate_annulus(inner_radius: f32, outer_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();

        // Inner vertex
        data.vertices
            .push([inner_radius * cos_a, 0.0, inner_radius * sin_a]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.tex_coords.push([0.0, i as f32 / segs as f32]);

        // Outer vertex
        data.vertices
            .push([outer_radius * cos_a, 0.0, outer_radius * sin_a]);
        data.normals.push([0.0, 1.0, 0.0]);
        data.tex_coords.push([1.0, i as f32 / segs as f32]);
    }

    for i in 0..segs {
        let inner_current = i * 2;
        let outer_current = inner_current + 1;
        let inner_next = (i + 1) * 2;
        let outer_next = inner_next + 1;

        // First triangle
        data.indices.push(inner_current);
        data.indices.push(outer_current);
        data.indices.push(inner_next);

        // Second triangle
        data.indices.push(outer_current);
        data.indices.push(outer_next);
        data.indices.push(inner_next);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert!(sphere.vertices.len() > 0);
        assert!(sphere.indices.len() > 0);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
    }

    #[test]
    fn test_sphere_vertices_are_unit_length() {
        let sphere = generate_sphere(16, 12);
        for v in &sphere.vertices {
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_annulus_generation() {
        let ring = generate_annulus(1.3, 2.2, 64);
        assert_eq!(ring.vertices.len(), 65 * 2);
        assert_eq!(ring.triangle_count(), 64 * 2);

        for v in &ring.vertices {
            assert_eq!(v[1], 0.0);
            let r = (v[0] * v[0] + v[2] * v[2]).sqrt();
            assert!(r >= 1.3 - 1e-4 && r <= 2.2 + 1e-4);
        }
    }
}
