//! # Procedural Texture Generation
//!
//! Generates equirectangular RGBA8 pixel maps for spherical texture mapping,
//! eliminating the need for image assets. Each celestial body gets one of
//! three surface variants (mottled, banded, earth-like) plus a radial
//! gradient surface for the sun.
//!
//! All generators draw their randomness from an injected [`rand::Rng`], so a
//! seeded `StdRng` makes output reproducible for tests.

pub mod generators;

pub use generators::{banded, earth_like, mottled, sun_surface, texture_for};

/// Default texture width in pixels.
pub const TEXTURE_WIDTH: u32 = 512;
/// Default texture height in pixels.
pub const TEXTURE_HEIGHT: u32 = 256;

/// A CPU-side RGBA8 image, row-major, 4 bytes per pixel.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

/// Converts a linear RGB triple (0-1) to an opaque RGBA8 pixel.
pub fn rgba(color: [f32; 3]) -> [u8; 4] {
    [
        (color[0].clamp(0.0, 1.0) * 255.0) as u8,
        (color[1].clamp(0.0, 1.0) * 255.0) as u8,
        (color[2].clamp(0.0, 1.0) * 255.0) as u8,
        255,
    ]
}

/// Linear interpolation between two RGB triples.
pub fn lerp_color(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

impl PixelBuffer {
    /// Creates a buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Raw bytes, ready for a `Rgba8UnormSrgb` upload.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Writes a pixel; out-of-range coordinates are ignored so shape
    /// stamping can run off the edges.
    pub fn set(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.data[i..i + 4].copy_from_slice(&color);
    }

    /// Alpha-blends `color` over the existing pixel with opacity `alpha`.
    pub fn blend(&mut self, x: i32, y: i32, color: [u8; 4], alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        for c in 0..3 {
            let base = self.data[i + c] as f32;
            self.data[i + c] = (base + (color[c] as f32 - base) * a) as u8;
        }
    }

    /// Stamps a filled circle.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: [u8; 4]) {
        self.fill_ellipse(cx, cy, radius, radius, color);
    }

    /// Stamps a filled axis-aligned ellipse.
    pub fn fill_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: [u8; 4]) {
        if rx <= 0 || ry <= 0 {
            return;
        }
        for dy in -ry..=ry {
            for dx in -rx..=rx {
                let fx = dx as f32 / rx as f32;
                let fy = dy as f32 / ry as f32;
                if fx * fx + fy * fy <= 1.0 {
                    self.set(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Alpha-blends a filled circle, softening toward the rim.
    pub fn blend_circle(&mut self, cx: i32, cy: i32, radius: i32, color: [u8; 4], alpha: f32) {
        if radius <= 0 {
            return;
        }
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let d2 = (dx * dx + dy * dy) as f32 / (radius * radius) as f32;
                if d2 <= 1.0 {
                    self.blend(cx + dx, cy + dy, color, alpha * (1.0 - d2));
                }
            }
        }
    }

    /// Fills a closed polygon given as (x, y) vertices, even-odd rule.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: [u8; 4]) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.1).fold(f32::MAX, f32::min).floor() as i32;
        let max_y = points.iter().map(|p| p.1).fold(f32::MIN, f32::max).ceil() as i32;

        for y in min_y.max(0)..=max_y.min(self.height as i32 - 1) {
            let yf = y as f32 + 0.5;
            // Collect crossings of the scanline with polygon edges
            let mut xs: Vec<f32> = Vec::new();
            for i in 0..points.len() {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= yf && y1 > yf) || (y1 <= yf && y0 > yf) {
                    xs.push(x0 + (yf - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in xs.chunks(2) {
                if let [start, end] = pair {
                    for x in start.floor() as i32..=end.ceil() as i32 {
                        self.set(x, y, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_buffer_is_uniform() {
        let buf = PixelBuffer::filled(8, 4, [10, 20, 30, 255]);
        assert_eq!(buf.bytes().len(), 8 * 4 * 4);
        assert_eq!(buf.get(0, 0), [10, 20, 30, 255]);
        assert_eq!(buf.get(7, 3), [10, 20, 30, 255]);
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut buf = PixelBuffer::filled(4, 4, [0, 0, 0, 255]);
        buf.set(-1, 0, [255, 255, 255, 255]);
        buf.set(0, 100, [255, 255, 255, 255]);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(buf.get(x, y), [0, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_fill_circle_covers_center() {
        let mut buf = PixelBuffer::filled(32, 32, [0, 0, 0, 255]);
        buf.fill_circle(16, 16, 5, [255, 0, 0, 255]);
        assert_eq!(buf.get(16, 16), [255, 0, 0, 255]);
        assert_eq!(buf.get(16, 20), [255, 0, 0, 255]);
        assert_eq!(buf.get(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_fill_polygon_triangle() {
        let mut buf = PixelBuffer::filled(32, 32, [0, 0, 0, 255]);
        buf.fill_polygon(
            &[(4.0, 4.0), (28.0, 4.0), (16.0, 28.0)],
            [0, 255, 0, 255],
        );
        assert_eq!(buf.get(16, 10), [0, 255, 0, 255]);
        assert_eq!(buf.get(1, 30), [0, 0, 0, 255]);
    }

    #[test]
    fn test_blend_is_proportional() {
        let mut buf = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
        buf.blend(0, 0, [200, 200, 200, 255], 0.5);
        let px = buf.get(0, 0);
        assert!(px[0] >= 90 && px[0] <= 110);
    }
}
