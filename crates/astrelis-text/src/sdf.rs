//! Signed Distance Field (SDF) and multi-channel SDF (MSDF) generation.
//!
//! SDF rendering stores distance-to-edge information in texture samples instead
//! of grayscale coverage, enabling sharp text at any scale without per-size
//! rasterization.
//!
//! # Algorithm
//!
//! For each pixel, we store the distance to the nearest edge:
//! - Inside the glyph: positive distance (0.5 to 1.0)
//! - Outside the glyph: negative distance (0.0 to 0.5)
//! - Exactly on the edge: 0.5

/// Generate a signed distance field from a grayscale coverage bitmap.
///
/// Brute-force distance search within `spread` pixels of each sample; simple
/// but quadratic in `spread`. Fine for glyph-sized tiles, not for full images.
///
/// * `source` - tightly packed grayscale coverage (0-255), `width * height` bytes
/// * `spread` - distance field spread in pixels
pub fn generate_sdf(source: &[u8], width: u32, height: u32, spread: f32) -> Vec<u8> {
    let width = width as usize;
    let height = height as usize;

    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut output = vec![0u8; width * height];
    let threshold = 128u8;
    let search_radius = (spread.ceil() as i32) + 1;

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let inside = source[idx] >= threshold;
            let mut min_dist = spread;

            for dy in -search_radius..=search_radius {
                for dx in -search_radius..=search_radius {
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                        continue;
                    }
                    let nidx = ny as usize * width + nx as usize;
                    let neighbor_inside = source[nidx] >= threshold;
                    if inside != neighbor_inside {
                        let dist = ((dx * dx + dy * dy) as f32).sqrt();
                        min_dist = min_dist.min(dist);
                    }
                }
            }

            let normalized = (min_dist / spread).clamp(0.0, 1.0);
            let sdf_value = if inside {
                127.0 + normalized * 128.0
            } else {
                127.0 - normalized * 127.0
            };
            output[idx] = sdf_value.clamp(0.0, 255.0) as u8;
        }
    }

    output
}

/// Generate a 3-channel MSDF from a grayscale coverage bitmap.
///
/// This is not full Valve-style angle-threshold edge coloring; each channel
/// runs the same distance search but only considers edges crossed by moving
/// along its own axis (R: horizontal, G: vertical, B: diagonal), which keeps
/// corners from rounding off as aggressively as a single-channel SDF while
/// staying a few lines of code. Output is interleaved RGB, `width * height * 3`
/// bytes.
pub fn generate_msdf(source: &[u8], width: u32, height: u32, spread: f32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let threshold = 128u8;
    let search_radius = (spread.ceil() as i32) + 1;
    let mut out = vec![0u8; w * h * 3];

    let channel_dist = |x: usize, y: usize, axis: (i32, i32)| -> f32 {
        let idx = y * w + x;
        let inside = source[idx] >= threshold;
        let mut min_dist = spread;
        for d in -search_radius..=search_radius {
            let nx = x as i32 + axis.0 * d;
            let ny = y as i32 + axis.1 * d;
            if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                continue;
            }
            let nidx = ny as usize * w + nx as usize;
            let neighbor_inside = source[nidx] >= threshold;
            if inside != neighbor_inside {
                let dist = (d.abs() as f32) * (axis.0.abs() + axis.1.abs()).max(1) as f32;
                min_dist = min_dist.min(dist);
            }
        }
        let normalized = (min_dist / spread).clamp(0.0, 1.0);
        if inside {
            127.0 + normalized * 128.0
        } else {
            127.0 - normalized * 127.0
        }
        .clamp(0.0, 255.0)
    };

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) * 3;
            out[idx] = channel_dist(x, y, (1, 0)) as u8;
            out[idx + 1] = channel_dist(x, y, (0, 1)) as u8;
            out[idx + 2] = channel_dist(x, y, (1, 1)) as u8;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_square(size: u32, inset: u32) -> Vec<u8> {
        let n = size as usize;
        let mut data = vec![0u8; n * n];
        let inset = inset as usize;
        for y in inset..n - inset {
            for x in inset..n - inset {
                data[y * n + x] = 255;
            }
        }
        data
    }

    #[test]
    fn sdf_center_is_fully_inside() {
        let source = solid_square(16, 4);
        let sdf = generate_sdf(&source, 16, 16, 4.0);
        let center = sdf[8 * 16 + 8];
        assert!(center > 200, "center should be deep inside: {center}");
    }

    #[test]
    fn sdf_corner_is_fully_outside() {
        let source = solid_square(16, 4);
        let sdf = generate_sdf(&source, 16, 16, 4.0);
        let corner = sdf[0];
        assert!(corner < 60, "corner should be far outside: {corner}");
    }

    #[test]
    fn sdf_empty_bitmap_is_empty_output() {
        assert!(generate_sdf(&[], 0, 0, 4.0).is_empty());
    }

    #[test]
    fn msdf_output_has_three_channels_per_pixel() {
        let source = solid_square(8, 2);
        let msdf = generate_msdf(&source, 8, 8, 3.0);
        assert_eq!(msdf.len(), 8 * 8 * 3);
    }
}
