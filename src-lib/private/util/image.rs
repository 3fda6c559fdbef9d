// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Image processing and pixel utilities

use crate::private::util::numeric::DivFloor;

/// in-memory image representation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    /// image width
    pub width: u32,
    /// image height
    pub height: u32,
    /// ARGB pixel color data, row-major
    pub data: Vec<u32>,
}

impl Image {
    /// allocate an image filled with a single color
    pub fn filled(width: u32, height: u32, color: u32) -> Self {
        Image {
            width,
            height,
            data: vec![color; width as usize * height as usize],
        }
    }

    /// Get a pixel. Returns `None` for out of bounds coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            self.data.get(y as usize * self.width as usize + x as usize).copied()
        } else {
            None
        }
    }

    /// Build an image from tightly packed 8-bit RGBA bytes, as produced by most capture and decode
    /// libraries.
    pub fn from_rgba_bytes(width: u32, height: u32, rgba: &[u8]) -> Self {
        let data = rgba.chunks_exact(4)
            .map(|pixel| u32::from_le_bytes([pixel[2], pixel[1], pixel[0], pixel[3]]))
            .collect();
        Image { width, height, data }
    }
}

/// Pack 8-bit channels into an ARGB pixel.
#[inline(always)]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    u32::from_le_bytes([b, g, r, a])
}

/// Replace the alpha byte of an ARGB pixel.
#[inline(always)]
pub const fn with_alpha(color: u32, alpha: u8) -> u32 {
    (color & 0x00FF_FFFF) | ((alpha as u32) << 24)
}

/// calculates `a * b / 255`
///
/// Note that this cannot be done with u8 precision alone, an intermediate step in the math can be
/// up to 255 * 255 == 65025 inclusive. A u16 does perfectly well here. We round to nearest int by
/// simply adding 255 / 2 ~= 127 to the dividend.
#[inline(always)]
pub fn multiply_color_channels_u8(a: u8, b: u8) -> u8 {
    const MAX_COLOR: u16 = 255;
    const HALF_COLOR: u16 = 127;

    ((a as u16 * b as u16 + HALF_COLOR) / MAX_COLOR) as u8
}

/// Composite `src` over `dst` (both non-premultiplied ARGB). The result is opaque if `dst` is.
#[inline(always)]
pub fn blend_argb(src: u32, dst: u32) -> u32 {
    let [sb, sg, sr, sa] = src.to_le_bytes();
    match sa {
        0 => dst,
        255 => src,
        _ => {
            let [db, dg, dr, da] = dst.to_le_bytes();
            let inverse = 255 - sa;
            let mix = |s: u8, d: u8| multiply_color_channels_u8(s, sa) + multiply_color_channels_u8(d, inverse);
            let alpha = sa.saturating_add(multiply_color_channels_u8(da, inverse));
            u32::from_le_bytes([mix(sb, db), mix(sg, dg), mix(sr, dr), alpha])
        }
    }
}

/// Premultiply alpha if required by current platform. On this platform this performs the premultiplication.
#[cfg(target_os = "windows")]
pub fn premultiply_alpha(color: u32) -> u32 {
    let [b, g, r, a] = color.to_le_bytes();
    u32::from_le_bytes(
        [
            multiply_color_channels_u8(b, a),
            multiply_color_channels_u8(g, a),
            multiply_color_channels_u8(r, a),
            a
        ]
    )
}

/// Premultiply alpha if required by current platform. On this platform this is a no-op.
#[cfg(not(target_os = "windows"))]
pub fn premultiply_alpha(color: u32) -> u32 {
    color
}

/// calculate the coordinates of the center of a rectangle.
/// `x` and `y` are the coordinates of the top left corner.
/// `width` and `height` are the dimensions of the rectangle.
/// Rounding is done towards -Infinity.
#[inline(always)]
pub fn rectangle_center(x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
    (
        x + width.div_floor_placeholder(2),
        y + height.div_floor_placeholder(2)
    )
}

/// Generate the eyedropper icon used for the window and the pick button.
/// This outputs series of 8-bit color depth RGBA values.
///
/// The icon is a thick diagonal stem running from the bottom-left corner up to a round bulb in the
/// top-right corner, with a dark outline so it reads on both light and dark backgrounds.
pub fn generate_icon_rgba(size: u32) -> Vec<u8> {
    const FILL: [u8; 4] = [0xCF, 0xD6, 0xDF, 0xFF];
    const OUTLINE: [u8; 4] = [0x23, 0x26, 0x2E, 0xFF];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    let size_f = size as f32;
    let stem_start = (0.18 * size_f, 0.82 * size_f);
    let stem_end = (0.68 * size_f, 0.32 * size_f);
    let bulb_center = (0.74 * size_f, 0.26 * size_f);
    let stem_radius = (0.09 * size_f).max(1.0);
    let bulb_radius = (0.2 * size_f).max(1.5);
    let outline = (0.06 * size_f).max(1.0);

    let mut icon_rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let point = (x as f32 + 0.5, y as f32 + 0.5);
            let stem = distance_to_segment(point, stem_start, stem_end) - stem_radius;
            let bulb = distance(point, bulb_center) - bulb_radius;
            let shape = stem.min(bulb);
            let pixel = if shape <= 0.0 {
                FILL
            } else if shape <= outline {
                OUTLINE
            } else {
                CLEAR
            };
            icon_rgba.extend_from_slice(&pixel);
        }
    }
    icon_rgba
}

fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn distance_to_segment(point: (f32, f32), start: (f32, f32), end: (f32, f32)) -> f32 {
    let segment = (end.0 - start.0, end.1 - start.1);
    let length_squared = segment.0 * segment.0 + segment.1 * segment.1;
    if length_squared == 0.0 {
        return distance(point, start);
    }
    let t = (((point.0 - start.0) * segment.0 + (point.1 - start.1) * segment.1) / length_squared).clamp(0.0, 1.0);
    distance(point, (start.0 + t * segment.0, start.1 + t * segment.1))
}

#[cfg(test)]
mod test_pixel_format {
    use super::*;

    /// simply confirm that to_le_bytes does what I expect, as the documentation is slightly vague
    #[test]
    fn test_le() {
        let packed_u32 = (3u32 << 24) + (2u32 << 16) + (1u32 << 8);
        assert_eq!(packed_u32.to_le_bytes(), [0, 1, 2, 3]);
    }

    #[test]
    fn test_argb_layout() {
        assert_eq!(argb(0xFF, 0x11, 0x22, 0x33), 0xFF112233);
        assert_eq!(with_alpha(0xFF112233, 0x80), 0x80112233);
    }

    #[test]
    fn test_rgba_bytes_conversion() {
        let image = Image::from_rgba_bytes(2, 1, &[20, 40, 60, 255, 1, 2, 3, 4]);
        assert_eq!(image.data, vec![0xFF14283C, 0x04010203]);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let image = Image::filled(2, 2, 7);
        assert_eq!(image.pixel(1, 1), Some(7));
        assert_eq!(image.pixel(2, 0), None);
    }

    /// This should be a no-op.
    #[test]
    fn test_multiply_noop() {
        assert_eq!(multiply_color_channels_u8(255, 255), 255);
        assert_eq!(multiply_color_channels_u8(127, 255), 127);
        assert_eq!(multiply_color_channels_u8(0, 255), 0);
    }

    /// This should half the value of each color.
    #[test]
    fn test_multiply_half() {
        assert_eq!(multiply_color_channels_u8(255, 127), 127);
        assert_eq!(multiply_color_channels_u8(127, 127), 63);
    }

    /// make sure the multiplication always rounds to the nearest u8
    #[test]
    fn multiply_rounding() {
        for c in 0..=255 {
            for a in [0, 1, 2, 3, 4, 20, 30, 40, 50, 60, 61, 62, 63, 64, 77, 127, 128, 254, 255] {
                let precise_result = (c as f64 * a as f64 / 255f64).round() as u8;
                let actual_result = multiply_color_channels_u8(c, a);
                assert_eq!(actual_result, precise_result, "mismatch for c={c} a={a}")
            }
        }
    }

    #[test]
    fn blend_extremes() {
        assert_eq!(blend_argb(0x00FFFFFF, 0xFF102030), 0xFF102030);
        assert_eq!(blend_argb(0xFFFFFFFF, 0xFF102030), 0xFFFFFFFF);
    }

    #[test]
    fn blend_half_black_over_white() {
        let blended = blend_argb(0x80000000, 0xFFFFFFFF);
        let [b, g, r, a] = blended.to_le_bytes();
        assert_eq!(a, 255);
        assert_eq!([b, g, r], [127, 127, 127]);
    }
}

#[cfg(test)]
mod test_rectangle_center {
    use super::*;

    #[test]
    fn test_rectangle_center_0_corner() {
        assert_eq!(rectangle_center(0, 0, 100, 100), (50, 50));
    }

    #[test]
    fn test_rectangle_center_0_corner_odd_size() {
        assert_eq!(rectangle_center(0, 0, 101, 101), (50, 50));
    }

    #[test]
    fn test_rectangle_center_negative_corner_odd_size() {
        assert_eq!(rectangle_center(-2, -2, 105, 105), (50, 50));
    }

    /// a 1080p monitor above the primary
    #[test]
    fn test_1080p_top_centered() {
        assert_eq!(rectangle_center(397, -1080, 1920, 1080), (397 + 960, -1080 + 540));
    }
}

#[cfg(test)]
mod test_icon {
    use super::*;

    fn alpha_at(icon: &[u8], size: u32, x: u32, y: u32) -> u8 {
        icon[((y * size + x) * 4 + 3) as usize]
    }

    #[test]
    fn icon_has_expected_length() {
        assert_eq!(generate_icon_rgba(32).len(), 32 * 32 * 4);
    }

    #[test]
    fn icon_shape() {
        const SIZE: u32 = 32;
        let icon = generate_icon_rgba(SIZE);
        // the bulb is top right, the opposite corner is empty
        assert_eq!(alpha_at(&icon, SIZE, 24, 8), 0xFF);
        assert_eq!(alpha_at(&icon, SIZE, 2, 2), 0x00);
        assert_eq!(alpha_at(&icon, SIZE, 30, 30), 0x00);
        // the stem passes through the middle
        assert_eq!(alpha_at(&icon, SIZE, 13, 18), 0xFF);
    }
}
