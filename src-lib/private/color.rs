// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Color model with RGB <-> HSV conversion.
//!
//! A [`Color`] remembers which space it was built in. This matters for HSV colors: an HSV color
//! with zero saturation or zero value still knows its hue, which keeps the hue slider from
//! snapping back to red when the user drags the saturation down to nothing. RGB colors that are
//! achromatic have no hue at all.
//!
//! see https://en.wikipedia.org/wiki/HSL_and_HSV#Color_conversion_formulae

use crate::private::util::image::argb;

/// maximum value of an 8-bit channel
pub const MAX_CHANNEL: u8 = 255;
/// maximum value of an integer hue, in degrees
pub const MAX_HUE: u16 = 359;

const DEGREES: f64 = 360.0;
const MAX_CHANNEL_F: f64 = MAX_CHANNEL as f64;

/// A color, stored as floating point components in the space it was created in.
/// All components are in `0.0..=1.0`; hue is a fraction of a full turn and is always below `1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgb {
        red: f64,
        green: f64,
        blue: f64,
    },
    Hsv {
        /// `None` for achromatic colors
        hue: Option<f64>,
        saturation: f64,
        value: f64,
    },
}

impl Default for Color {
    fn default() -> Self {
        Color::from_rgb(23, 23, 33)
    }
}

impl Color {
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Color::Rgb {
            red: red as f64 / MAX_CHANNEL_F,
            green: green as f64 / MAX_CHANNEL_F,
            blue: blue as f64 / MAX_CHANNEL_F,
        }
    }

    /// Components are clamped into `0.0..=1.0`.
    pub fn from_rgb_f(red: f64, green: f64, blue: f64) -> Self {
        Color::Rgb {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
        }
    }

    /// `hue` is in degrees and wraps at 360. Saturation and value are 8-bit.
    pub fn from_hsv(hue: u16, saturation: u8, value: u8) -> Self {
        Color::Hsv {
            hue: Some((hue % 360) as f64 / DEGREES),
            saturation: saturation as f64 / MAX_CHANNEL_F,
            value: value as f64 / MAX_CHANNEL_F,
        }
    }

    /// `hue` is a fraction of a full turn. A full turn or more wraps around, negative values clamp
    /// to zero.
    pub fn from_hsv_f(hue: f64, saturation: f64, value: f64) -> Self {
        let hue = if hue.is_finite() { hue.max(0.0).fract() } else { 0.0 };
        Color::Hsv {
            hue: Some(hue),
            saturation: clamp_unit(saturation),
            value: clamp_unit(value),
        }
    }

    /// Build a color from an ARGB pixel. Alpha is ignored.
    pub fn from_argb(pixel: u32) -> Self {
        let [b, g, r, _a] = pixel.to_le_bytes();
        Color::from_rgb(r, g, b)
    }

    /// Parse `#RRGGBB` or `#RGB` (case insensitive). Anything else is rejected.
    pub fn from_name(name: &str) -> Option<Self> {
        let digits = name.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => {
                let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
                Some(Color::from_rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?))
            }
            3 => {
                let parse = |index: usize| u8::from_str_radix(&digits[index..index + 1], 16).ok().map(|nibble| nibble * 0x11);
                Some(Color::from_rgb(parse(0)?, parse(1)?, parse(2)?))
            }
            _ => None,
        }
    }

    /// RGB components as floats
    pub fn rgb_f(&self) -> [f64; 3] {
        match *self {
            Color::Rgb { red, green, blue } => [red, green, blue],
            Color::Hsv { hue, saturation, value } => hsv_to_rgb(hue.unwrap_or(0.0), saturation, value),
        }
    }

    /// HSV components as floats. Hue is `None` for achromatic colors.
    pub fn hsv_f(&self) -> (Option<f64>, f64, f64) {
        match *self {
            Color::Rgb { red, green, blue } => rgb_to_hsv(red, green, blue),
            Color::Hsv { hue, saturation, value } => (hue, saturation, value),
        }
    }

    pub fn red_f(&self) -> f64 {
        self.rgb_f()[0]
    }

    pub fn green_f(&self) -> f64 {
        self.rgb_f()[1]
    }

    pub fn blue_f(&self) -> f64 {
        self.rgb_f()[2]
    }

    pub fn hue_f(&self) -> Option<f64> {
        self.hsv_f().0
    }

    pub fn saturation_f(&self) -> f64 {
        self.hsv_f().1
    }

    pub fn value_f(&self) -> f64 {
        self.hsv_f().2
    }

    /// 8-bit RGB components, rounded to nearest
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb_f().map(unit_to_u8)
    }

    pub fn red(&self) -> u8 {
        self.rgb()[0]
    }

    pub fn green(&self) -> u8 {
        self.rgb()[1]
    }

    pub fn blue(&self) -> u8 {
        self.rgb()[2]
    }

    /// Integer hue in degrees (`0..=359`), or `None` for achromatic colors. Hues just short of a
    /// full turn stay at 359 instead of rounding over to red.
    pub fn hue(&self) -> Option<u16> {
        self.hue_f().map(|hue| ((hue * DEGREES).round() as u16).min(MAX_HUE))
    }

    pub fn saturation(&self) -> u8 {
        unit_to_u8(self.saturation_f())
    }

    pub fn value(&self) -> u8 {
        unit_to_u8(self.value_f())
    }

    /// If this color has no hue, give it a hue of zero while keeping saturation and value.
    /// Colors that already have a hue are returned unchanged.
    pub fn normalized(&self) -> Color {
        match self.hsv_f() {
            (Some(_), _, _) => *self,
            (None, saturation, value) => Color::Hsv {
                hue: Some(0.0),
                saturation,
                value,
            },
        }
    }

    /// Upper case `#RRGGBB`
    pub fn name(&self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// opaque ARGB pixel
    pub fn to_argb(&self) -> u32 {
        let [r, g, b] = self.rgb();
        argb(MAX_CHANNEL, r, g, b)
    }
}

#[inline(always)]
fn clamp_unit(component: f64) -> f64 {
    if component.is_nan() { 0.0 } else { component.clamp(0.0, 1.0) }
}

#[inline(always)]
fn unit_to_u8(component: f64) -> u8 {
    (clamp_unit(component) * MAX_CHANNEL_F).round() as u8
}

/// `hue` is a fraction of a turn, everything else is in `0.0..=1.0`
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [f64; 3] {
    let chroma = value * saturation;
    let hue_over_60 = (hue.fract() * 6.0).max(0.0);
    let intermediate = chroma * (1.0 - (hue_over_60 % 2.0 - 1.0).abs());
    let min = value - chroma;

    let [r, g, b] = match hue_over_60 {
        h if h < 1.0 => [chroma, intermediate, 0.0],
        h if h < 2.0 => [intermediate, chroma, 0.0],
        h if h < 3.0 => [0.0, chroma, intermediate],
        h if h < 4.0 => [0.0, intermediate, chroma],
        h if h < 5.0 => [intermediate, 0.0, chroma],
        _ => [chroma, 0.0, intermediate],
    };

    [r + min, g + min, b + min]
}

/// Returns `(hue, saturation, value)`. Hue is a fraction of a turn, or `None` if the color is
/// achromatic.
pub fn rgb_to_hsv(red: f64, green: f64, blue: f64) -> (Option<f64>, f64, f64) {
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let chroma = max - min;

    let hue = if chroma <= 0.0 {
        None
    } else {
        let sextant = if max == red {
            ((green - blue) / chroma).rem_euclid(6.0)
        } else if max == green {
            (blue - red) / chroma + 2.0
        } else { // max must therefore equal blue
            (red - green) / chroma + 4.0
        };
        Some((sextant / 6.0).fract())
    };

    let saturation = if max <= 0.0 { 0.0 } else { chroma / max };

    (hue, saturation, max)
}
