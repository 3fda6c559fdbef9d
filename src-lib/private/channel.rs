// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Color channels and the mapping between control positions and channel values.

use serde::{Deserialize, Serialize};

use crate::private::color::{MAX_CHANNEL, MAX_HUE};

/// A color model. Also identifies the slider tab showing that model's channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorModel {
    #[default]
    Rgb,
    Hsv,
}

impl ColorModel {
    pub const ALL: [ColorModel; 2] = [ColorModel::Rgb, ColorModel::Hsv];

    pub fn channels(&self) -> [Channel; 3] {
        match self {
            ColorModel::Rgb => [Channel::Red, Channel::Green, Channel::Blue],
            ColorModel::Hsv => [Channel::Hue, Channel::Saturation, Channel::Value],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorModel::Rgb => "RGB",
            ColorModel::Hsv => "HSV",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Value,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::Hue,
        Channel::Saturation,
        Channel::Value,
    ];

    pub fn model(&self) -> ColorModel {
        match self {
            Channel::Red | Channel::Green | Channel::Blue => ColorModel::Rgb,
            Channel::Hue | Channel::Saturation | Channel::Value => ColorModel::Hsv,
        }
    }

    /// position of this channel within its model's triple
    pub fn index(&self) -> usize {
        match self {
            Channel::Red | Channel::Hue => 0,
            Channel::Green | Channel::Saturation => 1,
            Channel::Blue | Channel::Value => 2,
        }
    }

    /// position of this channel within [`Channel::ALL`]
    pub fn ordinal(&self) -> usize {
        match self.model() {
            ColorModel::Rgb => self.index(),
            ColorModel::Hsv => 3 + self.index(),
        }
    }

    /// largest integer value of this channel
    pub fn max(&self) -> u16 {
        match self {
            Channel::Hue => MAX_HUE,
            _ => MAX_CHANNEL as u16,
        }
    }

    pub fn label(&self) -> char {
        match self {
            Channel::Red => 'R',
            Channel::Green => 'G',
            Channel::Blue => 'B',
            Channel::Hue => 'H',
            Channel::Saturation => 'S',
            Channel::Value => 'V',
        }
    }
}

/// Map a position along a control of length `extent` to a value in `0..=max`.
///
/// The value is `trunc(position * max / extent)`, mirrored if `invert` is set, then clamped. Positions
/// outside the control therefore land on the nearest end.
pub fn value_from_position(position: f64, extent: u32, max: u16, invert: bool) -> u16 {
    if extent == 0 || !position.is_finite() {
        return 0;
    }
    let max_f = max as f64;
    let value = (position * max_f / extent as f64).trunc();
    let value = if invert { max_f - value } else { value };
    value.clamp(0.0, max_f) as u16
}

/// Step a value by one unit for a wheel notch. A positive `delta` decreases the value and `invert`
/// flips that. Returns `None` when `delta` is zero.
pub fn value_from_scroll(delta: f64, current: u16, max: u16, invert: bool) -> Option<u16> {
    if delta == 0.0 || delta.is_nan() {
        return None;
    }
    let step: i32 = if delta > 0.0 { 1 } else { -1 };
    let step = if invert { -step } else { step };
    let value = (current as i32 - step).clamp(0, max as i32);
    Some(value as u16)
}

/// Offset of the indicator line along a control of length `extent` for `value`.
pub fn indicator_offset(value: u16, max: u16, extent: u32) -> i32 {
    if max == 0 {
        return 0;
    }
    (value.min(max) as i64 * extent as i64 / max as i64) as i32
}
