// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Linear gradients used as the backgrounds of the picker's controls.

use crate::private::canvas::Canvas;
use crate::private::channel::Channel;
use crate::private::color::{Color, MAX_CHANNEL};
use crate::private::util::rect::Rect;

const WHITE: u32 = 0xFFFFFFFF;
const BLACK: u32 = 0xFF000000;
const TRANSPARENT_BLACK: u32 = 0x00000000;

/// stops of the hue rainbow: red, yellow, green, cyan, blue, magenta, and back to red
const HUE_STOPS: [(f64, u32); 7] = [
    (0.0, 0xFFFF0000),
    (0.166, 0xFFFFFF00),
    (0.333, 0xFF00FF00),
    (0.5, 0xFF00FFFF),
    (0.666, 0xFF0000FF),
    (0.833, 0xFFFF00FF),
    (1.0, 0xFFFF0000),
];

/// Which way a gradient runs: its first stop is drawn at the named start edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    /// `(offset, ARGB color)` pairs, sorted by offset
    stops: Vec<(f64, u32)>,
}

impl Gradient {
    pub fn new(mut stops: Vec<(f64, u32)>) -> Self {
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Gradient { stops }
    }

    pub fn two_stop(start: u32, end: u32) -> Self {
        Gradient::new(vec![(0.0, start), (1.0, end)])
    }

    /// Color at offset `t`, linearly interpolated in all four channels. Offsets past either end
    /// take the color of the nearest stop.
    pub fn color_at(&self, t: f64) -> u32 {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return TRANSPARENT_BLACK;
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        self.stops
            .windows(2)
            .find(|pair| t <= pair[1].0)
            .map(|pair| {
                let (start_offset, start) = pair[0];
                let (end_offset, end) = pair[1];
                let span = end_offset - start_offset;
                let fraction = if span > 0.0 { (t - start_offset) / span } else { 1.0 };
                lerp_argb(start, end, fraction)
            })
            .unwrap_or(last.1)
    }

    /// Composite the gradient over `rect`, source-over.
    pub fn fill(&self, canvas: &mut Canvas, rect: Rect, direction: Direction) {
        let length = match direction {
            Direction::LeftToRight | Direction::RightToLeft => rect.width,
            Direction::TopToBottom | Direction::BottomToTop => rect.height,
        };
        for step in 0..length {
            let t = if length > 1 { step as f64 / (length - 1) as f64 } else { 0.0 };
            let color = self.color_at(t);
            let line = match direction {
                Direction::LeftToRight => Rect::new(rect.x + step as i32, rect.y, 1, rect.height),
                Direction::RightToLeft => Rect::new(rect.right() - 1 - step as i32, rect.y, 1, rect.height),
                Direction::TopToBottom => Rect::new(rect.x, rect.y + step as i32, rect.width, 1),
                Direction::BottomToTop => Rect::new(rect.x, rect.bottom() - 1 - step as i32, rect.width, 1),
            };
            canvas.blend_rect(line, color);
        }
    }
}

fn lerp_argb(start: u32, end: u32, fraction: f64) -> u32 {
    let start = start.to_le_bytes();
    let end = end.to_le_bytes();
    let mut out = [0u8; 4];
    for i in 0..4 {
        let a = start[i] as f64;
        let b = end[i] as f64;
        out[i] = (a + (b - a) * fraction).round().clamp(0.0, 255.0) as u8;
    }
    u32::from_le_bytes(out)
}

/// White on the left to the fully saturated `hue` on the right. Combined with [`value_overlay`]
/// this makes the saturation/value square.
pub fn saturation_gradient(hue: u16) -> Gradient {
    Gradient::two_stop(WHITE, Color::from_hsv(hue, MAX_CHANNEL, MAX_CHANNEL).to_argb())
}

/// transparent at the top to black at the bottom
pub fn value_overlay() -> Gradient {
    Gradient::two_stop(TRANSPARENT_BLACK, BLACK)
}

pub fn hue_gradient() -> Gradient {
    Gradient::new(HUE_STOPS.to_vec())
}

/// The gradient behind a channel's slider: the current color with that channel swept from zero to
/// its maximum.
pub fn channel_gradient(channel: Channel, color: &Color) -> Gradient {
    let [red, green, blue] = color.rgb();
    let hue = color.hue().unwrap_or(0);
    let saturation = color.saturation();
    let value = color.value();
    let (start, end) = match channel {
        Channel::Red => (Color::from_rgb(0, green, blue), Color::from_rgb(MAX_CHANNEL, green, blue)),
        Channel::Green => (Color::from_rgb(red, 0, blue), Color::from_rgb(red, MAX_CHANNEL, blue)),
        Channel::Blue => (Color::from_rgb(red, green, 0), Color::from_rgb(red, green, MAX_CHANNEL)),
        Channel::Hue => return hue_gradient(),
        Channel::Saturation => (Color::from_hsv(hue, 0, value), Color::from_hsv(hue, MAX_CHANNEL, value)),
        Channel::Value => (Color::from_hsv(hue, saturation, 0), Color::from_hsv(hue, saturation, MAX_CHANNEL)),
    };
    Gradient::two_stop(start.to_argb(), end.to_argb())
}

#[cfg(test)]
mod test_gradient {
    use super::*;

    #[test]
    fn endpoints() {
        let gradient = Gradient::two_stop(BLACK, WHITE);
        assert_eq!(gradient.color_at(0.0), BLACK);
        assert_eq!(gradient.color_at(1.0), WHITE);
        assert_eq!(gradient.color_at(-3.0), BLACK);
        assert_eq!(gradient.color_at(7.0), WHITE);
    }

    #[test]
    fn midpoint_interpolates_alpha_too() {
        let gradient = value_overlay();
        let [b, g, r, a] = gradient.color_at(0.5).to_le_bytes();
        assert_eq!([b, g, r], [0, 0, 0]);
        assert_eq!(a, 128);
    }

    #[test]
    fn hue_stops() {
        let gradient = hue_gradient();
        assert_eq!(gradient.color_at(0.0), 0xFFFF0000);
        assert_eq!(gradient.color_at(0.333), 0xFF00FF00);
        assert_eq!(gradient.color_at(0.666), 0xFF0000FF);
        assert_eq!(gradient.color_at(1.0), 0xFFFF0000);
    }

    #[test]
    fn stops_are_sorted() {
        let gradient = Gradient::new(vec![(1.0, WHITE), (0.0, BLACK)]);
        assert_eq!(gradient.color_at(0.0), BLACK);
    }

    #[test]
    fn empty_gradient_is_transparent() {
        assert_eq!(Gradient::new(Vec::new()).color_at(0.5), TRANSPARENT_BLACK);
    }

    #[test]
    fn red_channel_holds_others() {
        let gradient = channel_gradient(Channel::Red, &Color::from_rgb(10, 20, 30));
        assert_eq!(gradient.color_at(0.0), 0xFF00141E);
        assert_eq!(gradient.color_at(1.0), 0xFFFF141E);
    }

    #[test]
    fn value_channel_runs_from_black() {
        let gradient = channel_gradient(Channel::Value, &Color::from_hsv(120, 255, 100));
        assert_eq!(gradient.color_at(0.0), BLACK);
        assert_eq!(gradient.color_at(1.0), 0xFF00FF00);
    }

    #[test]
    fn saturation_square_corners() {
        let mut buffer = vec![0xFF123456; 10 * 10];
        let mut canvas = Canvas::new(&mut buffer, 10, 10);
        let rect = Rect::new(0, 0, 10, 10);
        saturation_gradient(240).fill(&mut canvas, rect, Direction::LeftToRight);
        value_overlay().fill(&mut canvas, rect, Direction::TopToBottom);
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(9, 0), Some(0xFF0000FF));
        assert_eq!(canvas.pixel(0, 9), Some(BLACK));
        assert_eq!(canvas.pixel(9, 9), Some(BLACK));
    }

    #[test]
    fn reversed_directions() {
        let mut buffer = vec![0; 4 * 4];
        let mut canvas = Canvas::new(&mut buffer, 4, 4);
        let gradient = Gradient::two_stop(BLACK, WHITE);
        gradient.fill(&mut canvas, Rect::new(0, 0, 4, 2), Direction::RightToLeft);
        gradient.fill(&mut canvas, Rect::new(0, 2, 4, 2), Direction::BottomToTop);
        assert_eq!(canvas.pixel(3, 0), Some(BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(0, 3), Some(BLACK));
        assert_eq!(canvas.pixel(0, 2), Some(WHITE));
    }
}
