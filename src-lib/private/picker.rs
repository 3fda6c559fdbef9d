// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! The color picker's state: the current color, its cached channel values, and the text shown in
//! every text box. All the controls funnel their changes through here.

use crate::private::channel::{Channel, ColorModel, value_from_position, value_from_scroll};
use crate::private::color::{Color, MAX_CHANNEL};
use crate::private::line_edit::LineEdit;
use crate::private::util::image::with_alpha;

/// alpha of the indicator lines drawn over the gradients
const INDICATOR_ALPHA: u8 = 185;
/// largest hue accepted in raw mode, as a full turn would wrap back to red
const MAX_RAW_HUE: f64 = 0.999;

pub struct PickerState {
    color: Color,
    rgb: [u16; 3],
    hsv: [u16; 3],
    rgb_f: [f64; 3],
    hsv_f: [f64; 3],
    raw: bool,
    channel_edits: [LineEdit; 6],
    hex_edit: LineEdit,
    /// a box the user just typed into, which must not be overwritten by the next refresh
    keep_text: Option<Channel>,
}

impl PickerState {
    pub fn new(color: Color, raw: bool) -> Self {
        let mut state = PickerState {
            color,
            rgb: [0; 3],
            hsv: [0; 3],
            rgb_f: [0.0; 3],
            hsv_f: [0.0; 3],
            raw,
            channel_edits: std::array::from_fn(|_| LineEdit::numeric()),
            hex_edit: LineEdit::hex(),
            keep_text: None,
        };
        state.update();
        state
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn raw(&self) -> bool {
        self.raw
    }

    /// Replace the current color and refresh everything derived from it.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.update();
    }

    /// integer value of a single channel
    pub fn value(&self, channel: Channel) -> u16 {
        self.components(channel.model())[channel.index()]
    }

    /// integer triple of a model
    pub fn components(&self, model: ColorModel) -> [u16; 3] {
        match model {
            ColorModel::Rgb => self.rgb,
            ColorModel::Hsv => self.hsv,
        }
    }

    /// float triple of a model. Hue is a fraction of a turn.
    pub fn components_f(&self, model: ColorModel) -> [f64; 3] {
        match model {
            ColorModel::Rgb => self.rgb_f,
            ColorModel::Hsv => self.hsv_f,
        }
    }

    pub fn channel_edit(&self, channel: Channel) -> &LineEdit {
        &self.channel_edits[channel.ordinal()]
    }

    pub fn channel_edit_mut(&mut self, channel: Channel) -> &mut LineEdit {
        &mut self.channel_edits[channel.ordinal()]
    }

    pub fn hex_edit(&self) -> &LineEdit {
        &self.hex_edit
    }

    pub fn hex_edit_mut(&mut self) -> &mut LineEdit {
        &mut self.hex_edit
    }

    /// Recompute everything derived from the color.
    fn update(&mut self) {
        self.color = self.color.normalized();

        let [red, green, blue] = self.color.rgb();
        self.rgb = [red as u16, green as u16, blue as u16];
        self.hsv = [
            self.color.hue().unwrap_or(0),
            self.color.saturation() as u16,
            self.color.value() as u16,
        ];
        self.rgb_f = self.color.rgb_f();
        let (hue, saturation, value) = self.color.hsv_f();
        self.hsv_f = [hue.unwrap_or(0.0), saturation, value];

        self.refresh_texts();
        self.keep_text = None;

        self.hex_edit.set_text(&self.color.name());
    }

    fn refresh_texts(&mut self) {
        for channel in Channel::ALL {
            if self.keep_text == Some(channel) {
                continue;
            }
            let text = if self.raw {
                format!("{:.2}", self.components_f(channel.model())[channel.index()])
            } else {
                self.value(channel).to_string()
            };
            self.channel_edits[channel.ordinal()].set_text(&text);
        }
    }

    /// Set `color` unless it's the current one. The current color is always normalized, so the
    /// candidate is normalized before comparing.
    fn apply(&mut self, color: Color) -> bool {
        if color.normalized() == self.color {
            false
        } else {
            self.set_color(color);
            true
        }
    }

    /// Switch the channel boxes between integer and two-decimal display.
    pub fn set_raw(&mut self, raw: bool) {
        self.raw = raw;
        self.refresh_texts();
    }

    /// The current color with one channel replaced, keeping the other two channels of the same
    /// model. With `check_raw` in raw mode `value` is a float in `0.0..=1.0`, otherwise it is
    /// truncated to an integer.
    pub fn color_with_value(&self, value: f64, channel: Channel, check_raw: bool) -> Color {
        let model = channel.model();
        let use_float = self.raw && check_raw;
        let mut components = if use_float {
            self.components_f(model)
        } else {
            self.components(model).map(|component| component as f64)
        };
        components[channel.index()] = value;

        if use_float {
            let [a, b, c] = components;
            match model {
                ColorModel::Rgb => Color::from_rgb_f(a, b, c),
                ColorModel::Hsv => Color::from_hsv_f(a.min(MAX_RAW_HUE), b, c),
            }
        } else {
            let [a, b, c] = components.map(|component| component.max(0.0) as u16);
            let channel_u8 = |component: u16| component.min(MAX_CHANNEL as u16) as u8;
            match model {
                ColorModel::Rgb => Color::from_rgb(channel_u8(a), channel_u8(b), channel_u8(c)),
                ColorModel::Hsv => Color::from_hsv(a.min(Channel::Hue.max()), channel_u8(b), channel_u8(c)),
            }
        }
    }

    /// Set a channel from a position along a control. Returns `true` if the color changed.
    pub fn click_channel(&mut self, channel: Channel, position: f64, extent: u32, invert: bool) -> bool {
        let value = value_from_position(position, extent, channel.max(), invert);
        let color = self.color_with_value(value as f64, channel, false);
        self.apply(color)
    }

    /// Step a channel by one wheel notch. Returns `true` if the color changed.
    pub fn scroll_channel(&mut self, channel: Channel, delta: f64, invert: bool) -> bool {
        let Some(value) = value_from_scroll(delta, self.value(channel), channel.max(), invert) else {
            return false;
        };
        let color = self.color_with_value(value as f64, channel, false);
        self.apply(color)
    }

    /// React to the user editing a channel's text box. Unparsable text is ignored; out of range
    /// values are clamped and the box is corrected. Returns `true` if the color changed.
    pub fn channel_text_edited(&mut self, channel: Channel) -> bool {
        let Ok(mut value) = self.channel_edit(channel).text().trim().parse::<f64>() else {
            return false;
        };
        if !value.is_finite() {
            return false;
        }

        let (max, max_text) = if self.raw {
            (1.0, "1.0".to_string())
        } else {
            (channel.max() as f64, channel.max().to_string())
        };
        if value < 0.0 {
            value = 0.0;
            self.channel_edit_mut(channel).set_text("0");
        } else if value > max {
            value = max;
            self.channel_edit_mut(channel).set_text(&max_text);
        }

        let color = self.color_with_value(value, channel, true);
        if color.normalized() == self.color {
            return false;
        }
        self.keep_text = Some(channel);
        self.set_color(color);
        true
    }

    /// React to the user editing the hex box. The text is upper-cased and always starts with `#`.
    /// Nothing is parsed until seven characters are present. Returns `true` if the color changed.
    pub fn hex_edited(&mut self) -> bool {
        let mut text = self.hex_edit.text().to_uppercase();
        if !text.starts_with('#') {
            text.insert(0, '#');
        }
        if text != self.hex_edit.text() {
            self.hex_edit.set_text(&text);
        }
        if text.chars().count() < 7 {
            return false;
        }
        match Color::from_name(&text) {
            Some(color) => self.apply(color),
            None => false,
        }
    }

    /// A color that stands out against the current one: the opposite hue at full saturation and
    /// value, partially transparent.
    pub fn indicator_color(&self) -> u32 {
        let hue = (self.hsv[0] + 180) % Channel::Hue.max();
        with_alpha(Color::from_hsv(hue, MAX_CHANNEL, MAX_CHANNEL).to_argb(), INDICATOR_ALPHA)
    }
}

impl Default for PickerState {
    fn default() -> Self {
        PickerState::new(Color::default(), false)
    }
}
