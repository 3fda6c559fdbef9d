// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! The main window's widgets: input routing and rendering.
//!
//! Everything here is independent of the windowing library. The window feeds in pointer and
//! keyboard events in window coordinates and gets back a [`UiAction`] telling it what to do next.

use crate::private::canvas::Canvas;
use crate::private::channel::{Channel, ColorModel, indicator_offset};
use crate::private::color::{Color, MAX_CHANNEL};
use crate::private::font::{self, draw_text, text_height, text_width};
use crate::private::gradient::{channel_gradient, hue_gradient, saturation_gradient, value_overlay, Direction};
use crate::private::layout::{self, Element, HEX_BOX, HUE_BAR, MAIN_GRADIENT, PICK_BUTTON, RAW_CHECK_BOX, SWATCH};
use crate::private::line_edit::{EditKey, LineEdit};
use crate::private::picker::PickerState;
use crate::private::util::image::{generate_icon_rgba, Image};
use crate::private::util::rect::Rect;

pub const BACKGROUND: u32 = 0xFF383C4A;
pub const TEXT: u32 = 0xFFCFD6DF;
const FIELD: u32 = 0xFF2B2E39;
const BORDER: u32 = 0xFF4B5064;
const INACTIVE_TAB: u32 = 0xFF2F323E;

const TEXT_SCALE: u32 = 2;
const TEXT_PADDING: u32 = 4;
const BUTTON_ICON_SIZE: u32 = 24;
const CHECK_SIZE: u32 = 14;
const INDICATOR_WIDTH: u32 = 2;

/// What the window should do after handing an event to the [`Ui`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    None,
    Redraw,
    StartPick,
}

/// Keys with a meaning beyond typing text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiKey {
    Edit(EditKey),
    Enter,
    Escape,
    Tab,
}

/// which text box has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Channel(Channel),
    Hex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Drag {
    MainGradient,
    HueBar,
    Slider(Channel),
}

pub struct Ui {
    picker: PickerState,
    tab: ColorModel,
    focus: Option<Focus>,
    drag: Option<Drag>,
    button_icon: Image,
}

fn redraw_if(changed: bool) -> UiAction {
    if changed { UiAction::Redraw } else { UiAction::None }
}

impl Ui {
    pub fn new(picker: PickerState, tab: ColorModel) -> Self {
        let icon_rgba = generate_icon_rgba(BUTTON_ICON_SIZE);
        Ui {
            picker,
            tab,
            focus: None,
            drag: None,
            button_icon: Image::from_rgba_bytes(BUTTON_ICON_SIZE, BUTTON_ICON_SIZE, &icon_rgba),
        }
    }

    pub fn picker(&self) -> &PickerState {
        &self.picker
    }

    pub fn tab(&self) -> ColorModel {
        self.tab
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    /// Apply a color from outside the widgets, such as the eyedropper.
    pub fn set_color(&mut self, color: Color) -> UiAction {
        self.picker.set_color(color);
        UiAction::Redraw
    }

    fn set_tab(&mut self, tab: ColorModel) {
        self.tab = tab;
        if let Some(Focus::Channel(channel)) = self.focus {
            if channel.model() != tab {
                self.focus = None;
            }
        }
    }

    pub fn mouse_pressed(&mut self, x: f64, y: f64) -> UiAction {
        let element = layout::hit(x.floor() as i32, y.floor() as i32, self.tab);
        self.focus = match element {
            Some(Element::TextBox(channel)) => Some(Focus::Channel(channel)),
            Some(Element::HexBox) => Some(Focus::Hex),
            _ => None,
        };

        match element {
            Some(Element::MainGradient) => self.start_drag(Drag::MainGradient, x, y),
            Some(Element::HueBar) => self.start_drag(Drag::HueBar, x, y),
            Some(Element::Slider(channel)) => self.start_drag(Drag::Slider(channel), x, y),
            Some(Element::Tab(model)) => self.set_tab(model),
            Some(Element::RawCheckBox) => self.picker.set_raw(!self.picker.raw()),
            Some(Element::PickButton) => return UiAction::StartPick,
            Some(Element::TextBox(_)) | Some(Element::HexBox) | None => {}
        }
        UiAction::Redraw
    }

    fn start_drag(&mut self, drag: Drag, x: f64, y: f64) {
        self.drag = Some(drag);
        self.apply_drag(drag, x, y);
    }

    /// Set the dragged control's channel(s) from a pointer position. Positions outside the control
    /// clamp to its ends.
    fn apply_drag(&mut self, drag: Drag, x: f64, y: f64) -> bool {
        match drag {
            Drag::MainGradient => {
                let saturation = self.picker.click_channel(
                    Channel::Saturation,
                    x - MAIN_GRADIENT.x as f64,
                    MAIN_GRADIENT.width,
                    false,
                );
                let value = self.picker.click_channel(
                    Channel::Value,
                    y - MAIN_GRADIENT.y as f64,
                    MAIN_GRADIENT.height,
                    true,
                );
                saturation || value
            }
            Drag::HueBar => self.picker.click_channel(Channel::Hue, y - HUE_BAR.y as f64, HUE_BAR.height, true),
            Drag::Slider(channel) => {
                let rect = layout::slider_rect(channel);
                self.picker.click_channel(channel, x - rect.x as f64, rect.width, false)
            }
        }
    }

    pub fn mouse_moved(&mut self, x: f64, y: f64) -> UiAction {
        match self.drag {
            Some(drag) => redraw_if(self.apply_drag(drag, x, y)),
            None => UiAction::None,
        }
    }

    pub fn mouse_released(&mut self) -> UiAction {
        self.drag = None;
        UiAction::None
    }

    /// A wheel movement over `(x, y)`. Deltas are in notches; only their sign matters.
    pub fn wheel(&mut self, x: f64, y: f64, delta_x: f64, delta_y: f64) -> UiAction {
        let changed = match layout::hit(x.floor() as i32, y.floor() as i32, self.tab) {
            Some(Element::MainGradient) => {
                let saturation = self.picker.scroll_channel(Channel::Saturation, delta_y, false);
                let value = self.picker.scroll_channel(Channel::Value, delta_x, false);
                saturation || value
            }
            Some(Element::HueBar) => self.picker.scroll_channel(Channel::Hue, delta_y, true),
            Some(Element::Slider(channel)) | Some(Element::TextBox(channel)) => {
                self.picker.scroll_channel(channel, delta_y, false)
            }
            _ => false,
        };
        redraw_if(changed)
    }

    fn focused_edit_mut(&mut self) -> Option<&mut LineEdit> {
        match self.focus? {
            Focus::Channel(channel) => Some(self.picker.channel_edit_mut(channel)),
            Focus::Hex => Some(self.picker.hex_edit_mut()),
        }
    }

    /// let the picker react to the focused box's new text
    fn focused_text_edited(&mut self) {
        match self.focus {
            Some(Focus::Channel(channel)) => {
                self.picker.channel_text_edited(channel);
            }
            Some(Focus::Hex) => {
                self.picker.hex_edited();
            }
            None => {}
        }
    }

    /// Typed text, delivered to the focused box.
    pub fn text_input(&mut self, text: &str) -> UiAction {
        let changed = self.focused_edit_mut().is_some_and(|edit| edit.insert(text));
        if changed {
            self.focused_text_edited();
        }
        redraw_if(changed)
    }

    pub fn edit_key(&mut self, key: UiKey) -> UiAction {
        match key {
            UiKey::Enter | UiKey::Escape => {
                let had_focus = self.focus.take().is_some();
                redraw_if(had_focus)
            }
            UiKey::Tab => {
                self.focus = Some(self.next_focus());
                UiAction::Redraw
            }
            UiKey::Edit(key) => {
                let Some(edit) = self.focused_edit_mut() else {
                    return UiAction::None;
                };
                if edit.key(key) {
                    self.focused_text_edited();
                }
                UiAction::Redraw
            }
        }
    }

    /// focus order: the active tab's boxes top to bottom, then the hex box
    fn next_focus(&self) -> Focus {
        let [first, second, third] = self.tab.channels();
        match self.focus {
            None | Some(Focus::Hex) => Focus::Channel(first),
            Some(Focus::Channel(channel)) if channel == first => Focus::Channel(second),
            Some(Focus::Channel(channel)) if channel == second => Focus::Channel(third),
            Some(Focus::Channel(_)) => Focus::Hex,
        }
    }

    /// Draw the whole window. The canvas should be [`layout::WINDOW_WIDTH`] by
    /// [`layout::WINDOW_HEIGHT`].
    pub fn render(&self, canvas: &mut Canvas) {
        canvas.fill(BACKGROUND);
        self.render_gradients(canvas);
        self.render_tabs(canvas);
        self.render_rows(canvas);
        self.render_bottom_bar(canvas);
    }

    fn render_gradients(&self, canvas: &mut Canvas) {
        let picker = &self.picker;
        let hue = picker.value(Channel::Hue);
        let indicator = picker.indicator_color();

        saturation_gradient(hue).fill(canvas, MAIN_GRADIENT, Direction::LeftToRight);
        value_overlay().fill(canvas, MAIN_GRADIENT, Direction::TopToBottom);
        hue_gradient().fill(canvas, HUE_BAR, Direction::BottomToTop);

        let max = MAX_CHANNEL as u16;
        let saturation_x = indicator_offset(picker.value(Channel::Saturation), max, MAIN_GRADIENT.width);
        let value_y = indicator_offset(max - picker.value(Channel::Value), max, MAIN_GRADIENT.height);
        let hue_y = indicator_offset(Channel::Hue.max() - hue, Channel::Hue.max(), HUE_BAR.height);

        let vertical = Rect::new(MAIN_GRADIENT.x + saturation_x - 1, MAIN_GRADIENT.y, INDICATOR_WIDTH, MAIN_GRADIENT.height);
        let horizontal = Rect::new(MAIN_GRADIENT.x, MAIN_GRADIENT.y + value_y - 1, MAIN_GRADIENT.width, INDICATOR_WIDTH);
        let hue_line = Rect::new(HUE_BAR.x, HUE_BAR.y + hue_y - 1, HUE_BAR.width, INDICATOR_WIDTH);
        blend_clipped(canvas, MAIN_GRADIENT, vertical, indicator);
        blend_clipped(canvas, MAIN_GRADIENT, horizontal, indicator);
        blend_clipped(canvas, HUE_BAR, hue_line, indicator);
    }

    fn render_tabs(&self, canvas: &mut Canvas) {
        for model in ColorModel::ALL {
            let rect = layout::tab_rect(model);
            let fill = if model == self.tab { BORDER } else { INACTIVE_TAB };
            canvas.fill_rect(rect, fill);
            draw_centered(canvas, rect, model.label(), TEXT);
        }
        let pane_line = Rect::new(
            MAIN_GRADIENT.x,
            layout::TAB_PANE_TOP,
            (HUE_BAR.right() - MAIN_GRADIENT.x) as u32,
            1,
        );
        canvas.fill_rect(pane_line, BORDER);
    }

    fn render_rows(&self, canvas: &mut Canvas) {
        let color = self.picker.color();
        let indicator = self.picker.indicator_color();
        for channel in self.tab.channels() {
            let mut label = [0u8; 4];
            draw_centered(canvas, layout::label_rect(channel), channel.label().encode_utf8(&mut label), TEXT);

            let slider = layout::slider_rect(channel);
            channel_gradient(channel, &color).fill(canvas, slider, Direction::LeftToRight);
            let x = indicator_offset(self.picker.value(channel), channel.max(), slider.width);
            let line = Rect::new(slider.x + x - 1, slider.y, INDICATOR_WIDTH, slider.height);
            blend_clipped(canvas, slider, line, indicator);

            let focused = self.focus == Some(Focus::Channel(channel));
            draw_text_box(canvas, layout::text_box_rect(channel), self.picker.channel_edit(channel), focused);
        }
    }

    fn render_bottom_bar(&self, canvas: &mut Canvas) {
        canvas.fill_rect(SWATCH, self.picker.color().to_argb());
        canvas.stroke_rect(SWATCH, 1, BORDER);

        canvas.fill_rect(PICK_BUTTON, BORDER);
        let icon_x = PICK_BUTTON.x + (PICK_BUTTON.width as i32 - self.button_icon.width as i32) / 2;
        let icon_y = PICK_BUTTON.y + (PICK_BUTTON.height as i32 - self.button_icon.height as i32) / 2;
        canvas.blit(icon_x, icon_y, &self.button_icon);

        let check = Rect::new(
            RAW_CHECK_BOX.x,
            RAW_CHECK_BOX.y + (RAW_CHECK_BOX.height - CHECK_SIZE) as i32 / 2,
            CHECK_SIZE,
            CHECK_SIZE,
        );
        canvas.fill_rect(check, FIELD);
        canvas.stroke_rect(check, 1, TEXT);
        if self.picker.raw() {
            canvas.fill_rect(check.inset(3), TEXT);
        }
        let label_x = check.right() + 6;
        let label_y = RAW_CHECK_BOX.y + (RAW_CHECK_BOX.height - text_height(TEXT_SCALE)) as i32 / 2;
        draw_text(canvas, label_x, label_y, "RAW", TEXT, TEXT_SCALE);

        draw_text_box(canvas, HEX_BOX, self.picker.hex_edit(), self.focus == Some(Focus::Hex));
    }
}

/// blend `line`, clipped to the control it belongs to
fn blend_clipped(canvas: &mut Canvas, control: Rect, line: Rect, color: u32) {
    if let Some(line) = line.intersection(&control) {
        canvas.blend_rect(line, color);
    }
}

fn draw_centered(canvas: &mut Canvas, rect: Rect, text: &str, color: u32) {
    let x = rect.x + (rect.width as i32 - text_width(text, TEXT_SCALE) as i32) / 2;
    let y = rect.y + (rect.height as i32 - text_height(TEXT_SCALE) as i32) / 2;
    draw_text(canvas, x, y, text, color, TEXT_SCALE);
}

/// A right-aligned text box. Text too wide for the box drops to the smallest scale.
fn draw_text_box(canvas: &mut Canvas, rect: Rect, edit: &LineEdit, focused: bool) {
    canvas.fill_rect(rect, FIELD);
    canvas.stroke_rect(rect, 1, if focused { TEXT } else { BORDER });

    let text = edit.text();
    let available = rect.width.saturating_sub(TEXT_PADDING * 2);
    let scale = if text_width(text, TEXT_SCALE) <= available { TEXT_SCALE } else { 1 };
    let x = rect.right() - TEXT_PADDING as i32 - text_width(text, scale) as i32;
    let y = rect.y + (rect.height as i32 - text_height(scale) as i32) / 2;
    draw_text(canvas, x, y, text, TEXT, scale);

    if focused {
        let caret_x = x + font::caret_offset(edit.caret(), scale);
        canvas.fill_rect(Rect::new(caret_x, rect.y + 3, 1, rect.height - 6), TEXT);
    }
}

#[cfg(test)]
mod test_ui {
    use super::*;
    use crate::private::layout::{WINDOW_HEIGHT, WINDOW_WIDTH};

    fn center(rect: Rect) -> (f64, f64) {
        (rect.x as f64 + rect.width as f64 / 2.0, rect.y as f64 + rect.height as f64 / 2.0)
    }

    fn ui() -> Ui {
        Ui::new(PickerState::default(), ColorModel::Rgb)
    }

    #[test]
    fn pick_button_starts_pick() {
        let mut ui = ui();
        let (x, y) = center(PICK_BUTTON);
        assert_eq!(ui.mouse_pressed(x, y), UiAction::StartPick);
    }

    #[test]
    fn main_gradient_top_left_is_white() {
        let mut ui = ui();
        ui.mouse_pressed(MAIN_GRADIENT.x as f64, MAIN_GRADIENT.y as f64);
        assert_eq!(ui.picker().value(Channel::Saturation), 0);
        assert_eq!(ui.picker().value(Channel::Value), 255);
        assert_eq!(ui.picker().color().rgb(), [255, 255, 255]);
    }

    #[test]
    fn main_gradient_keeps_hue() {
        let mut ui = Ui::new(PickerState::new(Color::from_hsv(200, 255, 255), false), ColorModel::Hsv);
        let (x, y) = center(MAIN_GRADIENT);
        ui.mouse_pressed(x, y);
        ui.mouse_moved(MAIN_GRADIENT.x as f64, 10_000.0);
        assert_eq!(ui.picker().value(Channel::Hue), 200);
        assert_eq!(ui.picker().color().rgb(), [0, 0, 0]);
    }

    #[test]
    fn hue_bar_is_inverted() {
        let mut ui = ui();
        ui.mouse_pressed(HUE_BAR.x as f64 + 5.0, HUE_BAR.y as f64);
        assert_eq!(ui.picker().value(Channel::Hue), 359);
    }

    #[test]
    fn drag_clamps_outside_slider() {
        let mut ui = ui();
        let (x, y) = center(layout::slider_rect(Channel::Red));
        ui.mouse_pressed(x, y);
        assert_eq!(ui.mouse_moved(-100.0, 0.0), UiAction::Redraw);
        assert_eq!(ui.picker().value(Channel::Red), 0);
        ui.mouse_moved(10_000.0, 10_000.0);
        assert_eq!(ui.picker().value(Channel::Red), 255);
        ui.mouse_released();
        assert_eq!(ui.mouse_moved(-100.0, 0.0), UiAction::None);
        assert_eq!(ui.picker().value(Channel::Red), 255);
    }

    #[test]
    fn moves_without_drag_do_nothing() {
        let mut ui = ui();
        let (x, y) = center(MAIN_GRADIENT);
        assert_eq!(ui.mouse_moved(x, y), UiAction::None);
    }

    #[test]
    fn wheel_on_hue_bar_is_inverted() {
        let mut ui = Ui::new(PickerState::new(Color::from_hsv(100, 255, 255), false), ColorModel::Rgb);
        let (x, y) = center(HUE_BAR);
        assert_eq!(ui.wheel(x, y, 0.0, 1.0), UiAction::Redraw);
        assert_eq!(ui.picker().value(Channel::Hue), 101);
    }

    #[test]
    fn wheel_on_main_gradient() {
        let mut ui = Ui::new(PickerState::new(Color::from_hsv(100, 100, 100), false), ColorModel::Rgb);
        let (x, y) = center(MAIN_GRADIENT);
        ui.wheel(x, y, 0.0, 1.0);
        assert_eq!(ui.picker().components(ColorModel::Hsv), [100, 99, 100]);
        ui.wheel(x, y, -1.0, 0.0);
        assert_eq!(ui.picker().components(ColorModel::Hsv), [100, 99, 101]);
    }

    #[test]
    fn wheel_on_text_box() {
        let mut ui = ui();
        let (x, y) = center(layout::text_box_rect(Channel::Green));
        ui.wheel(x, y, 0.0, -1.0);
        assert_eq!(ui.picker().value(Channel::Green), 24);
    }

    #[test]
    fn wheel_on_nothing() {
        let mut ui = ui();
        assert_eq!(ui.wheel(0.0, 0.0, 1.0, 1.0), UiAction::None);
    }

    #[test]
    fn tab_switch_only_hits_active_rows() {
        let mut ui = ui();
        let (x, y) = center(layout::tab_rect(ColorModel::Hsv));
        ui.mouse_pressed(x, y);
        assert_eq!(ui.tab(), ColorModel::Hsv);
        let (x, y) = center(layout::slider_rect(Channel::Hue));
        ui.mouse_pressed(0.0 + layout::slider_rect(Channel::Hue).x as f64, y);
        assert_eq!(ui.picker().value(Channel::Hue), 0);
        ui.mouse_released();
        ui.mouse_pressed(x, y);
        assert_eq!(ui.picker().value(Channel::Hue), 359 * 153 / 306);
    }

    #[test]
    fn raw_check_box_toggles() {
        let mut ui = ui();
        let (x, y) = center(RAW_CHECK_BOX);
        ui.mouse_pressed(x, y);
        assert!(ui.picker().raw());
        assert_eq!(ui.picker().channel_edit(Channel::Red).text(), "0.09");
        ui.mouse_pressed(x, y);
        assert!(!ui.picker().raw());
    }

    #[test]
    fn typing_into_channel_box() {
        let mut ui = ui();
        let (x, y) = center(layout::text_box_rect(Channel::Red));
        ui.mouse_pressed(x, y);
        assert_eq!(ui.focus(), Some(Focus::Channel(Channel::Red)));
        // "23" becomes "2345", which clamps
        assert_eq!(ui.text_input("45"), UiAction::Redraw);
        assert_eq!(ui.picker().value(Channel::Red), 255);
        assert_eq!(ui.picker().channel_edit(Channel::Red).text(), "255");
        ui.edit_key(UiKey::Edit(EditKey::Backspace));
        assert_eq!(ui.picker().value(Channel::Red), 25);
    }

    #[test]
    fn typing_without_focus_does_nothing() {
        let mut ui = ui();
        assert_eq!(ui.text_input("4"), UiAction::None);
        assert_eq!(ui.edit_key(UiKey::Edit(EditKey::Backspace)), UiAction::None);
    }

    #[test]
    fn typing_into_hex_box() {
        let mut ui = ui();
        let (x, y) = center(HEX_BOX);
        ui.mouse_pressed(x, y);
        assert_eq!(ui.focus(), Some(Focus::Hex));
        // full box rejects more text
        assert_eq!(ui.text_input("0"), UiAction::None);
        for _ in 0..6 {
            ui.edit_key(UiKey::Edit(EditKey::Backspace));
        }
        assert_eq!(ui.picker().hex_edit().text(), "#");
        ui.text_input("ff8000");
        assert_eq!(ui.picker().color().rgb(), [255, 128, 0]);
        assert_eq!(ui.picker().hex_edit().text(), "#FF8000");
    }

    #[test]
    fn tab_cycles_focus() {
        let mut ui = ui();
        let expected = [
            Focus::Channel(Channel::Red),
            Focus::Channel(Channel::Green),
            Focus::Channel(Channel::Blue),
            Focus::Hex,
            Focus::Channel(Channel::Red),
        ];
        for focus in expected {
            ui.edit_key(UiKey::Tab);
            assert_eq!(ui.focus(), Some(focus));
        }
    }

    #[test]
    fn escape_and_enter_drop_focus() {
        let mut ui = ui();
        ui.edit_key(UiKey::Tab);
        assert_eq!(ui.edit_key(UiKey::Escape), UiAction::Redraw);
        assert_eq!(ui.focus(), None);
        assert_eq!(ui.edit_key(UiKey::Escape), UiAction::None);
        ui.edit_key(UiKey::Tab);
        ui.edit_key(UiKey::Enter);
        assert_eq!(ui.focus(), None);
    }

    #[test]
    fn switching_tab_drops_channel_focus() {
        let mut ui = ui();
        ui.edit_key(UiKey::Tab);
        ui.set_tab(ColorModel::Hsv);
        assert_eq!(ui.focus(), None);
    }

    #[test]
    fn set_color_from_outside() {
        let mut ui = ui();
        assert_eq!(ui.set_color(Color::from_rgb(1, 2, 3)), UiAction::Redraw);
        assert_eq!(ui.picker().hex_edit().text(), "#010203");
    }

    #[test]
    fn render_draws_controls() {
        let ui = Ui::new(PickerState::new(Color::from_rgb(200, 100, 50), false), ColorModel::Rgb);
        let mut buffer = vec![0; (WINDOW_WIDTH * WINDOW_HEIGHT) as usize];
        let mut canvas = Canvas::new(&mut buffer, WINDOW_WIDTH, WINDOW_HEIGHT);
        ui.render(&mut canvas);

        assert_eq!(canvas.pixel(0, 0), Some(BACKGROUND));
        let (x, y) = center(SWATCH);
        assert_eq!(canvas.pixel(x as i32, y as i32), Some(0xFFC86432));
        // bottom of the hue bar is red
        assert_eq!(canvas.pixel(HUE_BAR.x + 5, HUE_BAR.bottom() - 1), Some(0xFFFF0000));
        // bottom of the square is black
        assert_eq!(canvas.pixel(MAIN_GRADIENT.x + 100, MAIN_GRADIENT.bottom() - 1), Some(0xFF000000));
        // every pixel is opaque
        assert!(buffer.iter().all(|pixel| pixel >> 24 == 0xFF));
    }
}
