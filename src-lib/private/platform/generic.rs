// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Platform-agnostic implementations, built on `device_query` for input and `screenshots` for
//! display capture.

use std::io;

use device_query::{DeviceQuery, DeviceState, Keycode as DeviceQueryKeycode};
use screenshots::Screen;

use crate::private::hotkey;
use crate::private::hotkey::{KeyBindings, Keycode};
use crate::private::platform::{KeyboardState, Pointer, PointerState, ScreenCapture};
use crate::private::util::image::Image;
use crate::private::util::rect::Rect;

/// index of the left button in `device_query`'s button list
const LEFT_BUTTON: usize = 1;

pub struct DeviceQueryKeyboardState {
    device_state: DeviceState,
    keys: Vec<Keycode>,
}

impl Default for DeviceQueryKeyboardState {
    fn default() -> Self {
        Self {
            device_state: DeviceState::new(),
            keys: Vec::new(),
        }
    }
}

impl KeyboardState for DeviceQueryKeyboardState {
    fn poll(&mut self) {
        self.keys.clear();
        self.keys.extend(self.device_state.get_keys().into_iter().filter_map(convert_keycode));
    }

    fn get_state(&self) -> &[Keycode] {
        &self.keys
    }
}

/// Keys that can't appear in a binding come back as `None`.
fn convert_keycode(value: DeviceQueryKeycode) -> Option<Keycode> {
    let keycode = match value {
        DeviceQueryKeycode::Key0 => Keycode::Key0,
        DeviceQueryKeycode::Key1 => Keycode::Key1,
        DeviceQueryKeycode::Key2 => Keycode::Key2,
        DeviceQueryKeycode::Key3 => Keycode::Key3,
        DeviceQueryKeycode::Key4 => Keycode::Key4,
        DeviceQueryKeycode::Key5 => Keycode::Key5,
        DeviceQueryKeycode::Key6 => Keycode::Key6,
        DeviceQueryKeycode::Key7 => Keycode::Key7,
        DeviceQueryKeycode::Key8 => Keycode::Key8,
        DeviceQueryKeycode::Key9 => Keycode::Key9,
        DeviceQueryKeycode::A => Keycode::A,
        DeviceQueryKeycode::B => Keycode::B,
        DeviceQueryKeycode::C => Keycode::C,
        DeviceQueryKeycode::D => Keycode::D,
        DeviceQueryKeycode::E => Keycode::E,
        DeviceQueryKeycode::F => Keycode::F,
        DeviceQueryKeycode::G => Keycode::G,
        DeviceQueryKeycode::H => Keycode::H,
        DeviceQueryKeycode::I => Keycode::I,
        DeviceQueryKeycode::J => Keycode::J,
        DeviceQueryKeycode::K => Keycode::K,
        DeviceQueryKeycode::L => Keycode::L,
        DeviceQueryKeycode::M => Keycode::M,
        DeviceQueryKeycode::N => Keycode::N,
        DeviceQueryKeycode::O => Keycode::O,
        DeviceQueryKeycode::P => Keycode::P,
        DeviceQueryKeycode::Q => Keycode::Q,
        DeviceQueryKeycode::R => Keycode::R,
        DeviceQueryKeycode::S => Keycode::S,
        DeviceQueryKeycode::T => Keycode::T,
        DeviceQueryKeycode::U => Keycode::U,
        DeviceQueryKeycode::V => Keycode::V,
        DeviceQueryKeycode::W => Keycode::W,
        DeviceQueryKeycode::X => Keycode::X,
        DeviceQueryKeycode::Y => Keycode::Y,
        DeviceQueryKeycode::Z => Keycode::Z,
        DeviceQueryKeycode::F1 => Keycode::F1,
        DeviceQueryKeycode::F2 => Keycode::F2,
        DeviceQueryKeycode::F3 => Keycode::F3,
        DeviceQueryKeycode::F4 => Keycode::F4,
        DeviceQueryKeycode::F5 => Keycode::F5,
        DeviceQueryKeycode::F6 => Keycode::F6,
        DeviceQueryKeycode::F7 => Keycode::F7,
        DeviceQueryKeycode::F8 => Keycode::F8,
        DeviceQueryKeycode::F9 => Keycode::F9,
        DeviceQueryKeycode::F10 => Keycode::F10,
        DeviceQueryKeycode::F11 => Keycode::F11,
        DeviceQueryKeycode::F12 => Keycode::F12,
        DeviceQueryKeycode::Escape => Keycode::Escape,
        DeviceQueryKeycode::Space => Keycode::Space,
        DeviceQueryKeycode::LControl => Keycode::LControl,
        DeviceQueryKeycode::RControl => Keycode::RControl,
        DeviceQueryKeycode::LShift => Keycode::LShift,
        DeviceQueryKeycode::RShift => Keycode::RShift,
        DeviceQueryKeycode::LAlt => Keycode::LAlt,
        DeviceQueryKeycode::RAlt => Keycode::RAlt,
        DeviceQueryKeycode::LMeta => Keycode::LMeta,
        DeviceQueryKeycode::RMeta => Keycode::RMeta,
        DeviceQueryKeycode::Enter => Keycode::Enter,
        DeviceQueryKeycode::Up => Keycode::Up,
        DeviceQueryKeycode::Down => Keycode::Down,
        DeviceQueryKeycode::Left => Keycode::Left,
        DeviceQueryKeycode::Right => Keycode::Right,
        _ => return None,
    };
    Some(keycode)
}

pub struct DeviceQueryPointer {
    device_state: DeviceState,
}

impl Default for DeviceQueryPointer {
    fn default() -> Self {
        Self {
            device_state: DeviceState::new(),
        }
    }
}

impl Pointer for DeviceQueryPointer {
    fn poll(&mut self) -> PointerState {
        let mouse = self.device_state.get_mouse();
        PointerState {
            x: mouse.coords.0,
            y: mouse.coords.1,
            left_down: mouse.button_pressed.get(LEFT_BUTTON).copied().unwrap_or(false),
        }
    }
}

/// Display capture through the `screenshots` crate.
#[derive(Default)]
pub struct ScreenshotsCapture;

fn display_bounds(screen: &Screen) -> Rect {
    let info = &screen.display_info;
    Rect::new(info.x, info.y, info.width, info.height)
}

fn screen_at(x: i32, y: i32) -> io::Result<Screen> {
    Screen::from_point(x, y)
        .map_err(|e| io::Error::other(format!("no display at ({x}, {y}): {e}")))
}

impl ScreenCapture for ScreenshotsCapture {
    fn display_at(&self, x: i32, y: i32) -> io::Result<Rect> {
        screen_at(x, y).map(|screen| display_bounds(&screen))
    }

    fn capture(&self, area: Rect) -> io::Result<Image> {
        let screen = screen_at(area.x, area.y)?;
        let display = display_bounds(&screen);
        // the crate wants coordinates relative to the display
        let local = area.offset(-display.x, -display.y);
        let image = screen.capture_area(local.x, local.y, local.width, local.height)
            .map_err(|e| io::Error::other(format!("failed to capture {area:?}: {e}")))?;
        Ok(Image::from_rgba_bytes(image.width(), image.height(), image.as_raw()))
    }
}

pub type HotkeyManager = hotkey::HotkeyManager<DeviceQueryKeyboardState>;

impl HotkeyManager {
    pub fn new(key_bindings: &KeyBindings) -> Result<HotkeyManager, &'static str> {
        HotkeyManager::new_generic(key_bindings)
    }
}

#[cfg(test)]
mod test_generic {
    use super::*;

    #[test]
    fn converts_binding_keys() {
        assert_eq!(convert_keycode(DeviceQueryKeycode::LControl), Some(Keycode::LControl));
        assert_eq!(convert_keycode(DeviceQueryKeycode::Key5), Some(Keycode::Key5));
    }

    #[test]
    fn drops_unbindable_keys() {
        assert_eq!(convert_keycode(DeviceQueryKeycode::NumpadEnter), None);
        assert_eq!(convert_keycode(DeviceQueryKeycode::CapsLock), None);
    }
}
