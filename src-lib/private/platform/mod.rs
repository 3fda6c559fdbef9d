// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Platform-specific implementations

use std::io;

pub use generic::HotkeyManager;

use crate::private::hotkey::Keycode;
use crate::private::util::image::Image;
use crate::private::util::rect::Rect;

pub mod generic; // pub so benchmarking can access

pub trait KeyboardState: Default {
    /// update internal keyboard state from keyboard
    fn poll(&mut self);

    /// keys held as of the last poll, limited to the ones hotkeys can use
    fn get_state(&self) -> &[Keycode];
}

/// global cursor position, in desktop coordinates, and whether the left button is down
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub left_down: bool,
}

pub trait Pointer {
    fn poll(&mut self) -> PointerState;
}

/// Reads pixels off the desktop.
pub trait ScreenCapture {
    /// bounds of the display containing a point, in desktop coordinates
    fn display_at(&self, x: i32, y: i32) -> io::Result<Rect>;

    /// Capture `area`, given in desktop coordinates. The area must lie within a single display.
    fn capture(&self, area: Rect) -> io::Result<Image>;
}
