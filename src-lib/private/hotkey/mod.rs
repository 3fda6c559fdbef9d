// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

use serde::{Deserialize, Serialize};

pub use hotkey_manager::HotkeyManager;
pub use hotkey_manager::KeyBindings;

mod hotkey_manager;

/// Keys that can be used in key bindings. Named the way they're written in the config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keycode {
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Escape,
    Space,
    LControl,
    RControl,
    LShift,
    RShift,
    LAlt,
    RAlt,
    LMeta,
    RMeta,
    Enter,
    Up,
    Down,
    Left,
    Right,
}

impl Keycode {
    /// MUST be the number of distinct values returned by `index()`
    pub const NUM_VARIANTS: usize = 63;

    /// Convert a keycode into an index for a lookup table
    #[inline(always)]
    pub fn index(&self) -> usize {
        *self as usize
    }
}
