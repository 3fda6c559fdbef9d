// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Internal API. Public only so benches can reach it.

pub mod canvas;
pub mod channel;
pub mod color;
pub mod eyedropper;
pub mod font;
pub mod gradient;
pub mod hotkey;
pub mod layout;
pub mod line_edit;
pub mod magnifier;
pub mod picker;
pub mod platform;
pub mod settings;
pub mod ui;
pub mod util;
