// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Fixed layout of the main window, in physical pixels.

use crate::private::channel::{Channel, ColorModel};
use crate::private::util::rect::Rect;

pub const WINDOW_WIDTH: u32 = 417;
pub const WINDOW_HEIGHT: u32 = 578;

pub const MAIN_GRADIENT: Rect = Rect::new(11, 11, 350, 350);
pub const HUE_BAR: Rect = Rect::new(376, 12, 30, 348);

const TAB_X: i32 = 11;
const TAB_Y: i32 = 376;
const TAB_WIDTH: u32 = 50;
const TAB_HEIGHT: u32 = 24;
/// the line under the tab headers
pub const TAB_PANE_TOP: i32 = TAB_Y + TAB_HEIGHT as i32;

const ROW_Y: [i32; 3] = [420, 450, 480];
const ROW_HEIGHT: u32 = 20;
const LABEL_X: i32 = 11;
const SLIDER_X: i32 = 29;
const SLIDER_WIDTH: u32 = 306;
const TEXT_BOX_X: i32 = 345;
const TEXT_BOX_WIDTH: u32 = 61;

pub const SWATCH: Rect = Rect::new(11, 533, 105, 30);
pub const PICK_BUTTON: Rect = Rect::new(126, 533, 30, 30);
pub const RAW_CHECK_BOX: Rect = Rect::new(246, 538, 60, 20);
pub const HEX_BOX: Rect = Rect::new(314, 538, 92, 20);

/// how much of the window, in each direction, must land on a monitor to reuse a saved position
const MIN_VISIBLE: u32 = 64;

/// Anything in the window that reacts to the mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    MainGradient,
    HueBar,
    Tab(ColorModel),
    Slider(Channel),
    TextBox(Channel),
    PickButton,
    RawCheckBox,
    HexBox,
}

pub fn tab_rect(model: ColorModel) -> Rect {
    let index = match model {
        ColorModel::Rgb => 0,
        ColorModel::Hsv => 1,
    };
    Rect::new(TAB_X + index * TAB_WIDTH as i32, TAB_Y, TAB_WIDTH, TAB_HEIGHT)
}

/// where the channel's letter is drawn
pub fn label_rect(channel: Channel) -> Rect {
    Rect::new(LABEL_X, ROW_Y[channel.index()], SLIDER_X as u32 - LABEL_X as u32, ROW_HEIGHT)
}

pub fn slider_rect(channel: Channel) -> Rect {
    Rect::new(SLIDER_X, ROW_Y[channel.index()], SLIDER_WIDTH, ROW_HEIGHT)
}

pub fn text_box_rect(channel: Channel) -> Rect {
    Rect::new(TEXT_BOX_X, ROW_Y[channel.index()], TEXT_BOX_WIDTH, ROW_HEIGHT)
}

/// Element under a point, considering only the rows of the active `tab`.
pub fn hit(x: i32, y: i32, tab: ColorModel) -> Option<Element> {
    if MAIN_GRADIENT.contains(x, y) {
        return Some(Element::MainGradient);
    }
    if HUE_BAR.contains(x, y) {
        return Some(Element::HueBar);
    }
    if let Some(model) = ColorModel::ALL.into_iter().find(|model| tab_rect(*model).contains(x, y)) {
        return Some(Element::Tab(model));
    }
    for channel in tab.channels() {
        if slider_rect(channel).contains(x, y) {
            return Some(Element::Slider(channel));
        }
        if text_box_rect(channel).contains(x, y) {
            return Some(Element::TextBox(channel));
        }
    }
    if PICK_BUTTON.contains(x, y) {
        Some(Element::PickButton)
    } else if RAW_CHECK_BOX.contains(x, y) {
        Some(Element::RawCheckBox)
    } else if HEX_BOX.contains(x, y) {
        Some(Element::HexBox)
    } else {
        None
    }
}

/// The saved top left corner of the window, if the window would still be reachable there. Monitors
/// get unplugged and rearranged, and a window restored off-screen can't be dragged back.
pub fn restore_position<I>(saved: Option<(i32, i32)>, monitors: I) -> Option<(i32, i32)>
where
    I: IntoIterator<Item = Rect>,
{
    let (x, y) = saved?;
    let window = Rect::new(x, y, WINDOW_WIDTH, WINDOW_HEIGHT);
    monitors.into_iter()
        .filter_map(|monitor| window.intersection(&monitor))
        .any(|visible| visible.width >= MIN_VISIBLE && visible.height >= MIN_VISIBLE)
        .then_some((x, y))
}

#[cfg(test)]
mod test_layout {
    use super::*;

    #[test]
    fn everything_fits_in_window() {
        let window = Rect::new(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT);
        let mut rects = vec![MAIN_GRADIENT, HUE_BAR, SWATCH, PICK_BUTTON, RAW_CHECK_BOX, HEX_BOX];
        rects.extend(ColorModel::ALL.map(tab_rect));
        for channel in Channel::ALL {
            rects.extend([label_rect(channel), slider_rect(channel), text_box_rect(channel)]);
        }
        for rect in rects {
            assert_eq!(rect.intersection(&window), Some(rect), "{rect:?} leaves the window");
        }
    }

    #[test]
    fn interactive_elements_do_not_overlap() {
        let mut rects = vec![MAIN_GRADIENT, HUE_BAR, PICK_BUTTON, RAW_CHECK_BOX, HEX_BOX, SWATCH];
        rects.extend(ColorModel::ALL.map(tab_rect));
        for channel in ColorModel::Rgb.channels() {
            rects.extend([slider_rect(channel), text_box_rect(channel)]);
        }
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert_eq!(a.intersection(b), None, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn hits() {
        assert_eq!(hit(11, 11, ColorModel::Rgb), Some(Element::MainGradient));
        assert_eq!(hit(380, 100, ColorModel::Rgb), Some(Element::HueBar));
        assert_eq!(hit(70, 380, ColorModel::Rgb), Some(Element::Tab(ColorModel::Hsv)));
        assert_eq!(hit(100, 455, ColorModel::Rgb), Some(Element::Slider(Channel::Green)));
        assert_eq!(hit(100, 455, ColorModel::Hsv), Some(Element::Slider(Channel::Saturation)));
        assert_eq!(hit(350, 485, ColorModel::Hsv), Some(Element::TextBox(Channel::Value)));
        assert_eq!(hit(130, 540, ColorModel::Rgb), Some(Element::PickButton));
        assert_eq!(hit(250, 540, ColorModel::Rgb), Some(Element::RawCheckBox));
        assert_eq!(hit(400, 540, ColorModel::Rgb), Some(Element::HexBox));
    }

    #[test]
    fn gaps_hit_nothing() {
        assert_eq!(hit(0, 0, ColorModel::Rgb), None);
        assert_eq!(hit(368, 100, ColorModel::Rgb), None);
        assert_eq!(hit(20, 540, ColorModel::Rgb), None);
    }
}
