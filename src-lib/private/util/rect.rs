// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

/// Axis-aligned rectangle in pixel coordinates. The origin may be negative, which happens for
/// monitors placed left of or above the primary monitor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }

    /// exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// exclusive bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink on every side. Saturates to an empty rectangle.
    pub fn inset(&self, amount: u32) -> Rect {
        Rect::new(
            self.x + amount as i32,
            self.y + amount as i32,
            self.width.saturating_sub(amount * 2),
            self.height.saturating_sub(amount * 2),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlapping region of two rectangles, or `None` if they don't overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Rect::new(x, y, (right - x) as u32, (bottom - y) as u32))
        } else {
            None
        }
    }

    /// Smallest rectangle containing every rectangle in `rects`, or `None` if there are none.
    pub fn bounding_box<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        rects.into_iter().fold(None, |acc, rect| {
            let Some(acc) = acc else {
                return Some(rect);
            };
            let x = acc.x.min(rect.x);
            let y = acc.y.min(rect.y);
            let right = acc.right().max(rect.right());
            let bottom = acc.bottom().max(rect.bottom());
            Some(Rect::new(x, y, (right - x) as u32, (bottom - y) as u32))
        })
    }
}
