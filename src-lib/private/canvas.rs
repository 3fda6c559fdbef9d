// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Drawing onto a borrowed ARGB frame buffer. Every operation clips to the frame, so callers may
//! pass rectangles that hang off the edges.

use crate::private::util::image::{blend_argb, Image};
use crate::private::util::numeric::DivCeil;
use crate::private::util::rect::Rect;

pub struct Canvas<'a> {
    buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    pub fn new(buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        debug_assert_eq!(buffer.len(), width as usize * height as usize, "Canvas::new() passed buffer of wrong size");
        Canvas { buffer, width, height }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).and_then(|index| self.buffer.get(index).copied())
    }

    pub fn fill(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// overwrite a single pixel, alpha included
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(pixel) = self.index(x, y).and_then(|index| self.buffer.get_mut(index)) {
            *pixel = color;
        }
    }

    /// composite a single pixel source-over
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(pixel) = self.index(x, y).and_then(|index| self.buffer.get_mut(index)) {
            *pixel = blend_argb(color, *pixel);
        }
    }

    /// Overwrite a rectangle, alpha included.
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        let width = self.width as usize;
        for y in clipped.y..clipped.bottom() {
            let start = y as usize * width + clipped.x as usize;
            self.buffer[start..start + clipped.width as usize].fill(color);
        }
    }

    /// Composite a rectangle source-over.
    pub fn blend_rect(&mut self, rect: Rect, color: u32) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        let width = self.width as usize;
        for y in clipped.y..clipped.bottom() {
            let start = y as usize * width + clipped.x as usize;
            for pixel in &mut self.buffer[start..start + clipped.width as usize] {
                *pixel = blend_argb(color, *pixel);
            }
        }
    }

    /// Draw an outline `thickness` pixels wide along the inside of `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, thickness: u32, color: u32) {
        let thickness = thickness.min(rect.width.div_ceil_placeholder(2)).min(rect.height.div_ceil_placeholder(2));
        if thickness == 0 {
            return;
        }
        let side_height = rect.height.saturating_sub(thickness * 2);
        self.blend_rect(Rect::new(rect.x, rect.y, rect.width, thickness), color);
        self.blend_rect(Rect::new(rect.x, rect.bottom() - thickness as i32, rect.width, thickness), color);
        self.blend_rect(Rect::new(rect.x, rect.y + thickness as i32, thickness, side_height), color);
        self.blend_rect(Rect::new(rect.right() - thickness as i32, rect.y + thickness as i32, thickness, side_height), color);
    }

    /// Composite an image with its top left corner at `(x, y)`.
    pub fn blit(&mut self, x: i32, y: i32, image: &Image) {
        let target = Rect::new(x, y, image.width, image.height);
        let Some(clipped) = target.intersection(&self.bounds()) else {
            return;
        };
        let canvas_width = self.width as usize;
        let image_width = image.width as usize;
        for row in clipped.y..clipped.bottom() {
            let source_row = (row - y) as usize;
            let source_start = source_row * image_width + (clipped.x - x) as usize;
            let target_start = row as usize * canvas_width + clipped.x as usize;
            let source = &image.data[source_start..source_start + clipped.width as usize];
            let target = &mut self.buffer[target_start..target_start + clipped.width as usize];
            for (target, source) in target.iter_mut().zip(source) {
                *target = blend_argb(*source, *target);
            }
        }
    }
}
