// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! The eyedropper's magnifying lens.
//!
//! Each frame a small square around the cursor is captured from whichever display the cursor is
//! on, blown up with nearest-neighbour scaling, and drawn in a circle next to the cursor on a
//! transparent overlay covering every monitor. The pixel under the cursor is the picked color.

use std::io;

use crate::private::canvas::Canvas;
use crate::private::color::Color;
use crate::private::platform::ScreenCapture;
use crate::private::util::image::{premultiply_alpha, Image};
use crate::private::util::rect::Rect;

pub const DEFAULT_SIZE: u32 = 221;
pub const DEFAULT_ZOOM: u32 = 5;

/// lens offset from the cursor when there is room below and to the right
const LENS_OFFSET: i32 = 20;
/// extra room required past the lens before it flips to the other side of the cursor
const FLIP_MARGIN: i32 = 40;
const SWATCH_WIDTH: u32 = 40;
const SWATCH_HEIGHT: u32 = 30;
const SWATCH_BORDER: u32 = 2;
const MARKER_SIZE: u32 = 6;
const RING_WIDTH: f64 = 4.0;

const WHITE: u32 = 0xFFFFFFFF;
/// Nearly invisible, but not fully transparent: some platforms let clicks through fully
/// transparent pixels, and the click that picks a color must not reach the window underneath.
const OVERLAY_BACKGROUND: u32 = 0x01000000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MagnifierConfig {
    /// diameter of the lens, in pixels
    pub size: u32,
    /// magnification factor
    pub zoom: u32,
}

impl Default for MagnifierConfig {
    fn default() -> Self {
        MagnifierConfig {
            size: DEFAULT_SIZE,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MagnifierConfig {
    /// side length of the captured square
    pub fn capture_size(&self) -> u32 {
        (self.size / self.zoom.max(1)).max(1)
    }
}

/// A captured square, and where the cursor sits inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureArea {
    /// in global desktop coordinates
    pub area: Rect,
    pub cursor_x: u32,
    pub cursor_y: u32,
}

/// A square of `capture_size` centered on the cursor, pushed back inside `display` when the cursor
/// is near an edge. Near an edge the cursor is no longer at the center of the capture.
pub fn capture_area(cursor: (i32, i32), display: Rect, capture_size: u32) -> CaptureArea {
    let side_x = capture_size.clamp(1, display.width.max(1));
    let side_y = capture_size.clamp(1, display.height.max(1));
    let x = (cursor.0 - (side_x / 2) as i32).clamp(display.x, (display.right() - side_x as i32).max(display.x));
    let y = (cursor.1 - (side_y / 2) as i32).clamp(display.y, (display.bottom() - side_y as i32).max(display.y));
    CaptureArea {
        area: Rect::new(x, y, side_x, side_y),
        cursor_x: (cursor.0 - x).clamp(0, side_x as i32 - 1) as u32,
        cursor_y: (cursor.1 - y).clamp(0, side_y as i32 - 1) as u32,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LensLayout {
    /// bounding square of the circular lens
    pub lens: Rect,
    /// the sampled color, over the lens's top right corner
    pub swatch: Rect,
}

/// Place the lens next to `cursor` (overlay coordinates). It goes below and to the right, flipping
/// to the left and above when it would run off the overlay.
pub fn lens_layout(cursor: (i32, i32), overlay_width: u32, overlay_height: u32, size: u32) -> LensLayout {
    let size_i = size as i32;
    let offset_x = if cursor.0 + size_i + FLIP_MARGIN < overlay_width as i32 {
        LENS_OFFSET
    } else {
        -size_i - FLIP_MARGIN
    };
    let offset_y = if cursor.1 + size_i + FLIP_MARGIN < overlay_height as i32 {
        LENS_OFFSET
    } else {
        -(size_i - LENS_OFFSET)
    };
    let lens = Rect::new(cursor.0 + offset_x, cursor.1 + offset_y, size, size);
    let swatch = Rect::new(lens.right() - SWATCH_WIDTH as i32 / 2, lens.y, SWATCH_WIDTH, SWATCH_HEIGHT);
    LensLayout { lens, swatch }
}

/// Upscale to `size` by `size` with nearest-neighbour sampling.
pub fn zoom_nearest(image: &Image, size: u32) -> Image {
    if image.width == 0 || image.height == 0 {
        return Image::filled(size, size, 0);
    }
    let size_usize = size as usize;
    let columns: Vec<usize> = (0..size_usize)
        .map(|x| x * image.width as usize / size_usize)
        .collect();
    let mut data = Vec::with_capacity(size_usize * size_usize);
    for y in 0..size_usize {
        let row_start = y * image.height as usize / size_usize * image.width as usize;
        data.extend(columns.iter().map(|column| image.data[row_start + column]));
    }
    Image {
        width: size,
        height: size,
        data,
    }
}

/// Index of the captured pixel at the middle of desktop pixel `cursor`, for a capture of `extent`
/// desktop pixels that came back `captured` pixels wide. The two differ on scaled displays.
fn scaled_index(cursor: u32, extent: u32, captured: u32) -> u32 {
    let index = (2 * cursor as u64 + 1) * captured as u64 / (2 * extent.max(1) as u64);
    (index as u32).min(captured.saturating_sub(1))
}

/// The square outlining the zoomed-up cursor pixel inside the lens. `area` gives the cursor in
/// desktop pixels, which is what the lens is divided into regardless of capture resolution.
fn marker_rect(lens: Rect, area: &CaptureArea) -> Rect {
    let center = |cursor: u32, extent: u32, lens_extent: u32| -> i32 {
        let start = cursor as u64 * lens_extent as u64 / extent.max(1) as u64;
        let end = (cursor as u64 + 1) * lens_extent as u64 / extent.max(1) as u64;
        ((start + end) / 2) as i32
    };
    let x = lens.x + center(area.cursor_x, area.area.width, lens.width);
    let y = lens.y + center(area.cursor_y, area.area.height, lens.height);
    let half = MARKER_SIZE as i32 / 2;
    Rect::new(x - half, y - half, MARKER_SIZE, MARKER_SIZE)
}

/// bounding box of all monitors, which the overlay covers
pub fn overlay_bounds<I>(monitors: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    Rect::bounding_box(monitors)
}

/// everything needed to draw one frame of the lens
struct Frame {
    layout: LensLayout,
    marker: Rect,
    zoomed: Image,
    color: Color,
}

pub struct Magnifier {
    config: MagnifierConfig,
    frame: Option<Frame>,
}

impl Magnifier {
    pub fn new(config: MagnifierConfig) -> Self {
        Magnifier { config, frame: None }
    }

    /// The color under the cursor as of the last successful update.
    pub fn color(&self) -> Option<Color> {
        self.frame.as_ref().map(|frame| frame.color)
    }

    /// forget the last frame, so a new pick doesn't flash the previous one
    pub fn clear(&mut self) {
        self.frame = None;
    }

    /// Capture around `cursor` (global coordinates) and lay the lens out on an overlay covering
    /// `overlay`. On error the previous frame is kept.
    pub fn update<C>(&mut self, capture: &C, cursor: (i32, i32), overlay: Rect) -> io::Result<()>
    where
        C: ScreenCapture,
    {
        let display = capture.display_at(cursor.0, cursor.1)?;
        let area = capture_area(cursor, display, self.config.capture_size());
        let captured = capture.capture(area.area)?;
        let pixel = captured
            .pixel(
                scaled_index(area.cursor_x, area.area.width, captured.width),
                scaled_index(area.cursor_y, area.area.height, captured.height),
            )
            .ok_or_else(|| io::Error::other(format!("capture of {:?} came back as {}x{}", area.area, captured.width, captured.height)))?;

        let cursor_local = (cursor.0 - overlay.x, cursor.1 - overlay.y);
        let layout = lens_layout(cursor_local, overlay.width, overlay.height, self.config.size);
        self.frame = Some(Frame {
            layout,
            marker: marker_rect(layout.lens, &area),
            zoomed: zoom_nearest(&captured, self.config.size),
            color: Color::from_argb(pixel),
        });
        Ok(())
    }

    /// Draw the overlay. The canvas covers the overlay window.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.fill(premultiply_alpha(OVERLAY_BACKGROUND));
        let Some(frame) = &self.frame else {
            return;
        };
        let lens = frame.layout.lens;
        let swatch = frame.layout.swatch;

        canvas.fill_rect(swatch, frame.color.to_argb());
        canvas.stroke_rect(swatch, SWATCH_BORDER, WHITE);

        let radius = lens.width as f64 / 2.0;
        let center_x = lens.x as f64 + radius;
        let center_y = lens.y as f64 + radius;
        let ring_reach = (RING_WIDTH / 2.0).ceil() as i32;
        for y in (lens.y - ring_reach)..(lens.bottom() + ring_reach) {
            for x in (lens.x - ring_reach)..(lens.right() + ring_reach) {
                let dx = x as f64 + 0.5 - center_x;
                let dy = y as f64 + 0.5 - center_y;
                let distance = (dx * dx + dy * dy).sqrt();
                // ring coverage, with a one pixel soft edge on either side
                let coverage = (RING_WIDTH / 2.0 + 0.5 - (distance - radius).abs()).clamp(0.0, 1.0);
                if coverage >= 1.0 {
                    canvas.set_pixel(x, y, WHITE);
                    continue;
                }
                if distance < radius {
                    let pixel = frame.zoomed.pixel((x - lens.x) as u32, (y - lens.y) as u32);
                    if let Some(pixel) = pixel {
                        canvas.set_pixel(x, y, pixel | 0xFF000000);
                    }
                }
                if coverage > 0.0 {
                    let alpha = (coverage * 255.0).round() as u32;
                    canvas.blend_pixel(x, y, (alpha << 24) | 0x00FFFFFF);
                }
            }
        }

        canvas.stroke_rect(frame.marker, 1, WHITE);
    }
}
