// src/assets.rs

//! Slices decoded glyph/icon sheets into owned, masked [`PixelBuffer`]s.
//!
//! The asset pipeline (external) decodes an embedded image into raw
//! 32-bit-per-pixel data with red in the low byte and alpha in the high
//! byte, plus per-glyph and per-icon geometric metrics. This module cuts
//! each glyph/icon sub-rectangle out of the sheet, converting the alpha
//! channel into the engine's binary opacity mask (any non-zero alpha byte
//! is opaque) and the 24-bit color into packed 5/6/5.

use crate::buffer::PixelBuffer;
use crate::color::Rgb565;
use bitflags::bitflags;

/// Glyph sheets are a fixed grid of 16x16 pixel cells.
pub const CELL_WIDTH: u32 = 16;
pub const CELL_HEIGHT: u32 = 16;
pub const SHEET_COLUMNS: u32 = 16;
pub const SHEET_ROWS: u32 = 8;

/// A decoded RGBA sheet borrowed from the asset pipeline. Pixels are
/// row-major `0xAABBGGRR` words.
#[derive(Debug, Clone, Copy)]
pub struct RgbaSheet<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u32],
}

/// Per-glyph geometry: the inked extent plus its padding offsets into the
/// fixed-size cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphMetrics {
    pub width: u32,
    pub height: u32,
    pub pad_left: u32,
    pub pad_top: u32,
}

/// Per-icon geometry: an absolute sub-rectangle of the icon sheet.
#[derive(Debug, Clone, Copy)]
pub struct IconMetrics {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

bitflags! {
    /// Placement alignment for icons: the origin is adjusted by half or all
    /// of the icon extent. Center flags are the union of both edge flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Align: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const HCENTER = Self::LEFT.bits() | Self::RIGHT.bits();
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
        const VCENTER = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

/// Moves a placement origin according to `align` and the buffer extent.
pub fn aligned_origin(x: i32, y: i32, width: u32, height: u32, align: Align) -> (i32, i32) {
    let x = if align.contains(Align::HCENTER) {
        x - width as i32 / 2
    } else if align.contains(Align::RIGHT) {
        x - width as i32
    } else {
        x
    };
    let y = if align.contains(Align::VCENTER) {
        y - height as i32 / 2
    } else if align.contains(Align::BOTTOM) {
        y - height as i32
    } else {
        y
    };
    (x, y)
}

/// Cuts glyph number `index` out of a glyph sheet. Returns `None` for
/// zero-extent metrics (uninked glyphs) or a rectangle that falls outside
/// the sheet.
pub fn slice_glyph(sheet: &RgbaSheet, index: u32, metrics: GlyphMetrics) -> Option<PixelBuffer> {
    if index >= SHEET_COLUMNS * SHEET_ROWS {
        return None;
    }
    let col = index % SHEET_COLUMNS;
    let row = index / SHEET_COLUMNS;
    slice_rect(
        sheet,
        col * CELL_WIDTH + metrics.pad_left,
        row * CELL_HEIGHT + metrics.pad_top,
        metrics.width,
        metrics.height,
    )
}

/// Cuts an icon's sub-rectangle out of an icon sheet.
pub fn slice_icon(sheet: &RgbaSheet, metrics: IconMetrics) -> Option<PixelBuffer> {
    slice_rect(sheet, metrics.x, metrics.y, metrics.width, metrics.height)
}

fn slice_rect(sheet: &RgbaSheet, x0: u32, y0: u32, width: u32, height: u32) -> Option<PixelBuffer> {
    if width == 0 || height == 0 {
        return None;
    }
    if x0 + width > sheet.width
        || y0 + height > sheet.height
        || sheet.pixels.len() < sheet.width as usize * sheet.height as usize
    {
        return None;
    }

    let len = width as usize * height as usize;
    let mut pixels = Vec::with_capacity(len);
    let mut mask = Vec::with_capacity(len);
    for y in y0..y0 + height {
        let base = y as usize * sheet.width as usize;
        for &rgba in &sheet.pixels[base + x0 as usize..base + (x0 + width) as usize] {
            pixels.push(Rgb565::from_rgb888(
                rgba as u8,
                (rgba >> 8) as u8,
                (rgba >> 16) as u8,
            ));
            mask.push((rgba >> 24) as u8);
        }
    }
    PixelBuffer::from_parts(width, height, pixels, mask).ok()
}
