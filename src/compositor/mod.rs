// src/compositor/mod.rs

//! The compositing operations: clear, direct copy, nearest-neighbor resized
//! copy, brightness fade, and the two alpha blends.
//!
//! None of these allocate, and all placement goes through [`crate::clip`]
//! first; an empty clip rectangle makes every operation a successful no-op.
//! The masked and unmasked copy paths are separate strategies rather than a
//! branch inside the pixel loop: the unmasked path's correctness depends on
//! row contiguity (it degenerates to one contiguous copy per row) that the
//! masked path does not have.

use crate::buffer::{PixelBuffer, MASK_OPAQUE};
use crate::clip::{self, ClipRect};
use crate::color::Rgb565;
use log::warn;


/// Sets every pixel to `fill` and, if a mask is present, resets every mask
/// entry to opaque. Clearing the full screen buffer runs once per frame, so
/// this must stay a constant fill (`slice::fill` on the pixel storage).
pub fn clear(buf: &mut PixelBuffer, fill: Rgb565) {
    buf.pixels_mut().fill(fill);
    if let Some(mask) = buf.mask_mut() {
        mask.fill(MASK_OPAQUE);
    }
}

/// Copies `fore`'s visible rectangle onto `bg` at `(x, y)`.
///
/// With a mask, pixels whose mask byte is zero are skipped and `bg` keeps
/// its prior pixel. Without a mask every visible row is one bulk copy.
pub fn blit_on(bg: &mut PixelBuffer, fore: &PixelBuffer, x: i32, y: i32) {
    let clip = clip::resolve(bg.width(), bg.height(), fore.width(), fore.height(), x, y);
    if clip.is_empty() {
        return;
    }
    match fore.mask() {
        Some(mask) => blit_masked(bg, fore, mask, &clip),
        None => blit_rows(bg, fore, &clip),
    }
}

/// Unmasked strategy: one contiguous row copy per visible row.
fn blit_rows(bg: &mut PixelBuffer, fore: &PixelBuffer, clip: &ClipRect) {
    let dst_x = clip.dst_x as usize;
    let width = clip.width() as usize;
    for (row, src_y) in (clip.src_y0..clip.src_y1).enumerate() {
        let src = &fore.row(src_y)[clip.src_x0 as usize..clip.src_x1 as usize];
        let dst_y = clip.dst_y + row as u32;
        bg.row_mut(dst_y)[dst_x..dst_x + width].copy_from_slice(src);
    }
}

/// Masked strategy: per-pixel copy, skipping transparent entries.
fn blit_masked(bg: &mut PixelBuffer, fore: &PixelBuffer, mask: &[u8], clip: &ClipRect) {
    let sx0 = clip.src_x0 as usize;
    let sx1 = clip.src_x1 as usize;
    let dst_x = clip.dst_x as usize;
    for (row, src_y) in (clip.src_y0..clip.src_y1).enumerate() {
        let base = src_y as usize * fore.width() as usize;
        let src = &fore.pixels()[base + sx0..base + sx1];
        let mrow = &mask[base + sx0..base + sx1];
        let dst_y = clip.dst_y + row as u32;
        let dst = &mut bg.row_mut(dst_y)[dst_x..dst_x + src.len()];
        for ((d, &s), &m) in dst.iter_mut().zip(src).zip(mrow) {
            if m != 0 {
                *d = s;
            }
        }
    }
}

/// Nearest-neighbor scales `fore`'s visible rectangle into a
/// `dest_width x dest_height` region anchored at the resolved destination
/// origin.
///
/// Sampling uses 16.16 fixed-point ratios of visible extent over target
/// extent; a zero target extent is a no-op. The destination walk is clamped
/// to `bg`'s extent, so a scaled region larger than the remaining screen
/// never writes out of bounds.
pub fn blit_on_resized(
    bg: &mut PixelBuffer,
    fore: &PixelBuffer,
    x: i32,
    y: i32,
    dest_width: u32,
    dest_height: u32,
) {
    if dest_width == 0 || dest_height == 0 {
        warn!(
            "resized blit with degenerate target {}x{}; skipped",
            dest_width, dest_height
        );
        return;
    }
    let clip = clip::resolve(bg.width(), bg.height(), fore.width(), fore.height(), x, y);
    if clip.is_empty() {
        return;
    }

    let x_ratio = ((clip.width() as u64) << 16) / dest_width as u64;
    let y_ratio = ((clip.height() as u64) << 16) / dest_height as u64;
    let out_w = dest_width.min(bg.width() - clip.dst_x);
    let out_h = dest_height.min(bg.height() - clip.dst_y);
    let mask = fore.mask();

    for dy in 0..out_h {
        let src_y = clip.src_y0 + ((dy as u64 * y_ratio) >> 16) as u32;
        let base = src_y as usize * fore.width() as usize;
        let dst = bg.row_mut(clip.dst_y + dy);
        for dx in 0..out_w {
            let src_x = clip.src_x0 + ((dx as u64 * x_ratio) >> 16) as u32;
            let idx = base + src_x as usize;
            if let Some(m) = mask {
                if m[idx] == 0 {
                    continue;
                }
            }
            dst[(clip.dst_x + dx) as usize] = fore.pixels()[idx];
        }
    }
}

/// Darkens every pixel by roughly half, in place, no clipping involved.
pub fn fade(buf: &mut PixelBuffer) {
    for px in buf.pixels_mut() {
        *px = px.faded();
    }
}

/// Per visible pixel: tint the source 30% toward `tint`, then blend the
/// tinted color into `bg` by `alpha / 255`.
pub fn blit_on_tinted(
    bg: &mut PixelBuffer,
    fore: &PixelBuffer,
    x: i32,
    y: i32,
    tint: Rgb565,
    alpha: u8,
) {
    blend_clipped(bg, fore, x, y, |src, dst| {
        src.tint_toward(tint).blend_into(dst, alpha)
    });
}

/// Per visible pixel: blend the raw source color into `bg` by `alpha / 255`.
pub fn blit_on_transparent(bg: &mut PixelBuffer, fore: &PixelBuffer, x: i32, y: i32, alpha: u8) {
    blend_clipped(bg, fore, x, y, |src, dst| src.blend_into(dst, alpha));
}

/// Shared clipped blend walk for the tinted and transparent blits.
fn blend_clipped(
    bg: &mut PixelBuffer,
    fore: &PixelBuffer,
    x: i32,
    y: i32,
    op: impl Fn(Rgb565, Rgb565) -> Rgb565,
) {
    let clip = clip::resolve(bg.width(), bg.height(), fore.width(), fore.height(), x, y);
    if clip.is_empty() {
        return;
    }
    let sx0 = clip.src_x0 as usize;
    let sx1 = clip.src_x1 as usize;
    let dst_x = clip.dst_x as usize;
    let mask = fore.mask();
    for (row, src_y) in (clip.src_y0..clip.src_y1).enumerate() {
        let base = src_y as usize * fore.width() as usize;
        let src = &fore.pixels()[base + sx0..base + sx1];
        let mrow = mask.map(|m| &m[base + sx0..base + sx1]);
        let dst_y = clip.dst_y + row as u32;
        let dst = &mut bg.row_mut(dst_y)[dst_x..dst_x + src.len()];
        for (i, (d, &s)) in dst.iter_mut().zip(src).enumerate() {
            if let Some(m) = mrow {
                if m[i] == 0 {
                    continue;
                }
            }
            *d = op(s, *d);
        }
    }
}
