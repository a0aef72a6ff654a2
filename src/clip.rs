// src/clip.rs

//! Placement clipping: computes the visible overlap between a source buffer
//! placed at a signed offset and a destination buffer.
//!
//! Every compositing operation routes its placement through [`resolve`]
//! rather than computing its own bounds. A placement that leaves the source
//! entirely outside the destination yields an empty rectangle, and every
//! consumer treats an empty rectangle as "draw nothing" — this is the
//! single most safety-critical contract in the engine (off-screen buffers
//! during scrolling UI, transitional source resolutions).

/// The visible sub-rectangle of a placement, in both coordinate spaces.
///
/// `src_x0..src_x1` and `src_y0..src_y1` are half-open ranges into the
/// source; `(dst_x, dst_y)` is where `(src_x0, src_y0)` lands in the
/// destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub src_x0: u32,
    pub src_y0: u32,
    pub src_x1: u32,
    pub src_y1: u32,
    pub dst_x: u32,
    pub dst_y: u32,
}

impl ClipRect {
    pub fn width(&self) -> u32 {
        self.src_x1 - self.src_x0
    }

    pub fn height(&self) -> u32 {
        self.src_y1 - self.src_y0
    }

    /// True when nothing is visible. Consumers must not index either
    /// buffer in that case.
    pub fn is_empty(&self) -> bool {
        self.src_x0 == self.src_x1 || self.src_y0 == self.src_y1
    }
}

/// Resolves the placement of a `fore_w x fore_h` source at signed offset
/// `(x, y)` in a `bg_w x bg_h` destination.
///
/// Clipping is two-sided: negative placement trims the source's left/top,
/// and the remaining destination extent past the clamped origin trims the
/// right/bottom. All arithmetic is widened to `i64` so extreme offsets
/// cannot overflow.
pub fn resolve(bg_w: u32, bg_h: u32, fore_w: u32, fore_h: u32, x: i32, y: i32) -> ClipRect {
    let (src_x0, dst_x, w) = resolve_axis(bg_w, fore_w, x);
    let (src_y0, dst_y, h) = resolve_axis(bg_h, fore_h, y);
    ClipRect {
        src_x0,
        src_y0,
        src_x1: src_x0 + w,
        src_y1: src_y0 + h,
        dst_x,
        dst_y,
    }
}

/// One axis of [`resolve`]: returns `(src_start, dst_start, visible_len)`.
fn resolve_axis(bg_len: u32, fore_len: u32, offset: i32) -> (u32, u32, u32) {
    let bg_len = bg_len as i64;
    let fore_len = fore_len as i64;
    let offset = offset as i64;

    // Start inside the source if the placement starts out of bounds.
    let src_start = (-offset).clamp(0, fore_len);
    let dst_start = offset.clamp(0, bg_len);
    // End inside the source if the placement ends out of bounds.
    let visible = (fore_len - src_start).min(bg_len - dst_start).max(0);
    (src_start as u32, dst_start as u32, visible as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vis(clip: ClipRect) -> (u32, u32) {
        (clip.width(), clip.height())
    }

    #[test]
    fn fully_inside_is_untrimmed() {
        let clip = resolve(8, 8, 4, 4, 2, 3);
        assert_eq!(clip.src_x0, 0);
        assert_eq!(clip.src_y0, 0);
        assert_eq!(vis(clip), (4, 4));
        assert_eq!((clip.dst_x, clip.dst_y), (2, 3));
    }

    #[test]
    fn negative_placement_trims_left_top() {
        let clip = resolve(8, 8, 4, 4, -2, -2);
        assert_eq!((clip.src_x0, clip.src_y0), (2, 2));
        assert_eq!((clip.dst_x, clip.dst_y), (0, 0));
        assert_eq!(vis(clip), (2, 2));
    }

    #[test]
    fn overhang_trims_right_bottom() {
        let clip = resolve(8, 8, 4, 4, 6, 7);
        assert_eq!((clip.src_x0, clip.src_y0), (0, 0));
        assert_eq!(vis(clip), (2, 1));
    }

    #[test]
    fn fully_outside_in_each_direction_is_empty() {
        // Exactly touching the boundary counts as outside.
        assert!(resolve(8, 8, 4, 4, 8, 0).is_empty()); // x == bg_w
        assert!(resolve(8, 8, 4, 4, 0, 8).is_empty()); // y == bg_h
        assert!(resolve(8, 8, 4, 4, -4, 0).is_empty()); // x + fore_w == 0
        assert!(resolve(8, 8, 4, 4, 0, -4).is_empty()); // y + fore_h == 0
        assert!(resolve(8, 8, 4, 4, 100, 0).is_empty());
        assert!(resolve(8, 8, 4, 4, 0, -100).is_empty());
    }

    #[test]
    fn extreme_offsets_do_not_overflow() {
        assert!(resolve(8, 8, 4, 4, i32::MAX, 0).is_empty());
        assert!(resolve(8, 8, 4, 4, 0, i32::MIN).is_empty());
    }

    #[test]
    fn source_larger_than_destination_is_trimmed_both_sides() {
        let clip = resolve(4, 4, 10, 10, -3, -3);
        assert_eq!((clip.src_x0, clip.src_y0), (3, 3));
        assert_eq!((clip.dst_x, clip.dst_y), (0, 0));
        // Capped by the destination extent, not just the source's remainder.
        assert_eq!(vis(clip), (4, 4));
    }

    #[test]
    fn empty_source_or_destination_is_empty() {
        assert!(resolve(8, 8, 0, 4, 1, 1).is_empty());
        assert!(resolve(0, 0, 4, 4, 0, 0).is_empty());
    }
}
