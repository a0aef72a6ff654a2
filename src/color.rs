// src/color.rs

//! Defines the packed [`Rgb565`] color type and the channel arithmetic used
//! by the blending operations.
//!
//! RGB565 is the engine's canonical in-memory format regardless of the
//! eventual device format: red occupies bits 11-15, green bits 5-10, blue
//! bits 0-4. All blending works on the three fields independently; blending
//! the packed integer as a whole would corrupt field boundaries.

use serde::{Deserialize, Serialize};

/// A packed 16-bit color: 5 bits red, 6 bits green, 5 bits blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Rgb565(pub u16);

/// Mask applied after a 1-bit right shift of a packed pixel. Clears the bit
/// that would otherwise leak red's LSB into green's field and green's LSB
/// into blue's field.
const FADE_MASK: u16 = 0x7BEF;

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);

    /// Packs raw field values. `r` and `b` are 5-bit, `g` is 6-bit; excess
    /// high bits are discarded.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb565((((r & 0x1F) as u16) << 11) | (((g & 0x3F) as u16) << 5) | ((b & 0x1F) as u16))
    }

    /// Converts 8-bit-per-channel color by keeping the top 5/6/5 bits of
    /// each channel.
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Rgb565((((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16))
    }

    /// The 5-bit red field.
    pub const fn r(self) -> u16 {
        (self.0 >> 11) & 0x1F
    }

    /// The 6-bit green field.
    pub const fn g(self) -> u16 {
        (self.0 >> 5) & 0x3F
    }

    /// The 5-bit blue field.
    pub const fn b(self) -> u16 {
        self.0 & 0x1F
    }

    /// Halves the brightness of all three channels in one shift-and-mask.
    pub const fn faded(self) -> Self {
        Rgb565((self.0 >> 1) & FADE_MASK)
    }

    /// Moves each channel 30% of the way toward the corresponding channel
    /// of `tint`, truncating fractional results.
    pub fn tint_toward(self, tint: Rgb565) -> Self {
        Rgb565::new(
            tint_channel(self.r() as i32, tint.r() as i32) as u8,
            tint_channel(self.g() as i32, tint.g() as i32) as u8,
            tint_channel(self.b() as i32, tint.b() as i32) as u8,
        )
    }

    /// Blends `self` into `bg` by `alpha / 255` per channel. `alpha == 0`
    /// returns `bg` unchanged, `alpha == 255` returns `self` exactly.
    pub fn blend_into(self, bg: Rgb565, alpha: u8) -> Self {
        let a = alpha as i32;
        Rgb565::new(
            blend_channel(bg.r() as i32, self.r() as i32, a) as u8,
            blend_channel(bg.g() as i32, self.g() as i32, a) as u8,
            blend_channel(bg.b() as i32, self.b() as i32, a) as u8,
        )
    }
}

/// 30% move from `c` toward `t`. Signed division truncates toward zero.
fn tint_channel(c: i32, t: i32) -> i32 {
    c + (t - c) * 3 / 10
}

/// `alpha/255` move from `bg` toward `fg`, truncating.
fn blend_channel(bg: i32, fg: i32, alpha: i32) -> i32 {
    bg + (fg - bg) * alpha / 255
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_roundtrip() {
        let c = Rgb565::new(31, 63, 31);
        assert_eq!(c, Rgb565::WHITE);
        assert_eq!((c.r(), c.g(), c.b()), (31, 63, 31));

        let c = Rgb565::new(17, 42, 9);
        assert_eq!((c.r(), c.g(), c.b()), (17, 42, 9));
    }

    #[test]
    fn max_red_occupies_top_bits() {
        assert_eq!(Rgb565::new(31, 0, 0).0, 0b11111_000000_00000);
    }

    #[test]
    fn rgb888_keeps_top_bits() {
        assert_eq!(Rgb565::from_rgb888(255, 255, 255), Rgb565::WHITE);
        assert_eq!(Rgb565::from_rgb888(0x07, 0x03, 0x07), Rgb565::BLACK);
        let c = Rgb565::from_rgb888(0x88, 0x44, 0x22);
        assert_eq!((c.r(), c.g(), c.b()), (0x88 >> 3, 0x44 >> 2, 0x22 >> 3));
    }

    #[test]
    fn faded_never_increases_channels() {
        for raw in [0x0000u16, 0xFFFF, 0x1234, 0xF81F, 0x07E0] {
            let c = Rgb565(raw);
            let f = c.faded();
            assert!(f.r() <= c.r());
            assert!(f.g() <= c.g());
            assert!(f.b() <= c.b());
            // Halving again keeps shrinking, never grows back.
            let ff = f.faded();
            assert!(ff.r() <= f.r() && ff.g() <= f.g() && ff.b() <= f.b());
        }
    }

    #[test]
    fn tint_moves_thirty_percent() {
        let c = Rgb565::new(0, 0, 0).tint_toward(Rgb565::new(10, 20, 31));
        // (t - c) * 3 / 10, truncated.
        assert_eq!((c.r(), c.g(), c.b()), (3, 6, 9));
        // Moving toward a darker tint truncates toward zero as well.
        let c = Rgb565::new(10, 20, 31).tint_toward(Rgb565::BLACK);
        assert_eq!((c.r(), c.g(), c.b()), (7, 14, 22));
    }

    #[test]
    fn blend_endpoints_are_exact() {
        let fg = Rgb565::new(21, 5, 30);
        let bg = Rgb565::new(2, 60, 1);
        assert_eq!(fg.blend_into(bg, 0), bg);
        assert_eq!(fg.blend_into(bg, 255), fg);
    }

    #[test]
    fn blend_truncates() {
        let fg = Rgb565::new(1, 1, 1);
        let bg = Rgb565::BLACK;
        // 1 * 127 / 255 truncates to zero.
        assert_eq!(fg.blend_into(bg, 127), Rgb565::BLACK);
        assert_eq!(fg.blend_into(bg, 128), Rgb565::BLACK);
        assert_eq!(fg.blend_into(bg, 255), fg);
    }
}
