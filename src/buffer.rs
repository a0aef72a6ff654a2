// src/buffer.rs

//! Defines [`PixelBuffer`], the engine's pixel data model: a rectangular
//! row-major grid of packed [`Rgb565`] colors plus an optional parallel
//! opacity mask.
//!
//! Masks are binary, not alpha-graded: a non-zero byte means "opaque, draw
//! this pixel", zero means "transparent, skip it". Graded transparency is
//! expressed through the `alpha` parameter of the blending operations in
//! [`crate::compositor`], never stored per pixel.
//!
//! All compositing access goes through the row accessors here after the
//! placement has been resolved by [`crate::clip`]; the inner loops then
//! operate on plain slices with no per-pixel bounds checks.

use crate::color::Rgb565;
use std::fmt;

/// Mask byte written by operations that reset a mask to fully opaque.
/// Any non-zero byte is treated as opaque on the read side.
pub const MASK_OPAQUE: u8 = 0xFF;

/// Construction-time validation failures. These indicate a bug in the
/// calling code, not a runtime condition to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Pixel data length does not equal `width * height`.
    PixelLengthMismatch { expected: usize, actual: usize },
    /// Mask length does not equal the pixel data length.
    MaskLengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::PixelLengthMismatch { expected, actual } => {
                write!(f, "pixel length {} does not match extents ({} expected)", actual, expected)
            }
            BufferError::MaskLengthMismatch { expected, actual } => {
                write!(f, "mask length {} does not match pixel length {}", actual, expected)
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// A rectangular grid of packed colors with an optional opacity mask.
///
/// `0x0` is a valid empty buffer. If a mask is present its length equals
/// the pixel data's length; both invariants are established at construction
/// and hold for the lifetime of the buffer.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
    mask: Option<Vec<u8>>,
}

impl PixelBuffer {
    /// Creates a fully opaque (maskless) buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        PixelBuffer {
            width,
            height,
            pixels: vec![Rgb565::BLACK; len],
            mask: None,
        }
    }

    /// Creates a masked buffer filled with black, every mask entry opaque.
    pub fn new_masked(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        PixelBuffer {
            width,
            height,
            pixels: vec![Rgb565::BLACK; len],
            mask: Some(vec![MASK_OPAQUE; len]),
        }
    }

    /// Wraps existing pixel data as a maskless buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb565>) -> Result<Self, BufferError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BufferError::PixelLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            pixels,
            mask: None,
        })
    }

    /// Wraps existing pixel data and a parallel opacity mask.
    pub fn from_parts(
        width: u32,
        height: u32,
        pixels: Vec<Rgb565>,
        mask: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let buf = Self::from_pixels(width, height, pixels)?;
        if mask.len() != buf.pixels.len() {
            return Err(BufferError::MaskLengthMismatch {
                expected: buf.pixels.len(),
                actual: mask.len(),
            });
        }
        Ok(PixelBuffer {
            mask: Some(mask),
            ..buf
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether this buffer carries an opacity mask. A maskless buffer is
    /// fully opaque everywhere.
    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb565] {
        &mut self.pixels
    }

    pub fn mask(&self) -> Option<&[u8]> {
        self.mask.as_deref()
    }

    pub fn mask_mut(&mut self) -> Option<&mut [u8]> {
        self.mask.as_deref_mut()
    }

    /// One pixel row as a slice. `y` must be within bounds; callers
    /// establish this through clip resolution.
    pub fn row(&self, y: u32) -> &[Rgb565] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// One pixel row as a mutable slice.
    pub fn row_mut(&mut self, y: u32) -> &mut [Rgb565] {
        let start = y as usize * self.width as usize;
        let width = self.width as usize;
        &mut self.pixels[start..start + width]
    }

    /// Single-pixel read, for tests and glyph metrics probing.
    pub fn get(&self, x: u32, y: u32) -> Rgb565 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Single-pixel write.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb565) {
        self.pixels[y as usize * self.width as usize + x as usize] = color;
    }

    /// Copies another buffer's pixel contents into this one. Extents must
    /// match; masks are not copied.
    pub fn copy_pixels_from(&mut self, src: &PixelBuffer) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        self.pixels.copy_from_slice(&src.pixels);
    }

    /// The pixel storage as raw bytes in native byte order, for handing to
    /// a display controller whose format matches the canonical 5/6/5 layout.
    ///
    /// # Safety
    /// The returned slice aliases the pixel storage; `Rgb565` is
    /// `repr(transparent)` over `u16`, so the reinterpretation is layout-safe.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.pixels.as_ptr() as *const u8,
                self.pixels.len() * std::mem::size_of::<Rgb565>(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_valid() {
        let buf = PixelBuffer::new(0, 0);
        assert_eq!(buf.pixels().len(), 0);
        assert_eq!(buf.as_bytes().len(), 0);
    }

    #[test]
    fn from_pixels_validates_length() {
        let err = PixelBuffer::from_pixels(3, 2, vec![Rgb565::BLACK; 5]).unwrap_err();
        assert_eq!(
            err,
            BufferError::PixelLengthMismatch {
                expected: 6,
                actual: 5
            }
        );
        assert!(PixelBuffer::from_pixels(3, 2, vec![Rgb565::BLACK; 6]).is_ok());
    }

    #[test]
    fn from_parts_validates_mask_length() {
        let err =
            PixelBuffer::from_parts(2, 2, vec![Rgb565::BLACK; 4], vec![0u8; 3]).unwrap_err();
        assert_eq!(
            err,
            BufferError::MaskLengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn rows_are_contiguous_and_row_major() {
        let mut buf = PixelBuffer::new(3, 2);
        buf.set(2, 1, Rgb565::WHITE);
        assert_eq!(buf.row(1)[2], Rgb565::WHITE);
        assert_eq!(buf.row(0), &[Rgb565::BLACK; 3]);
    }

    #[test]
    fn as_bytes_matches_pixel_memory() {
        let buf = PixelBuffer::from_pixels(2, 1, vec![Rgb565(0x1234), Rgb565(0xABCD)]).unwrap();
        let bytes = buf.as_bytes();
        assert_eq!(bytes.len(), 4);
        assert_eq!(&bytes[0..2], &0x1234u16.to_ne_bytes());
        assert_eq!(&bytes[2..4], &0xABCDu16.to_ne_bytes());
    }
}
