// src/device/mod.rs

//! Device colorspace conversion: turns a composited [`PixelBuffer`] into the
//! exact byte layout a physical display controller expects, and hands it to
//! the [`LcdDriver`].
//!
//! The engine composes in RGB565 regardless of the panel. Panels whose
//! channel layout already is 5/6/5 get the buffer's own pixel memory
//! (zero-copy); 5/5/5, 4/4/4 and N-bit grayscale panels are repacked into a
//! scratch buffer owned by the converter. Any other bit combination is
//! unsupported and fails loudly rather than producing garbage.

use crate::buffer::PixelBuffer;
use std::fmt;


/// Hardware-reported display type tags, one per known panel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    /// 4-bit grayscale, classic hardware.
    Gray4,
    /// 8-bit "paletted" grayscale mode.
    Gray8,
    /// RGB444.
    Rgb444,
    /// RGB565, CX models before HW-W.
    Rgb565,
    /// RGB565 on HW-W, portrait orientation.
    Rgb565Portrait,
    Rgb555,
    Rgb555Portrait,
}

/// A physical panel mode: fixed extents plus either color channel bit
/// counts or a single grayscale bit count (mutually exclusive; grayscale
/// formats have all color bit counts zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFormat {
    pub kind: ScreenKind,
    pub width: u32,
    pub height: u32,
    pub gray_bits: u8,
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
}

/// Every panel mode the engine can drive.
pub const FORMATS: [DeviceFormat; 7] = [
    DeviceFormat { kind: ScreenKind::Gray4, width: 320, height: 240, gray_bits: 4, red_bits: 0, green_bits: 0, blue_bits: 0 },
    DeviceFormat { kind: ScreenKind::Gray8, width: 320, height: 240, gray_bits: 8, red_bits: 0, green_bits: 0, blue_bits: 0 },
    DeviceFormat { kind: ScreenKind::Rgb444, width: 320, height: 240, gray_bits: 0, red_bits: 4, green_bits: 4, blue_bits: 4 },
    DeviceFormat { kind: ScreenKind::Rgb565, width: 320, height: 240, gray_bits: 0, red_bits: 5, green_bits: 6, blue_bits: 5 },
    DeviceFormat { kind: ScreenKind::Rgb565Portrait, width: 240, height: 320, gray_bits: 0, red_bits: 5, green_bits: 6, blue_bits: 5 },
    DeviceFormat { kind: ScreenKind::Rgb555, width: 240, height: 320, gray_bits: 0, red_bits: 5, green_bits: 5, blue_bits: 5 },
    DeviceFormat { kind: ScreenKind::Rgb555Portrait, width: 240, height: 320, gray_bits: 0, red_bits: 5, green_bits: 5, blue_bits: 5 },
];

/// Looks up the panel mode for a hardware-reported display type. `None`
/// means the tag is unrecognized and the device cannot be driven.
pub fn lookup(kind: ScreenKind) -> Option<DeviceFormat> {
    FORMATS.iter().find(|f| f.kind == kind).copied()
}

impl DeviceFormat {
    /// Whether this format matches the engine's canonical in-memory layout,
    /// enabling the zero-copy passthrough.
    pub fn is_canonical(&self) -> bool {
        self.gray_bits == 0 && (self.red_bits, self.green_bits, self.blue_bits) == (5, 6, 5)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Conversion failures. `UnsupportedFormat` means the device cannot be
/// driven at all (fatal at startup); `DimensionMismatch` is a precondition
/// violation in the calling loop. The two must stay distinguishable in any
/// user-facing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    UnsupportedFormat {
        red_bits: u8,
        green_bits: u8,
        blue_bits: u8,
        gray_bits: u8,
    },
    DimensionMismatch {
        format: (u32, u32),
        buffer: (u32, u32),
    },
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::UnsupportedFormat {
                red_bits,
                green_bits,
                blue_bits,
                gray_bits,
            } => write!(
                f,
                "unsupported device color format (r{}/g{}/b{}, gray {})",
                red_bits, green_bits, blue_bits, gray_bits
            ),
            DeviceError::DimensionMismatch { format, buffer } => write!(
                f,
                "buffer extents {}x{} do not match device format {}x{}",
                buffer.0, buffer.1, format.0, format.1
            ),
        }
    }
}

impl std::error::Error for DeviceError {}

/// The display hardware seam: receives one frame of device-encoded bytes.
///
/// Implementations are external collaborators (memory-mapped LCD
/// controllers, test doubles, file sinks). The byte stream is row-major,
/// one 16-bit little-endian word per pixel for color formats and one byte
/// per pixel for grayscale formats.
pub trait LcdDriver {
    fn blit(&mut self, format: &DeviceFormat, bytes: &[u8]) -> anyhow::Result<()>;
}

/// Owns the target format and the repacking scratch buffer, sized once and
/// reused across frames.
pub struct DeviceConverter {
    format: DeviceFormat,
    scratch: Vec<u8>,
}

impl DeviceConverter {
    pub fn new(format: DeviceFormat) -> Self {
        // Worst case is one 16-bit word per pixel.
        let scratch = Vec::with_capacity(format.pixel_count() * 2);
        DeviceConverter { format, scratch }
    }

    pub fn format(&self) -> &DeviceFormat {
        &self.format
    }

    /// Encodes `buf` into the panel's native layout. Returns the buffer's
    /// own bytes on the canonical 5/6/5 path, otherwise a view into the
    /// converter's scratch storage.
    pub fn convert<'a>(&'a mut self, buf: &'a PixelBuffer) -> Result<&'a [u8], DeviceError> {
        if (buf.width(), buf.height()) != (self.format.width, self.format.height) {
            return Err(DeviceError::DimensionMismatch {
                format: (self.format.width, self.format.height),
                buffer: (buf.width(), buf.height()),
            });
        }
        if self.format.is_canonical() {
            return Ok(buf.as_bytes());
        }

        let f = &self.format;
        self.scratch.clear();
        match (f.red_bits, f.green_bits, f.blue_bits) {
            (5, 5, 5) => {
                // Green donates the dropped bit; red/blue survive untouched.
                for px in buf.pixels() {
                    let word = px.r() | (px.g() >> 1) << 5 | px.b() << 10;
                    self.scratch.extend_from_slice(&word.to_le_bytes());
                }
            }
            (4, 4, 4) => {
                for px in buf.pixels() {
                    let word = (px.r() >> 1) | (px.g() & 0xF) << 4 | (px.b() & 0xF) << 8;
                    self.scratch.extend_from_slice(&word.to_le_bytes());
                }
            }
            (0, 0, 0) if f.gray_bits > 0 => {
                let gray_bits = f.gray_bits;
                for px in buf.pixels() {
                    self.scratch.push(luma(px.r(), px.g(), px.b(), gray_bits));
                }
            }
            _ => {
                return Err(DeviceError::UnsupportedFormat {
                    red_bits: f.red_bits,
                    green_bits: f.green_bits,
                    blue_bits: f.blue_bits,
                    gray_bits: f.gray_bits,
                });
            }
        }
        Ok(&self.scratch)
    }

    /// Converts and hands the encoded frame to the display driver.
    pub fn present(&mut self, buf: &PixelBuffer, driver: &mut dyn LcdDriver) -> anyhow::Result<()> {
        let format = self.format;
        let bytes = self.convert(buf)?;
        driver.blit(&format, bytes)
    }
}

/// Weighted luma on the 6-bit channel scale, rescaled to `gray_bits`.
/// The 5-bit fields are pre-shifted left so all three weigh in at 6 bits.
fn luma(r: u16, g: u16, b: u16, gray_bits: u8) -> u8 {
    let luma6 = ((r << 1) + g + (b << 1)) / 5;
    let out = if gray_bits < 6 {
        luma6 >> (6 - gray_bits)
    } else {
        luma6 << (gray_bits - 6)
    };
    out as u8
}
