// src/lib.rs

//! `blit565` — a software 2D compositing engine for fixed-format handheld
//! LCD panels.
//!
//! The engine operates on packed RGB565 pixel buffers with an optional
//! per-pixel binary opacity mask, and converts finished frames into the
//! exact byte layout a physical display controller expects.
//!
//! ```text
//! frame source        ┌────────────┐      ┌─────────────────┐
//! (external)  ──────▶ │ compositor │ ───▶ │ DeviceConverter │ ──▶ LcdDriver
//!                     │  clear     │      │  5/6/5 passthru │     (external
//! glyph/icon sheets ─▶│  blit      │      │  5/5/5, 4/4/4   │      hardware)
//! (assets module)     │  resize    │      │  N-bit gray     │
//!                     │  fade/tint │      └─────────────────┘
//!                     └────────────┘
//! ```
//!
//! The per-frame loop that produces source frames and owns event handling is
//! an external collaborator; it clears the screen via [`screen::FrameComposer`],
//! composites the frame and any UI overlays, and presents the result once per
//! frame through [`device::DeviceConverter`]. Everything here is synchronous
//! and single-threaded.

pub mod assets;
pub mod buffer;
pub mod clip;
pub mod color;
pub mod compositor;
pub mod config;
pub mod device;
pub mod screen;

pub use buffer::PixelBuffer;
pub use color::Rgb565;
