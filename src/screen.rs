// src/screen.rs

//! Screen-mode placement and the per-frame composition helper.
//!
//! The owning loop (external) produces a source frame once per frame and
//! selects a [`ScreenMode`]; [`FrameComposer`] owns the screen buffer and
//! turns the source into a placed, optionally faded frame. Buffer lifetimes
//! are tied to the composer rather than to process-wide globals, so the
//! compositing core stays reusable and testable without a platform loop.

use crate::buffer::PixelBuffer;
use crate::color::Rgb565;
use crate::compositor;
use crate::device::DeviceFormat;
use log::info;
use serde::{Deserialize, Serialize};

/// How the source frame is placed onto the screen buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenMode {
    /// Centered, 1:1.
    #[default]
    PixelAccurate,
    /// Centered, scaled to the largest size preserving aspect ratio.
    AspectFit,
    /// Fills the entire screen buffer.
    Stretch,
}

/// Precomputed aspect-fit target extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitSize {
    pub width: u32,
    pub height: u32,
}

/// The largest extents preserving `src`'s aspect ratio inside the screen:
/// `floor(min(screen_w/src_w, screen_h/src_h) * src)` per axis.
pub fn fit_size(screen_w: u32, screen_h: u32, src_w: u32, src_h: u32) -> FitSize {
    if src_w == 0 || src_h == 0 {
        return FitSize::default();
    }
    let ratio = (screen_w as f32 / src_w as f32).min(screen_h as f32 / src_h as f32);
    FitSize {
        width: (ratio * src_w as f32) as u32,
        height: (ratio * src_h as f32) as u32,
    }
}

/// Owns the screen buffer and the fade scratch buffer, sized once per
/// format/source-resolution change and reused across frames.
pub struct FrameComposer {
    screen: PixelBuffer,
    /// Fade copy of the source frame; fading must not touch the live
    /// source the emulation core writes into.
    scratch: PixelBuffer,
    fit: FitSize,
    src_w: u32,
    src_h: u32,
    mode: ScreenMode,
    background: Rgb565,
}

impl FrameComposer {
    pub fn new(format: &DeviceFormat, mode: ScreenMode, background: Rgb565) -> Self {
        FrameComposer {
            screen: PixelBuffer::new(format.width, format.height),
            scratch: PixelBuffer::new(0, 0),
            fit: FitSize::default(),
            src_w: 0,
            src_h: 0,
            mode,
            background,
        }
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ScreenMode) {
        self.mode = mode;
    }

    pub fn fit(&self) -> FitSize {
        self.fit
    }

    pub fn screen(&self) -> &PixelBuffer {
        &self.screen
    }

    /// Mutable access for UI overlays (glyphs, icons) drawn between
    /// [`Self::compose`] and presentation.
    pub fn screen_mut(&mut self) -> &mut PixelBuffer {
        &mut self.screen
    }

    /// Recomputes placement for a new source resolution. Call once per
    /// source-resolution change, including the initial one.
    pub fn source_resized(&mut self, width: u32, height: u32) {
        if (width, height) == (self.src_w, self.src_h) {
            return;
        }
        info!(
            "source resolution change: {}x{} -> {}x{}",
            self.src_w, self.src_h, width, height
        );
        self.src_w = width;
        self.src_h = height;
        self.fit = fit_size(self.screen.width(), self.screen.height(), width, height);
        self.scratch = PixelBuffer::new(width, height);
    }

    /// Clears the screen buffer to the configured background fill.
    pub fn begin_frame(&mut self) {
        compositor::clear(&mut self.screen, self.background);
    }

    /// Draws the source frame onto the screen per the current mode. With
    /// `faded` set the frame is first copied into the scratch buffer and
    /// darkened there (menu-behind-game dimming).
    pub fn compose(&mut self, source: &PixelBuffer, faded: bool) {
        debug_assert_eq!((source.width(), source.height()), (self.src_w, self.src_h));
        if faded {
            self.scratch.copy_pixels_from(source);
            compositor::fade(&mut self.scratch);
        }
        let frame = if faded { &self.scratch } else { source };

        let screen_w = self.screen.width() as i32;
        let screen_h = self.screen.height() as i32;
        match self.mode {
            ScreenMode::PixelAccurate => compositor::blit_on(
                &mut self.screen,
                frame,
                screen_w / 2 - frame.width() as i32 / 2,
                screen_h / 2 - frame.height() as i32 / 2,
            ),
            ScreenMode::AspectFit => compositor::blit_on_resized(
                &mut self.screen,
                frame,
                screen_w / 2 - self.fit.width as i32 / 2,
                screen_h / 2 - self.fit.height as i32 / 2,
                self.fit.width,
                self.fit.height,
            ),
            ScreenMode::Stretch => compositor::blit_on_resized(
                &mut self.screen,
                frame,
                0,
                0,
                screen_w as u32,
                screen_h as u32,
            ),
        }
    }
}
