// src/main.rs

//! Demo driver for the compositing engine: composes a synthetic frame
//! through every pipeline stage and writes the device-encoded bytes to a
//! file, standing in for the memory-mapped LCD controller.

use anyhow::Context;
use log::info;
use std::path::{Path, PathBuf};

use blit565::config::Config;
use blit565::device::{lookup, DeviceConverter, DeviceFormat, LcdDriver, ScreenKind};
use blit565::screen::FrameComposer;
use blit565::{PixelBuffer, Rgb565};

/// An `LcdDriver` that writes each presented frame to a file.
struct FileLcd {
    path: PathBuf,
}

impl LcdDriver for FileLcd {
    fn blit(&mut self, format: &DeviceFormat, bytes: &[u8]) -> anyhow::Result<()> {
        std::fs::write(&self.path, bytes)
            .with_context(|| format!("writing frame to {}", self.path.display()))?;
        info!(
            "presented {}x{} frame ({} bytes) to {}",
            format.width,
            format.height,
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// A 240x160 horizontal-gradient test card.
fn test_card() -> PixelBuffer {
    let (width, height) = (240u32, 160u32);
    let mut frame = PixelBuffer::new(width, height);
    for y in 0..height {
        let row = frame.row_mut(y);
        for (x, px) in row.iter_mut().enumerate() {
            let r = (x as u32 * 31 / (width - 1)) as u8;
            let g = (y * 63 / (height - 1)) as u8;
            *px = Rgb565::new(r, g, 31 - r);
        }
    }
    frame
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };
    info!("screen mode: {:?}", config.video.mode);

    // The real application queries the hardware for its display type; the
    // demo drives the landscape 5/6/5 panel.
    let format = lookup(ScreenKind::Rgb565).context("no 5/6/5 panel entry in format table")?;

    let mut composer =
        FrameComposer::new(&format, config.video.mode, config.video.background_color());
    let frame = test_card();
    composer.source_resized(frame.width(), frame.height());

    composer.begin_frame();
    composer.compose(&frame, false);

    let mut converter = DeviceConverter::new(format);
    let mut lcd = FileLcd {
        path: PathBuf::from("frame.bin"),
    };
    converter.present(composer.screen(), &mut lcd)?;
    Ok(())
}
