// src/config.rs

//! Engine configuration structures.
//!
//! Deserialized from a JSON configuration file by the owning application;
//! every field has a sensible default so a missing or partial file still
//! produces a usable configuration.

use crate::color::Rgb565;
use crate::screen::ScreenMode;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Video and composition settings.
    pub video: VideoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// How the source frame is placed onto the screen.
    pub mode: ScreenMode,
    /// Background fill behind letterboxed frames, as 8-bit RGB.
    pub background: (u8, u8, u8),
    /// Whether the owning loop should pace frames (external concern,
    /// carried here so it persists with the rest of the video settings).
    pub frame_limiter: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            mode: ScreenMode::default(),
            background: (0, 0, 0),
            frame_limiter: true,
        }
    }
}

impl VideoConfig {
    /// The background fill in the engine's packed format.
    pub fn background_color(&self) -> Rgb565 {
        let (r, g, b) = self.background;
        Rgb565::from_rgb888(r, g, b)
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.video.mode, ScreenMode::PixelAccurate);
        assert_eq!(config.video.background_color(), Rgb565::BLACK);
        assert!(config.video.frame_limiter);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"video": {"mode": "aspect_fit"}}"#).unwrap();
        assert_eq!(config.video.mode, ScreenMode::AspectFit);
        assert!(config.video.frame_limiter);

        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.video.mode, ScreenMode::PixelAccurate);
    }

    #[test]
    fn background_converts_to_packed() {
        let config: Config = serde_json::from_str(
            r#"{"video": {"background": [255, 0, 255]}}"#,
        )
        .unwrap();
        assert_eq!(config.video.background_color(), Rgb565::new(31, 0, 31));
    }
}
