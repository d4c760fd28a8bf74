//! Runtime show configuration loaded from `assets/fireworks.toml`.
//!
//! [`ShowConfig`] only covers presentation: window size, overlay text, asset
//! paths and the random seed.  Physics stays in [`crate::constants`].  Missing
//! keys fall back to the compile-time defaults, so a minimal TOML can override
//! just the values you care about:
//!
//! ```toml
//! canvas_width = 1600
//! overlay_text = "Happy Birthday"
//! seed = 7
//! ```
//!
//! The file is read in `main` before the app is built because the window
//! resolution comes from it.

use crate::constants::*;
use crate::error::{validate_canvas_size, ShowError, ShowResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

/// Presentation settings for the show.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    // ── Window / canvas ──────────────────────────────────────────────────────
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub title: String,

    // ── Overlay ──────────────────────────────────────────────────────────────
    pub overlay_text: String,
    pub overlay_font_size: f32,
    /// Font asset for the overlay; Bevy's built-in font when unset.
    pub font_path: Option<String>,
    /// Face used when the overlay asks for bold; `font_path` when unset.
    pub bold_font_path: Option<String>,

    // ── Assets ───────────────────────────────────────────────────────────────
    /// Target image, relative to `assets/`.
    pub image_path: String,

    // ── Randomness ───────────────────────────────────────────────────────────
    /// Fixed seed for reproducible shows; OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            title: WINDOW_TITLE.to_owned(),
            overlay_text: OVERLAY_TEXT.to_owned(),
            overlay_font_size: OVERLAY_FONT_SIZE,
            font_path: None,
            bold_font_path: None,
            image_path: IMAGE_PATH.to_owned(),
            seed: None,
        }
    }
}

impl ShowConfig {
    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width as f32, self.canvas_height as f32)
    }

    /// Check values the show cannot run with.
    pub fn validate(&self) -> ShowResult<()> {
        validate_canvas_size(self.canvas_width, self.canvas_height)
    }

    /// Parse a TOML document; `origin` names the source in error messages.
    pub fn from_toml_str(contents: &str, origin: &str) -> ShowResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| ShowError::ConfigParse {
            path: origin.to_owned(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate the config at `path`.
    ///
    /// A missing file yields `Ok(None)`; every other failure is an error.
    pub fn read(path: impl AsRef<Path>) -> ShowResult<Option<Self>> {
        let path = path.as_ref();
        let display = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents, &display).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ShowError::ConfigRead {
                path: display,
                source,
            }),
        }
    }

    /// Load `path`, falling back to compiled defaults on any problem.
    ///
    /// Runs before Bevy's log plugin exists, so outcomes go to stdout/stderr.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(Some(config)) => {
                println!("✓ Loaded show config from {}", path.display());
                config
            }
            Ok(None) => {
                println!("ℹ No {} found; using compiled defaults", path.display());
                Self::default()
            }
            Err(e) => {
                eprintln!("⚠ {e}; using defaults");
                Self::default()
            }
        }
    }
}
