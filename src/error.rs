//! Show-specific error types.
//!
//! Nothing in the per-frame loop can fail; these errors come from the edges:
//! reading configuration and converting loaded image assets.  Callers log them
//! and fall back to defaults (or to drawing no image) instead of aborting.

use std::fmt;
use std::io;

/// Top-level error enum for the fireworks show.
#[derive(Debug)]
pub enum ShowError {
    /// The configuration file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::ShowConfig`].
    ConfigParse {
        /// Path of the offending file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A canvas dimension is zero.
    InvalidCanvasSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The loaded image is not stored as 8-bit RGBA and cannot be blitted.
    UnsupportedImage {
        /// Debug name of the texture format.
        format: String,
    },

    /// The image asset has no CPU-side pixel data.
    ImageDataMissing,
}

impl fmt::Display for ShowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            ShowError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            ShowError::InvalidCanvasSize { width, height } => write!(
                f,
                "canvas size {}x{} is invalid: both dimensions must be non-zero",
                width, height
            ),
            ShowError::UnsupportedImage { format } => {
                write!(f, "image format {} is not 8-bit RGBA", format)
            }
            ShowError::ImageDataMissing => write!(f, "image has no CPU-side pixel data"),
        }
    }
}

impl std::error::Error for ShowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShowError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `ShowError` as the error type.
pub type ShowResult<T> = Result<T, ShowError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if either canvas dimension is zero.
pub fn validate_canvas_size(width: u32, height: u32) -> ShowResult<()> {
    if width == 0 || height == 0 {
        Err(ShowError::InvalidCanvasSize { width, height })
    } else {
        Ok(())
    }
}
