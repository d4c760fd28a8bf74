//! The 2D drawing interface the show renders through.
//!
//! The simulation never talks to Bevy's renderer directly.  It issues canvas
//! style calls (`fill_rect`, `stroke_line`, ...) against a [`DrawSurface`] under
//! a global [`CompositeMode`], exactly like a 2D canvas context.
//! [`crate::canvas::PixelCanvas`] is the production surface; tests can record
//! calls with their own implementation.

use bevy::color::Srgba;
use bevy::math::Vec2;

/// How newly drawn pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Normal painting: the source covers the destination by its alpha.
    #[default]
    SourceOver,
    /// Erase by alpha: the destination keeps `1 - source_alpha` of itself and
    /// the source colour is ignored.
    DestinationOut,
    /// Additive: overlapping strokes brighten instead of occluding.
    Lighter,
}

/// Horizontal placement of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Font and placement for [`DrawSurface::fill_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
    pub color: Srgba,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// A decoded, ready-to-draw image: straight-alpha sRGB RGBA8 rows, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Bitmap {
    /// Wrap raw RGBA8 data.  Returns `None` if the buffer does not match the size.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        (rgba.len() == width as usize * height as usize * 4).then_some(Self {
            width,
            height,
            rgba,
        })
    }

    /// Straight-alpha sRGB colour at `(x, y)`; transparent outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }
}

/// A 2D drawing surface with a global compositing mode.
///
/// Coordinates are canvas pixels: origin top-left, y growing downward.
pub trait DrawSurface {
    /// Surface size in pixels.
    fn size(&self) -> Vec2;

    /// Current compositing mode.
    fn composite(&self) -> CompositeMode;

    /// Set the compositing mode used by every following draw call.
    fn set_composite(&mut self, mode: CompositeMode);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Srgba);

    /// Stroke a 1 px line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Srgba);

    /// Stroke a 1 px circle outline.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Srgba);

    /// Draw `image` scaled into the rectangle at `min` with `size`.
    fn draw_image(&mut self, image: &Bitmap, min: Vec2, size: Vec2);

    /// Draw a single line of text anchored at `at`.
    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle);
}
