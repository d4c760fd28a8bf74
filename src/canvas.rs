//! Software raster canvas.
//!
//! [`PixelCanvas`] keeps a premultiplied-alpha RGBA buffer in sRGB space and
//! implements the three compositing modes the show needs with the same
//! arithmetic a browser 2D context uses:
//!
//! | Mode              | Colour                      | Alpha                 |
//! |-------------------|-----------------------------|-----------------------|
//! | `SourceOver`      | `src + dst·(1 − αs)`        | `αs + αd·(1 − αs)`    |
//! | `DestinationOut`  | `dst·(1 − αs)`              | `αd·(1 − αs)`         |
//! | `Lighter`         | `min(src + dst, 1)`         | `min(αs + αd, 1)`     |
//!
//! The buffer persists across frames; only the `DestinationOut` fade pass
//! removes old content, which is what produces the ghost trails.  Text is not
//! rasterised here: [`PixelCanvas::fill_text`] queues a [`TextRequest`] that the
//! presentation layer hands to Bevy's text renderer.

use crate::surface::{Bitmap, CompositeMode, DrawSurface, TextStyle};
use bevy::color::Srgba;
use bevy::math::Vec2;

/// A text draw queued for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub text: String,
    pub at: Vec2,
    pub style: TextStyle,
}

/// CPU-side drawing surface with persistent contents.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    /// Premultiplied RGBA, row-major, top row first.
    pixels: Vec<[f32; 4]>,
    mode: CompositeMode,
    text: Vec<TextRequest>,
}

impl PixelCanvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
            mode: CompositeMode::SourceOver,
            text: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha colour at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Srgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, a] = self.pixels[self.index(x, y)];
        if a <= 0.0 {
            return Some(Srgba::new(0.0, 0.0, 0.0, 0.0));
        }
        Some(Srgba::new(r / a, g / a, b / a, a))
    }

    /// Encode the canvas as straight-alpha sRGB RGBA8 into `out`.
    ///
    /// `out` must hold `width * height * 4` bytes; extra bytes are untouched
    /// and a short buffer is filled as far as it goes.
    pub fn write_rgba8(&self, out: &mut [u8]) {
        for (px, dst) in self.pixels.iter().zip(out.chunks_exact_mut(4)) {
            let [r, g, b, a] = *px;
            if a <= 0.0 {
                dst.copy_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            dst[0] = to_byte(r / a);
            dst[1] = to_byte(g / a);
            dst[2] = to_byte(b / a);
            dst[3] = to_byte(a);
        }
    }

    /// Drain the text draws queued since the last call.
    pub fn take_text(&mut self) -> Vec<TextRequest> {
        std::mem::take(&mut self.text)
    }

    /// Text draws queued and not yet taken.
    pub fn queued_text(&self) -> &[TextRequest] {
        &self.text
    }

    /// Drop queued text draws nobody took.
    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Composite one premultiplied source pixel at `(x, y)` with the current mode.
    fn blend(&mut self, x: i64, y: i64, src: [f32; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = self.index(x as u32, y as u32);
        let dst = &mut self.pixels[i];
        match self.mode {
            CompositeMode::SourceOver => {
                let keep = 1.0 - src[3];
                for c in 0..4 {
                    dst[c] = src[c] + dst[c] * keep;
                }
            }
            CompositeMode::DestinationOut => {
                let keep = 1.0 - src[3];
                for c in dst.iter_mut() {
                    *c *= keep;
                }
            }
            CompositeMode::Lighter => {
                for c in 0..4 {
                    dst[c] = (src[c] + dst[c]).min(1.0);
                }
            }
        }
    }

    /// Plot a 1 px segment with a DDA walk, clipped to the canvas first.
    fn plot_segment(&mut self, from: Vec2, to: Vec2, src: [f32; 4]) {
        let Some((a, b)) = clip_segment(from, to, self.bounds()) else {
            return;
        };
        let delta = b - a;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=steps {
            let p = a + delta * (i as f32 / steps as f32);
            let cell = (p.x.floor() as i64, p.y.floor() as i64);
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            self.blend(cell.0, cell.1, src);
        }
    }

    /// Canvas bounds as `(min, max)`, with `max` just inside the last pixel.
    fn bounds(&self) -> (Vec2, Vec2) {
        (
            Vec2::ZERO,
            Vec2::new(self.width as f32, self.height as f32) - Vec2::splat(1e-3),
        )
    }
}

impl DrawSurface for PixelCanvas {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn composite(&self) -> CompositeMode {
        self.mode
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Srgba) {
        if !(min.is_finite() && size.is_finite()) {
            return;
        }
        let max = min + size;
        let x0 = min.x.min(max.x).round().max(0.0) as i64;
        let y0 = min.y.min(max.y).round().max(0.0) as i64;
        let x1 = (min.x.max(max.x).round() as i64).min(self.width as i64);
        let y1 = (min.y.max(max.y).round() as i64).min(self.height as i64);
        let src = premultiply(color);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, src);
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Srgba) {
        self.plot_segment(from, to, premultiply(color));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Srgba) {
        if !center.is_finite() || !radius.is_finite() || radius < 0.0 {
            return;
        }
        let src = premultiply(color);
        let samples = ((std::f32::consts::TAU * radius).ceil() as usize).max(8);
        let mut last = None;
        let mut first = None;
        for i in 0..samples {
            let angle = std::f32::consts::TAU * i as f32 / samples as f32;
            let p = center + Vec2::new(angle.cos(), angle.sin()) * radius;
            let cell = (p.x.floor() as i64, p.y.floor() as i64);
            if last == Some(cell) || (i + 1 == samples && first == Some(cell)) {
                continue;
            }
            first.get_or_insert(cell);
            last = Some(cell);
            self.blend(cell.0, cell.1, src);
        }
    }

    fn draw_image(&mut self, image: &Bitmap, min: Vec2, size: Vec2) {
        if image.width == 0 || image.height == 0 || !(min.is_finite() && size.is_finite()) {
            return;
        }
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let x0 = min.x.round() as i64;
        let y0 = min.y.round() as i64;
        let w = size.x.round() as i64;
        let h = size.y.round() as i64;
        for dy in 0..h {
            let y = y0 + dy;
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            let sy = (dy * image.height as i64 / h) as u32;
            for dx in 0..w {
                let x = x0 + dx;
                if x < 0 || x >= self.width as i64 {
                    continue;
                }
                let sx = (dx * image.width as i64 / w) as u32;
                let [r, g, b, a] = image.pixel(sx, sy);
                if a == 0 {
                    continue;
                }
                let color = Srgba::rgba_u8(r, g, b, a);
                self.blend(x, y, premultiply(color));
            }
        }
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle) {
        self.text.push(TextRequest {
            text: text.to_owned(),
            at,
            style: style.clone(),
        });
    }
}

fn premultiply(color: Srgba) -> [f32; 4] {
    let a = color.alpha.clamp(0.0, 1.0);
    [
        color.red.clamp(0.0, 1.0) * a,
        color.green.clamp(0.0, 1.0) * a,
        color.blue.clamp(0.0, 1.0) * a,
        a,
    ]
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Liang–Barsky clip of the segment `a → b` against `(min, max)`.
///
/// Returns `None` when the segment is non-finite or lies entirely outside.
fn clip_segment(a: Vec2, b: Vec2, (min, max): (Vec2, Vec2)) -> Option<(Vec2, Vec2)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }
    let d = b - a;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    let edges = [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((a + d * t0, a + d * t1))
}
