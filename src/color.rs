//! HSL stroke colours.
//!
//! Entities describe their colour the way a CSS colour string would
//! (`hsl(hue, 100%, lightness%)`), with lightness given in percent.  Like a CSS
//! parser, out-of-range lightness and alpha are clamped rather than rejected,
//! and hue wraps around the colour wheel.

use bevy::color::{Color, Srgba};

/// `hsl(hue, 100%, lightness%)` as an opaque sRGB colour.
pub fn hsl(hue: f32, lightness_percent: f32) -> Srgba {
    hsla(hue, lightness_percent, 1.0)
}

/// `hsla(hue, 100%, lightness%, alpha)` as an sRGB colour.
pub fn hsla(hue: f32, lightness_percent: f32, alpha: f32) -> Srgba {
    let hue = if hue.is_finite() {
        hue.rem_euclid(360.0)
    } else {
        0.0
    };
    let lightness = clamp_unit(lightness_percent / 100.0);
    Color::hsla(hue, 1.0, lightness, clamp_unit(alpha)).to_srgba()
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
