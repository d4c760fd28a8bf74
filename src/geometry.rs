//! Pure geometry helpers shared by the entity models.

use bevy::math::Vec2;
use rand::Rng;

/// Uniform float in `[min, max)`.
///
/// An empty or inverted range yields `min` instead of panicking, so degenerate
/// canvas sizes never abort a frame.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    let delta = p1 - p2;
    (delta.x * delta.x + delta.y * delta.y).sqrt()
}
