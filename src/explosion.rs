//! Explosion factory.

use crate::constants::EXPLOSION_FRAGMENT_COUNT;
use crate::fragment::Fragment;
use crate::random::RandomSource;
use bevy::math::Vec2;

/// Append one burst of [`EXPLOSION_FRAGMENT_COUNT`] fragments at `point`.
///
/// Fragments capture `hue` as their base colour.  Existing entries are left
/// untouched.  Returns the number of fragments added.
pub fn spawn_explosion<R: RandomSource + ?Sized>(
    fragments: &mut Vec<Fragment>,
    point: Vec2,
    hue: f32,
    rng: &mut R,
) -> usize {
    fragments.reserve(EXPLOSION_FRAGMENT_COUNT);
    for _ in 0..EXPLOSION_FRAGMENT_COUNT {
        fragments.push(Fragment::new(point, hue, rng));
    }
    EXPLOSION_FRAGMENT_COUNT
}
