//! Explosion sparks.

use crate::color::hsla;
use crate::constants::*;
use crate::random::RandomSource;
use crate::surface::DrawSurface;
use crate::trail::Trail;
use bevy::math::Vec2;

/// Result of one [`Fragment::advance`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentStatus {
    Burning,
    /// Alpha has fallen to the decay rate; the caller drops the fragment.
    Expired,
}

/// One spark of an explosion: slows under friction, falls under gravity, fades.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    position: Vec2,
    trail: Trail<FRAGMENT_TRAIL_LEN>,
    angle: f32,
    speed: f32,
    hue: f32,
    brightness: f32,
    alpha: f32,
    decay: f32,
}

impl Fragment {
    /// Spawn a spark at `position`, tinted around the colour phase `hue`.
    pub fn new<R: RandomSource + ?Sized>(position: Vec2, hue: f32, rng: &mut R) -> Self {
        Self {
            position,
            trail: Trail::filled(position),
            angle: rng.uniform(0.0, std::f32::consts::TAU),
            speed: rng.uniform(FRAGMENT_SPEED_MIN, FRAGMENT_SPEED_MAX),
            hue: rng.uniform(hue - FRAGMENT_HUE_SPREAD, hue + FRAGMENT_HUE_SPREAD),
            brightness: rng.uniform(FRAGMENT_BRIGHTNESS_MIN, FRAGMENT_BRIGHTNESS_MAX),
            alpha: 1.0,
            decay: rng.uniform(FRAGMENT_DECAY_MIN, FRAGMENT_DECAY_MAX),
        }
    }

    /// Step one frame.
    ///
    /// Expiry fires while alpha is still slightly positive (`alpha <= decay`),
    /// one step before it would cross zero.
    pub fn advance(&mut self) -> FragmentStatus {
        self.trail.push(self.position);

        self.speed *= FRAGMENT_FRICTION;
        self.position += Vec2::new(
            self.angle.cos() * self.speed,
            self.angle.sin() * self.speed + FRAGMENT_GRAVITY,
        );
        self.alpha -= self.decay;

        if self.alpha <= self.decay {
            FragmentStatus::Expired
        } else {
            FragmentStatus::Burning
        }
    }

    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.stroke_line(
            self.trail.oldest(),
            self.position,
            hsla(self.hue, self.brightness, self.alpha),
        );
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn trail(&self) -> &Trail<FRAGMENT_TRAIL_LEN> {
        &self.trail
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }
}
