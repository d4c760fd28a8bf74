//! Launched firework shells.
//!
//! A [`Projectile`] flies along a fixed ray from its launch point toward its
//! target, accelerating every frame.  Arrival is decided by lookahead: the
//! candidate next position is measured against the launch point, and if that
//! would reach or overshoot the target the projectile reports
//! [`ProjectileStatus::Arrived`] without moving.  The caller then removes it and
//! detonates an explosion at [`Projectile::target`].

use crate::color::hsl;
use crate::constants::*;
use crate::geometry::distance;
use crate::random::RandomSource;
use crate::surface::{Bitmap, CompositeMode, DrawSurface};
use crate::trail::Trail;
use bevy::math::Vec2;

/// Result of one [`Projectile::advance`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStatus {
    /// Still travelling; the position was updated.
    InFlight,
    /// The next step would reach the target; the projectile did not move.
    Arrived,
}

/// A firework shell in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Vec2,
    origin: Vec2,
    target: Vec2,
    /// Launch-to-target distance, fixed at creation.
    total_distance: f32,
    /// Launch-to-lookahead distance from the most recent advance.
    traveled_distance: f32,
    trail: Trail<PROJECTILE_TRAIL_LEN>,
    /// Heading (rad), fixed at creation.
    angle: f32,
    speed: f32,
    /// Lightness percent fed straight into `hsl()`; see [`PROJECTILE_BRIGHTNESS_MIN`].
    brightness: f32,
    marker_radius: f32,
    /// Nominal seconds since launch, frozen once past [`IMAGE_DISPLAY_SECS`].
    image_elapsed: f32,
}

impl Projectile {
    /// Launch a projectile from `origin` toward `target`.
    pub fn new<R: RandomSource + ?Sized>(origin: Vec2, target: Vec2, rng: &mut R) -> Self {
        let brightness = rng.uniform(PROJECTILE_BRIGHTNESS_MIN, PROJECTILE_BRIGHTNESS_MAX);
        Self::with_brightness(origin, target, brightness)
    }

    /// Launch with an explicit brightness instead of a random one.
    pub fn with_brightness(origin: Vec2, target: Vec2, brightness: f32) -> Self {
        let heading = target - origin;
        Self {
            position: origin,
            origin,
            target,
            total_distance: distance(origin, target),
            traveled_distance: 0.0,
            trail: Trail::filled(origin),
            angle: heading.y.atan2(heading.x),
            speed: PROJECTILE_BASE_SPEED,
            brightness,
            marker_radius: TARGET_MARKER_MIN,
            image_elapsed: 0.0,
        }
    }

    /// Step one frame.
    pub fn advance(&mut self) -> ProjectileStatus {
        self.trail.push(self.position);

        if self.marker_radius < TARGET_MARKER_MAX {
            self.marker_radius += TARGET_MARKER_STEP;
        } else {
            self.marker_radius = TARGET_MARKER_MIN;
        }

        if self.image_elapsed <= IMAGE_DISPLAY_SECS {
            self.image_elapsed += IMAGE_FRAME_SECS;
        }

        self.speed *= PROJECTILE_ACCELERATION;
        let velocity = Vec2::new(self.angle.cos(), self.angle.sin()) * self.speed;
        let lookahead = self.position + velocity;
        self.traveled_distance = distance(self.origin, lookahead);

        // A zero-length flight has nowhere to go: detonate immediately.
        if self.total_distance <= 0.0 || self.traveled_distance >= self.total_distance {
            return ProjectileStatus::Arrived;
        }

        self.position = lookahead;
        ProjectileStatus::InFlight
    }

    /// Draw the streak, the pulsing target marker, and (briefly) the target image.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S, hue: f32, image: Option<&Bitmap>) {
        let color = hsl(hue, self.brightness);
        surface.stroke_line(self.trail.oldest(), self.position, color);
        surface.stroke_circle(self.target, self.marker_radius, color);

        if let Some(image) = image.filter(|_| self.shows_image()) {
            let previous = surface.composite();
            surface.set_composite(CompositeMode::SourceOver);
            surface.draw_image(
                image,
                self.target - Vec2::splat(IMAGE_OFFSET),
                Vec2::new(IMAGE_WIDTH, IMAGE_HEIGHT),
            );
            surface.set_composite(previous);
        }
    }

    /// Whether the target image is still within its display window.
    pub fn shows_image(&self) -> bool {
        self.image_elapsed <= IMAGE_DISPLAY_SECS
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    pub fn traveled_distance(&self) -> f32 {
        self.traveled_distance
    }

    pub fn trail(&self) -> &Trail<PROJECTILE_TRAIL_LEN> {
        &self.trail
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn marker_radius(&self) -> f32 {
        self.marker_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandom;

    /// Launch straight up, far enough that nothing in these tests arrives.
    fn long_flight() -> Projectile {
        Projectile::with_brightness(Vec2::new(0.0, 100_000.0), Vec2::ZERO, 2000.0)
    }

    #[test]
    fn brightness_is_drawn_from_its_range() {
        let mut rng = SeededRandom::from_seed(11);
        for _ in 0..100 {
            let p = Projectile::new(Vec2::ZERO, Vec2::ONE, &mut rng);
            assert!((PROJECTILE_BRIGHTNESS_MIN..PROJECTILE_BRIGHTNESS_MAX).contains(&p.brightness()));
        }
    }

    #[test]
    fn trail_length_constant_and_speed_strictly_increasing() {
        let mut p = long_flight();
        let mut last_speed = p.speed();
        for _ in 0..40 {
            assert_eq!(p.advance(), ProjectileStatus::InFlight);
            assert_eq!(p.trail().len(), PROJECTILE_TRAIL_LEN);
            assert!(p.speed() > last_speed);
            last_speed = p.speed();
        }
    }

    #[test]
    fn trail_holds_previous_positions_newest_first() {
        let mut p = long_flight();
        let start = p.position();
        p.advance();
        let after_one = p.position();
        p.advance();

        let points: Vec<Vec2> = p.trail().iter().copied().collect();
        assert_eq!(points[0], after_one);
        assert_eq!(points[1], start);
        assert_eq!(points[2], start);
    }

    #[test]
    fn moves_along_heading_toward_target() {
        let mut p = Projectile::with_brightness(Vec2::ZERO, Vec2::new(300.0, 400.0), 1500.0);
        p.advance();
        let step = p.position();
        let expected = Vec2::new(0.6, 0.8) * PROJECTILE_BASE_SPEED * PROJECTILE_ACCELERATION;
        assert!((step - expected).length() < 1e-4, "{step:?} vs {expected:?}");
        assert_eq!(p.total_distance(), 500.0);
    }

    #[test]
    fn coincident_origin_and_target_arrives_on_first_advance() {
        let spot = Vec2::new(50.0, 60.0);
        let mut p = Projectile::with_brightness(spot, spot, 1000.0);
        assert_eq!(p.total_distance(), 0.0);
        assert_eq!(p.advance(), ProjectileStatus::Arrived);
        assert_eq!(p.position(), spot);
        assert!(p.position().is_finite());
    }

    #[test]
    fn arrival_is_decided_by_lookahead_and_does_not_move() {
        let mut p = Projectile::with_brightness(Vec2::ZERO, Vec2::new(10.0, 0.0), 1000.0);
        let mut frames = 0;
        let mut last_position = p.position();
        loop {
            frames += 1;
            match p.advance() {
                ProjectileStatus::InFlight => {
                    assert!(p.traveled_distance() < p.total_distance());
                    last_position = p.position();
                }
                ProjectileStatus::Arrived => break,
            }
            assert!(frames < 100, "never arrived");
        }
        assert!(p.traveled_distance() >= p.total_distance());
        assert_eq!(p.position(), last_position);
        assert!(p.position().x < 10.0);
    }

    #[test]
    fn marker_radius_pulses_and_resets_after_passing_eight() {
        let mut p = long_flight();
        assert_eq!(p.marker_radius(), 1.0);

        let mut radii = Vec::new();
        for _ in 0..26 {
            p.advance();
            radii.push(p.marker_radius());
        }

        assert!((radii[0] - 1.3).abs() < 1e-5);
        assert!((radii[1] - 1.6).abs() < 1e-5);
        // 23 steps reach 7.9, still below 8, so one more step overshoots to 8.2.
        assert!((radii[22] - 7.9).abs() < 1e-4);
        assert!((radii[23] - 8.2).abs() < 1e-4);
        assert_eq!(radii[24], 1.0);
        assert!((radii[25] - 1.3).abs() < 1e-5);
    }

    #[test]
    fn image_window_closes_after_two_nominal_seconds() {
        let mut p = long_flight();
        assert!(p.shows_image());
        for _ in 0..120 {
            p.advance();
        }
        assert!(p.shows_image());
        for _ in 0..10 {
            p.advance();
        }
        assert!(!p.shows_image());
    }
}
