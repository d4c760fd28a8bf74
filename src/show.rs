//! The show: per-frame simulation and render loop.
//!
//! [`FireworkShow`] owns every piece of mutable show state (live projectiles,
//! live fragments, the colour phase, and both launch gates).  One call to
//! [`FireworkShow::frame`] is one display frame:
//!
//! | Step | Action                                                         |
//! |------|----------------------------------------------------------------|
//! | 1    | advance the colour phase                                        |
//! | 2    | erase-fade the whole surface (`destination-out`, α = 0.5)      |
//! | 3    | draw the overlay text (`source-over`)                           |
//! | 4    | switch to additive (`lighter`) drawing                          |
//! | 5    | projectiles: render → advance → detonate + remove on arrival   |
//! | 6    | fragments: render → advance → remove on expiry                  |
//! | 7    | autonomous launch gate                                          |
//! | 8    | pointer launch gate                                             |
//!
//! Re-arming the next frame is the host's job: Bevy runs
//! [`crate::simulation::show_frame_system`] once per `Update`, whether or not
//! the previous frame drew anything.

use crate::constants::*;
use crate::explosion::spawn_explosion;
use crate::fragment::{Fragment, FragmentStatus};
use crate::gate::FrameGate;
use crate::projectile::{Projectile, ProjectileStatus};
use crate::random::RandomSource;
use crate::surface::{Bitmap, CompositeMode, DrawSurface, TextAlign, TextBaseline, TextStyle};
use bevy::color::Srgba;
use bevy::prelude::*;

/// Pointer state as last reported by the input layer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Canvas-space cursor position; `None` until the cursor has entered the canvas.
    pub position: Option<Vec2>,
    /// Whether the launch button is held.
    pub down: bool,
}

/// Per-frame inputs read by [`FireworkShow::frame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput<'a> {
    pub pointer: PointerState,
    /// Target image, once it has finished loading.
    pub image: Option<&'a Bitmap>,
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Projectiles launched by either gate.
    pub launched: usize,
    /// Projectiles that reached their target.
    pub exploded: usize,
    /// Fragments removed after fading out.
    pub expired: usize,
}

/// All mutable show state.
#[derive(Resource, Debug, Clone)]
pub struct FireworkShow {
    canvas_size: Vec2,
    projectiles: Vec<Projectile>,
    fragments: Vec<Fragment>,
    /// Shared colour phase in degrees, kept in `[0, 360)`.
    hue: f32,
    auto_gate: FrameGate,
    pointer_gate: FrameGate,
    overlay_text: String,
    overlay_style: TextStyle,
}

impl FireworkShow {
    /// An empty show on a canvas of `canvas_size` pixels.
    pub fn new(canvas_size: Vec2) -> Self {
        Self {
            canvas_size,
            projectiles: Vec::new(),
            fragments: Vec::new(),
            hue: INITIAL_HUE,
            auto_gate: FrameGate::new(AUTO_LAUNCH_PERIOD),
            pointer_gate: FrameGate::new(POINTER_LAUNCH_PERIOD),
            overlay_text: OVERLAY_TEXT.to_owned(),
            overlay_style: TextStyle {
                font_size: OVERLAY_FONT_SIZE,
                bold: true,
                color: Srgba::new(1.0, 1.0, 1.0, 1.0),
                align: TextAlign::Center,
                baseline: TextBaseline::Middle,
            },
        }
    }

    /// Replace the overlay text and font size.
    pub fn with_overlay(mut self, text: impl Into<String>, font_size: f32) -> Self {
        self.overlay_text = text.into();
        self.overlay_style.font_size = font_size;
        self
    }

    /// Run one frame against `surface`.
    pub fn frame<R, S>(&mut self, rng: &mut R, surface: &mut S, input: FrameInput<'_>) -> FrameReport
    where
        R: RandomSource + ?Sized,
        S: DrawSurface + ?Sized,
    {
        let mut report = FrameReport::default();

        self.hue = (self.hue + HUE_STEP).rem_euclid(360.0);

        let size = surface.size();
        surface.set_composite(CompositeMode::DestinationOut);
        surface.fill_rect(
            Vec2::ZERO,
            size,
            Srgba::new(0.0, 0.0, 0.0, TRAIL_FADE_ALPHA),
        );

        self.render_overlay(surface);

        surface.set_composite(CompositeMode::Lighter);

        let hue = self.hue;
        let fragments = &mut self.fragments;
        sweep_reverse(&mut self.projectiles, |projectile| {
            projectile.render(surface, hue, input.image);
            match projectile.advance() {
                ProjectileStatus::InFlight => true,
                ProjectileStatus::Arrived => {
                    spawn_explosion(fragments, projectile.target(), hue, rng);
                    report.exploded += 1;
                    false
                }
            }
        });

        sweep_reverse(&mut self.fragments, |fragment| {
            fragment.render(surface);
            match fragment.advance() {
                FragmentStatus::Burning => true,
                FragmentStatus::Expired => {
                    report.expired += 1;
                    false
                }
            }
        });

        report.launched += self.poll_launch_gates(rng, input.pointer);
        report
    }

    fn render_overlay<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let previous = surface.composite();
        surface.set_composite(CompositeMode::SourceOver);
        let centre = surface.size() * 0.5;
        surface.fill_text(&self.overlay_text, centre, &self.overlay_style);
        surface.set_composite(previous);
    }

    /// Poll the autonomous gate, then the pointer gate.  Returns launches made.
    fn poll_launch_gates<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        pointer: PointerState,
    ) -> usize {
        let mut launched = 0;

        if self.auto_gate.poll(|| !pointer.down && rng.coin()) {
            let target = Vec2::new(
                rng.uniform(0.0, self.canvas_size.x),
                rng.uniform(0.0, self.canvas_size.y / 2.0),
            );
            self.launch(target, rng);
            launched += 1;
        }

        // No known cursor position means there is nothing to aim at; the gate
        // stays armed until one arrives.
        let aim = pointer.position.filter(|p| p.is_finite());
        if self.pointer_gate.poll(|| pointer.down && aim.is_some()) {
            if let Some(target) = aim {
                self.launch(target, rng);
                launched += 1;
            }
        }

        launched
    }

    /// Launch a projectile from the bottom-centre of the canvas toward `target`.
    pub fn launch<R: RandomSource + ?Sized>(&mut self, target: Vec2, rng: &mut R) {
        let origin = self.launch_origin();
        self.projectiles.push(Projectile::new(origin, target, rng));
    }

    /// Bottom-centre of the canvas.
    pub fn launch_origin(&self) -> Vec2 {
        Vec2::new(self.canvas_size.x / 2.0, self.canvas_size.y)
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn auto_gate(&self) -> &FrameGate {
        &self.auto_gate
    }

    pub fn pointer_gate(&self) -> &FrameGate {
        &self.pointer_gate
    }
}

/// Visit every entry from the last index down to the first, removing entries
/// for which `visit` returns `false`.
///
/// Removal swaps the current last element into the vacated slot.  That element
/// has already been visited, so every entry is visited exactly once.
pub fn sweep_reverse<T>(items: &mut Vec<T>, mut visit: impl FnMut(&mut T) -> bool) {
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if !visit(&mut items[i]) {
            items.swap_remove(i);
        }
    }
}
