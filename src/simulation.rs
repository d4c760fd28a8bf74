//! Simulation plugin: hosts the show loop inside Bevy's `Update` schedule.
//!
//! Bevy's runner is the "once per display refresh" scheduler: it calls
//! [`show_frame_system`] every frame regardless of what the previous frame did,
//! so there is no self-rescheduling in the loop body.
//!
//! This plugin touches no window, asset, or render resources and runs under
//! `MinimalPlugins`, which is how the integration tests drive it.
//!
//! ## System ordering
//!
//! | Set                 | Systems                                                   |
//! |---------------------|-----------------------------------------------------------|
//! | `ShowSet::Input`    | pointer sampling, target-image readiness (presentation)   |
//! | `ShowSet::Simulate` | [`show_frame_system`]                                     |
//! | `ShowSet::Present`  | canvas upload, overlay text sync (presentation)           |

use crate::canvas::PixelCanvas;
use crate::config::ShowConfig;
use crate::random::{SeededRandom, ShowRng};
use crate::show::{FireworkShow, FrameInput, PointerState};
use crate::surface::Bitmap;
use bevy::prelude::*;

/// Per-frame ordering of the show's systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShowSet {
    /// Sample input and asset readiness.
    Input,
    /// Run one show frame.
    Simulate,
    /// Hand the frame to Bevy's renderer.
    Present,
}

/// The drawing surface the show renders into.
#[derive(Resource, Debug, Clone)]
pub struct ShowCanvas(pub PixelCanvas);

/// The target image, once it is ready to draw.
#[derive(Resource, Debug, Clone, Default)]
pub struct TargetImage {
    pub bitmap: Option<Bitmap>,
}

/// Running totals since the show started.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowStats {
    pub frames: u64,
    pub launched: u64,
    pub exploded: u64,
    pub expired: u64,
}

pub struct SimulationPlugin {
    config: ShowConfig,
}

impl SimulationPlugin {
    pub fn new(config: ShowConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = &self.config;
        let show = FireworkShow::new(config.canvas_size())
            .with_overlay(config.overlay_text.clone(), config.overlay_font_size);

        app.insert_resource(config.clone())
            .insert_resource(show)
            .insert_resource(ShowCanvas(PixelCanvas::new(
                config.canvas_width,
                config.canvas_height,
            )))
            .insert_resource(ShowRng::new(SeededRandom::new(config.seed)))
            .init_resource::<PointerState>()
            .init_resource::<TargetImage>()
            .init_resource::<ShowStats>()
            .configure_sets(
                Update,
                (ShowSet::Input, ShowSet::Simulate, ShowSet::Present).chain(),
            )
            .add_systems(Update, show_frame_system.in_set(ShowSet::Simulate));
    }
}

/// Run one frame of the show against the pixel canvas.
pub fn show_frame_system(
    mut show: ResMut<FireworkShow>,
    mut canvas: ResMut<ShowCanvas>,
    mut rng: ResMut<ShowRng>,
    mut stats: ResMut<ShowStats>,
    pointer: Res<PointerState>,
    image: Res<TargetImage>,
) {
    // Text left over from a frame nothing presented.
    canvas.0.clear_text();

    let input = FrameInput {
        pointer: *pointer,
        image: image.bitmap.as_ref(),
    };
    let report = show.frame(rng.0.as_mut(), &mut canvas.0, input);

    stats.frames += 1;
    stats.launched += report.launched as u64;
    stats.exploded += report.exploded as u64;
    stats.expired += report.expired as u64;

    if report.launched > 0 || report.exploded > 0 {
        debug!(
            "frame {}: launched {}, exploded {}, live projectiles {}, live fragments {}",
            stats.frames,
            report.launched,
            report.exploded,
            show.projectiles().len(),
            show.fragments().len()
        );
    }
}
