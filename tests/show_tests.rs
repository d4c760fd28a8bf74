//! Headless tests for the show loop running inside a Bevy [`App`].
//!
//! These tests use [`MinimalPlugins`] plus [`SimulationPlugin`] only: no window,
//! no rendering, no asset server.  The show draws into its software canvas and
//! the tests inspect resources between `app.update()` calls.
//!
//! Covered scenarios:
//! 1. With the pointer up and the launch coin loaded, the autonomous gate
//!    launches exactly one projectile after counting 80 frames.
//! 2. A held pointer launches toward the cursor once per pointer-gate cycle,
//!    while the autonomous gate stays armed.
//! 3. A launched projectile reaches its target, bursts into 100 fragments, and
//!    the burst fades out completely.
//! 4. A ready target image is drawn into the canvas.
//! 5. Without a presentation layer the overlay text queue stays bounded.

use bevy::prelude::*;
use fireworks::config::ShowConfig;
use fireworks::constants::{AUTO_LAUNCH_PERIOD, EXPLOSION_FRAGMENT_COUNT, POINTER_LAUNCH_PERIOD};
use fireworks::random::{RandomSource, SeededRandom, ShowRng};
use fireworks::show::{FireworkShow, PointerState};
use fireworks::simulation::{ShowCanvas, ShowStats, SimulationPlugin, TargetImage};
use fireworks::surface::Bitmap;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Seeded values, but the autonomous launch coin always passes.
struct LoadedCoin(SeededRandom);

impl RandomSource for LoadedCoin {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        self.0.uniform(min, max)
    }

    fn coin(&mut self) -> bool {
        true
    }
}

/// Never passes the coin, so only the pointer gate can launch.
struct DeadCoin(SeededRandom);

impl RandomSource for DeadCoin {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        self.0.uniform(min, max)
    }

    fn coin(&mut self) -> bool {
        false
    }
}

/// Build a headless app running the show on a small canvas.
fn show_app(rng: impl RandomSource + Send + Sync + 'static) -> App {
    let config = ShowConfig {
        canvas_width: WIDTH,
        canvas_height: HEIGHT,
        seed: Some(99),
        ..Default::default()
    };
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SimulationPlugin::new(config)));
    // Replaces the seeded source installed by the plugin.
    app.insert_resource(ShowRng::new(rng));
    app
}

fn run_frames(app: &mut App, frames: u32) {
    for _ in 0..frames {
        app.update();
    }
}

fn show(app: &App) -> &FireworkShow {
    app.world().resource::<FireworkShow>()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Pointer up, coin loaded: 80 counted frames, then one launch.
#[test]
fn autonomous_gate_launches_one_projectile_toward_upper_half() {
    let mut app = show_app(LoadedCoin(SeededRandom::from_seed(1)));

    run_frames(&mut app, AUTO_LAUNCH_PERIOD);
    assert!(
        show(&app).projectiles().is_empty(),
        "gate must count a full period before firing"
    );

    app.update();

    let projectiles = show(&app).projectiles();
    assert_eq!(projectiles.len(), 1, "exactly one autonomous launch");
    let p = &projectiles[0];
    assert_eq!(p.origin(), Vec2::new(WIDTH as f32 / 2.0, HEIGHT as f32));
    assert!(p.target().y <= HEIGHT as f32 / 2.0, "target {:?}", p.target());
    assert!((0.0..WIDTH as f32).contains(&p.target().x));
    assert_eq!(app.world().resource::<ShowStats>().launched, 1);
}

/// Holding the pointer fires toward the cursor every gate cycle and keeps the
/// autonomous gate from firing even with a loaded coin.
#[test]
fn held_pointer_launches_toward_cursor_every_cycle() {
    let mut app = show_app(LoadedCoin(SeededRandom::from_seed(2)));
    let cursor = Vec2::new(100.0, 60.0);
    *app.world_mut().resource_mut::<PointerState>() = PointerState {
        position: Some(cursor),
        down: true,
    };

    let cycle = POINTER_LAUNCH_PERIOD + 1;
    run_frames(&mut app, cycle * 3);

    let show = show(&app);
    assert_eq!(show.projectiles().len(), 3);
    assert!(show.projectiles().iter().all(|p| p.target() == cursor));

    run_frames(&mut app, AUTO_LAUNCH_PERIOD * 2);
    let stats = *app.world().resource::<ShowStats>();
    let expected = u64::from((cycle * 3 + AUTO_LAUNCH_PERIOD * 2) / cycle);
    assert_eq!(stats.launched, expected, "only pointer launches while held");
}

/// Releasing the pointer stops pointer launches.
#[test]
fn released_pointer_stops_launching() {
    let mut app = show_app(DeadCoin(SeededRandom::from_seed(3)));
    *app.world_mut().resource_mut::<PointerState>() = PointerState {
        position: Some(Vec2::new(50.0, 50.0)),
        down: true,
    };
    run_frames(&mut app, POINTER_LAUNCH_PERIOD + 1);
    assert_eq!(app.world().resource::<ShowStats>().launched, 1);

    app.world_mut().resource_mut::<PointerState>().down = false;
    run_frames(&mut app, 60);
    assert_eq!(app.world().resource::<ShowStats>().launched, 1);
}

/// A launch climbs, bursts into one explosion's worth of fragments at its
/// target, and every fragment eventually fades out.
#[test]
fn launch_explodes_and_fades_out() {
    let mut app = show_app(DeadCoin(SeededRandom::from_seed(4)));
    let target = Vec2::new(160.0, 80.0);
    *app.world_mut().resource_mut::<PointerState>() = PointerState {
        position: Some(target),
        down: true,
    };
    run_frames(&mut app, POINTER_LAUNCH_PERIOD + 1);
    app.world_mut().resource_mut::<PointerState>().down = false;
    assert_eq!(show(&app).projectiles().len(), 1);

    let mut frames = 0;
    while show(&app).fragments().is_empty() {
        app.update();
        frames += 1;
        assert!(frames < 200, "projectile never arrived");
    }
    assert!(show(&app).projectiles().is_empty());
    assert_eq!(show(&app).fragments().len(), EXPLOSION_FRAGMENT_COUNT);

    run_frames(&mut app, 100);
    assert!(show(&app).fragments().is_empty());

    let stats = *app.world().resource::<ShowStats>();
    assert_eq!(stats.exploded, 1);
    assert_eq!(stats.expired, EXPLOSION_FRAGMENT_COUNT as u64);
}

/// Once the target image is ready it is drawn over the target.
#[test]
fn ready_target_image_is_drawn_near_target() {
    let mut app = show_app(DeadCoin(SeededRandom::from_seed(5)));
    let red = Bitmap::new(1, 1, vec![255, 0, 0, 255]).expect("1x1 bitmap");
    app.world_mut().resource_mut::<TargetImage>().bitmap = Some(red);

    let target = Vec2::new(160.0, 80.0);
    *app.world_mut().resource_mut::<PointerState>() = PointerState {
        position: Some(target),
        down: true,
    };
    run_frames(&mut app, POINTER_LAUNCH_PERIOD + 2);

    // The image spans (target - 50) .. (target - 50) + (100, 200).
    let canvas = &app.world().resource::<ShowCanvas>().0;
    let sample = canvas
        .pixel(target.x as u32 + 30, target.y as u32 + 100)
        .expect("sample inside canvas");
    assert!(sample.red > 0.2 && sample.alpha > 0.2, "image missing: {sample:?}");
}

/// Nothing drains the text queue headless, so it must not grow frame over frame.
#[test]
fn overlay_text_queue_stays_bounded_without_presentation() {
    let mut app = show_app(DeadCoin(SeededRandom::from_seed(6)));

    run_frames(&mut app, 50);

    let queued = app.world().resource::<ShowCanvas>().0.queued_text();
    assert_eq!(queued.len(), 1, "only the latest frame's overlay is kept");
    assert_eq!(queued[0].text, ShowConfig::default().overlay_text);
}
