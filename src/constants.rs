//! Centralised show constants.
//!
//! Physics and timing are frame-count based and intentionally fixed at compile
//! time.  Only presentation values (window size, overlay text, asset paths) are
//! mirrored by [`crate::config::ShowConfig`] and can be overridden from
//! `assets/fireworks.toml`.

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Default canvas (and window) width in logical pixels.
pub const CANVAS_WIDTH: u32 = 1200;

/// Default canvas (and window) height in logical pixels.
pub const CANVAS_HEIGHT: u32 = 680;

/// Opacity of the black `destination-out` rectangle painted every frame.
///
/// Each frame keeps `1 - TRAIL_FADE_ALPHA` of the previous frame's alpha, which
/// is what turns single-frame strokes into fading ghost trails.
pub const TRAIL_FADE_ALPHA: f32 = 0.5;

// ── Colour phase ──────────────────────────────────────────────────────────────

/// Hue (degrees) of the shared colour phase when the show starts.
pub const INITIAL_HUE: f32 = 120.0;

/// Hue advance per frame (degrees).
pub const HUE_STEP: f32 = 1.0;

// ── Projectile ────────────────────────────────────────────────────────────────

/// Number of past positions kept for the projectile streak.
pub const PROJECTILE_TRAIL_LEN: usize = 3;

/// Launch speed (px/frame).
pub const PROJECTILE_BASE_SPEED: f32 = 2.0;

/// Per-frame speed multiplier.  Must stay above 1.0 so speed strictly increases.
pub const PROJECTILE_ACCELERATION: f32 = 1.05;

/// Projectile brightness range, used verbatim as an HSL lightness percentage.
///
/// Everything in this range is past 100 % and clamps to white.
pub const PROJECTILE_BRIGHTNESS_MIN: f32 = 1000.0;
pub const PROJECTILE_BRIGHTNESS_MAX: f32 = 4000.0;

/// Target marker pulse: grows from `MIN` by `STEP` each frame until it reaches
/// `MAX`, then snaps back to `MIN`.
pub const TARGET_MARKER_MIN: f32 = 1.0;
pub const TARGET_MARKER_MAX: f32 = 8.0;
pub const TARGET_MARKER_STEP: f32 = 0.3;

// ── Target image ──────────────────────────────────────────────────────────────

/// Nominal seconds per frame used to age the target image.
pub const IMAGE_FRAME_SECS: f32 = 0.016;

/// How long (nominal seconds) the target image stays visible after launch.
pub const IMAGE_DISPLAY_SECS: f32 = 2.0;

/// Offset from the target to the image's top-left corner.
pub const IMAGE_OFFSET: f32 = 50.0;

/// Drawn image size (px).
pub const IMAGE_WIDTH: f32 = 100.0;
pub const IMAGE_HEIGHT: f32 = 200.0;

// ── Fragment ──────────────────────────────────────────────────────────────────

/// Number of past positions kept for the fragment streak.
pub const FRAGMENT_TRAIL_LEN: usize = 5;

/// Initial fragment speed range (px/frame).
pub const FRAGMENT_SPEED_MIN: f32 = 1.0;
pub const FRAGMENT_SPEED_MAX: f32 = 10.0;

/// Per-frame speed multiplier.  Below 1.0, so fragments slow asymptotically.
pub const FRAGMENT_FRICTION: f32 = 0.95;

/// Downward displacement added every frame (canvas y grows downward).
pub const FRAGMENT_GRAVITY: f32 = 1.0;

/// Fragments pick a hue within ± this many degrees of the current colour phase.
pub const FRAGMENT_HUE_SPREAD: f32 = 20.0;

/// Fragment lightness range (percent).
pub const FRAGMENT_BRIGHTNESS_MIN: f32 = 50.0;
pub const FRAGMENT_BRIGHTNESS_MAX: f32 = 80.0;

/// Per-frame alpha decrement range.
pub const FRAGMENT_DECAY_MIN: f32 = 0.015;
pub const FRAGMENT_DECAY_MAX: f32 = 0.03;

// ── Explosion ─────────────────────────────────────────────────────────────────

/// Fragments spawned per explosion.
pub const EXPLOSION_FRAGMENT_COUNT: usize = 100;

// ── Launch gates ──────────────────────────────────────────────────────────────

/// Frames the autonomous launcher counts before it may fire.
pub const AUTO_LAUNCH_PERIOD: u32 = 80;

/// Frames the pointer launcher counts before it may fire.
pub const POINTER_LAUNCH_PERIOD: u32 = 5;

/// The autonomous launcher fires when a uniform `[0, 1)` draw exceeds this.
pub const AUTO_LAUNCH_COIN_THRESHOLD: f32 = 0.5;

// ── Overlay ───────────────────────────────────────────────────────────────────

/// Static text drawn at the canvas centre every frame.
pub const OVERLAY_TEXT: &str = "Happy New Year";

/// Overlay font size (px).
pub const OVERLAY_FONT_SIZE: f32 = 60.0;

/// Default window title.
pub const WINDOW_TITLE: &str = "Fireworks";

/// Default path (relative to `assets/`) of the target image.
pub const IMAGE_PATH: &str = "image.png";

/// Path of the optional TOML overrides.
pub const CONFIG_PATH: &str = "assets/fireworks.toml";
