//! Presentation: camera, canvas texture, overlay text, and the target image.
//!
//! ## Layer model
//!
//! | Layer        | Technology | z                      | Source                                |
//! |--------------|------------|------------------------|---------------------------------------|
//! | Canvas       | `Sprite`   | [`CANVAS_LAYER_Z`]     | [`ShowCanvas`] uploaded every frame   |
//! | Overlay text | `Text2d`   | [`OVERLAY_LAYER_Z`]    | text requests queued on [`ShowCanvas`] |
//!
//! The overlay composites over the canvas instead of underneath the additive
//! particles.  With opaque text the picture only differs at anti-aliased glyph
//! edges, where sparks passing behind the text do not brighten it.
//!
//! ## System responsibilities
//!
//! | System                        | Schedule | Purpose                                |
//! |-------------------------------|----------|----------------------------------------|
//! | `setup_camera`                | Startup  | Spawn the 2D camera                    |
//! | `setup_canvas_sprite`         | Startup  | Create the canvas texture + sprite     |
//! | `setup_overlay_text`          | Startup  | Spawn the overlay `Text2d` node        |
//! | `load_target_image`           | Startup  | Start loading the target image         |
//! | `target_image_ready_system`   | Update   | Decode the image once it has loaded    |
//! | `upload_canvas_system`        | Update   | Copy canvas pixels into the texture    |
//! | `sync_overlay_text_system`    | Update   | Mirror queued text onto the `Text2d`   |

use crate::config::ShowConfig;
use crate::error::{ShowError, ShowResult};
use crate::input::pointer_input_system;
use crate::simulation::{ShowCanvas, ShowSet, TargetImage};
use crate::surface::{Bitmap, TextAlign, TextBaseline};
use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::sprite::Anchor;
use bevy_asset::RenderAssetUsages;

/// Depth of the canvas sprite.
pub const CANVAS_LAYER_Z: f32 = 0.0;
/// Depth of the overlay text, above the canvas.
pub const OVERLAY_LAYER_Z: f32 = 1.0;

/// Handle of the GPU texture the canvas is uploaded into.
#[derive(Resource)]
pub struct CanvasTexture(pub Handle<Image>);

/// Handle of the target image while it loads.
#[derive(Resource)]
pub struct TargetImageHandle {
    pub handle: Handle<Image>,
    /// Set once a load or decode failure has been logged.
    pub failure_reported: bool,
}

/// Marker for the overlay text entity.
#[derive(Component)]
pub struct OverlayText;

/// Font faces available to the overlay.
#[derive(Resource, Debug, Clone, Default)]
pub struct OverlayFonts {
    /// Regular face; the default handle is Bevy's built-in font.
    pub regular: Handle<Font>,
    pub bold: Option<Handle<Font>>,
}

impl OverlayFonts {
    /// The face to draw with.  Falls back to the regular face when no bold
    /// face is configured.
    pub fn face(&self, bold: bool) -> Handle<Font> {
        match (&self.bold, bold) {
            (Some(face), true) => face.clone(),
            _ => self.regular.clone(),
        }
    }
}

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(
                Startup,
                (
                    setup_camera,
                    setup_canvas_sprite,
                    setup_overlay_text,
                    load_target_image,
                ),
            )
            .add_systems(
                Update,
                (pointer_input_system, target_image_ready_system).in_set(ShowSet::Input),
            )
            .add_systems(
                Update,
                (upload_canvas_system, sync_overlay_text_system).in_set(ShowSet::Present),
            );
    }
}

// ── Startup systems ──────────────────────────────────────────────────────────

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel, origin at centre.
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}

/// Create the canvas texture and a window-sized sprite showing it.
pub fn setup_canvas_sprite(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    config: Res<ShowConfig>,
) {
    let texture = Image::new_fill(
        Extent3d {
            width: config.canvas_width,
            height: config.canvas_height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        // Keep the CPU copy so the canvas can be rewritten every frame.
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    let handle = images.add(texture);

    commands.spawn((
        Sprite {
            image: handle.clone(),
            custom_size: Some(config.canvas_size()),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 0.0, CANVAS_LAYER_Z)),
    ));
    commands.insert_resource(CanvasTexture(handle));
    eprintln!(
        "[SETUP] Canvas {}x{} created",
        config.canvas_width, config.canvas_height
    );
}

/// Spawn the overlay text node, hidden until the show queues text.
pub fn setup_overlay_text(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ShowConfig>,
) {
    let mut fonts = OverlayFonts::default();
    if let Some(path) = &config.font_path {
        fonts.regular = asset_server.load(path.clone());
    }
    match &config.bold_font_path {
        Some(path) => fonts.bold = Some(asset_server.load(path.clone())),
        None => eprintln!("[SETUP] No bold_font_path set; bold overlay text uses the regular face"),
    }

    let (anchor, justify) = text_placement(TextAlign::default(), TextBaseline::default());
    commands.spawn((
        Text2d::new(config.overlay_text.clone()),
        TextFont {
            font: fonts.face(true),
            font_size: config.overlay_font_size,
            ..default()
        },
        TextColor(Color::WHITE),
        TextLayout::new_with_justify(justify),
        anchor,
        Transform::from_translation(Vec3::new(0.0, 0.0, OVERLAY_LAYER_Z)),
        Visibility::Hidden,
        OverlayText,
    ));
    commands.insert_resource(fonts);
}

/// Start loading the target image.  Drawing skips it until it is ready.
pub fn load_target_image(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ShowConfig>,
) {
    let handle = asset_server.load(config.image_path.clone());
    commands.insert_resource(TargetImageHandle {
        handle,
        failure_reported: false,
    });
}

// ── Update systems ───────────────────────────────────────────────────────────

/// Convert the target image into a [`Bitmap`] once its asset has loaded.
pub fn target_image_ready_system(
    images: Res<Assets<Image>>,
    asset_server: Res<AssetServer>,
    handle: Option<ResMut<TargetImageHandle>>,
    mut target: ResMut<TargetImage>,
) {
    let Some(mut handle) = handle else {
        return;
    };
    if target.bitmap.is_some() || handle.failure_reported {
        return;
    }

    if let Some(image) = images.get(&handle.handle) {
        match bitmap_from_image(image) {
            Ok(bitmap) => {
                info!("Image loaded ({}x{})", bitmap.width, bitmap.height);
                target.bitmap = Some(bitmap);
            }
            Err(e) => {
                warn!("Target image unusable: {e}; continuing without it");
                handle.failure_reported = true;
            }
        }
        return;
    }

    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.handle.id()) {
        warn!("Target image failed to load: {err}; continuing without it");
        handle.failure_reported = true;
    }
}

/// Copy the canvas into its texture so the sprite shows this frame.
pub fn upload_canvas_system(
    canvas: Res<ShowCanvas>,
    texture: Option<Res<CanvasTexture>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(texture) = texture else {
        return;
    };
    if let Some(image) = images.get_mut(&texture.0) {
        if let Some(data) = image.data.as_mut() {
            canvas.0.write_rgba8(data);
        }
    }
}

/// Mirror the most recent queued text draw onto the overlay `Text2d`.
///
/// Canvas coordinates (top-left origin, y down) are converted to world space
/// (centre origin, y up).  Alignment and baseline pick the anchor, so the
/// requested point lands on the same edge of the text as on a 2D canvas.  The
/// node is hidden on frames that queued no text.
pub fn sync_overlay_text_system(
    mut canvas: ResMut<ShowCanvas>,
    fonts: Res<OverlayFonts>,
    mut query: Query<
        (
            &mut Text2d,
            &mut TextFont,
            &mut TextColor,
            &mut TextLayout,
            &mut Anchor,
            &mut Transform,
            &mut Visibility,
        ),
        With<OverlayText>,
    >,
) {
    let size = Vec2::new(canvas.0.width() as f32, canvas.0.height() as f32);
    let latest = canvas.0.take_text().pop();

    for (mut text, mut font, mut color, mut layout, mut anchor, mut transform, mut visibility) in
        query.iter_mut()
    {
        let Some(request) = &latest else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let style = &request.style;
        if text.0 != request.text {
            text.0 = request.text.clone();
        }
        if font.font_size != style.font_size {
            font.font_size = style.font_size;
        }
        let face = fonts.face(style.bold);
        if font.font != face {
            font.font = face;
        }
        let (placement, justify) = text_placement(style.align, style.baseline);
        if *anchor != placement {
            *anchor = placement;
        }
        if layout.justify != justify {
            layout.justify = justify;
        }
        color.0 = Color::from(style.color);
        transform.translation.x = request.at.x - size.x / 2.0;
        transform.translation.y = size.y / 2.0 - request.at.y;
        *visibility = Visibility::Visible;
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Anchor and line justification that place text like a 2D canvas does.
///
/// `align` picks the horizontal edge that sits on the draw point, `baseline`
/// the vertical one.  Bevy anchors are in y-up text space.
pub fn text_placement(align: TextAlign, baseline: TextBaseline) -> (Anchor, Justify) {
    let (x, justify) = match align {
        TextAlign::Left => (-0.5, Justify::Left),
        TextAlign::Center => (0.0, Justify::Center),
        TextAlign::Right => (0.5, Justify::Right),
    };
    let y = match baseline {
        TextBaseline::Top => 0.5,
        TextBaseline::Middle => 0.0,
        TextBaseline::Bottom => -0.5,
    };
    (Anchor(Vec2::new(x, y)), justify)
}

/// Copy an 8-bit RGBA image asset into a [`Bitmap`].
pub fn bitmap_from_image(image: &Image) -> ShowResult<Bitmap> {
    let format = image.texture_descriptor.format;
    if !matches!(
        format,
        TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm
    ) {
        return Err(ShowError::UnsupportedImage {
            format: format!("{format:?}"),
        });
    }
    let data = image.data.as_ref().ok_or(ShowError::ImageDataMissing)?;
    Bitmap::new(image.width(), image.height(), data.clone()).ok_or(ShowError::ImageDataMissing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;
    use crate::surface::{DrawSurface, TextStyle};

    fn image(format: TextureFormat, pixel: &[u8]) -> Image {
        Image::new_fill(
            Extent3d {
                width: 2,
                height: 3,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            pixel,
            format,
            RenderAssetUsages::MAIN_WORLD,
        )
    }

    #[test]
    fn rgba8_image_converts_to_bitmap() {
        let bmp = bitmap_from_image(&image(TextureFormat::Rgba8UnormSrgb, &[10, 20, 30, 255]))
            .expect("rgba8 converts");
        assert_eq!((bmp.width, bmp.height), (2, 3));
        assert_eq!(bmp.pixel(1, 2), [10, 20, 30, 255]);
    }

    #[test]
    fn non_rgba8_image_is_rejected() {
        let err = bitmap_from_image(&image(TextureFormat::R8Unorm, &[7])).unwrap_err();
        assert!(matches!(err, ShowError::UnsupportedImage { .. }));
    }

    #[test]
    fn placement_matches_canvas_alignment() {
        assert_eq!(
            text_placement(TextAlign::Center, TextBaseline::Middle),
            (Anchor::CENTER, Justify::Center)
        );
        assert_eq!(
            text_placement(TextAlign::Left, TextBaseline::Top),
            (Anchor::TOP_LEFT, Justify::Left)
        );
        assert_eq!(
            text_placement(TextAlign::Right, TextBaseline::Bottom),
            (Anchor::BOTTOM_RIGHT, Justify::Right)
        );
    }

    #[test]
    fn bold_face_falls_back_to_regular() {
        let handles = Assets::<Font>::default();
        let regular = handles.reserve_handle();
        let bold = handles.reserve_handle();

        let without_bold = OverlayFonts {
            regular: regular.clone(),
            bold: None,
        };
        assert_eq!(without_bold.face(true), regular);

        let with_bold = OverlayFonts {
            regular: regular.clone(),
            bold: Some(bold.clone()),
        };
        assert_eq!(with_bold.face(true), bold);
        assert_eq!(with_bold.face(false), regular);
    }

    /// Spawn an overlay node and queue one text draw, then run the sync once.
    fn synced_overlay(style: TextStyle, at: Vec2, fonts: OverlayFonts) -> App {
        let mut canvas = PixelCanvas::new(200, 100);
        canvas.fill_text("Cheers", at, &style);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(ShowCanvas(canvas))
            .insert_resource(fonts)
            .add_systems(Update, sync_overlay_text_system);
        app.world_mut().spawn((
            Text2d::new(""),
            TextFont::default(),
            TextColor(Color::WHITE),
            TextLayout::new_with_justify(Justify::Center),
            Anchor::CENTER,
            Transform::from_translation(Vec3::new(0.0, 0.0, OVERLAY_LAYER_Z)),
            Visibility::Hidden,
            OverlayText,
        ));
        app.update();
        app
    }

    #[test]
    fn sync_applies_alignment_baseline_and_bold_face() {
        let handles = Assets::<Font>::default();
        let bold = handles.reserve_handle();
        let fonts = OverlayFonts {
            regular: Handle::default(),
            bold: Some(bold.clone()),
        };
        let style = TextStyle {
            font_size: 24.0,
            bold: true,
            color: Srgba::new(1.0, 0.5, 0.0, 1.0),
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
        };

        let mut app = synced_overlay(style, Vec2::new(20.0, 10.0), fonts);

        let mut query = app.world_mut().query_filtered::<(
            &Text2d,
            &TextFont,
            &TextLayout,
            &Anchor,
            &Transform,
            &Visibility,
        ), With<OverlayText>>();
        let (text, font, layout, anchor, transform, visibility) = query
            .single(app.world())
            .expect("one overlay node");
        assert_eq!(text.0, "Cheers");
        assert_eq!(font.font_size, 24.0);
        assert_eq!(font.font, bold);
        assert_eq!(layout.justify, Justify::Left);
        assert_eq!(*anchor, Anchor::TOP_LEFT);
        // Canvas (20, 10) on a 200x100 canvas is world (-80, 40).
        assert_eq!(transform.translation, Vec3::new(-80.0, 40.0, OVERLAY_LAYER_Z));
        assert!(transform.translation.z > CANVAS_LAYER_Z);
        assert_eq!(*visibility, Visibility::Visible);
    }

    #[test]
    fn sync_uses_regular_face_for_plain_text() {
        let style = TextStyle {
            font_size: 18.0,
            bold: false,
            color: Srgba::new(1.0, 1.0, 1.0, 1.0),
            align: TextAlign::Right,
            baseline: TextBaseline::Bottom,
        };

        let mut app = synced_overlay(style, Vec2::new(100.0, 50.0), OverlayFonts::default());

        let mut query = app
            .world_mut()
            .query_filtered::<(&TextFont, &TextLayout, &Anchor), With<OverlayText>>();
        let (font, layout, anchor) = query.single(app.world()).expect("one overlay node");
        assert_eq!(font.font, Handle::<Font>::default());
        assert_eq!(layout.justify, Justify::Right);
        assert_eq!(*anchor, Anchor::BOTTOM_RIGHT);
    }
}
