//! Pointer input: maps the primary window's cursor and left mouse button into
//! [`PointerState`], the only state shared between input and the show loop.

use crate::show::PointerState;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Sample the cursor and launch button once per frame, before the show runs.
pub fn pointer_input_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let next = sample_pointer(
        *pointer,
        window.cursor_position(),
        buttons.pressed(MouseButton::Left),
    );
    if *pointer != next {
        *pointer = next;
    }
}

/// Fold one frame of raw input into the pointer state.
///
/// Window cursor coordinates are already canvas coordinates (top-left origin,
/// y down).  The last known position is kept while the cursor is outside the
/// window, so a held button keeps aiming where the cursor left.
pub fn sample_pointer(previous: PointerState, cursor: Option<Vec2>, held: bool) -> PointerState {
    PointerState {
        position: cursor.or(previous.position),
        down: held,
    }
}
