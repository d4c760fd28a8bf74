use bevy::prelude::*;
use bevy::window::WindowResolution;

use fireworks::config::ShowConfig;
use fireworks::constants::CONFIG_PATH;
use fireworks::graphics::PresentationPlugin;
use fireworks::simulation::SimulationPlugin;

fn main() {
    // Read before building the app: the window resolution comes from it.
    let config = ShowConfig::load_or_default(CONFIG_PATH);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: config.title.clone(),
            resolution: WindowResolution::new(config.canvas_width, config.canvas_height),
            // The canvas is sized once at startup.
            resizable: false,
            ..Default::default()
        }),
        ..Default::default()
    }))
    .add_plugins(SimulationPlugin::new(config))
    .add_plugins(PresentationPlugin);

    app.run();
}
