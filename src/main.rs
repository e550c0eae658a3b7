use bevy::prelude::*;

mod compass;
mod core;
mod diagnostics;
mod interaction;
mod ui;
mod world;

use crate::{
    compass::CompassPlugin, core::CorePlugin, diagnostics::DiagnosticsPlugin,
    interaction::InteractionPlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Wayfinder".to_string(),
                    ..default()
                }),
                ..default()
            }),
            CorePlugin::default(),
            CompassPlugin, // Inserts CompassSettings used by the world spawners
            InteractionPlugin,
            DiagnosticsPlugin,
            WorldPlugin,
            UiPlugin,
        ))
        .run();
}
