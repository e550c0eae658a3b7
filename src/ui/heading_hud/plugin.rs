// src/ui/heading_hud/plugin.rs
//
// UiPlugin registers the heading HUD.

use bevy::prelude::*;

use crate::compass::CompassSet;

use super::systems::{spawn_heading_hud, update_heading_hud};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.add_systems(Startup, spawn_heading_hud)
            .add_systems(Update, update_heading_hud.after(CompassSet::Readout));
    }
}
