//! Diagnostics plugin: startup setup report and interaction logging.
use bevy::prelude::*;

use crate::{
    compass::{config::CompassSettings, CompassSet},
    diagnostics::systems::{log_compass_setup, log_interaction_messages},
};

pub struct DiagnosticsPlugin;

impl Plugin for DiagnosticsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                log_compass_setup
                    .after(CompassSet::Resolve)
                    .run_if(run_once)
                    .run_if(|settings: Res<CompassSettings>| settings.debug.log_setup_report),
                log_interaction_messages
                    .run_if(|settings: Res<CompassSettings>| settings.debug.log_interactions),
            ),
        );
    }
}
