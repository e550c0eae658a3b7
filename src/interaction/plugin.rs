//! Interaction plugin wiring hover, grab, and carry systems.
use bevy::prelude::*;

use crate::{
    compass::CompassSet,
    interaction::{
        components::InteractionState,
        messages::{GrabEnded, GrabStarted, HoverEnded, HoverStarted},
        systems::{carry_held_objects, detect_hover, handle_grab_input},
    },
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionState>()
            .add_message::<HoverStarted>()
            .add_message::<HoverEnded>()
            .add_message::<GrabStarted>()
            .add_message::<GrabEnded>()
            .add_systems(
                Update,
                (
                    detect_hover,
                    handle_grab_input.after(detect_hover),
                    // Move the body before the needle reads its orientation.
                    carry_held_objects
                        .after(handle_grab_input)
                        .before(CompassSet::Tick),
                ),
            );
    }
}
