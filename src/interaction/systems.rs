//! Systems for hovering, grabbing, and carrying objects with the player camera.
use bevy::{
    ecs::message::MessageWriter,
    log::{debug, info},
    prelude::*,
};

use crate::compass::heading::{horizontal, needle_rotation_towards};
use crate::interaction::{
    components::{Grabbable, InteractionState, Player},
    messages::{GrabEnded, GrabStarted, HoverEnded, HoverStarted},
};

/// Radians per second applied by the twist keys while carrying.
const TWIST_SPEED: f32 = 1.5;

const DEFAULT_INTERACTOR_NAME: &str = "Player";

fn interactor_name(name: Option<&Name>) -> String {
    name.map(|name| name.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_INTERACTOR_NAME.to_string())
}

/// Finds the nearest free grabbable within range and reports hover changes.
pub fn detect_hover(
    player_query: Query<(&Transform, Option<&Name>), With<Player>>,
    grabbables: Query<(Entity, &Transform, &Grabbable), Without<Player>>,
    mut state: ResMut<InteractionState>,
    mut started: MessageWriter<HoverStarted>,
    mut ended: MessageWriter<HoverEnded>,
) {
    let Ok((player_transform, player_name)) = player_query.single() else {
        if let Some(previous) = state.hovered.take() {
            ended.write(HoverEnded {
                target: previous,
                interactor: DEFAULT_INTERACTOR_NAME.to_string(),
            });
        }
        return;
    };
    let player_pos = player_transform.translation;

    let mut nearest: Option<(Entity, f32)> = None;
    for (entity, transform, grabbable) in grabbables.iter() {
        if state.held == Some(entity) {
            continue;
        }
        let distance = player_pos.distance(transform.translation);
        if distance > grabbable.hover_range {
            continue;
        }
        match nearest {
            Some((_, best)) if best <= distance => {}
            _ => nearest = Some((entity, distance)),
        }
    }

    let current = nearest.map(|(entity, _)| entity);
    if current == state.hovered {
        return;
    }

    let interactor = interactor_name(player_name);
    if let Some(previous) = state.hovered {
        ended.write(HoverEnded {
            target: previous,
            interactor: interactor.clone(),
        });
    }
    if let Some(entity) = current {
        started.write(HoverStarted {
            target: entity,
            interactor,
        });
    }
    state.hovered = current;
}

/// E picks up the hovered object, or drops the carried one.
pub fn handle_grab_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    player_query: Query<Option<&Name>, With<Player>>,
    mut state: ResMut<InteractionState>,
    mut started: MessageWriter<GrabStarted>,
    mut ended: MessageWriter<GrabEnded>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }

    let interactor = interactor_name(player_query.single().ok().flatten());

    if let Some(held) = state.held.take() {
        ended.write(GrabEnded {
            target: held,
            interactor,
        });
        return;
    }

    let Some(hovered) = state.hovered else {
        debug!("Player pressed E but nothing is in reach");
        return;
    };

    state.held = Some(hovered);
    state.twist = Quat::IDENTITY;
    started.write(GrabStarted {
        target: hovered,
        interactor,
    });
}

/// Keeps the carried object in front of the player and applies twist input.
pub fn carry_held_objects(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    player_query: Query<&Transform, With<Player>>,
    mut grabbables: Query<(&mut Transform, &Grabbable), Without<Player>>,
    mut state: ResMut<InteractionState>,
) {
    let Some(held) = state.held else {
        return;
    };
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let Ok((mut transform, grabbable)) = grabbables.get_mut(held) else {
        info!("Carried object {:?} disappeared; dropping it", held);
        state.held = None;
        return;
    };

    let step = TWIST_SPEED * time.delta_secs();
    let mut yaw = 0.0;
    let mut pitch = 0.0;
    if keyboard.pressed(KeyCode::KeyZ) {
        yaw += step;
    }
    if keyboard.pressed(KeyCode::KeyX) {
        yaw -= step;
    }
    if keyboard.pressed(KeyCode::KeyR) {
        pitch -= step;
    }
    if keyboard.pressed(KeyCode::KeyF) {
        pitch += step;
    }
    if yaw != 0.0 || pitch != 0.0 {
        state.twist =
            (state.twist * Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)).normalize();
    }

    transform.translation =
        player_transform.translation + player_transform.rotation * grabbable.hold_offset;

    // Carry level, facing where the player looks; keep the last facing when looking straight down.
    if let Some(facing) = horizontal(player_transform.forward().as_vec3()) {
        transform.rotation = needle_rotation_towards(facing) * state.twist;
    }
}
