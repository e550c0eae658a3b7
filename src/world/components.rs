//! Components used by the demo world.
use bevy::prelude::*;

/// The player's camera, steered with the mouse and WASD.
#[derive(Component)]
pub struct FlyCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub look_sensitivity: f32,
}

impl FlyCamera {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            move_speed: 4.0,
            look_sensitivity: 0.2,
        }
    }
}

/// Marker for the landmark placed far along world north.
#[derive(Component, Default)]
pub struct NorthMarker;
