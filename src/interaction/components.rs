//! Components and resources for picking up and carrying objects.
use bevy::prelude::*;

/// Marker for the interactor entity (the player's camera, standing in for a hand).
#[derive(Component, Debug)]
pub struct Player;

/// Something the player can hover over and carry.
#[derive(Component, Debug, Clone)]
pub struct Grabbable {
    /// Maximum distance (in world units) at which the player hovers this object.
    pub hover_range: f32,
    /// Where the object sits relative to the player's camera while carried.
    pub hold_offset: Vec3,
}

impl Default for Grabbable {
    fn default() -> Self {
        Self {
            hover_range: 2.5,
            hold_offset: Vec3::new(0.3, -0.35, -0.9),
        }
    }
}

/// Resource tracking which grabbable the player hovers and which one is carried.
#[derive(Resource, Debug)]
pub struct InteractionState {
    pub hovered: Option<Entity>,
    pub held: Option<Entity>,
    /// Extra rotation the player applied to the held object, relative to a level carry.
    pub twist: Quat,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            hovered: None,
            held: None,
            twist: Quat::IDENTITY,
        }
    }
}
