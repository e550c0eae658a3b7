//! Interaction lifecycle messages, consumed by the diagnostics logger.
use bevy::{ecs::message::Message, prelude::*};

#[derive(Message, Debug, Clone)]
pub struct HoverStarted {
    pub target: Entity,
    pub interactor: String,
}

#[derive(Message, Debug, Clone)]
pub struct HoverEnded {
    pub target: Entity,
    pub interactor: String,
}

#[derive(Message, Debug, Clone)]
pub struct GrabStarted {
    pub target: Entity,
    pub interactor: String,
}

#[derive(Message, Debug, Clone)]
pub struct GrabEnded {
    pub target: Entity,
    pub interactor: String,
}
