//! Interaction module - lets the player hover, grab, and carry objects such as the compass.

pub mod components;
pub mod messages;
pub mod plugin;
pub mod systems;

pub use plugin::InteractionPlugin;
