//! World module housing the demo scene and the player's fly camera.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
