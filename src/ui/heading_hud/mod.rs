// src/ui/heading_hud/mod.rs
//
// Heading HUD module showing the carried compass heading in screen space.

pub mod components;
pub mod plugin;
pub mod systems;

// Re-export main types
pub use plugin::UiPlugin;
