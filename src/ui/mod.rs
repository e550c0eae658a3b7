// src/ui/mod.rs
//
// UI module providing screen-space overlays.
//
// Current features:
// - Heading HUD (top-left compass readout and control hints)

pub mod heading_hud;

// Re-export the main plugin
pub use heading_hud::UiPlugin;
