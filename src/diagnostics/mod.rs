//! Diagnostics for compass setup and interaction lifecycle.
pub mod plugin;
pub mod report;
pub mod systems;

pub use plugin::DiagnosticsPlugin;
