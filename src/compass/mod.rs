//! Compass module: heading math, needle smoothing, and the HeadingTracker component.
pub mod config;
pub mod heading;
pub mod plugin;
pub mod resolve;
pub mod smoothing;
pub mod systems;
pub mod tracker;

pub use plugin::{CompassPlugin, CompassSet};
