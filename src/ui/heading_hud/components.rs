// src/ui/heading_hud/components.rs
//
// Marker components for the heading HUD text nodes.

use bevy::prelude::*;

/// Root node of the HUD panel.
#[derive(Component, Debug)]
pub struct HeadingHud;

/// Text node showing the heading in degrees and its cardinal label.
#[derive(Component, Debug)]
pub struct HeadingText;

/// Text node showing needle link and carry status.
#[derive(Component, Debug)]
pub struct StatusText;
