// src/ui/heading_hud/systems.rs
//
// Systems for spawning and refreshing the heading HUD.

use bevy::prelude::*;

use crate::compass::tracker::{CompassReadout, HeadingTracker};
use crate::interaction::components::InteractionState;

use super::components::{HeadingHud, HeadingText, StatusText};

// Visual constants
const BACKGROUND_COLOR: Color = Color::srgba(0.08, 0.08, 0.1, 0.85);
const BORDER_COLOR: Color = Color::srgb(0.55, 0.45, 0.25);
const HEADING_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const STATUS_COLOR: Color = Color::srgb(0.8, 0.8, 0.82);
const HINT_TEXT: &str = "E grab/release | Z/X twist | R/F tilt | P pause | RMB look";

/// Spawn the HUD panel in the top-left corner.
pub fn spawn_heading_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                padding: UiRect::all(Val::Px(12.0)),
                border: UiRect::all(Val::Px(2.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            BorderColor::from(BORDER_COLOR),
            HeadingHud,
            Name::new("Heading HUD"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Heading ---"),
                TextFont {
                    font_size: 26.0,
                    ..default()
                },
                TextColor(HEADING_COLOR),
                HeadingText,
            ));
            parent.spawn((
                Text::new("No compass"),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(STATUS_COLOR),
                StatusText,
            ));
            parent.spawn((
                Text::new(HINT_TEXT),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(STATUS_COLOR),
            ));
        });
}

/// Refresh HUD text from the first compass in the scene.
pub fn update_heading_hud(
    compasses: Query<(Entity, &CompassReadout, &HeadingTracker)>,
    interaction: Option<Res<InteractionState>>,
    mut heading_text: Query<&mut Text, (With<HeadingText>, Without<StatusText>)>,
    mut status_text: Query<&mut Text, (With<StatusText>, Without<HeadingText>)>,
) {
    let Some((entity, readout, tracker)) = compasses.iter().next() else {
        return;
    };
    let carried = interaction.is_some_and(|state| state.held == Some(entity));

    let heading = format_heading(readout);
    for mut text in heading_text.iter_mut() {
        if text.0 != heading {
            text.0 = heading.clone();
        }
    }

    let status = format_status(tracker.is_ready(), carried);
    for mut text in status_text.iter_mut() {
        if text.0 != status {
            text.0 = status.clone();
        }
    }
}

/// Render a readout as e.g. `Heading 087° E`.
pub fn format_heading(readout: &CompassReadout) -> String {
    // Round first so 359.6 shows as 000 rather than 360.
    let degrees = readout.heading.round() as u32 % 360;
    format!("Heading {:03}° {}", degrees, readout.cardinal)
}

fn format_status(needle_linked: bool, carried: bool) -> String {
    let needle = if needle_linked {
        "needle linked"
    } else {
        "needle missing"
    };
    let hand = if carried { "in hand" } else { "on pedestal" };
    format!("Compass {} | {}", hand, needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compass::heading::CardinalDirection;

    #[test]
    fn heading_is_zero_padded() {
        let readout = CompassReadout {
            heading: 87.4,
            cardinal: CardinalDirection::East,
        };
        assert_eq!(format_heading(&readout), "Heading 087° E");
    }

    #[test]
    fn heading_rounds_wrap_to_zero() {
        let readout = CompassReadout {
            heading: 359.6,
            cardinal: CardinalDirection::North,
        };
        assert_eq!(format_heading(&readout), "Heading 000° N");
    }

    #[test]
    fn status_mentions_needle_state() {
        assert_eq!(
            format_status(false, true),
            "Compass in hand | needle missing"
        );
    }
}
