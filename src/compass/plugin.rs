//! CompassPlugin wires needle resolution, needle ticking, and heading readouts.
use bevy::prelude::*;
#[cfg(feature = "compass_debug")]
use bevy::time::TimerMode;

use super::{
    config::CompassSettings,
    resolve::resolve_needles,
    systems::{tick_compass_needles, update_heading_readouts},
};
#[cfg(feature = "compass_debug")]
use super::tracker::{CompassReadout, HeadingTracker};

/// Ordering labels other plugins can hook onto.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassSet {
    Resolve,
    Tick,
    Readout,
}

#[cfg(feature = "compass_debug")]
#[derive(Resource)]
struct NeedleDebugTimer {
    timer: Timer,
}

#[cfg(feature = "compass_debug")]
impl Default for NeedleDebugTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

pub struct CompassPlugin;

impl Plugin for CompassPlugin {
    fn build(&self, app: &mut App) {
        let settings = CompassSettings::load_or_default();
        info!(
            "Compass configured: north ({:.2}, {:.2}), needle smoothing {} (speed {})",
            settings.tracker.north.x,
            settings.tracker.north.z,
            settings.tracker.smoothing.name(),
            settings
                .tracker
                .smoothing
                .speed()
                .map(|speed| format!("{:.2}", speed))
                .unwrap_or_else(|| "n/a".to_string()),
        );

        app.insert_resource(settings)
            .configure_sets(
                Update,
                (CompassSet::Resolve, CompassSet::Tick, CompassSet::Readout).chain(),
            )
            .add_systems(
                Update,
                (
                    resolve_needles.in_set(CompassSet::Resolve),
                    tick_compass_needles.in_set(CompassSet::Tick),
                    update_heading_readouts.in_set(CompassSet::Readout),
                ),
            );

        #[cfg(feature = "compass_debug")]
        {
            app.insert_resource(NeedleDebugTimer::default())
                .add_systems(Update, log_needle_error.after(CompassSet::Tick));
        }
    }
}

#[cfg(feature = "compass_debug")]
fn log_needle_error(
    mut timer: ResMut<NeedleDebugTimer>,
    time: Res<Time>,
    bodies: Query<(Entity, &GlobalTransform, &HeadingTracker, &CompassReadout)>,
    needles: Query<&GlobalTransform, Without<HeadingTracker>>,
) {
    use super::heading::{horizontal, NEEDLE_AXIS};

    if !timer.timer.tick(time.delta()).just_finished() {
        return;
    }

    for (entity, global, tracker, readout) in bodies.iter() {
        let Some(needle) = tracker.needle().and_then(|needle| needles.get(needle).ok()) else {
            debug!(target: "compass_debug", "{:?}: needle unlinked", entity);
            continue;
        };
        let pointing = horizontal(needle.rotation() * NEEDLE_AXIS);
        let error = pointing
            .map(|pointing| pointing.angle_between(tracker.horizontal_north()).to_degrees())
            .unwrap_or(f32::NAN);
        info!(
            target: "compass_debug",
            "{:?}: heading {:.1} ({}) | needle off north by {:.2} deg | body up {:?}",
            entity,
            readout.heading,
            readout.cardinal,
            error,
            global.up(),
        );
    }
}
