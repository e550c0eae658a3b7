//! Systems driving compass needles and heading readouts.
use bevy::prelude::*;

use crate::core::plugin::SimulationClock;

use super::{
    heading::CardinalDirection,
    resolve::body_label,
    tracker::{CompassReadout, HeadingTracker},
};

/// World rotation of a compass body.
///
/// Root bodies read their `Transform`, which is already current this frame;
/// parented bodies fall back to last frame's propagated `GlobalTransform`.
fn body_rotation(transform: &Transform, global: &GlobalTransform, parented: bool) -> Quat {
    if parented {
        global.rotation()
    } else {
        transform.rotation
    }
}

/// Advances every linked needle by the scaled frame delta.
#[allow(clippy::type_complexity)]
pub fn tick_compass_needles(
    clock: Res<SimulationClock>,
    mut bodies: Query<(
        Entity,
        &Transform,
        &GlobalTransform,
        Has<ChildOf>,
        &mut HeadingTracker,
        Option<&Name>,
    )>,
    mut needles: Query<&mut Transform, Without<HeadingTracker>>,
) {
    let dt = clock.last_scaled_delta().as_secs_f32();

    for (entity, transform, global, parented, mut tracker, name) in bodies.iter_mut() {
        let Some(needle) = tracker.needle() else {
            continue;
        };

        let Ok(mut needle_transform) = needles.get_mut(needle) else {
            warn!(
                "Compass {} lost its needle {:?}; needle updates paused until relinked",
                body_label(entity, name),
                needle
            );
            tracker.clear_needle();
            continue;
        };

        let body = body_rotation(transform, global, parented);
        if let Some(rotation) = tracker.tick(dt, body, needle_transform.rotation) {
            needle_transform.rotation = rotation;
        }
    }
}

/// Stores the current heading on each compass body.
pub fn update_heading_readouts(
    mut bodies: Query<(
        &Transform,
        &GlobalTransform,
        Has<ChildOf>,
        &mut HeadingTracker,
        &mut CompassReadout,
    )>,
) {
    for (transform, global, parented, mut tracker, mut readout) in bodies.iter_mut() {
        let heading = tracker.observe_heading(body_rotation(transform, global, parented));
        let next = CompassReadout {
            heading,
            cardinal: CardinalDirection::from_heading(heading),
        };
        // Avoid tripping change detection every frame.
        readout.set_if_neq(next);
    }
}

#[cfg(test)]
mod tests {
    use std::{f32::consts::FRAC_PI_2, time::Duration};

    use super::*;
    use crate::compass::{
        heading::NEEDLE_AXIS,
        smoothing::NeedleSmoothing,
        tracker::TrackerSettings,
    };

    fn app_with_clock(delta: Duration) -> App {
        let mut app = App::new();
        let mut clock = SimulationClock::default();
        clock.tick(delta);
        app.insert_resource(clock);
        app.add_systems(
            Update,
            (tick_compass_needles, update_heading_readouts).chain(),
        );
        app
    }

    fn spawn_compass(app: &mut App, body_rotation: Quat, settings: TrackerSettings) -> (Entity, Entity) {
        let needle = app.world_mut().spawn(Transform::default()).id();
        let body_transform = Transform::from_rotation(body_rotation);
        let body = app
            .world_mut()
            .spawn((
                body_transform,
                GlobalTransform::from(body_transform),
                HeadingTracker::with_needle(settings, needle),
            ))
            .id();
        (body, needle)
    }

    #[test]
    fn snap_points_needle_north() {
        let mut app = app_with_clock(Duration::from_millis(16));
        let body_rotation = Quat::from_rotation_y(-FRAC_PI_2);
        let (body, needle) = spawn_compass(
            &mut app,
            body_rotation,
            TrackerSettings {
                smoothing: NeedleSmoothing::Snap,
                ..Default::default()
            },
        );

        app.update();

        let needle_rotation = app.world().get::<Transform>(needle).expect("needle").rotation;
        let world_pointing = body_rotation * needle_rotation * NEEDLE_AXIS;
        assert!(world_pointing.distance(Vec3::Z) < 1.0e-4);

        let readout = app.world().get::<CompassReadout>(body).expect("readout");
        assert!((readout.heading - 90.0).abs() < 1.0e-3);
        assert_eq!(readout.cardinal, CardinalDirection::East);
    }

    #[test]
    fn smoothing_moves_needle_part_way() {
        let mut app = app_with_clock(Duration::from_millis(20));
        let (_, needle) = spawn_compass(
            &mut app,
            Quat::from_rotation_y(1.5),
            TrackerSettings::default(),
        );

        app.update();

        let rotation = app.world().get::<Transform>(needle).expect("needle").rotation;
        let target = Quat::from_rotation_y(-1.5);
        let moved = rotation.angle_between(Quat::IDENTITY);
        assert!(moved > 0.0);
        assert!(rotation.angle_between(target) < target.angle_between(Quat::IDENTITY));
    }

    #[test]
    fn despawned_needle_degrades_tracker() {
        let mut app = app_with_clock(Duration::from_millis(16));
        let (body, needle) = spawn_compass(&mut app, Quat::IDENTITY, TrackerSettings::default());
        app.world_mut().despawn(needle);

        app.update();

        let tracker = app.world().get::<HeadingTracker>(body).expect("tracker");
        assert!(!tracker.is_ready());
    }

    #[test]
    fn unconfigured_body_still_reports_heading() {
        let mut app = app_with_clock(Duration::from_millis(16));
        let transform = Transform::from_rotation(Quat::from_rotation_y(FRAC_PI_2));
        let body = app
            .world_mut()
            .spawn((
                transform,
                GlobalTransform::from(transform),
                HeadingTracker::new(TrackerSettings::default()),
            ))
            .id();

        app.update();

        let readout = app.world().get::<CompassReadout>(body).expect("readout");
        assert!((readout.heading - 270.0).abs() < 1.0e-3);
    }

    #[test]
    fn degraded_body_turned_vertical_keeps_last_heading() {
        let mut app = app_with_clock(Duration::from_millis(16));
        let transform = Transform::from_rotation(Quat::from_rotation_y(-FRAC_PI_2));
        let body = app
            .world_mut()
            .spawn((
                transform,
                GlobalTransform::from(transform),
                HeadingTracker::new(TrackerSettings::default()),
            ))
            .id();

        app.update();

        let straight_down = Quat::from_rotation_x(FRAC_PI_2);
        app.world_mut()
            .get_mut::<Transform>(body)
            .expect("body")
            .rotation = straight_down;
        app.update();

        let readout = app.world().get::<CompassReadout>(body).expect("readout");
        assert!((readout.heading - 90.0).abs() < 1.0e-3, "heading {}", readout.heading);
        assert_eq!(readout.cardinal, CardinalDirection::East);
    }
}
