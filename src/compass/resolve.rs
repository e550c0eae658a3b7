//! Resolves a compass body's needle by looking for a child named [`NEEDLE_NAME`].
use std::fmt;

use bevy::prelude::*;

use super::tracker::HeadingTracker;

/// Conventional name of the needle child entity.
pub const NEEDLE_NAME: &str = "Needle";

/// Raised when a compass body has no needle linked and no child called [`NEEDLE_NAME`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeedleLookupError {
    pub body: String,
}

impl NeedleLookupError {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl fmt::Display for NeedleLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Needle not linked and no child named '{}' found on {}; link one with HeadingTracker::set_needle",
            NEEDLE_NAME, self.body
        )
    }
}

impl std::error::Error for NeedleLookupError {}

/// Finds the first direct child named [`NEEDLE_NAME`].
pub fn find_needle(
    body_label: &str,
    children: Option<&Children>,
    names: &Query<&Name>,
) -> Result<Entity, NeedleLookupError> {
    let Some(children) = children else {
        return Err(NeedleLookupError::new(body_label));
    };

    let kids: &[Entity] = children;
    kids.iter()
        .copied()
        .find(|child| {
            names
                .get(*child)
                .is_ok_and(|name| name.as_str() == NEEDLE_NAME)
        })
        .ok_or_else(|| NeedleLookupError::new(body_label))
}

/// Trackers inserted since the last run.
pub type AddedTrackers<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut HeadingTracker,
        Option<&'static Name>,
        Option<&'static Children>,
    ),
    Added<HeadingTracker>,
>;

/// Links newly added trackers to their needle child, or logs why they stay degraded.
///
/// Each tracker is looked at once, on the first run after it is inserted, so a
/// missing needle is reported a single time. Later fixes go through
/// [`HeadingTracker::set_needle`].
pub fn resolve_needles(mut bodies: AddedTrackers, names: Query<&Name>) {
    link_added_needles(&mut bodies, &names);
}

/// Returns how many trackers needed a lookup on this run.
pub fn link_added_needles(bodies: &mut AddedTrackers, names: &Query<&Name>) -> usize {
    let mut lookups = 0;
    for (entity, mut tracker, name, children) in bodies.iter_mut() {
        if tracker.is_ready() {
            continue;
        }

        lookups += 1;
        let label = body_label(entity, name);
        match find_needle(&label, children, names) {
            Ok(needle) => {
                tracker.set_needle(needle);
                debug!("Compass {} linked to needle {:?}", label, needle);
            }
            Err(err) => error!("{}", err),
        }
    }
    lookups
}

pub(crate) fn body_label(entity: Entity, name: Option<&Name>) -> String {
    name.map(|name| name.as_str().to_string())
        .unwrap_or_else(|| format!("{:?}", entity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compass::tracker::TrackerSettings;

    #[test]
    fn links_child_named_needle() {
        let mut app = App::new();
        app.add_systems(Update, resolve_needles);

        let mut needle = None;
        let body = app
            .world_mut()
            .spawn((
                Name::new("Compass"),
                HeadingTracker::new(TrackerSettings::default()),
            ))
            .with_children(|parent| {
                parent.spawn(Name::new("Bezel"));
                needle = Some(parent.spawn(Name::new(NEEDLE_NAME)).id());
            })
            .id();

        app.update();

        let tracker = app.world().get::<HeadingTracker>(body).expect("tracker");
        assert_eq!(tracker.needle(), needle);
    }

    fn lookup_count_system(mut bodies: AddedTrackers, names: Query<&Name>) -> usize {
        link_added_needles(&mut bodies, &names)
    }

    #[test]
    fn missing_needle_leaves_tracker_degraded() {
        let mut app = App::new();
        app.add_systems(Update, resolve_needles);

        let body = app
            .world_mut()
            .spawn((
                Name::new("Compass"),
                HeadingTracker::new(TrackerSettings::default()),
            ))
            .with_children(|parent| {
                parent.spawn(Name::new("Arrow"));
            })
            .id();

        app.update();
        app.update();

        let tracker = app.world().get::<HeadingTracker>(body).expect("tracker");
        assert!(!tracker.is_ready());
    }

    #[test]
    fn missing_needle_is_looked_up_once() {
        let mut world = World::new();
        world
            .spawn((
                Name::new("Compass"),
                HeadingTracker::new(TrackerSettings::default()),
            ))
            .with_children(|parent| {
                parent.spawn(Name::new("Arrow"));
            });
        let system = world.register_system(lookup_count_system);

        assert_eq!(world.run_system(system).expect("system runs"), 1);
        assert_eq!(world.run_system(system).expect("system runs"), 0);
        assert_eq!(world.run_system(system).expect("system runs"), 0);
    }

    #[test]
    fn explicit_needle_is_kept() {
        let mut app = App::new();
        app.add_systems(Update, resolve_needles);

        let explicit = app.world_mut().spawn(Name::new("Pointer")).id();
        let body = app
            .world_mut()
            .spawn(HeadingTracker::with_needle(
                TrackerSettings::default(),
                explicit,
            ))
            .with_children(|parent| {
                parent.spawn(Name::new(NEEDLE_NAME));
            })
            .id();

        app.update();

        let tracker = app.world().get::<HeadingTracker>(body).expect("tracker");
        assert_eq!(tracker.needle(), Some(explicit));
    }

    #[test]
    fn error_message_names_body() {
        let err = NeedleLookupError::new("Brass Compass");
        let message = err.to_string();
        assert!(message.contains("Brass Compass"));
        assert!(message.contains(NEEDLE_NAME));
    }
}
