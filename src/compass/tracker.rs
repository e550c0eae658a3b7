//! HeadingTracker keeps a needle pointed at world north while its body moves.
use bevy::prelude::*;

use super::{
    heading::{
        heading_degrees, horizontal, local_north, needle_rotation_towards, CardinalDirection,
        DEFAULT_NORTH, NEEDLE_AXIS,
    },
    smoothing::NeedleSmoothing,
};

/// Per-compass tuning copied out of [`super::config::CompassSettings`] at spawn time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// World direction treated as north. Only its horizontal part matters.
    pub north: Vec3,
    pub smoothing: NeedleSmoothing,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            north: DEFAULT_NORTH,
            smoothing: NeedleSmoothing::default(),
        }
    }
}

/// Whether the tracker knows which entity is its needle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeedleLink {
    Ready(Entity),
    #[default]
    Unconfigured,
}

impl NeedleLink {
    pub fn entity(&self) -> Option<Entity> {
        match self {
            Self::Ready(entity) => Some(*entity),
            Self::Unconfigured => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Last computed heading of a compass body.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CompassReadout {
    pub heading: f32,
    pub cardinal: CardinalDirection,
}

/// Lives on the compass body. Drives the linked needle's local rotation.
#[derive(Component, Debug, Clone)]
#[require(CompassReadout)]
pub struct HeadingTracker {
    settings: TrackerSettings,
    needle: NeedleLink,
    last_direction: Vec3,
    last_heading: f32,
}

impl HeadingTracker {
    /// Creates a tracker whose needle is resolved later by child name.
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            needle: NeedleLink::Unconfigured,
            last_direction: NEEDLE_AXIS,
            last_heading: 0.0,
        }
    }

    pub fn with_needle(settings: TrackerSettings, needle: Entity) -> Self {
        let mut tracker = Self::new(settings);
        tracker.set_needle(needle);
        tracker
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn link(&self) -> NeedleLink {
        self.needle
    }

    pub fn needle(&self) -> Option<Entity> {
        self.needle.entity()
    }

    pub fn is_ready(&self) -> bool {
        self.needle.is_ready()
    }

    /// Links (or relinks) the needle, leaving the degraded state.
    pub fn set_needle(&mut self, needle: Entity) {
        self.needle = NeedleLink::Ready(needle);
    }

    /// Drops the needle link; ticks become no-ops until [`Self::set_needle`].
    pub fn clear_needle(&mut self) {
        self.needle = NeedleLink::Unconfigured;
    }

    /// Local rotation that would point the needle at north for this body rotation.
    ///
    /// When north projects straight up or down in the body frame the previous
    /// direction is reused, starting from [`NEEDLE_AXIS`].
    pub fn target_rotation(&mut self, body_rotation: Quat) -> Quat {
        let body_rotation = sanitize_rotation(body_rotation);
        if let Some(direction) = local_north(body_rotation, self.settings.north) {
            self.last_direction = direction;
        }
        needle_rotation_towards(self.last_direction)
    }

    /// Advances the needle by `dt` seconds.
    ///
    /// Returns the new local needle rotation, or `None` while no needle is linked.
    /// The heading fallback is refreshed even while no needle is linked.
    pub fn tick(&mut self, dt: f32, body_rotation: Quat, needle_rotation: Quat) -> Option<Quat> {
        self.observe_heading(body_rotation);
        if !self.needle.is_ready() {
            return None;
        }

        let target = self.target_rotation(body_rotation);
        let current = if is_usable(needle_rotation) {
            needle_rotation.normalize()
        } else {
            target
        };

        let next = self.settings.smoothing.apply(current, target, dt);
        Some(if is_usable(next) { next } else { target })
    }

    /// Heading of the body in degrees `[0, 360)`, independent of the needle.
    ///
    /// A body pointing straight up or down reports the last heading recorded by
    /// [`Self::observe_heading`] or [`Self::tick`], starting at 0.
    pub fn heading(&self, body_rotation: Quat) -> f32 {
        heading_degrees(sanitize_rotation(body_rotation), self.settings.north)
            .unwrap_or(self.last_heading)
    }

    /// Like [`Self::heading`], but remembers a well-defined result as the
    /// fallback for later degenerate orientations.
    pub fn observe_heading(&mut self, body_rotation: Quat) -> f32 {
        let heading = self.heading(body_rotation);
        self.last_heading = heading;
        heading
    }

    /// The configured north flattened onto the world XZ plane.
    pub fn horizontal_north(&self) -> Vec3 {
        horizontal(self.settings.north).unwrap_or(DEFAULT_NORTH)
    }
}

fn is_usable(rotation: Quat) -> bool {
    rotation.is_finite() && rotation.length_squared() > 1.0e-6
}

fn sanitize_rotation(rotation: Quat) -> Quat {
    if is_usable(rotation) {
        rotation.normalize()
    } else {
        Quat::IDENTITY
    }
}
