//! Orientation math for compass bodies and needles.
//!
//! Bevy is right-handed with +Y up. The compass frame uses +Z as its pointing
//! axis, so the default north `(0, 0, 1)` lines up with an unrotated body and
//! headings grow clockwise when seen from above (east is -X for that north).
use std::fmt;

use bevy::prelude::*;

/// Axis a needle (and a body, for heading purposes) points along in its own frame.
pub const NEEDLE_AXIS: Vec3 = Vec3::Z;

/// Default world north.
pub const DEFAULT_NORTH: Vec3 = Vec3::Z;

/// Horizontal projections shorter than this are treated as degenerate.
pub const HORIZONTAL_EPSILON: f32 = 1.0e-4;

/// Drops the vertical component and normalizes, or `None` when nothing horizontal is left.
pub fn horizontal(direction: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    let length = flat.length();
    if !length.is_finite() || length < HORIZONTAL_EPSILON {
        return None;
    }
    Some(flat / length)
}

/// World north expressed in the body's frame and flattened onto the body's XZ plane.
pub fn local_north(body_rotation: Quat, north: Vec3) -> Option<Vec3> {
    horizontal(body_rotation.inverse() * north)
}

/// Rotation about +Y that turns [`NEEDLE_AXIS`] onto `direction`, keeping +Y as up.
///
/// `direction` is expected to be horizontal; any vertical component is ignored.
pub fn needle_rotation_towards(direction: Vec3) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

/// Heading of the body's pointing axis relative to `north`, in degrees `[0, 360)`.
///
/// Returns `None` when either the body points straight up/down or `north` is vertical.
pub fn heading_degrees(body_rotation: Quat, north: Vec3) -> Option<f32> {
    let forward = horizontal(body_rotation * NEEDLE_AXIS)?;
    let north = horizontal(north)?;

    // Positive when turning clockwise seen from above (about -Y).
    let clockwise = Vec3::Y.dot(forward.cross(north));
    let angle = clockwise.atan2(north.dot(forward)).to_degrees();
    Some(normalize_degrees(angle))
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Eight-point compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardinalDirection {
    #[default]
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CardinalDirection {
    const ROSE: [CardinalDirection; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Nearest rose point for a heading in degrees.
    pub fn from_heading(heading: f32) -> Self {
        let sector = ((normalize_degrees(heading) + 22.5) / 45.0).floor() as usize;
        Self::ROSE[sector % Self::ROSE.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }
}

impl fmt::Display for CardinalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1.0e-3
    }

    #[test]
    fn identity_body_faces_north() {
        let heading = heading_degrees(Quat::IDENTITY, DEFAULT_NORTH).expect("horizontal");
        assert_eq!(heading, 0.0);
    }

    #[test]
    fn clockwise_quarter_turn_reads_east() {
        // Clockwise seen from above is a negative turn about +Y.
        let body = Quat::from_rotation_y(-FRAC_PI_2);
        let heading = heading_degrees(body, DEFAULT_NORTH).expect("horizontal");
        assert!(approx(heading, 90.0), "heading was {heading}");

        let body = Quat::from_rotation_y(PI);
        let heading = heading_degrees(body, DEFAULT_NORTH).expect("horizontal");
        assert!(approx(heading, 180.0), "heading was {heading}");

        let body = Quat::from_rotation_y(FRAC_PI_2);
        let heading = heading_degrees(body, DEFAULT_NORTH).expect("horizontal");
        assert!(approx(heading, 270.0), "heading was {heading}");
    }

    #[test]
    fn heading_ignores_pitch_and_roll() {
        let yaw = Quat::from_rotation_y(-FRAC_PI_4);
        let tilted = yaw * Quat::from_rotation_x(0.6) * Quat::from_rotation_z(-0.4);
        let flat = heading_degrees(yaw, DEFAULT_NORTH).expect("horizontal");
        let pitched = heading_degrees(yaw * Quat::from_rotation_z(1.1), DEFAULT_NORTH)
            .expect("horizontal");
        assert!(approx(flat, 45.0));
        assert!(approx(pitched, 45.0));
        assert!(heading_degrees(tilted, DEFAULT_NORTH).is_some());
    }

    #[test]
    fn heading_stays_in_range() {
        for step in 0..720 {
            let yaw = step as f32 * 0.5_f32.to_radians();
            let body = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(0.3);
            let heading = heading_degrees(body, DEFAULT_NORTH).expect("horizontal");
            assert!((0.0..360.0).contains(&heading), "heading {heading} out of range");
        }
    }

    #[test]
    fn vertical_body_axis_has_no_heading() {
        let straight_down = Quat::from_rotation_x(FRAC_PI_2);
        assert!(heading_degrees(straight_down, DEFAULT_NORTH).is_none());
        assert!(heading_degrees(Quat::IDENTITY, Vec3::Y).is_none());
    }

    #[test]
    fn local_north_is_flat_and_unit() {
        let body = Quat::from_euler(EulerRot::YXZ, 1.2, 0.4, -0.3);
        let local = local_north(body, DEFAULT_NORTH).expect("horizontal");
        assert_eq!(local.y, 0.0);
        assert!(approx(local.length(), 1.0));
    }

    #[test]
    fn needle_rotation_points_along_direction() {
        let direction = Vec3::new(-1.0, 0.0, 1.0).normalize();
        let rotation = needle_rotation_towards(direction);
        let pointed = rotation * NEEDLE_AXIS;
        assert!(pointed.distance(direction) < 1.0e-5);
        assert!((rotation * Vec3::Y).distance(Vec3::Y) < 1.0e-5);
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert!(approx(normalize_degrees(-90.0), 270.0));
        assert!(approx(normalize_degrees(450.0), 90.0));
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-1.0e-7), 0.0);
    }

    #[test]
    fn cardinal_labels_follow_rose() {
        assert_eq!(CardinalDirection::from_heading(0.0), CardinalDirection::North);
        assert_eq!(CardinalDirection::from_heading(359.0), CardinalDirection::North);
        assert_eq!(CardinalDirection::from_heading(44.0), CardinalDirection::NorthEast);
        assert_eq!(CardinalDirection::from_heading(90.0), CardinalDirection::East);
        assert_eq!(CardinalDirection::from_heading(200.0), CardinalDirection::South);
        assert_eq!(CardinalDirection::from_heading(270.0).to_string(), "W");
    }
}
