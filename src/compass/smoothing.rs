//! Strategies for easing a needle toward its target rotation.
use bevy::prelude::*;

pub const DEFAULT_ROTATION_SPEED: f32 = 10.0;

/// How the needle catches up with its target each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeedleSmoothing {
    /// Jump straight to the target.
    Snap,
    /// Slerp by `dt * speed`, clamped to `[0, 1]`.
    ///
    /// Frame-rate dependent: the same speed settles faster at low frame rates.
    RateSlerp { speed: f32 },
    /// Slerp by `1 - exp(-speed * dt)`, which is frame-rate independent.
    ExponentialDecay { speed: f32 },
}

impl NeedleSmoothing {
    /// Fraction of the remaining arc covered this tick, always in `[0, 1]`.
    pub fn blend_factor(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return match self {
                Self::Snap => 1.0,
                _ => 0.0,
            };
        }

        let factor = match *self {
            Self::Snap => 1.0,
            Self::RateSlerp { speed } => dt * speed,
            Self::ExponentialDecay { speed } => 1.0 - (-speed * dt).exp(),
        };

        if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, 1.0)
        }
    }

    /// Blends `current` toward `target` for a tick of `dt` seconds.
    pub fn apply(&self, current: Quat, target: Quat, dt: f32) -> Quat {
        let factor = self.blend_factor(dt);
        if factor >= 1.0 {
            return target;
        }
        if factor <= 0.0 {
            return current;
        }
        current.slerp(target, factor).normalize()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Snap => "snap",
            Self::RateSlerp { .. } => "rate_slerp",
            Self::ExponentialDecay { .. } => "exponential_decay",
        }
    }

    /// Rate used by the blending strategies, `None` for [`NeedleSmoothing::Snap`].
    pub fn speed(&self) -> Option<f32> {
        match *self {
            Self::Snap => None,
            Self::RateSlerp { speed } | Self::ExponentialDecay { speed } => Some(speed),
        }
    }
}

impl Default for NeedleSmoothing {
    fn default() -> Self {
        Self::RateSlerp {
            speed: DEFAULT_ROTATION_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_factor_is_clamped() {
        let smoothing = NeedleSmoothing::RateSlerp { speed: 10.0 };
        assert!((smoothing.blend_factor(0.016) - 0.16).abs() < 1.0e-6);
        assert_eq!(smoothing.blend_factor(0.5), 1.0);
        assert_eq!(smoothing.blend_factor(-0.1), 0.0);
        assert_eq!(smoothing.blend_factor(f32::NAN), 0.0);
    }

    #[test]
    fn exponential_factor_stays_below_one() {
        let smoothing = NeedleSmoothing::ExponentialDecay { speed: 10.0 };
        let factor = smoothing.blend_factor(0.016);
        assert!(factor > 0.0 && factor < 1.0);
        assert!(smoothing.blend_factor(100.0) <= 1.0);
    }

    #[test]
    fn snap_returns_target() {
        let current = Quat::from_rotation_y(0.3);
        let target = Quat::from_rotation_y(2.0);
        assert_eq!(NeedleSmoothing::Snap.apply(current, target, 0.016), target);
    }

    #[test]
    fn partial_blend_moves_part_way() {
        let current = Quat::IDENTITY;
        let target = Quat::from_rotation_y(1.0);
        let smoothing = NeedleSmoothing::RateSlerp { speed: 5.0 };
        let blended = smoothing.apply(current, target, 0.1);
        let remaining = blended.angle_between(target);
        assert!((remaining - 0.5).abs() < 1.0e-3, "remaining {remaining}");
    }

    #[test]
    fn names_match_config_keys() {
        assert_eq!(NeedleSmoothing::default().name(), "rate_slerp");
        assert_eq!(NeedleSmoothing::Snap.speed(), None);
        assert_eq!(
            NeedleSmoothing::ExponentialDecay { speed: 3.0 }.speed(),
            Some(3.0)
        );
    }
}
