use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::{
    heading::{horizontal, DEFAULT_NORTH},
    smoothing::{NeedleSmoothing, DEFAULT_ROTATION_SPEED},
    tracker::TrackerSettings,
};

const CONFIG_PATH: &str = "config/compass.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawCompassConfig {
    #[serde(default)]
    needle: RawNeedle,
    #[serde(default)]
    north: RawNorth,
    #[serde(default)]
    debug: RawDebug,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawNeedle {
    smooth_rotation: bool,
    strategy: String,
    rotation_speed: f32,
}

impl Default for RawNeedle {
    fn default() -> Self {
        Self {
            smooth_rotation: true,
            strategy: "rate_slerp".to_string(),
            rotation_speed: DEFAULT_ROTATION_SPEED,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawNorth {
    direction: [f32; 3],
}

impl Default for RawNorth {
    fn default() -> Self {
        Self {
            direction: [DEFAULT_NORTH.x, DEFAULT_NORTH.y, DEFAULT_NORTH.z],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDebug {
    log_interactions: bool,
    log_setup_report: bool,
}

impl Default for RawDebug {
    fn default() -> Self {
        Self {
            log_interactions: true,
            log_setup_report: true,
        }
    }
}

/// Runtime configuration derived from `config/compass.toml`.
#[derive(Resource, Debug, Clone)]
pub struct CompassSettings {
    pub tracker: TrackerSettings,
    pub debug: CompassDebugSettings,
}

#[derive(Debug, Clone)]
pub struct CompassDebugSettings {
    pub log_interactions: bool,
    pub log_setup_report: bool,
}

impl CompassSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match Self::parse(&raw) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawCompassConfig>(raw).map(Into::into)
    }
}

impl Default for CompassSettings {
    fn default() -> Self {
        RawCompassConfig::default().into()
    }
}

impl From<RawCompassConfig> for CompassSettings {
    fn from(value: RawCompassConfig) -> Self {
        let needle = value.needle;

        let speed = if needle.rotation_speed.is_finite() && needle.rotation_speed > 0.0 {
            needle.rotation_speed
        } else {
            warn!(
                "Compass rotation_speed {} is not a positive number, using {}",
                needle.rotation_speed, DEFAULT_ROTATION_SPEED
            );
            DEFAULT_ROTATION_SPEED
        };

        let smoothing = if !needle.smooth_rotation {
            NeedleSmoothing::Snap
        } else {
            match needle.strategy.trim().to_ascii_lowercase().as_str() {
                "rate_slerp" => NeedleSmoothing::RateSlerp { speed },
                "exponential_decay" => NeedleSmoothing::ExponentialDecay { speed },
                other => {
                    warn!("Unknown needle strategy '{}', using rate_slerp", other);
                    NeedleSmoothing::RateSlerp { speed }
                }
            }
        };

        let [x, y, z] = value.north.direction;
        let north = match horizontal(Vec3::new(x, y, z)) {
            Some(north) => north,
            None => {
                warn!(
                    "North direction [{}, {}, {}] has no horizontal component, using +Z",
                    x, y, z
                );
                DEFAULT_NORTH
            }
        };

        Self {
            tracker: TrackerSettings { north, smoothing },
            debug: CompassDebugSettings {
                log_interactions: value.debug.log_interactions,
                log_setup_report: value.debug.log_setup_report,
            },
        }
    }
}
