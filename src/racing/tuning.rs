//! Car models and handling constants

use serde::{Deserialize, Serialize};

use crate::ms_to_ticks;

/// Fraction of the old velocity kept each tick while chasing the heading
pub const DRIFT_FACTOR: f32 = 0.65;
/// Per-tick decay applied to a speed above the current ceiling
pub const SPEED_DECAY_STEP: f32 = 0.1;
/// Speeds below this snap to zero
pub const STOP_EPSILON: f32 = 0.05;
/// Minimum speed before steering has any effect
pub const STEER_MIN_SPEED: f32 = 0.1;
/// Max-speed multiplier while boosting
pub const BOOST_SPEED_FACTOR: f32 = 1.5;
/// Throttle multiplier while boosting
pub const BOOST_POWER_FACTOR: f32 = 1.8;
/// Nitro capacity
pub const NITRO_MAX: f32 = 100.0;
/// Nitro burned per boosted tick
pub const NITRO_DRAIN: f32 = 1.5;
/// Nitro regained per unboosted tick
pub const NITRO_REGEN: f32 = 0.08;
/// Boost pad effect duration (ticks)
pub const PAD_BOOST_TICKS: u32 = ms_to_ticks(1000);
/// Nitro granted by a boost pad
pub const PAD_NITRO_BONUS: f32 = 20.0;

/// Throttle values for the player's controls
pub const THROTTLE_FORWARD: f32 = 1.0;
pub const THROTTLE_REVERSE: f32 = -0.5;
pub const THROTTLE_HANDBRAKE: f32 = -1.2;

/// Wall bounce: speed and velocity multipliers
pub const WALL_SPEED_BOUNCE: f32 = -0.5;
pub const WALL_VELOCITY_BOUNCE: f32 = -0.4;

/// Car-to-car contact distance
pub const CAR_CONTACT_DISTANCE: f32 = 28.0;
/// Penetration divisor for the repulsion impulse
pub const CAR_PUSH_DIVISOR: f32 = 1.5;
/// Speed kept by both cars after contact
pub const CAR_CONTACT_SPEED_KEEP: f32 = 0.6;

/// Slip (target minus actual velocity) that leaves skid marks
pub const SKID_SLIP: f32 = 2.0;
/// Minimum speed for skid marks
pub const SKID_MIN_SPEED: f32 = 3.0;
/// Skid mark lifetime (ticks)
pub const SKID_LIFE: u32 = 180;

/// Car body size (for rendering)
pub const CAR_WIDTH: f32 = 22.0;
pub const CAR_HEIGHT: f32 = 44.0;

/// Selectable car models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CarModel {
    #[default]
    Speedster,
    Drifter,
    Tank,
    Cobra,
    Truck,
    Ghost,
}

/// Handling numbers for one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    pub accel: f32,
    pub max_speed: f32,
    pub turn_speed: f32,
    pub brake: f32,
    pub friction: f32,
}

/// Menu text for one model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub title: &'static str,
    pub description: &'static str,
}

const MODEL_TABLE: [(ModelStats, ModelInfo); 6] = [
    (
        ModelStats {
            accel: 0.22,
            max_speed: 5.2,
            turn_speed: 0.038,
            brake: 0.50,
            friction: 0.985,
        },
        ModelInfo {
            title: "The Bolt",
            description: "Extreme top speed but heavy handling for the straights.",
        },
    ),
    (
        ModelStats {
            accel: 0.19,
            max_speed: 4.6,
            turn_speed: 0.052,
            brake: 0.55,
            friction: 0.982,
        },
        ModelInfo {
            title: "Slide King",
            description: "Agile and responsive. Perfect for technical corners.",
        },
    ),
    (
        ModelStats {
            accel: 0.14,
            max_speed: 4.0,
            turn_speed: 0.035,
            brake: 0.75,
            friction: 0.990,
        },
        ModelInfo {
            title: "Iron Wall",
            description: "Unshakable stability. Heavy braking power for aggressive lines.",
        },
    ),
    (
        ModelStats {
            accel: 0.25,
            max_speed: 4.8,
            turn_speed: 0.045,
            brake: 0.52,
            friction: 0.983,
        },
        ModelInfo {
            title: "Viper Strike",
            description: "Quick off the mark with balanced top speed and handling.",
        },
    ),
    (
        ModelStats {
            accel: 0.12,
            max_speed: 3.8,
            turn_speed: 0.032,
            brake: 0.85,
            friction: 0.993,
        },
        ModelInfo {
            title: "Behemoth",
            description: "Maximum grip and weight. Slow start but unstoppable force.",
        },
    ),
    (
        ModelStats {
            accel: 0.21,
            max_speed: 5.8,
            turn_speed: 0.032,
            brake: 0.40,
            friction: 0.987,
        },
        ModelInfo {
            title: "Phantom",
            description: "Pure speed machine. High skill required to control the drift.",
        },
    ),
];

/// Best values across the table, used to normalize menu stat bars
const TOP_SPEED: f32 = 5.8;
const TOP_ACCEL: f32 = 0.25;
const TOP_HANDLING: f32 = 0.052;

impl CarModel {
    pub const ALL: [CarModel; 6] = [
        CarModel::Speedster,
        CarModel::Drifter,
        CarModel::Tank,
        CarModel::Cobra,
        CarModel::Truck,
        CarModel::Ghost,
    ];

    /// Look up a model by its menu key; unknown keys fall back to Speedster
    pub fn from_key(key: &str) -> Self {
        match key.to_ascii_uppercase().as_str() {
            "SPEEDSTER" => CarModel::Speedster,
            "DRIFTER" => CarModel::Drifter,
            "TANK" => CarModel::Tank,
            "COBRA" => CarModel::Cobra,
            "TRUCK" => CarModel::Truck,
            "GHOST" => CarModel::Ghost,
            _ => {
                log::warn!("Unknown car model '{}', using Speedster", key);
                CarModel::Speedster
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CarModel::Speedster => "SPEEDSTER",
            CarModel::Drifter => "DRIFTER",
            CarModel::Tank => "TANK",
            CarModel::Cobra => "COBRA",
            CarModel::Truck => "TRUCK",
            CarModel::Ghost => "GHOST",
        }
    }

    pub fn stats(&self) -> ModelStats {
        MODEL_TABLE[*self as usize].0
    }

    pub fn info(&self) -> ModelInfo {
        MODEL_TABLE[*self as usize].1
    }

    /// Menu stat bars as fractions of the best model: (speed, accel, handling)
    pub fn stat_bars(&self) -> (f32, f32, f32) {
        let s = self.stats();
        (
            s.max_speed / TOP_SPEED,
            s.accel / TOP_ACCEL,
            s.turn_speed / TOP_HANDLING,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_falls_back() {
        assert_eq!(CarModel::from_key("hovercraft"), CarModel::Speedster);
        assert_eq!(CarModel::from_key("ghost"), CarModel::Ghost);
    }

    #[test]
    fn test_key_round_trip() {
        for model in CarModel::ALL {
            assert_eq!(CarModel::from_key(model.key()), model);
        }
    }

    #[test]
    fn test_table_matches_models() {
        let tank = CarModel::Tank.stats();
        assert_eq!(tank.max_speed, 4.0);
        assert_eq!(tank.brake, 0.75);
        assert_eq!(CarModel::Truck.info().title, "Behemoth");
    }

    #[test]
    fn test_stat_bars_peak_at_one() {
        let (speed, _, _) = CarModel::Ghost.stat_bars();
        assert!((speed - 1.0).abs() < 1e-6);
        let (_, accel, _) = CarModel::Cobra.stat_bars();
        assert!((accel - 1.0).abs() < 1e-6);
        let (_, _, handling) = CarModel::Drifter.stat_bars();
        assert!((handling - 1.0).abs() < 1e-6);
    }
}
