//! Shooter constants and the enemy / power-up tables

use serde::{Deserialize, Serialize};

use crate::ms_to_ticks;
use crate::render::Color;

pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

pub const PLAYER_WIDTH: f32 = 30.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
pub const PLAYER_MAX_HP: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 6.0;
/// Highest point the player may fly to
pub const PLAYER_MIN_Y: f32 = 60.0;
pub const MAX_SHIELD: f32 = 100.0;
pub const MAX_AMMO: u32 = 100;
/// Ticks between shots (halved by rapid fire)
pub const FIRE_COOLDOWN: u32 = 8;
pub const SHOTGUN_COOLDOWN: u32 = 25;
pub const SHOT_SPEED: f32 = 6.0;
pub const SHOT_DAMAGE: f32 = 15.0;
pub const SHOTGUN_DAMAGE: f32 = 20.0;
/// Pellets per shotgun blast, fanned 15 degrees apart
pub const SHOTGUN_PELLETS: i32 = 9;

pub const PROJECTILE_WIDTH: f32 = 4.0;
pub const PROJECTILE_HEIGHT: f32 = 12.0;
pub const ENEMY_SHOT_SPEED: f32 = 3.0;

pub const POWERUP_SIZE: f32 = 20.0;
pub const POWERUP_FALL_SPEED: f32 = 2.0;
pub const POWERUP_SPIN: f32 = 0.05;
/// Chance that a destroyed enemy drops a power-up
pub const DROP_CHANCE: f64 = 0.15;
/// Ticks between ammo crates
pub const AMMO_CRATE_TICKS: u32 = ms_to_ticks(4000);

pub const BOSS_SIZE: f32 = 60.0;
pub const BOSS_Y: f32 = 80.0;
pub const BOSS_SPEED: f32 = 1.0;
pub const BOSS_HP_PER_TIER: f32 = 50.0;
pub const BOSS_SCORE: u64 = 5000;
/// Every this many pattern ticks a boss shot becomes a 3-way spread
pub const BOSS_SPREAD_EVERY: u32 = 15;
pub const BOSS_SHOT_DAMAGE: f32 = 20.0;
pub const BOSS_SPREAD_DAMAGE: f32 = 15.0;

/// Waves per level; finishing the last one levels up
pub const WAVES_PER_LEVEL: u32 = 3;
/// Every Nth level opens with a boss
pub const BOSS_LEVEL_EVERY: u32 = 5;
pub const LEVEL_UP_BONUS: u64 = 1000;
pub const LEVEL_UP_TICKS: u32 = ms_to_ticks(2000);
pub const GAME_OVER_TICKS: u32 = ms_to_ticks(3000);

pub const PARTICLE_GRAVITY: f32 = 0.15;
pub const PARTICLE_LIFETIME: u32 = 20;

/// Enemies a wave spawns at `level`
pub fn wave_quota(level: u32) -> u32 {
    8 + 3 * level
}

/// Ticks between spawns; shortens with level and wave
pub fn spawn_delay(level: u32, wave: u32) -> u32 {
    (60i64 - 5 * level as i64 - 3 * wave as i64).max(30) as u32
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Heavy,
    Sinker,
}

/// Base numbers for one enemy type (before level scaling)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub size: f32,
    pub hp: f32,
    pub speed: f32,
    pub damage: f32,
    pub score: f32,
    /// Ticks between shots
    pub fire_every: u32,
    pub color: Color,
}

const ENEMY_TABLE: [EnemyStats; 4] = [
    EnemyStats {
        size: 25.0,
        hp: 1.0,
        speed: 2.0,
        damage: 10.0,
        score: 100.0,
        fire_every: 60,
        color: Color::hex(0xff4444),
    },
    EnemyStats {
        size: 20.0,
        hp: 1.0,
        speed: 4.0,
        damage: 5.0,
        score: 150.0,
        fire_every: 30,
        color: Color::hex(0xff8844),
    },
    EnemyStats {
        size: 35.0,
        hp: 3.0,
        speed: 1.0,
        damage: 20.0,
        score: 300.0,
        fire_every: 120,
        color: Color::hex(0xff0000),
    },
    EnemyStats {
        size: 22.0,
        hp: 2.0,
        speed: 1.5,
        damage: 15.0,
        score: 200.0,
        fire_every: 90,
        color: Color::hex(0xff22ff),
    },
];

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Heavy,
        EnemyKind::Sinker,
    ];

    pub fn stats(&self) -> &'static EnemyStats {
        &ENEMY_TABLE[*self as usize]
    }

    /// Spawn weights at `level`, in [`EnemyKind::ALL`] order
    pub fn weights(level: u32) -> [f32; 4] {
        let l = level as f32;
        [
            (0.5 - l * 0.08).max(0.2),
            0.3 + l * 0.05,
            0.2 + l * 0.04,
            0.15 + l * 0.03,
        ]
    }

    /// Weighted pick for a uniform `roll` in [0, 1). Rolls past the total
    /// weight fall back to `Basic`.
    pub fn pick(level: u32, mut roll: f32) -> EnemyKind {
        for (kind, weight) in Self::ALL.into_iter().zip(Self::weights(level)) {
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        EnemyKind::Basic
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    RapidFire,
    Spread,
    Shotgun,
    Shield,
    Ammo,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Health,
        PowerUpKind::RapidFire,
        PowerUpKind::Spread,
        PowerUpKind::Shotgun,
        PowerUpKind::Shield,
        PowerUpKind::Ammo,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "health" => Some(PowerUpKind::Health),
            "rapid_fire" => Some(PowerUpKind::RapidFire),
            "spread" => Some(PowerUpKind::Spread),
            "shotgun" => Some(PowerUpKind::Shotgun),
            "shield" => Some(PowerUpKind::Shield),
            "ammo" => Some(PowerUpKind::Ammo),
            _ => None,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::Health => Color::hex(0x00ff00),
            PowerUpKind::RapidFire => Color::hex(0xffff00),
            PowerUpKind::Spread => Color::hex(0xff88ff),
            PowerUpKind::Shotgun => Color::WHITE,
            PowerUpKind::Shield => Color::hex(0x00bfff),
            PowerUpKind::Ammo => Color::hex(0xff8800),
        }
    }

    /// Effect duration in ticks for timed power-ups
    pub fn duration(&self) -> Option<u32> {
        match self {
            PowerUpKind::RapidFire | PowerUpKind::Spread => Some(240),
            PowerUpKind::Shotgun => Some(300),
            _ => None,
        }
    }
}
