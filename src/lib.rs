//! Arcade Trio - three keyboard arcade games on a 2D canvas
//!
//! Core modules:
//! - `sim`: Shared fixed-step helpers (integration, collision tests, epoch timers)
//! - `racing`: Top-down racer (player vs two AI cars on a ring track)
//! - `shooter`: Vertical shoot-'em-up with waves, power-ups and a boss
//! - `soccer`: 1v1 soccer match against an AI footballer
//! - `render`: Canvas drawing collaborator (read-only over game state)
//! - `hud`: DOM overlay text per game
//! - `session`: One running game as seen by the host (tick, draw, HUD, storage)
//! - `platform`: Held-key input and the fixed-step frame clock
//! - `persistence`: Key-value storage (LocalStorage on web)

pub mod best_time;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod racing;
pub mod render;
pub mod session;
pub mod settings;
pub mod shooter;
pub mod sim;
pub mod soccer;

pub use best_time::BestTime;
pub use session::{GameKind, Session};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second. All per-tick tuning assumes this rate.
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta (seconds) fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Convert a duration in milliseconds to whole simulation ticks
#[inline]
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms * consts::TICKS_PER_SECOND / 1000
}

/// Wrap an angle into (-π, π]
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Unit vector for a screen-space heading where 0 points up (-y)
/// and positive angles turn clockwise.
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Heading (same convention as [`heading_vector`]) that points along `delta`
#[inline]
pub fn heading_of(delta: Vec2) -> f32 {
    delta.x.atan2(-delta.y)
}
