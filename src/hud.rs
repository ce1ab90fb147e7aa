//! HUD text for the DOM overlay
//!
//! Each game reports a list of `(element id, text)` pairs; the browser host
//! writes them into matching elements and the native runner logs them.

use crate::racing::RaceState;
use crate::shooter::ShooterState;
use crate::shooter::tuning::MAX_AMMO;
use crate::soccer::MatchState;

/// Speedometer scale from sim units per tick to displayed km/h
pub const SPEED_DISPLAY_SCALE: f32 = 35.0;
pub const BOSS_BAR_CELLS: usize = 12;

/// One piece of HUD text keyed by its DOM element id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudLine {
    pub id: &'static str,
    pub text: String,
}

impl HudLine {
    pub fn new(id: &'static str, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

pub fn racing(state: &RaceState) -> Vec<HudLine> {
    let speed = (state.player.speed.abs() * SPEED_DISPLAY_SCALE).round() as u32;
    let mut lines = vec![
        HudLine::new("speed", speed.to_string()),
        HudLine::new("timer", format!("{:.2}", state.race_secs())),
        HudLine::new("bestTime", state.best_time.display()),
        HudLine::new("laps", state.player.laps.to_string()),
        HudLine::new("nitro", format!("{}%", state.player.nitro.round() as u32)),
    ];
    if let Some(text) = state.countdown_text() {
        lines.push(HudLine::new("countdown", text));
    }
    lines
}

pub fn shooter(state: &ShooterState) -> Vec<HudLine> {
    let mut lines = vec![
        HudLine::new("score", format!("Score: {}", state.score)),
        HudLine::new(
            "level",
            format!("Level: {} | Wave: {}", state.level, state.wave),
        ),
        HudLine::new("health", (state.player.hp.max(0.0).floor() as u32).to_string()),
        HudLine::new("ammo", format!("{}/{}", state.player.ammo, MAX_AMMO)),
    ];
    if let Some(boss) = &state.boss {
        lines.push(HudLine::new("bossHpBar", boss_bar(boss.hp_fraction())));
    }
    lines
}

/// `BOSS_BAR_CELLS` cells, filled cells rounded down
pub fn boss_bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BOSS_BAR_CELLS as f32).floor() as usize)
        .min(BOSS_BAR_CELLS);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BOSS_BAR_CELLS - filled));
    bar
}

pub fn soccer(state: &MatchState) -> Vec<HudLine> {
    vec![
        HudLine::new(
            "score",
            format!("Player: {} | AI: {}", state.player_score, state.ai_score),
        ),
        HudLine::new("timer", state.clock_text()),
    ]
}
