//! Shooter state: mode machine, actors, wave bookkeeping and events

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Boss, Debris, Enemy, Player, PowerUp, Projectile};
use super::tuning::{EnemyKind, PowerUpKind, wave_quota};
use crate::settings::Settings;
use crate::sim::{Timer, seeded_rng};

/// Top-level shooter mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShooterMode {
    /// Title screen; any key starts
    Welcome,
    Playing,
    /// Level-up banner; simulation paused until its timer fires
    LevelUp,
    /// Ship destroyed; terminal until restart
    GameOver,
    /// Boss destroyed; terminal until restart
    Won,
}

/// Things the host may react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShooterEvent {
    Started,
    EnemyKilled { kind: EnemyKind, score: u64 },
    PowerUpDropped(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PlayerHit { damage: f32 },
    BossSpawned { hp: f32 },
    BossPhase(u8),
    WaveCleared { level: u32, wave: u32 },
    LevelUp(u32),
    GameOver { score: u64 },
    Won { score: u64 },
}

/// Complete shooter state
#[derive(Debug, Clone)]
pub struct ShooterState {
    pub mode: ShooterMode,
    /// Bumped on restart; pending banners from older runs go stale
    pub epoch: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub debris: Vec<Debris>,
    pub score: u64,
    pub level: u32,
    /// Wave within the level, 1-based
    pub wave: u32,
    /// Enemies this wave spawns in total
    pub wave_quota: u32,
    /// Enemies spawned so far this wave (never above the quota)
    pub wave_spawned: u32,
    /// Enemies destroyed this wave
    pub wave_progress: u32,
    pub spawn_timer: u32,
    pub ammo_timer: u32,
    pub level_up_timer: Option<Timer>,
    /// Counts down after a game over; restart is refused until it reaches 0
    pub game_over_timer: u32,
    pub max_debris: usize,
    pub events: Vec<ShooterEvent>,
    pub(crate) rng: Pcg32,
}

impl ShooterState {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut state = Self {
            mode: ShooterMode::Welcome,
            epoch: 0,
            player: Player::new(),
            enemies: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            debris: Vec::new(),
            score: 0,
            level: 1,
            wave: 1,
            wave_quota: wave_quota(1),
            wave_spawned: 0,
            wave_progress: 0,
            spawn_timer: 0,
            ammo_timer: 0,
            level_up_timer: None,
            game_over_timer: 0,
            max_debris: settings.max_particles(),
            events: Vec::new(),
            rng: seeded_rng(seed),
        };
        super::waves::spawn_wave(&mut state);
        state
    }

    /// Put everything back to level 1, wave 1 and start playing
    pub fn restart(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.player = Player::new();
        self.enemies.clear();
        self.boss = None;
        self.projectiles.clear();
        self.power_ups.clear();
        self.debris.clear();
        self.score = 0;
        self.level = 1;
        self.wave = 1;
        self.spawn_timer = 0;
        self.ammo_timer = 0;
        self.level_up_timer = None;
        self.game_over_timer = 0;
        super::waves::spawn_wave(self);
        self.mode = ShooterMode::Playing;
        self.events.push(ShooterEvent::Started);
        log::info!("Shooter restarted (epoch {})", self.epoch);
    }

    /// Restart is accepted from a terminal mode once the game-over delay ran out
    pub fn can_restart(&self) -> bool {
        matches!(self.mode, ShooterMode::GameOver | ShooterMode::Won) && self.game_over_timer == 0
    }

    pub fn enemy_shots_in_flight(&self) -> usize {
        self.projectiles
            .iter()
            .filter(|p| p.owner == super::entities::Owner::Enemy)
            .count()
    }

    pub fn drain_events(&mut self) -> Vec<ShooterEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_welcome() {
        let state = ShooterState::new(1, &Settings::default());
        assert_eq!(state.mode, ShooterMode::Welcome);
        assert_eq!(state.level, 1);
        assert_eq!(state.wave_quota, 11);
        assert!(state.boss.is_none());
        assert_eq!(state.max_debris, 500);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut state = ShooterState::new(1, &Settings::default());
        state.mode = ShooterMode::GameOver;
        state.score = 1234;
        state.level = 3;
        state.player.hp = -5.0;
        assert!(state.can_restart());
        state.game_over_timer = 10;
        assert!(!state.can_restart());
        state.game_over_timer = 0;

        state.restart();
        assert_eq!(state.mode, ShooterMode::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.player.hp, 100.0);
        assert_eq!(state.epoch, 1);
    }
}
