//! Wave and level progression

use glam::Vec2;
use rand::Rng;

use super::entities::{Boss, Enemy, PowerUp};
use super::state::{ShooterEvent, ShooterMode, ShooterState};
use super::tuning::*;
use crate::sim::Timer;

/// Set up the current wave: the boss on every fifth level's first wave,
/// otherwise a fresh regular wave.
pub fn spawn_wave(state: &mut ShooterState) {
    if state.level % BOSS_LEVEL_EVERY == 0 && state.wave == 1 {
        let boss = Boss::new(state.level / BOSS_LEVEL_EVERY);
        log::info!("Boss incoming: level {}, hp {}", state.level, boss.max_hp);
        state.events.push(ShooterEvent::BossSpawned { hp: boss.max_hp });
        state.boss = Some(boss);
    } else {
        state.boss = None;
        state.enemies.clear();
        state.wave_quota = wave_quota(state.level);
        state.wave_spawned = 0;
        state.wave_progress = 0;
        log::debug!(
            "Wave {}-{}: {} enemies",
            state.level,
            state.wave,
            state.wave_quota
        );
    }
}

/// Spawn the next enemy when the spawn delay has passed
pub fn spawn_enemy(state: &mut ShooterState) {
    if state.boss.is_some() || state.wave_spawned >= state.wave_quota {
        return;
    }
    state.spawn_timer += 1;
    if state.spawn_timer <= spawn_delay(state.level, state.wave) {
        return;
    }

    let kind = EnemyKind::pick(state.level, state.rng.random::<f32>());
    let x = state.rng.random::<f32>() * (ARENA_WIDTH - 50.0) + 25.0;
    let enemy = Enemy::new(kind, Vec2::new(x, -30.0), state.level, &mut state.rng);
    state.enemies.push(enemy);
    state.wave_spawned += 1;
    state.spawn_timer = 0;
}

/// Drop an ammo crate on a fixed cadence
pub fn spawn_ammo_crate(state: &mut ShooterState) {
    state.ammo_timer += 1;
    if state.ammo_timer > AMMO_CRATE_TICKS {
        let x = state.rng.random::<f32>() * (ARENA_WIDTH - 50.0) + 25.0;
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Ammo, Vec2::new(x, -30.0)));
        state.ammo_timer = 0;
    }
}

/// A regular wave is over once every enemy spawned, died or left, and no
/// enemy shot is still in the air.
pub fn wave_complete(state: &ShooterState) -> bool {
    state.boss.is_none()
        && state.wave_spawned >= state.wave_quota
        && state.enemies.is_empty()
        && state.enemy_shots_in_flight() == 0
}

/// Move to the next wave, levelling up after the last one
pub fn advance_wave(state: &mut ShooterState) {
    state.events.push(ShooterEvent::WaveCleared {
        level: state.level,
        wave: state.wave,
    });
    state.wave += 1;
    if state.wave > WAVES_PER_LEVEL {
        level_up(state);
    } else {
        spawn_wave(state);
    }
}

fn level_up(state: &mut ShooterState) {
    state.level += 1;
    state.wave = 1;
    state.score += LEVEL_UP_BONUS;
    state.player.hp = state.player.max_hp;
    state.player.shield = 0.0;
    state.mode = ShooterMode::LevelUp;
    state.level_up_timer = Some(Timer::new(state.epoch, LEVEL_UP_TICKS));
    state.events.push(ShooterEvent::LevelUp(state.level));
    log::info!("Level up: {} (score {})", state.level, state.score);
}

/// Leave the level-up banner once its timer fires
pub fn poll_level_up(state: &mut ShooterState) {
    if crate::sim::timer::poll(&mut state.level_up_timer, state.epoch) {
        state.mode = ShooterMode::Playing;
        spawn_wave(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn playing() -> ShooterState {
        let mut state = ShooterState::new(11, &Settings::default());
        state.mode = ShooterMode::Playing;
        state
    }

    #[test]
    fn test_spawn_cadence_and_quota() {
        let mut state = playing();
        let delay = spawn_delay(1, 1);
        for _ in 0..delay {
            spawn_enemy(&mut state);
        }
        assert!(state.enemies.is_empty());
        spawn_enemy(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.wave_spawned, 1);

        for _ in 0..10_000 {
            spawn_enemy(&mut state);
            assert!(state.wave_spawned <= state.wave_quota);
        }
        assert_eq!(state.wave_spawned, state.wave_quota);
        assert!(
            state.enemies.iter().all(|e| e.pos.x >= 25.0 && e.pos.x <= 775.0)
        );
    }

    #[test]
    fn test_wave_complete_needs_no_enemy_shots() {
        let mut state = playing();
        state.wave_spawned = state.wave_quota;
        assert!(wave_complete(&state));
        state.projectiles.push(super::super::entities::Projectile::new(
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 3.0),
            10.0,
            super::super::entities::Owner::Enemy,
        ));
        assert!(!wave_complete(&state));
    }

    #[test]
    fn test_third_wave_levels_up() {
        let mut state = playing();
        state.wave = 3;
        state.player.hp = 40.0;
        state.player.shield = 50.0;
        advance_wave(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, LEVEL_UP_BONUS);
        assert_eq!(state.player.hp, 100.0);
        assert_eq!(state.player.shield, 0.0);
        assert_eq!(state.mode, ShooterMode::LevelUp);

        for _ in 0..LEVEL_UP_TICKS - 1 {
            poll_level_up(&mut state);
        }
        assert_eq!(state.mode, ShooterMode::LevelUp);
        poll_level_up(&mut state);
        assert_eq!(state.mode, ShooterMode::Playing);
        assert_eq!(state.wave_quota, 14);
        assert_eq!(state.wave_spawned, 0);
    }

    #[test]
    fn test_fifth_level_spawns_boss_only() {
        let mut state = playing();
        state.level = 5;
        state.wave = 1;
        spawn_wave(&mut state);
        let boss = state.boss.as_ref().expect("boss wave");
        assert_eq!(boss.max_hp, 50.0);
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        assert!(state.enemies.is_empty());
        assert!(!wave_complete(&state));
    }

    #[test]
    fn test_ammo_crate_cadence() {
        let mut state = playing();
        for _ in 0..AMMO_CRATE_TICKS {
            spawn_ammo_crate(&mut state);
        }
        assert!(state.power_ups.is_empty());
        spawn_ammo_crate(&mut state);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].kind, PowerUpKind::Ammo);
    }
}
