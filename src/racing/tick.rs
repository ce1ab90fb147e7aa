//! Fixed timestep race tick
//!
//! Drives the mode machine (menu, countdown, race, finish), the cars, their
//! contacts and the visual effects.

use glam::Vec2;
use rand::Rng;

use super::ai;
use super::car::{Car, CarControls};
use super::state::{CarId, Particle, RaceEvent, RacePhase, RaceResult, RaceState};
use super::track::{GRID, TRACK_HEIGHT, TRACK_WIDTH};
use super::tuning::*;
use crate::ms_to_ticks;
use crate::platform::{Key, KeySet};
use crate::render::Color;
use crate::sim::timer::poll;
use crate::sim::{Timer, TimerStatus, circle_contact};

/// Ticks each countdown number stays on screen
const COUNTDOWN_STEP_TICKS: u32 = ms_to_ticks(1000);
/// Ticks the "GO!" banner shows before the race clock starts
const GO_TICKS: u32 = ms_to_ticks(800);
/// Ticks the lap banner stays up
const LAP_BANNER_TICKS: u32 = ms_to_ticks(2000);
/// Shake on a completed player lap
const LAP_SHAKE: f32 = 4.0;
/// Minimum shake when the player hits a wall
const WALL_SHAKE: f32 = 6.0;
/// Speed-line particles appear above this fraction of the base max speed
const SPEED_LINE_FACTOR: f32 = 1.05;

/// Player controls sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaceInput {
    pub throttle: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
    /// Hard brake; overrides throttle and reverse
    pub handbrake: bool,
    /// Nitro
    pub boost: bool,
    /// Start / restart
    pub start: bool,
}

impl RaceInput {
    pub fn from_keys(keys: &KeySet) -> Self {
        Self {
            throttle: keys.any_down(&[Key::Up, Key::W]),
            reverse: keys.any_down(&[Key::Down, Key::S]),
            left: keys.any_down(&[Key::Left, Key::A]),
            right: keys.any_down(&[Key::Right, Key::D]),
            handbrake: keys.is_down(Key::Space),
            boost: keys.is_down(Key::CapsLock),
            start: keys.is_down(Key::Enter),
        }
    }

    /// Translate held keys into car controls (later keys win, as on a keyboard)
    pub fn controls(&self) -> CarControls {
        let mut power = 0.0;
        if self.throttle {
            power = THROTTLE_FORWARD;
        }
        if self.reverse {
            power = THROTTLE_REVERSE;
        }
        if self.handbrake {
            power = THROTTLE_HANDBRAKE;
        }

        let mut steering = 0.0;
        if self.left {
            steering = -1.0;
        }
        if self.right {
            steering = 1.0;
        }

        CarControls {
            power,
            steering,
            boost: self.boost,
        }
    }
}

/// Advance the race by one fixed timestep
pub fn tick(state: &mut RaceState, input: &RaceInput) {
    state.time_ticks += 1;
    state.fx.decay_shake();
    poll_banner(state);

    match state.phase {
        RacePhase::Menu => {
            if input.start {
                start_race(state);
            }
        }
        RacePhase::Countdown => advance_countdown(state),
        RacePhase::Racing => race_step(state, input),
        RacePhase::Finished => {
            state.fx.update();
            if input.start {
                start_race(state);
            }
        }
    }
}

/// Reset every car to the grid and begin the 3-2-1 countdown.
///
/// Valid from any phase; bumping the epoch invalidates pending timers.
pub fn start_race(state: &mut RaceState) {
    state.epoch = state.epoch.wrapping_add(1);
    state.phase = RacePhase::Countdown;
    state.race_ticks = 0;
    state.result = None;
    state.fx.clear();

    state.player.color = state.player_color;
    state.player.reset(GRID[0], state.player_model);
    for (i, ai) in state.ai_cars.iter_mut().enumerate() {
        let model = CarModel::ALL[state.rng.random_range(0..CarModel::ALL.len())];
        let slot = GRID.get(i + 1).copied().unwrap_or(GRID[0]);
        ai.reset(slot, model);
    }

    state.countdown_value = 3;
    state.countdown_timer = Some(Timer::new(state.epoch, COUNTDOWN_STEP_TICKS));
    state.events.push(RaceEvent::Countdown(3));
    log::info!(
        "Race starting (epoch {}, {} laps, player {:?})",
        state.epoch,
        state.total_laps,
        state.player_model
    );
}

/// Choose the player's car model. Ignored once the race is underway.
pub fn select_model(state: &mut RaceState, model: CarModel) -> bool {
    if matches!(state.phase, RacePhase::Countdown | RacePhase::Racing) {
        return false;
    }
    state.player_model = model;
    let pos = state.player.pos;
    state.player.reset(pos, model);
    true
}

/// Choose the player's car color. Ignored once the race is underway.
pub fn select_color(state: &mut RaceState, color: Color) -> bool {
    if matches!(state.phase, RacePhase::Countdown | RacePhase::Racing) {
        return false;
    }
    state.player_color = color;
    state.player.color = color;
    true
}

fn poll_banner(state: &mut RaceState) {
    let epoch = state.epoch;
    let expired = match state.lap_banner.as_mut() {
        Some((_, timer)) => timer.tick(epoch) != TimerStatus::Pending,
        None => false,
    };
    if expired {
        state.lap_banner = None;
    }
}

fn advance_countdown(state: &mut RaceState) {
    if !poll(&mut state.countdown_timer, state.epoch) {
        return;
    }
    match state.countdown_value {
        0 => {
            state.phase = RacePhase::Racing;
            state.race_ticks = 0;
            state.events.push(RaceEvent::RaceStarted);
            log::info!("Race started");
        }
        n => {
            let next = n - 1;
            state.countdown_value = next;
            let ticks = if next == 0 {
                GO_TICKS
            } else {
                COUNTDOWN_STEP_TICKS
            };
            state.countdown_timer = Some(Timer::new(state.epoch, ticks));
            state.events.push(RaceEvent::Countdown(next));
        }
    }
}

fn race_step(state: &mut RaceState, input: &RaceInput) {
    state.race_ticks += 1;

    let outcome = state.player.drive(
        input.controls(),
        &state.track,
        &mut state.fx,
        &mut state.rng,
    );
    if outcome.wall_hit {
        state.fx.shake_at_least(WALL_SHAKE);
        state.events.push(RaceEvent::WallHit {
            car: CarId::Player,
        });
    }
    if outcome.lap_completed {
        on_lap(state, CarId::Player);
    }

    for i in 0..state.ai_cars.len() {
        if state.phase != RacePhase::Racing {
            break;
        }
        let car = &mut state.ai_cars[i];
        let controls = ai::steer(car, &state.track);
        let outcome = car.drive(controls, &state.track, &mut state.fx, &mut state.rng);
        if outcome.wall_hit {
            state.events.push(RaceEvent::WallHit { car: CarId::Ai(i) });
        }
        if outcome.lap_completed {
            on_lap(state, CarId::Ai(i));
        }
    }

    if state.player.speed > state.player.stats.max_speed * SPEED_LINE_FACTOR {
        emit_speed_lines(state);
    }

    // Player vs AI only; AI cars pass through each other
    for rival in &mut state.ai_cars {
        if let Some(contact) = circle_contact(state.player.pos, rival.pos, CAR_CONTACT_DISTANCE) {
            Car::resolve_contact(&mut state.player, rival, contact);
            state.events.push(RaceEvent::CarContact);
        }
    }

    state.fx.update();
}

fn emit_speed_lines(state: &mut RaceState) {
    for _ in 0..3 {
        let pos = Vec2::new(
            state.rng.random::<f32>() * TRACK_WIDTH,
            state.rng.random::<f32>() * TRACK_HEIGHT,
        );
        state.fx.emit(Particle {
            pos,
            vel: Vec2::ZERO,
            color: Color::rgba(255, 255, 255, 26),
            size: 1.0,
            life: 20.0,
            max_life: 20.0,
            decay: 1.0,
            glow: false,
        });
    }
}

fn on_lap(state: &mut RaceState, id: CarId) {
    let Some(laps) = state.car(id).map(|c| c.laps) else {
        return;
    };
    state.events.push(RaceEvent::LapCompleted { car: id, lap: laps });

    if id == CarId::Player {
        state.lap_banner = Some((
            format!("LAP {} COMPLETE!", laps),
            Timer::new(state.epoch, LAP_BANNER_TICKS),
        ));
        state.fx.set_shake(LAP_SHAKE);
    }
    log::debug!("{:?} completed lap {}", id, laps);

    if laps >= state.total_laps {
        finish(state, id);
    }
}

/// End the race with `winner`. Only the first finisher counts.
pub fn finish(state: &mut RaceState, winner: CarId) {
    if state.phase != RacePhase::Racing {
        return;
    }
    state.phase = RacePhase::Finished;
    let time_secs = state.race_secs();

    let new_best = winner == CarId::Player && state.best_time.record(time_secs);
    let result = RaceResult {
        winner,
        time_secs,
        new_best,
    };
    state.result = Some(result);
    state.events.push(RaceEvent::Finished(result));
    if new_best {
        let best = state.best_time.seconds.unwrap_or(time_secs);
        state.events.push(RaceEvent::NewBestTime(best));
    }
    log::info!("Race finished: {:?} in {:.2}s (new best: {})", winner, time_secs, new_best);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_time::BestTime;
    use crate::settings::Settings;

    fn new_state() -> RaceState {
        RaceState::new(42, &Settings::default(), BestTime::new())
    }

    fn start() -> RaceInput {
        RaceInput {
            start: true,
            ..Default::default()
        }
    }

    fn run_to_racing(state: &mut RaceState) {
        tick(state, &start());
        for _ in 0..500 {
            if state.phase == RacePhase::Racing {
                return;
            }
            tick(state, &RaceInput::default());
        }
        panic!("countdown never finished");
    }

    #[test]
    fn test_input_priorities() {
        let keys = KeySet::with(&[Key::Up, Key::S, Key::Left, Key::D]);
        let controls = RaceInput::from_keys(&keys).controls();
        assert_eq!(controls.power, THROTTLE_REVERSE);
        assert_eq!(controls.steering, 1.0);

        let keys = KeySet::with(&[Key::W, Key::Space, Key::CapsLock]);
        let input = RaceInput::from_keys(&keys);
        assert!(input.boost);
        assert_eq!(input.controls().power, THROTTLE_HANDBRAKE);
    }

    #[test]
    fn test_countdown_sequence_and_timing() {
        let mut state = new_state();
        tick(&mut state, &start());
        assert_eq!(state.phase, RacePhase::Countdown);
        assert_eq!(state.countdown_text().as_deref(), Some("3"));

        let mut ticks = 0;
        let mut shown = vec![3u8];
        while state.phase == RacePhase::Countdown {
            tick(&mut state, &RaceInput::default());
            ticks += 1;
            if shown.last() != Some(&state.countdown_value) && state.phase == RacePhase::Countdown {
                shown.push(state.countdown_value);
            }
        }
        assert_eq!(shown, vec![3, 2, 1, 0]);
        assert_eq!(ticks, 3 * 60 + 48);
        assert_eq!(state.phase, RacePhase::Racing);
        assert_eq!(state.race_ticks, 0);
        let events = state.drain_events();
        assert!(events.contains(&RaceEvent::RaceStarted));
    }

    #[test]
    fn test_cars_frozen_during_countdown() {
        let mut state = new_state();
        let throttle = RaceInput {
            throttle: true,
            start: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &throttle);
        }
        assert_eq!(state.phase, RacePhase::Countdown);
        assert_eq!(state.player.pos, GRID[0]);
        assert_eq!(state.player.speed, 0.0);
    }

    #[test]
    fn test_player_lap_banner_and_finish() {
        let mut state = new_state();
        state.total_laps = 2;
        run_to_racing(&mut state);

        state.player.checkpoint_passed = true;
        tick(&mut state, &RaceInput::default());
        assert_eq!(state.player.laps, 1);
        assert_eq!(state.banner(), Some("LAP 1 COMPLETE!"));
        assert_eq!(state.fx.shake, 4.0);
        assert_eq!(state.phase, RacePhase::Racing);

        // Banner goes away after 120 ticks
        for _ in 0..120 {
            tick(&mut state, &RaceInput::default());
        }
        assert_eq!(state.banner(), None);

        state.player.checkpoint_passed = true;
        state.player.pos = GRID[0];
        tick(&mut state, &RaceInput::default());
        assert_eq!(state.phase, RacePhase::Finished);
        let result = state.result.expect("race result");
        assert_eq!(result.winner, CarId::Player);
        assert!(result.new_best);
        let best = state.best_time.seconds.expect("best time recorded");
        assert!((best - result.time_secs).abs() < 0.01);
        let events = state.drain_events();
        assert!(
            events.iter().any(|e| matches!(e, RaceEvent::NewBestTime(_)))
        );
    }

    #[test]
    fn test_only_first_finisher_counts() {
        let mut state = new_state();
        run_to_racing(&mut state);
        finish(&mut state, CarId::Ai(1));
        finish(&mut state, CarId::Player);
        let result = state.result.expect("race result");
        assert_eq!(result.winner, CarId::Ai(1));
        assert!(!result.new_best);
        assert_eq!(state.best_time.seconds, None);
    }

    #[test]
    fn test_finished_is_terminal_until_restart() {
        let mut state = new_state();
        run_to_racing(&mut state);
        finish(&mut state, CarId::Ai(0));
        let pos = state.player.pos;
        let throttle = RaceInput {
            throttle: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &throttle);
        }
        assert_eq!(state.phase, RacePhase::Finished);
        assert_eq!(state.player.pos, pos);

        tick(&mut state, &start());
        assert_eq!(state.phase, RacePhase::Countdown);
        assert_eq!(state.player.laps, 0);
        assert!(state.result.is_none());
    }

    #[test]
    fn test_stale_banner_dropped_after_restart() {
        let mut state = new_state();
        run_to_racing(&mut state);
        state.player.checkpoint_passed = true;
        tick(&mut state, &RaceInput::default());
        assert!(state.banner().is_some());

        start_race(&mut state);
        assert_eq!(state.banner(), None);
        tick(&mut state, &RaceInput::default());
        assert!(state.lap_banner.is_none());
    }

    #[test]
    fn test_restart_mid_countdown_uses_fresh_timer() {
        let mut state = new_state();
        tick(&mut state, &start());
        for _ in 0..60 {
            tick(&mut state, &RaceInput::default());
        }
        assert_eq!(state.countdown_value, 2);
        start_race(&mut state);
        assert_eq!(state.countdown_value, 3);
        for _ in 0..59 {
            tick(&mut state, &RaceInput::default());
        }
        assert_eq!(state.countdown_value, 3);
        tick(&mut state, &RaceInput::default());
        assert_eq!(state.countdown_value, 2);
    }

    #[test]
    fn test_restart_returns_cars_to_grid() {
        let mut state = new_state();
        run_to_racing(&mut state);
        let throttle = RaceInput {
            throttle: true,
            ..Default::default()
        };
        for _ in 0..60 {
            tick(&mut state, &throttle);
        }
        start_race(&mut state);
        assert_eq!(state.player.pos, GRID[0]);
        assert_eq!(state.ai_cars[0].pos, GRID[1]);
        assert_eq!(state.ai_cars[1].pos, GRID[2]);
        assert_eq!(state.player.nitro, NITRO_MAX);
        assert!(state.fx.particles.is_empty());
    }

    #[test]
    fn test_menu_selection_locked_while_racing() {
        let mut state = new_state();
        assert!(select_model(&mut state, CarModel::Ghost));
        assert_eq!(state.player.model, CarModel::Ghost);
        assert!(select_color(&mut state, Color::hex(0x2ecc71)));
        assert_eq!(state.player.color, Color::hex(0x2ecc71));

        run_to_racing(&mut state);
        assert_eq!(state.player.model, CarModel::Ghost);
        assert!(!select_model(&mut state, CarModel::Tank));
        assert_eq!(state.player.model, CarModel::Ghost);
    }

    #[test]
    fn test_player_ai_contact_resolved_ai_pairs_skipped() {
        let mut state = new_state();
        run_to_racing(&mut state);
        let third = state.ai_cars[1].clone();
        state.ai_cars.push(third);
        let spots = [
            Vec2::new(600.0, 100.0),
            Vec2::new(612.0, 100.0),
            Vec2::new(600.0, 600.0),
            Vec2::new(606.0, 600.0),
        ];
        let cars = std::iter::once(&mut state.player).chain(state.ai_cars.iter_mut());
        for (car, spot) in cars.zip(spots) {
            car.pos = spot;
            car.vel = Vec2::ZERO;
            car.speed = 2.0;
        }
        state.drain_events();

        // Same drives, same rng order, no contact pass
        let mut expected = state.clone();
        let r = &mut expected;
        let controls = RaceInput::default().controls();
        r.player.drive(controls, &r.track, &mut r.fx, &mut r.rng);
        for car in r.ai_cars.iter_mut() {
            let controls = ai::steer(car, &r.track);
            car.drive(controls, &r.track, &mut r.fx, &mut r.rng);
        }

        tick(&mut state, &RaceInput::default());

        let contacts = state
            .events
            .iter()
            .filter(|e| matches!(e, RaceEvent::CarContact))
            .count();
        assert_eq!(contacts, 1);

        let gap = |s: &RaceState| s.ai_cars[0].vel.x - s.player.vel.x;
        assert!(gap(&state) > gap(&expected) + 1.0);
        let keep = CAR_CONTACT_SPEED_KEEP;
        assert!(
            (state.player.speed - expected.player.speed * keep).abs() < 1e-5
        );
        assert!(
            (state.ai_cars[0].speed - expected.ai_cars[0].speed * keep).abs() < 1e-5
        );
        assert!(expected.player.speed.abs() > 0.0);

        for i in 1..3 {
            assert_eq!(state.ai_cars[i].pos, expected.ai_cars[i].pos);
            assert_eq!(state.ai_cars[i].vel, expected.ai_cars[i].vel);
            assert_eq!(state.ai_cars[i].speed, expected.ai_cars[i].speed);
        }
    }

    #[test]
    fn test_speed_invariant_over_a_race() {
        let mut state = new_state();
        run_to_racing(&mut state);
        let input = RaceInput {
            throttle: true,
            boost: true,
            right: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input);
            for car in std::iter::once(&state.player).chain(state.ai_cars.iter()) {
                assert!(
                    car.speed.abs() <= car.effective_max_speed() + SPEED_DECAY_STEP + 1e-4
                );
            }
        }
    }
}
