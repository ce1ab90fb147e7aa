//! Race state: phases, cars, visual effects and events

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::car::Car;
use super::track::{GRID, Track};
use super::tuning::CarModel;
use crate::best_time::BestTime;
use crate::render::Color;
use crate::settings::Settings;
use crate::sim::{Timer, seeded_rng};

/// Current phase of the race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePhase {
    /// Model/color selection, cars parked on the grid
    Menu,
    /// 3-2-1-GO, cars frozen
    Countdown,
    /// Cars under control, race clock running
    Racing,
    /// Someone completed the lap count; terminal until restart
    Finished,
}

/// Which car something happened to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarId {
    Player,
    Ai(usize),
}

/// Outcome of a finished race
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub winner: CarId,
    /// Race clock at the finish (seconds)
    pub time_secs: f32,
    /// Player won faster than the stored best
    pub new_best: bool,
}

/// Things the host may react to (sound, HUD, persistence)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    /// Countdown shows this number (0 = "GO!")
    Countdown(u8),
    RaceStarted,
    WallHit { car: CarId },
    CarContact,
    LapCompleted { car: CarId, lap: u32 },
    Finished(RaceResult),
    NewBestTime(f32),
}

/// A smoke puff, spark or speed line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub decay: f32,
    /// Additive glow when drawn
    pub glow: bool,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel *= 0.98;
        self.life -= self.decay;
    }

    /// Remaining life as 0..=1 (for alpha)
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Tyre mark segment across the car's rear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkidMark {
    pub from: Vec2,
    pub to: Vec2,
    pub life: u32,
}

/// Visual side effects of driving (not gameplay-affecting)
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub skid_marks: Vec<SkidMark>,
    /// Screen shake amplitude in pixels
    pub shake: f32,
    pub max_particles: usize,
    pub shake_enabled: bool,
}

impl Effects {
    pub fn new(max_particles: usize, shake_enabled: bool) -> Self {
        Self {
            max_particles,
            shake_enabled,
            ..Default::default()
        }
    }

    /// Add a particle unless the quality cap is reached
    pub fn emit(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Raise the shake to at least `amount`
    pub fn shake_at_least(&mut self, amount: f32) {
        if self.shake_enabled {
            self.shake = self.shake.max(amount);
        }
    }

    /// Set the shake outright
    pub fn set_shake(&mut self, amount: f32) {
        if self.shake_enabled {
            self.shake = amount;
        }
    }

    /// Age particles and skid marks, dropping the dead ones
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.update();
        }
        self.particles.retain(|p| p.life > 0.0);

        for s in &mut self.skid_marks {
            s.life = s.life.saturating_sub(1);
        }
        self.skid_marks.retain(|s| s.life > 0);
    }

    /// Shake decays every frame regardless of phase
    pub fn decay_shake(&mut self) {
        if self.shake > 0.0 {
            self.shake *= 0.92;
            if self.shake < 0.1 {
                self.shake = 0.0;
            }
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.skid_marks.clear();
    }

    /// Uniform value in [-0.5, 0.5)
    pub(crate) fn jitter(rng: &mut Pcg32) -> f32 {
        rng.random::<f32>() - 0.5
    }
}

/// Complete racer state
#[derive(Debug, Clone)]
pub struct RaceState {
    pub phase: RacePhase,
    /// Bumped on every (re)start; older timers are stale
    pub epoch: u32,
    pub track: Track,
    pub player: Car,
    pub ai_cars: Vec<Car>,
    pub fx: Effects,
    /// Laps needed to finish
    pub total_laps: u32,
    /// Ticks since the green light
    pub race_ticks: u64,
    /// Ticks since the state was created
    pub time_ticks: u64,
    /// Number currently shown by the countdown (0 = "GO!")
    pub countdown_value: u8,
    pub countdown_timer: Option<Timer>,
    /// Lap banner text and its hide timer
    pub lap_banner: Option<(String, Timer)>,
    pub best_time: BestTime,
    pub result: Option<RaceResult>,
    pub player_model: CarModel,
    pub player_color: Color,
    /// Events produced since the host last drained them
    pub events: Vec<RaceEvent>,
    pub(crate) rng: Pcg32,
}

/// AI car colors (red, yellow)
const AI_COLORS: [Color; 2] = [Color::hex(0xe74c3c), Color::hex(0xf1c40f)];
/// Default AI models shown on the grid before the first start
const AI_GRID_MODELS: [CarModel; 2] = [CarModel::Drifter, CarModel::Tank];

impl RaceState {
    pub fn new(seed: u64, settings: &Settings, best_time: BestTime) -> Self {
        let player_model = settings.racing.car_model;
        let player_color =
            Color::from_css(&settings.racing.car_color).unwrap_or(Color::hex(0x3498db));
        let ai_cars = AI_COLORS
            .iter()
            .zip(AI_GRID_MODELS)
            .enumerate()
            .map(|(i, (&color, model))| Car::new(GRID[i + 1], color, true, model))
            .collect();

        Self {
            phase: RacePhase::Menu,
            epoch: 0,
            track: Track::default(),
            player: Car::new(GRID[0], player_color, false, player_model),
            ai_cars,
            fx: Effects::new(settings.max_particles(), settings.screen_shake),
            total_laps: settings.racing.total_laps.max(1),
            race_ticks: 0,
            time_ticks: 0,
            countdown_value: 0,
            countdown_timer: None,
            lap_banner: None,
            best_time,
            result: None,
            player_model,
            player_color,
            events: Vec::new(),
            rng: seeded_rng(seed),
        }
    }

    /// Race clock in seconds
    pub fn race_secs(&self) -> f32 {
        self.race_ticks as f32 * crate::consts::SIM_DT
    }

    /// Banner text if one is showing in the current session
    pub fn banner(&self) -> Option<&str> {
        self.lap_banner
            .as_ref()
            .filter(|(_, timer)| timer.epoch() == self.epoch)
            .map(|(text, _)| text.as_str())
    }

    /// Countdown text while counting down
    pub fn countdown_text(&self) -> Option<String> {
        if self.phase != RacePhase::Countdown {
            return None;
        }
        Some(match self.countdown_value {
            0 => "GO!".to_string(),
            n => n.to_string(),
        })
    }

    pub fn car(&self, id: CarId) -> Option<&Car> {
        match id {
            CarId::Player => Some(&self.player),
            CarId::Ai(i) => self.ai_cars.get(i),
        }
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<RaceEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoke(life: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            color: Color::WHITE,
            size: 3.0,
            life,
            max_life: life,
            decay: 0.5,
            glow: false,
        }
    }

    #[test]
    fn test_new_state_parks_cars_on_grid() {
        let state = RaceState::new(1, &Settings::default(), BestTime::new());
        assert_eq!(state.phase, RacePhase::Menu);
        assert_eq!(state.player.pos, GRID[0]);
        assert_eq!(state.ai_cars.len(), 2);
        assert_eq!(state.ai_cars[1].pos, GRID[2]);
        assert!(state.ai_cars.iter().all(|c| c.is_ai));
    }

    #[test]
    fn test_effects_cap_and_prune() {
        let mut fx = Effects::new(2, true);
        fx.emit(smoke(1.0));
        fx.emit(smoke(10.0));
        fx.emit(smoke(10.0));
        assert_eq!(fx.particles.len(), 2);
        fx.skid_marks.push(SkidMark {
            from: Vec2::ZERO,
            to: Vec2::ONE,
            life: 1,
        });
        fx.update();
        assert_eq!(fx.particles.len(), 1);
        assert!(fx.skid_marks.is_empty());
        assert!((fx.particles[0].vel.x - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_shake_respects_setting() {
        let mut fx = Effects::new(10, false);
        fx.shake_at_least(6.0);
        assert_eq!(fx.shake, 0.0);

        let mut fx = Effects::new(10, true);
        fx.shake_at_least(6.0);
        fx.shake_at_least(2.0);
        assert_eq!(fx.shake, 6.0);
        for _ in 0..100 {
            fx.decay_shake();
        }
        assert_eq!(fx.shake, 0.0);
    }

    #[test]
    fn test_particle_alpha() {
        let mut p = smoke(2.0);
        assert_eq!(p.alpha(), 1.0);
        p.update();
        assert!((p.alpha() - 0.75).abs() < 1e-6);
    }
}
