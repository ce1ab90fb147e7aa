//! One running game, as seen by the host
//!
//! The browser driver and the native runner both hold a [`Session`] and
//! call `tick` once per fixed step, then `draw` and `hud` once per frame.

use serde::{Deserialize, Serialize};

use crate::best_time::BestTime;
use crate::hud::{self, HudLine};
use crate::persistence::KeyValueStore;
use crate::platform::input::KeySet;
use crate::racing::{self, CarModel, RaceEvent, RaceInput, RaceState};
use crate::render::{self, Canvas, Color};
use crate::settings::Settings;
use crate::shooter::{self, ShooterEvent, ShooterInput, ShooterState};
use crate::soccer::{self, MatchState, SoccerEvent, SoccerInput};

/// Which game a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Racing,
    Shooter,
    Soccer,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Racing, GameKind::Shooter, GameKind::Soccer];

    /// Parse a game name, falling back to racing for anything unknown
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "shooter" => GameKind::Shooter,
            "soccer" => GameKind::Soccer,
            "racing" => GameKind::Racing,
            other => {
                log::warn!("Unknown game '{}', defaulting to racing", other);
                GameKind::Racing
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GameKind::Racing => "racing",
            GameKind::Shooter => "shooter",
            GameKind::Soccer => "soccer",
        }
    }

    /// Canvas size in pixels
    pub fn canvas_size(&self) -> (u32, u32) {
        match self {
            GameKind::Racing => (
                racing::track::TRACK_WIDTH as u32,
                racing::track::TRACK_HEIGHT as u32,
            ),
            GameKind::Shooter => (
                shooter::tuning::ARENA_WIDTH as u32,
                shooter::tuning::ARENA_HEIGHT as u32,
            ),
            GameKind::Soccer => (
                soccer::state::FIELD_WIDTH as u32,
                soccer::state::FIELD_HEIGHT as u32,
            ),
        }
    }
}

/// Events from whichever game is running
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Race(RaceEvent),
    Shooter(ShooterEvent),
    Soccer(SoccerEvent),
}

pub enum Session {
    Racing(Box<RaceState>),
    Shooter(Box<ShooterState>),
    Soccer(Box<MatchState>),
}

impl Session {
    /// Start `kind`; the racer reads its stored best time from `store`
    pub fn new(kind: GameKind, seed: u64, settings: &Settings, store: &dyn KeyValueStore) -> Self {
        log::info!("Starting {} (seed {})", kind.key(), seed);
        match kind {
            GameKind::Racing => {
                let best = BestTime::load(store);
                Session::Racing(Box::new(RaceState::new(seed, settings, best)))
            }
            GameKind::Shooter => Session::Shooter(Box::new(ShooterState::new(seed, settings))),
            GameKind::Soccer => Session::Soccer(Box::new(MatchState::new(seed, settings))),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Session::Racing(_) => GameKind::Racing,
            Session::Shooter(_) => GameKind::Shooter,
            Session::Soccer(_) => GameKind::Soccer,
        }
    }

    /// Sample `keys` and advance one fixed step. A new best lap time is
    /// written to `store` as soon as the race reports it.
    pub fn tick(&mut self, keys: &mut KeySet, store: &mut dyn KeyValueStore) {
        match self {
            Session::Racing(state) => {
                racing::tick(state, &RaceInput::from_keys(keys));
                let new_best = state
                    .events
                    .iter()
                    .any(|e| matches!(e, RaceEvent::NewBestTime(_)));
                if new_best {
                    state.best_time.save(store);
                }
            }
            Session::Shooter(state) => shooter::tick(state, &ShooterInput::from_keys(keys)),
            Session::Soccer(state) => soccer::tick(state, &SoccerInput::from_keys(keys)),
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Session::Racing(state) => render::racing::draw(canvas, state),
            Session::Shooter(state) => render::shooter::draw(canvas, state),
            Session::Soccer(state) => render::soccer::draw(canvas, state),
        }
    }

    pub fn hud(&self) -> Vec<HudLine> {
        match self {
            Session::Racing(state) => hud::racing(state),
            Session::Shooter(state) => hud::shooter(state),
            Session::Soccer(state) => hud::soccer(state),
        }
    }

    /// Take every pending event
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        match self {
            Session::Racing(state) => state
                .drain_events()
                .into_iter()
                .map(SessionEvent::Race)
                .collect(),
            Session::Shooter(state) => state
                .drain_events()
                .into_iter()
                .map(SessionEvent::Shooter)
                .collect(),
            Session::Soccer(state) => state
                .drain_events()
                .into_iter()
                .map(SessionEvent::Soccer)
                .collect(),
        }
    }

    /// Menu car choice; ignored outside the racer or while a race runs
    pub fn select_car(&mut self, model: Option<CarModel>, color: Option<Color>) -> bool {
        let Session::Racing(state) = self else {
            return false;
        };
        let mut changed = false;
        if let Some(model) = model {
            changed |= racing::select_model(state, model);
        }
        if let Some(color) = color {
            changed |= racing::select_color(state, color);
        }
        changed
    }
}
