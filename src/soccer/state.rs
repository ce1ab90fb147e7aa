//! Soccer match state: footballers, ball, score and clock

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::ms_to_ticks;
use crate::settings::Settings;
use crate::sim::kinematics::{bounce_axis, euler_with_friction};
use crate::sim::seeded_rng;

pub const FIELD_WIDTH: f32 = 1200.0;
pub const FIELD_HEIGHT: f32 = 700.0;
pub const GOAL_HEIGHT: f32 = 200.0;
/// Top of both goal mouths
pub const GOAL_Y: f32 = (FIELD_HEIGHT - GOAL_HEIGHT) / 2.0;
/// Depth of the scoring strip in front of each side line
pub const GOAL_DEPTH: f32 = 20.0;
/// How far past the side line the ball may travel inside a mouth
pub const NET_DEPTH: f32 = 20.0;
pub const GOAL_COOLDOWN_TICKS: u32 = ms_to_ticks(2000);

pub const BALL_RADIUS: f32 = 8.0;
pub const BALL_FRICTION: f32 = 0.98;
pub const BALL_RESTITUTION: f32 = 0.9;

pub const FOOTBALLER_SIZE: f32 = 30.0;
pub const WALK_SPEED: f32 = 5.0;
pub const SPRINT_SPEED: f32 = 7.0;
/// Velocity kept per tick when the human lets go of the keys
pub const IDLE_DAMPING: f32 = 0.9;
/// Footballer-ball distance that carries the ball along
pub const DRIBBLE_RANGE: f32 = 30.0;
/// Share of the footballer's velocity added to the ball on contact
pub const DRIBBLE_TRANSFER: f32 = 0.5;
pub const KICK_RANGE: f32 = 40.0;
pub const KICK_STRENGTH: f32 = 15.0;

/// Which side of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

/// Full-time result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWins,
    AiWins,
    Tie,
}

impl Outcome {
    pub fn from_scores(player: u32, ai: u32) -> Self {
        match player.cmp(&ai) {
            std::cmp::Ordering::Greater => Outcome::PlayerWins,
            std::cmp::Ordering::Less => Outcome::AiWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Outcome::PlayerWins => "YOU WIN!",
            Outcome::AiWins => "YOU LOSE!",
            Outcome::Tie => "TIE!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    Playing,
    Finished(Outcome),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SoccerEvent {
    Kick(Side),
    Goal {
        scorer: Side,
        player_score: u32,
        ai_score: u32,
    },
    FullTime(Outcome),
    Restarted,
}

/// A player on the pitch (human or AI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Footballer {
    pub pos: Vec2,
    pub vel: Vec2,
    pub side: Side,
    /// Cleared by a kick; re-armed when the kick key is released
    pub can_kick: bool,
    pub sprinting: bool,
}

impl Footballer {
    pub fn new(pos: Vec2, side: Side) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            side,
            can_kick: true,
            sprinting: false,
        }
    }

    /// Integrate and keep the whole body on the pitch
    pub fn advance(&mut self) {
        let half = FOOTBALLER_SIZE / 2.0;
        self.pos += self.vel;
        self.pos = self.pos.clamp(
            Vec2::splat(half),
            Vec2::new(FIELD_WIDTH - half, FIELD_HEIGHT - half),
        );
    }

    /// Ball velocity after a kick from here, if the ball is in range.
    ///
    /// The direction uses `atan2` so a ball exactly on the footballer is
    /// kicked along +x.
    pub fn kick_velocity(&self, ball: Vec2) -> Option<Vec2> {
        let delta = ball - self.pos;
        if delta.length() >= KICK_RANGE {
            return None;
        }
        let angle = delta.y.atan2(delta.x);
        Some(Vec2::new(angle.cos(), angle.sin()) * KICK_STRENGTH)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: kickoff_spot(),
            vel: Vec2::ZERO,
        }
    }
}

impl Ball {
    /// True while the ball's center is level with a goal mouth
    pub fn in_mouth(&self) -> bool {
        self.pos.y > GOAL_Y && self.pos.y < GOAL_Y + GOAL_HEIGHT
    }

    fn in_net(&self) -> bool {
        self.pos.x < BALL_RADIUS || self.pos.x > FIELD_WIDTH - BALL_RADIUS
    }

    /// Euler step with friction, then rebound off the boundary. Inside a
    /// goal mouth the side walls sit `NET_DEPTH` further out; a ball that
    /// is already in the net stays level with the mouth.
    pub fn update(&mut self) {
        let was_in_net = self.in_net();
        euler_with_friction(&mut self.pos, &mut self.vel, BALL_FRICTION);

        let (min_y, max_y) = if was_in_net {
            (GOAL_Y + BALL_RADIUS, GOAL_Y + GOAL_HEIGHT - BALL_RADIUS)
        } else {
            (BALL_RADIUS, FIELD_HEIGHT - BALL_RADIUS)
        };
        bounce_axis(
            &mut self.pos.y,
            &mut self.vel.y,
            min_y,
            max_y,
            BALL_RESTITUTION,
        );

        let (min_x, max_x) = if self.in_mouth() {
            (BALL_RADIUS - NET_DEPTH, FIELD_WIDTH - BALL_RADIUS + NET_DEPTH)
        } else {
            (BALL_RADIUS, FIELD_WIDTH - BALL_RADIUS)
        };
        bounce_axis(
            &mut self.pos.x,
            &mut self.vel.x,
            min_x,
            max_x,
            BALL_RESTITUTION,
        );
    }

    /// Which side scores if the ball is in a scoring strip
    pub fn scoring_side(&self) -> Option<Side> {
        if !self.in_mouth() {
            return None;
        }
        if self.pos.x > FIELD_WIDTH - GOAL_DEPTH {
            Some(Side::Player)
        } else if self.pos.x < GOAL_DEPTH {
            Some(Side::Ai)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

pub fn kickoff_spot() -> Vec2 {
    Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0)
}

/// Complete soccer state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub mode: MatchMode,
    pub player: Footballer,
    pub ai: Footballer,
    pub ball: Ball,
    pub player_score: u32,
    pub ai_score: u32,
    /// Match length in ticks
    pub match_ticks: u32,
    /// Ticks left on the clock
    pub remaining_ticks: u32,
    /// Ticks until another goal may count
    pub goal_cooldown: u32,
    pub events: Vec<SoccerEvent>,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let seconds = settings.soccer.match_seconds.max(1.0);
        let match_ticks = (seconds * crate::consts::TICKS_PER_SECOND as f32).round() as u32;
        Self {
            mode: MatchMode::Playing,
            player: Footballer::new(Vec2::new(100.0, FIELD_HEIGHT / 2.0), Side::Player),
            ai: Footballer::new(Vec2::new(FIELD_WIDTH - 100.0, FIELD_HEIGHT / 2.0), Side::Ai),
            ball: Ball::default(),
            player_score: 0,
            ai_score: 0,
            match_ticks,
            remaining_ticks: match_ticks,
            goal_cooldown: 0,
            events: Vec::new(),
            rng: seeded_rng(seed),
        }
    }

    /// Kick off again with the score and clock reset
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        let events = std::mem::take(&mut self.events);
        let match_ticks = self.match_ticks;
        *self = Self {
            rng,
            events,
            match_ticks,
            remaining_ticks: match_ticks,
            ..Self::new(0, &Settings::default())
        };
        self.events.push(SoccerEvent::Restarted);
        log::info!("Soccer match restarted");
    }

    /// Seconds left on the clock
    pub fn remaining_secs(&self) -> f32 {
        self.remaining_ticks as f32 * crate::consts::SIM_DT
    }

    /// Clock text as `m:ss`
    pub fn clock_text(&self) -> String {
        let secs = self.remaining_ticks / crate::consts::TICKS_PER_SECOND;
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    pub fn drain_events(&mut self) -> Vec<SoccerEvent> {
        std::mem::take(&mut self.events)
    }
}
