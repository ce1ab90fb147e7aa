//! Car physics: throttle/brake, steering, nitro, drift and wall bounces

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Effects, Particle, SkidMark};
use super::track::Track;
use super::tuning::*;
use crate::render::Color;
use crate::sim::kinematics::{relax_ceiling, smooth_toward, snap_to_zero, soft_limit};
use crate::{heading_vector, sim::Contact};

/// Driver intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarControls {
    /// Positive accelerates, negative brakes/reverses
    pub power: f32,
    /// -1 left, +1 right
    pub steering: f32,
    /// Nitro requested
    pub boost: bool,
}

/// What happened to a car during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveOutcome {
    pub wall_hit: bool,
    pub lap_completed: bool,
}

/// A race car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians, 0 = up, clockwise positive
    pub angle: f32,
    /// Signed speed along the heading
    pub speed: f32,
    pub model: CarModel,
    pub stats: ModelStats,
    pub color: Color,
    pub is_ai: bool,
    /// Nitro reserve 0..=100
    pub nitro: f32,
    /// Remaining boost-pad ticks (consumed instead of nitro)
    pub boost_ticks: u32,
    pub boosting: bool,
    /// Soft speed ceiling; falls back gradually after a boost
    pub speed_cap: f32,
    pub laps: u32,
    pub checkpoint_passed: bool,
    /// AI target waypoint
    pub waypoint_index: usize,
    /// Boost pad the car is currently on (re-arms when it leaves)
    pub on_pad: Option<usize>,
}

impl Car {
    pub fn new(pos: Vec2, color: Color, is_ai: bool, model: CarModel) -> Self {
        let stats = model.stats();
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            speed: 0.0,
            model,
            stats,
            color,
            is_ai,
            nitro: NITRO_MAX,
            boost_ticks: 0,
            boosting: false,
            speed_cap: stats.max_speed,
            laps: 0,
            checkpoint_passed: false,
            waypoint_index: 0,
            on_pad: None,
        }
    }

    /// Reset in place for a new race (or a model change on the menu)
    pub fn reset(&mut self, pos: Vec2, model: CarModel) {
        *self = Self::new(pos, self.color, self.is_ai, model);
    }

    /// Current speed ceiling (1.5x while boosting)
    pub fn effective_max_speed(&self) -> f32 {
        self.speed_cap
    }

    /// Advance one tick
    pub fn drive(
        &mut self,
        controls: CarControls,
        track: &Track,
        fx: &mut Effects,
        rng: &mut Pcg32,
    ) -> DriveOutcome {
        let mut outcome = DriveOutcome::default();
        let mut power = controls.power;

        // Nitro / boost pad
        self.boosting = (controls.boost && self.nitro > 0.0 && power > 0.0) || self.boost_ticks > 0;
        if self.boosting {
            power *= BOOST_POWER_FACTOR;
            if self.boost_ticks > 0 {
                self.boost_ticks -= 1;
            } else {
                self.nitro = (self.nitro - NITRO_DRAIN).max(0.0);
            }
            self.sparks(2, Color::hex(0x3498db), fx, rng);
            if rng.random::<f32>() > 0.8 {
                self.sparks(1, Color::hex(0xf1c40f), fx, rng);
            }
        } else if self.nitro < NITRO_MAX {
            self.nitro = (self.nitro + NITRO_REGEN).min(NITRO_MAX);
        }

        // Steering scales with speed and flips in reverse
        if self.speed.abs() > STEER_MIN_SPEED {
            let dir = self.speed.signum();
            self.angle += controls.steering
                * self.stats.turn_speed
                * dir
                * (self.speed.abs() / self.stats.max_speed + 0.5);
        }

        if power > 0.0 {
            self.speed += power * self.stats.accel;
        } else if power < 0.0 {
            self.speed += power * self.stats.brake;
        }
        self.speed *= self.stats.friction;

        let target_cap = if self.boosting {
            self.stats.max_speed * BOOST_SPEED_FACTOR
        } else {
            self.stats.max_speed
        };
        self.speed_cap = relax_ceiling(self.speed_cap, target_cap, SPEED_DECAY_STEP);
        self.speed = soft_limit(self.speed, self.speed_cap, SPEED_DECAY_STEP);
        self.speed = snap_to_zero(self.speed, STOP_EPSILON);

        // Drift: actual velocity lags the heading
        let target_vel = heading_vector(self.angle) * self.speed;
        self.vel = smooth_toward(self.vel, target_vel, DRIFT_FACTOR);

        let next = self.pos + self.vel;
        if track.hits_wall(next) {
            self.speed *= WALL_SPEED_BOUNCE;
            self.vel *= WALL_VELOCITY_BOUNCE;
            self.smoke(8, Color::WHITE, fx, rng);
            outcome.wall_hit = true;
        } else {
            self.pos = next;
        }

        if !self.is_ai {
            let pad = track.pad_at(self.pos);
            if pad.is_some() && pad != self.on_pad {
                self.boost_ticks = PAD_BOOST_TICKS;
                self.nitro = (self.nitro + PAD_NITRO_BONUS).min(NITRO_MAX);
                log::debug!("Boost pad {:?} triggered", pad);
            }
            self.on_pad = pad;
        }

        let slip = (target_vel - self.vel).length();
        if slip > SKID_SLIP && self.speed.abs() > SKID_MIN_SPEED {
            self.skid_mark(fx);
            if rng.random::<f32>() > 0.5 {
                self.smoke(1, Color::rgba(200, 200, 200, 128), fx, rng);
            }
        }

        // Lap logic: checkpoint first, then the finish zone
        if track.in_checkpoint(self.pos) {
            self.checkpoint_passed = true;
        }
        if self.checkpoint_passed && track.in_finish(self.pos) {
            self.laps += 1;
            self.checkpoint_passed = false;
            outcome.lap_completed = true;
        }

        outcome
    }

    /// Push two cars apart after contact
    pub fn resolve_contact(a: &mut Car, b: &mut Car, contact: Contact) {
        let push = contact.normal * (contact.penetration / CAR_PUSH_DIVISOR);
        a.vel -= push;
        b.vel += push;
        a.speed *= CAR_CONTACT_SPEED_KEEP;
        b.speed *= CAR_CONTACT_SPEED_KEEP;
    }

    /// Point `dist` units behind the car
    fn behind(&self, dist: f32) -> Vec2 {
        self.pos - heading_vector(self.angle) * dist
    }

    fn smoke(&self, count: usize, color: Color, fx: &mut Effects, rng: &mut Pcg32) {
        let origin = self.behind(15.0);
        for _ in 0..count {
            let life = rng.random::<f32>() * 20.0 + 20.0;
            fx.emit(Particle {
                pos: origin,
                vel: Vec2::new(Effects::jitter(rng), Effects::jitter(rng)),
                color,
                size: rng.random::<f32>() * 5.0 + 3.0,
                life,
                max_life: life,
                decay: 0.5,
                glow: false,
            });
        }
    }

    fn sparks(&self, count: usize, color: Color, fx: &mut Effects, rng: &mut Pcg32) {
        let origin = self.behind(20.0);
        for _ in 0..count {
            let angle = self.angle + std::f32::consts::PI + Effects::jitter(rng) * 0.8;
            let speed = rng.random::<f32>() * 5.0 + 3.0;
            let life = rng.random::<f32>() * 10.0 + 10.0;
            fx.emit(Particle {
                pos: origin,
                vel: heading_vector(angle) * speed,
                color,
                size: rng.random::<f32>() * 2.0 + 1.0,
                life,
                max_life: life,
                decay: 0.8,
                glow: true,
            });
        }
    }

    fn skid_mark(&self, fx: &mut Effects) {
        // Axle direction (perpendicular to the heading)
        let axle = Vec2::new(self.angle.cos(), self.angle.sin()) * 8.0;
        fx.skid_marks.push(SkidMark {
            from: self.pos - axle,
            to: self.pos + axle,
            life: SKID_LIFE,
        });
    }
}
