//! Shooter actors: player ship, enemies, boss, projectiles, pickups, debris

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::tuning::*;
use crate::render::Color;
use crate::sim::aabb_overlap;

/// Who fired a projectile; decides which targets it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub owner: Owner,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, damage: f32, owner: Owner) -> Self {
        Self {
            pos,
            vel,
            damage,
            owner,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn off_screen(&self) -> bool {
        self.pos.y < -10.0 || self.pos.y > ARENA_HEIGHT + 10.0
    }
}

/// Movement intent for the player ship
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steer {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    /// Absorbs damage before hp; 0..=MAX_SHIELD
    pub shield: f32,
    pub ammo: u32,
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
    pub rapid_fire: u32,
    pub spread: u32,
    pub shotgun: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT - 60.0),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            shield: 0.0,
            ammo: MAX_AMMO,
            cooldown: 0,
            rapid_fire: 0,
            spread: 0,
            shotgun: 0,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Move inside the arena and count the power-up timers down
    pub fn update(&mut self, steer: Steer) {
        let mut vel = Vec2::ZERO;
        if steer.left {
            vel.x = -PLAYER_SPEED;
        }
        if steer.right {
            vel.x = PLAYER_SPEED;
        }
        if steer.up {
            vel.y = -PLAYER_SPEED;
        }
        if steer.down {
            vel.y = PLAYER_SPEED;
        }
        let half = Self::size() * 0.5;
        self.pos.x = (self.pos.x + vel.x).clamp(half.x, ARENA_WIDTH - half.x);
        self.pos.y = (self.pos.y + vel.y).clamp(PLAYER_MIN_Y, ARENA_HEIGHT - half.y);

        self.rapid_fire = self.rapid_fire.saturating_sub(1);
        self.spread = self.spread.saturating_sub(1);
        self.shotgun = self.shotgun.saturating_sub(1);
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    /// Fire if off cooldown and not out of ammo. Returns true if a shot left.
    pub fn shoot(&mut self, out: &mut Vec<Projectile>) -> bool {
        if self.ammo == 0 || self.cooldown > 0 {
            return false;
        }
        let rate = if self.rapid_fire > 0 {
            FIRE_COOLDOWN / 2
        } else {
            FIRE_COOLDOWN
        };
        let muzzle = self.pos - Vec2::new(0.0, PLAYER_HEIGHT / 2.0);
        let up = Vec2::new(0.0, -SHOT_SPEED);

        if self.shotgun > 0 {
            let half = SHOTGUN_PELLETS / 2;
            for i in -half..=half {
                let angle = (i as f32 * 15.0).to_radians();
                out.push(Projectile::new(
                    muzzle + Vec2::new(i as f32 * 5.0, 0.0),
                    Vec2::new(angle.sin() * 3.0, -SHOT_SPEED),
                    SHOTGUN_DAMAGE,
                    Owner::Player,
                ));
            }
            self.cooldown = SHOTGUN_COOLDOWN;
        } else if self.spread > 0 {
            for i in -1..=1 {
                out.push(Projectile::new(
                    muzzle + Vec2::new(i as f32 * 10.0, 0.0),
                    up + Vec2::new(i as f32, 0.0),
                    SHOT_DAMAGE,
                    Owner::Player,
                ));
            }
            self.cooldown = rate;
        } else {
            out.push(Projectile::new(muzzle, up, SHOT_DAMAGE, Owner::Player));
            self.cooldown = rate;
        }
        self.ammo -= 1;
        true
    }

    /// Route damage through the shield first. Returns true when hp hits 0.
    pub fn take_damage(&mut self, damage: f32) -> bool {
        let damage = damage.max(0.0);
        let absorbed = damage.min(self.shield);
        self.shield -= absorbed;
        self.hp -= damage - absorbed;
        self.hp <= 0.0
    }

    pub fn apply(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Health => self.hp = (self.hp + 30.0).min(self.max_hp),
            PowerUpKind::RapidFire => self.rapid_fire = kind.duration().unwrap_or(0),
            PowerUpKind::Spread => self.spread = kind.duration().unwrap_or(0),
            PowerUpKind::Shotgun => self.shotgun = kind.duration().unwrap_or(0),
            PowerUpKind::Shield => self.shield = MAX_SHIELD,
            PowerUpKind::Ammo => self.ammo = (self.ammo + MAX_AMMO).min(MAX_AMMO),
        }
    }

    pub fn hit_by(&self, p: &Projectile) -> bool {
        aabb_overlap(p.pos, self.pos, Self::size() * 0.5)
    }
}

/// A regular enemy, scaled to the level it spawned in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    pub damage: f32,
    pub score: f32,
    pub fire_every: u32,
    pub fire_timer: u32,
    /// Sinker sway phase
    pub wave_offset: f32,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, level: u32, rng: &mut Pcg32) -> Self {
        let stats = kind.stats();
        let l = level as f32;
        let hp = stats.hp * (1.0 + l * 0.2);
        let scale = 1.0 + l * 0.1;
        Self {
            kind,
            pos,
            size: stats.size,
            hp,
            max_hp: hp,
            speed: stats.speed * scale,
            damage: stats.damage * scale,
            score: stats.score * scale,
            fire_every: stats.fire_every,
            fire_timer: rng.random_range(0..60),
            wave_offset: rng.random::<f32>() * TAU,
        }
    }

    /// Fall, sway (sinkers) and maybe shoot
    pub fn update(&mut self) -> Option<Projectile> {
        self.pos.y += self.speed;
        if self.kind == EnemyKind::Sinker {
            self.pos.x += (self.pos.y * 0.02 + self.wave_offset).sin() * 1.5;
        }

        self.fire_timer += 1;
        if self.fire_timer >= self.fire_every {
            self.fire_timer = 0;
            return Some(Projectile::new(
                self.pos + Vec2::new(0.0, self.size / 2.0),
                Vec2::new(0.0, ENEMY_SHOT_SPEED),
                self.damage,
                Owner::Enemy,
            ));
        }
        None
    }

    pub fn off_screen(&self) -> bool {
        self.pos.y > ARENA_HEIGHT + 20.0
    }

    pub fn hit_by(&self, p: &Projectile) -> bool {
        aabb_overlap(p.pos, self.pos, Vec2::splat(self.size / 2.0))
    }
}

/// Boss aggression tier for a remaining-hp fraction
pub fn phase_for(hp: f32, max_hp: f32) -> u8 {
    if hp < max_hp * 0.25 {
        4
    } else if hp < max_hp * 0.5 {
        3
    } else if hp < max_hp * 0.75 {
        2
    } else {
        1
    }
}

/// The boss that opens every fifth level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub vel_x: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// 1..=4, never decreases
    pub phase: u8,
    pub fire_timer: u32,
    pub pattern_timer: u32,
}

impl Boss {
    pub const NAME: &'static str = "kaziX";

    /// `tier` is the boss number (level / 5)
    pub fn new(tier: u32) -> Self {
        let hp = BOSS_HP_PER_TIER * tier.max(1) as f32;
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, BOSS_Y),
            vel_x: BOSS_SPEED,
            hp,
            max_hp: hp,
            phase: 1,
            fire_timer: 0,
            pattern_timer: 0,
        }
    }

    /// Ticks between shots in the current phase
    pub fn fire_every(&self) -> u32 {
        20 - 5 * (self.phase as u32 - 1)
    }

    /// Patrol and fire; shots are appended to `out`
    pub fn update(&mut self, out: &mut Vec<Projectile>) {
        self.pos.x += self.vel_x;
        let half = BOSS_SIZE / 2.0;
        if self.pos.x - half < 0.0 || self.pos.x + half > ARENA_WIDTH {
            self.vel_x = -self.vel_x;
        }

        self.fire_timer += 1;
        self.pattern_timer += 1;
        if self.fire_timer >= self.fire_every() {
            let muzzle = self.pos + Vec2::new(0.0, half);
            if self.pattern_timer % BOSS_SPREAD_EVERY == 0 {
                for i in -1..=1 {
                    let i = i as f32;
                    out.push(Projectile::new(
                        muzzle + Vec2::new(i * 15.0, 0.0),
                        Vec2::new(i * 1.5, ENEMY_SHOT_SPEED),
                        BOSS_SPREAD_DAMAGE,
                        Owner::Enemy,
                    ));
                }
            } else {
                out.push(Projectile::new(
                    muzzle,
                    Vec2::new(0.0, ENEMY_SHOT_SPEED),
                    BOSS_SHOT_DAMAGE,
                    Owner::Enemy,
                ));
            }
            self.fire_timer = 0;
        }
        self.refresh_phase();
    }

    /// Apply a hit; the phase only ever escalates
    pub fn damage(&mut self, amount: f32) {
        self.hp -= amount.max(0.0);
        self.refresh_phase();
    }

    fn refresh_phase(&mut self) {
        self.phase = self.phase.max(phase_for(self.hp, self.max_hp));
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Remaining hp as 0..=1
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        }
    }

    pub fn hit_by(&self, p: &Projectile) -> bool {
        aabb_overlap(p.pos, self.pos, Vec2::splat(BOSS_SIZE / 2.0))
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub rotation: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += POWERUP_FALL_SPEED;
        self.rotation += POWERUP_SPIN;
    }

    pub fn off_screen(&self) -> bool {
        self.pos.y > ARENA_HEIGHT + 20.0
    }

    /// Pickup uses the full box size per axis
    pub fn touches(&self, player: &Player) -> bool {
        aabb_overlap(self.pos, player.pos, Vec2::splat(POWERUP_SIZE))
    }
}

/// Hit debris with gravity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debris {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub size: f32,
    pub age: u32,
}

impl Debris {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.age += 1;
    }

    pub fn is_dead(&self) -> bool {
        self.age >= PARTICLE_LIFETIME
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.age as f32 / PARTICLE_LIFETIME as f32
    }
}

/// Radial burst of `count` debris pieces at `speed`
pub fn burst(
    out: &mut Vec<Debris>,
    cap: usize,
    at: Vec2,
    count: usize,
    speed: f32,
    color: Color,
    rng: &mut Pcg32,
) {
    for _ in 0..count {
        if out.len() >= cap {
            break;
        }
        let angle = rng.random::<f32>() * TAU;
        out.push(Debris {
            pos: at,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            size: rng.random::<f32>() * 3.0 + 1.0,
            age: 0,
        });
    }
}
