//! Per-tick kinematic integration shared by the three games
//!
//! Velocities are in units per tick; every helper is applied once per fixed
//! simulation step.

use glam::Vec2;

/// Exponential smoothing of a velocity toward a target velocity.
///
/// `damping` is the fraction of the current velocity kept each tick, so a
/// damping of 0.65 closes 35% of the gap per tick. The lag between the
/// actual motion vector and the target is what gives the racer its drift.
#[inline]
pub fn smooth_toward(vel: Vec2, target: Vec2, damping: f32) -> Vec2 {
    vel + (target - vel) * (1.0 - damping)
}

/// Snap a scalar speed to exactly zero below `epsilon`
#[inline]
pub fn snap_to_zero(speed: f32, epsilon: f32) -> f32 {
    if speed.abs() < epsilon { 0.0 } else { speed }
}

/// Soft speed limiter.
///
/// A magnitude above `cap` loses `step` per tick instead of being clamped,
/// but it can never sit more than one `step` above the cap.
#[inline]
pub fn soft_limit(speed: f32, cap: f32, step: f32) -> f32 {
    let magnitude = speed.abs();
    if magnitude <= cap {
        return speed;
    }
    speed.signum() * (magnitude - step).min(cap + step)
}

/// Move a soft ceiling toward `target`: rises instantly, falls by `step`.
#[inline]
pub fn relax_ceiling(current: f32, target: f32, step: f32) -> f32 {
    if current > target {
        (current - step).max(target)
    } else {
        target
    }
}

/// Explicit Euler step with multiplicative friction applied afterwards
#[inline]
pub fn euler_with_friction(pos: &mut Vec2, vel: &mut Vec2, friction: f32) {
    *pos += *vel;
    *vel *= friction;
}

/// Keep one axis of a body inside `[min, max]`.
///
/// When the position leaves the range it is clamped back and the velocity
/// on that axis is reversed and scaled by `restitution`. Returns true on a
/// rebound.
#[inline]
pub fn bounce_axis(pos: &mut f32, vel: &mut f32, min: f32, max: f32, restitution: f32) -> bool {
    if *pos < min || *pos > max {
        *vel *= -restitution;
        *pos = pos.clamp(min, max);
        true
    } else {
        false
    }
}
