//! Computer-controlled footballer

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ball, FIELD_HEIGHT, Footballer, KICK_RANGE, WALK_SPEED};

/// Inside this distance the AI goes for the ball
pub const CHASE_RANGE: f32 = 100.0;
/// Where the AI waits when the ball is far away
pub const ANCHOR: Vec2 = Vec2::new(300.0, FIELD_HEIGHT / 2.0);
pub const ANCHOR_SPEED: f32 = WALK_SPEED * 0.7;
/// Inside this distance of the anchor the AI coasts to a stop
pub const ANCHOR_SETTLE: f32 = 20.0;
pub const ANCHOR_DAMPING: f32 = 0.8;
/// Maximum kick noise per axis
pub const KICK_NOISE: f32 = 2.0;

/// Pick the AI's velocity for this tick and kick when the ball is close.
/// Returns true when a kick landed.
pub fn update(ai: &mut Footballer, ball: &mut Ball, rng: &mut Pcg32) -> bool {
    let to_ball = ball.pos - ai.pos;
    let distance = to_ball.length();

    if distance < CHASE_RANGE {
        ai.vel = to_ball.normalize_or_zero() * WALK_SPEED;
        if distance < KICK_RANGE && ai.can_kick {
            ai.can_kick = false;
            if let Some(kick) = ai.kick_velocity(ball.pos) {
                let noise = Vec2::new(
                    rng.random_range(-KICK_NOISE..KICK_NOISE),
                    rng.random_range(-KICK_NOISE..KICK_NOISE),
                );
                ball.vel = kick + noise;
                return true;
            }
        }
        return false;
    }

    let to_anchor = ANCHOR - ai.pos;
    if to_anchor.length() > ANCHOR_SETTLE {
        ai.vel = to_anchor.normalize_or_zero() * ANCHOR_SPEED;
    } else {
        ai.vel *= ANCHOR_DAMPING;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seeded_rng;
    use crate::soccer::state::Side;

    #[test]
    fn test_ai_chases_nearby_ball() {
        let mut rng = seeded_rng(3);
        let mut ai = Footballer::new(Vec2::new(600.0, 350.0), Side::Ai);
        let mut ball = Ball {
            pos: Vec2::new(600.0, 280.0),
            vel: Vec2::ZERO,
        };
        assert!(!update(&mut ai, &mut ball, &mut rng));
        assert!((ai.vel - Vec2::new(0.0, -WALK_SPEED)).length() < 1e-4);
    }

    #[test]
    fn test_ai_kick_has_bounded_noise() {
        let mut rng = seeded_rng(3);
        for _ in 0..50 {
            let mut ai = Footballer::new(Vec2::new(600.0, 350.0), Side::Ai);
            let mut ball = Ball {
                pos: Vec2::new(570.0, 350.0),
                vel: Vec2::ZERO,
            };
            assert!(update(&mut ai, &mut ball, &mut rng));
            assert!(!ai.can_kick);
            assert!((ball.vel.x + 15.0).abs() <= KICK_NOISE);
            assert!(ball.vel.y.abs() <= KICK_NOISE);

            // No second kick until re-armed
            assert!(!update(&mut ai, &mut ball, &mut rng));
        }
    }

    #[test]
    fn test_ai_returns_to_anchor_and_settles() {
        let mut rng = seeded_rng(3);
        let mut ai = Footballer::new(Vec2::new(1100.0, 350.0), Side::Ai);
        let mut ball = Ball {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
        };
        update(&mut ai, &mut ball, &mut rng);
        assert!((ai.vel - Vec2::new(-ANCHOR_SPEED, 0.0)).length() < 1e-4);

        ai.pos = ANCHOR + Vec2::new(5.0, 0.0);
        ai.vel = Vec2::new(-1.0, 0.0);
        update(&mut ai, &mut ball, &mut rng);
        assert!((ai.vel.x + 0.8).abs() < 1e-6);
    }
}
