//! Waypoint-following driver for the AI cars

use super::car::{Car, CarControls};
use super::track::{Track, WAYPOINT_REACHED};
use crate::{heading_of, wrap_angle};

/// Heading error below which the AI drives straight
const STEER_DEADZONE: f32 = 0.05;
/// Heading error below which the AI uses its cruising throttle
const CRUISE_ANGLE: f32 = 0.4;
/// Heading error above which the AI brakes into the turn
const BRAKE_ANGLE: f32 = 1.2;

const CRUISE_POWER: f32 = 0.75;
const CORNER_POWER: f32 = 0.45;
const BRAKE_POWER: f32 = -0.15;

/// Pick controls for an AI car and advance its waypoint when close enough.
///
/// The AI never requests nitro.
pub fn steer(car: &mut Car, track: &Track) -> CarControls {
    let Some(target) = track.waypoint(car.waypoint_index) else {
        return CarControls::default();
    };

    let delta = target - car.pos;
    let diff = wrap_angle(heading_of(delta) - car.angle);

    let steering = if diff.abs() > STEER_DEADZONE {
        diff.signum()
    } else {
        0.0
    };

    let power = if diff.abs() > BRAKE_ANGLE {
        BRAKE_POWER
    } else if diff.abs() < CRUISE_ANGLE {
        CRUISE_POWER
    } else {
        CORNER_POWER
    };

    if delta.length() < WAYPOINT_REACHED {
        car.waypoint_index = track.next_waypoint_index(car.waypoint_index);
    }

    CarControls {
        power,
        steering,
        boost: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::racing::CarModel;
    use crate::render::Color;
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_2;

    fn ai_at(pos: Vec2, angle: f32) -> Car {
        let mut car = Car::new(pos, Color::WHITE, true, CarModel::Drifter);
        car.angle = angle;
        car
    }

    #[test]
    fn test_straight_ahead_cruises() {
        let track = Track::default();
        // Waypoint 1 is (500, 80); car on the top straight facing right
        let mut car = ai_at(Vec2::new(300.0, 80.0), FRAC_PI_2);
        car.waypoint_index = 1;
        let c = steer(&mut car, &track);
        assert_eq!(c.steering, 0.0);
        assert_eq!(c.power, CRUISE_POWER);
        assert!(!c.boost);
        assert_eq!(car.waypoint_index, 1);
    }

    #[test]
    fn test_sharp_turn_brakes_and_steers() {
        let track = Track::default();
        // Facing down with the target to the right: error is -π/2
        let mut car = ai_at(Vec2::new(300.0, 80.0), std::f32::consts::PI);
        car.waypoint_index = 1;
        let c = steer(&mut car, &track);
        assert_eq!(c.steering, -1.0);
        assert_eq!(c.power, BRAKE_POWER);
    }

    #[test]
    fn test_moderate_error_uses_corner_power() {
        let track = Track::default();
        let mut car = ai_at(Vec2::new(300.0, 80.0), FRAC_PI_2 - 0.8);
        car.waypoint_index = 1;
        let c = steer(&mut car, &track);
        assert_eq!(c.steering, 1.0);
        assert_eq!(c.power, CORNER_POWER);
    }

    #[test]
    fn test_waypoint_advances_and_wraps() {
        let track = Track::default();
        let mut car = ai_at(Vec2::new(90.0, 340.0), 0.0);
        car.waypoint_index = 7;
        steer(&mut car, &track);
        assert_eq!(car.waypoint_index, 0);
    }

    #[test]
    fn test_no_waypoints_idles() {
        let track = Track {
            waypoints: Vec::new(),
            ..Default::default()
        };
        let mut car = ai_at(Vec2::new(100.0, 100.0), 0.0);
        assert_eq!(steer(&mut car, &track), CarControls::default());
    }
}
