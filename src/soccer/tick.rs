//! Fixed-timestep soccer simulation

use glam::Vec2;

use super::ai;
use super::state::{
    DRIBBLE_RANGE, DRIBBLE_TRANSFER, Footballer, GOAL_COOLDOWN_TICKS, IDLE_DAMPING, MatchMode,
    MatchState, Outcome, SPRINT_SPEED, Side, SoccerEvent, WALK_SPEED,
};
use crate::platform::input::{Key, KeySet};
use crate::sim::within_radius;

/// Human controls sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoccerInput {
    /// Unnormalized direction, each axis in {-1, 0, 1}
    pub dir: Vec2,
    pub sprint: bool,
    pub kick: bool,
    pub restart: bool,
}

impl SoccerInput {
    /// Later keys win on each axis
    pub fn from_keys(keys: &KeySet) -> Self {
        let mut dir = Vec2::ZERO;
        if keys.any_down(&[Key::Left, Key::A]) {
            dir.x = -1.0;
        }
        if keys.any_down(&[Key::Right, Key::D]) {
            dir.x = 1.0;
        }
        if keys.any_down(&[Key::Up, Key::W]) {
            dir.y = -1.0;
        }
        if keys.any_down(&[Key::Down, Key::S]) {
            dir.y = 1.0;
        }
        Self {
            dir,
            sprint: keys.is_down(Key::Shift),
            kick: keys.is_down(Key::Space),
            restart: keys.is_down(Key::Enter),
        }
    }
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &SoccerInput) {
    match state.mode {
        MatchMode::Finished(_) => {
            if input.restart {
                state.restart();
            }
        }
        MatchMode::Playing => play_step(state, input),
    }
}

fn play_step(state: &mut MatchState, input: &SoccerInput) {
    state.remaining_ticks = state.remaining_ticks.saturating_sub(1);
    if state.remaining_ticks == 0 {
        full_time(state);
        return;
    }

    steer_player(&mut state.player, input);
    if input.kick && state.player.can_kick {
        state.player.can_kick = false;
        if let Some(kick) = state.player.kick_velocity(state.ball.pos) {
            state.ball.vel = kick;
            state.events.push(SoccerEvent::Kick(Side::Player));
        }
    }
    state.player.advance();

    if ai::update(&mut state.ai, &mut state.ball, &mut state.rng) {
        state.events.push(SoccerEvent::Kick(Side::Ai));
    }
    state.ai.advance();

    state.ball.update();

    // The kick key gates both sides
    if !input.kick {
        state.player.can_kick = true;
        state.ai.can_kick = true;
    }

    for footballer in [&state.player, &state.ai] {
        if within_radius(state.ball.pos, footballer.pos, DRIBBLE_RANGE) {
            state.ball.vel += footballer.vel * DRIBBLE_TRANSFER;
        }
    }

    state.goal_cooldown = state.goal_cooldown.saturating_sub(1);
    if state.goal_cooldown == 0 {
        if let Some(scorer) = state.ball.scoring_side() {
            goal(state, scorer);
        }
    }
}

fn steer_player(player: &mut Footballer, input: &SoccerInput) {
    player.sprinting = input.sprint;
    let speed = if input.sprint { SPRINT_SPEED } else { WALK_SPEED };
    if input.dir != Vec2::ZERO {
        player.vel = input.dir.normalize() * speed;
    } else {
        player.vel *= IDLE_DAMPING;
    }
}

fn goal(state: &mut MatchState, scorer: Side) {
    match scorer {
        Side::Player => state.player_score += 1,
        Side::Ai => state.ai_score += 1,
    }
    state.ball.reset();
    state.goal_cooldown = GOAL_COOLDOWN_TICKS;
    log::info!(
        "Goal for {:?}: {} - {}",
        scorer,
        state.player_score,
        state.ai_score
    );
    state.events.push(SoccerEvent::Goal {
        scorer,
        player_score: state.player_score,
        ai_score: state.ai_score,
    });
}

fn full_time(state: &mut MatchState) {
    let outcome = Outcome::from_scores(state.player_score, state.ai_score);
    state.mode = MatchMode::Finished(outcome);
    state.events.push(SoccerEvent::FullTime(outcome));
    log::info!(
        "Full time: {} - {} ({:?})",
        state.player_score,
        state.ai_score,
        outcome
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::soccer::state::{FIELD_HEIGHT, FIELD_WIDTH, GOAL_HEIGHT, GOAL_Y, kickoff_spot};
    use proptest::prelude::*;

    fn new_match() -> MatchState {
        MatchState::new(5, &Settings::default())
    }

    /// Park both footballers far from the ball so only the ball moves
    fn clear_pitch(state: &mut MatchState) {
        state.player.pos = Vec2::new(600.0, 60.0);
        state.ai.pos = Vec2::new(600.0, 640.0);
    }

    #[test]
    fn test_input_mapping() {
        let keys = KeySet::with(&[Key::A, Key::Right, Key::W, Key::Shift]);
        let input = SoccerInput::from_keys(&keys);
        assert_eq!(input.dir, Vec2::new(1.0, -1.0));
        assert!(input.sprint);
        assert!(!input.kick);
    }

    #[test]
    fn test_diagonal_speed_is_normalized() {
        let mut state = new_match();
        let input = SoccerInput {
            dir: Vec2::new(1.0, 1.0),
            sprint: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.player.vel.length() - SPRINT_SPEED).abs() < 1e-4);

        tick(&mut state, &SoccerInput::default());
        assert!(
            (state.player.vel.length() - SPRINT_SPEED * IDLE_DAMPING).abs() < 1e-4
        );
    }

    #[test]
    fn test_goal_scores_once_then_cooldown() {
        let mut state = new_match();
        clear_pitch(&mut state);
        state.ball.pos = Vec2::new(1175.0, 350.0);
        state.ball.vel = Vec2::new(10.0, 0.0);
        tick(&mut state, &SoccerInput::default());

        assert_eq!(state.player_score, 1);
        assert_eq!(state.ai_score, 0);
        assert_eq!(state.ball.pos, kickoff_spot());
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.goal_cooldown, GOAL_COOLDOWN_TICKS);
        let goals = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SoccerEvent::Goal { .. }))
            .count();
        assert_eq!(goals, 1);

        // A ball held in the other strip is ignored for the whole window
        let hold_in_left_strip = |state: &mut MatchState| {
            clear_pitch(state);
            state.ball.pos = Vec2::new(10.0, 350.0);
            state.ball.vel = Vec2::ZERO;
            tick(state, &SoccerInput::default());
        };
        for left in (1..GOAL_COOLDOWN_TICKS).rev() {
            hold_in_left_strip(&mut state);
            assert_eq!(state.ai_score, 0);
            assert_eq!(state.goal_cooldown, left);
        }

        hold_in_left_strip(&mut state);
        assert_eq!(state.ai_score, 1);
        assert_eq!(state.player_score, 1);
        assert_eq!(state.goal_cooldown, GOAL_COOLDOWN_TICKS);
    }

    #[test]
    fn test_ai_goal_on_left() {
        let mut state = new_match();
        clear_pitch(&mut state);
        state.ball.pos = Vec2::new(25.0, 300.0);
        state.ball.vel = Vec2::new(-10.0, 0.0);
        tick(&mut state, &SoccerInput::default());
        assert_eq!(state.ai_score, 1);
        assert_eq!(state.player_score, 0);
    }

    #[test]
    fn test_ball_outside_mouth_never_scores() {
        let mut state = new_match();
        clear_pitch(&mut state);
        state.ball.pos = Vec2::new(FIELD_WIDTH - 15.0, 150.0);
        state.ball.vel = Vec2::new(12.0, 0.0);
        for _ in 0..30 {
            tick(&mut state, &SoccerInput::default());
        }
        assert_eq!(state.player_score, 0);
        assert_eq!(state.ai_score, 0);
    }

    #[test]
    fn test_kick_needs_release_between_kicks() {
        let mut state = new_match();
        clear_pitch(&mut state);
        state.player.pos = Vec2::new(580.0, 350.0);
        let kick = SoccerInput {
            kick: true,
            ..Default::default()
        };
        tick(&mut state, &kick);
        assert!(state.ball.vel.x > 10.0);
        assert!(!state.player.can_kick);

        // Still held: no re-arm
        state.ball.pos = state.player.pos + Vec2::new(-20.0, 0.0);
        state.ball.vel = Vec2::ZERO;
        tick(&mut state, &kick);
        assert!(!state.player.can_kick);

        tick(&mut state, &SoccerInput::default());
        assert!(state.player.can_kick);
        assert!(state.ai.can_kick);
    }

    #[test]
    fn test_dribble_adds_half_velocity() {
        let mut state = new_match();
        clear_pitch(&mut state);
        state.player.pos = Vec2::new(580.0, 350.0);
        state.ball.pos = Vec2::new(600.0, 350.0);
        let input = SoccerInput {
            dir: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(
            (state.ball.vel.x - WALK_SPEED * DRIBBLE_TRANSFER).abs() < 1e-4
        );
    }

    #[test]
    fn test_full_time_and_restart() {
        let mut state = new_match();
        state.remaining_ticks = 2;
        state.player_score = 2;
        state.ai_score = 1;
        tick(&mut state, &SoccerInput::default());
        assert_eq!(state.mode, MatchMode::Playing);
        tick(&mut state, &SoccerInput::default());
        assert_eq!(state.mode, MatchMode::Finished(Outcome::PlayerWins));
        assert!(
            state.events.contains(&SoccerEvent::FullTime(Outcome::PlayerWins))
        );

        // Frozen until restart
        let ball = state.ball.pos;
        tick(&mut state, &SoccerInput::default());
        assert_eq!(state.ball.pos, ball);

        tick(
            &mut state,
            &SoccerInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.mode, MatchMode::Playing);
        assert_eq!(state.player_score, 0);
        assert_eq!(state.remaining_ticks, state.match_ticks);
    }

    #[test]
    fn test_default_match_lasts_two_minutes() {
        let mut state = new_match();
        let mut ticks = 0;
        while state.mode == MatchMode::Playing {
            tick(&mut state, &SoccerInput::default());
            ticks += 1;
        }
        assert_eq!(ticks, 120 * 60);
    }

    proptest! {
        #[test]
        fn prop_everyone_stays_on_pitch(
            moves in proptest::collection::vec(
                (-1i8..=1, -1i8..=1, any::<bool>(), any::<bool>()),
                1..400,
            ),
            seed in any::<u64>(),
        ) {
            let mut state = MatchState::new(seed, &Settings::default());
            for (dx, dy, sprint, kick) in moves {
                let input = SoccerInput {
                    dir: Vec2::new(dx as f32, dy as f32),
                    sprint,
                    kick,
                    restart: false,
                };
                tick(&mut state, &input);
                for f in [&state.player, &state.ai] {
                    prop_assert!(f.pos.x >= 15.0 && f.pos.x <= FIELD_WIDTH - 15.0);
                    prop_assert!(f.pos.y >= 15.0 && f.pos.y <= 685.0);
                }
                let ball = state.ball.pos;
                prop_assert!(ball.x >= -12.0 && ball.x <= FIELD_WIDTH + 12.0);
                prop_assert!(ball.y >= 0.0 && ball.y <= FIELD_HEIGHT);
                if ball.x < 0.0 || ball.x > FIELD_WIDTH {
                    prop_assert!(ball.y > GOAL_Y && ball.y < GOAL_Y + GOAL_HEIGHT);
                }
            }
        }
    }
}
