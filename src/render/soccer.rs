//! Soccer drawing

use glam::Vec2;

use super::{Align, Canvas, Color, fill_centered};
use crate::soccer::state::{
    BALL_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, FOOTBALLER_SIZE, GOAL_DEPTH, GOAL_HEIGHT, GOAL_Y,
};
use crate::soccer::{Footballer, MatchMode, MatchState, Outcome, Side};

const GRASS: Color = Color::hex(0x2d5016);
const PLAYER: Color = Color::hex(0x4ecdc4);
const AI: Color = Color::hex(0xff6b6b);
const HOME_NET: Color = Color::rgba(100, 150, 255, 77);
const AWAY_NET: Color = Color::rgba(255, 150, 100, 77);
const AWAY_POSTS: Color = Color::hex(0xffff00);

pub fn draw(canvas: &mut dyn Canvas, state: &MatchState) {
    canvas.clear(GRASS);

    let mid = FIELD_WIDTH * 0.5;
    canvas.line(
        Vec2::new(mid, 0.0),
        Vec2::new(mid, FIELD_HEIGHT),
        2.0,
        Color::WHITE,
    );
    canvas.fill_circle(Vec2::new(mid, FIELD_HEIGHT * 0.5), 4.0, Color::WHITE);

    let mouth = Vec2::new(GOAL_DEPTH, GOAL_HEIGHT);
    let left = Vec2::new(0.0, GOAL_Y);
    let right = Vec2::new(FIELD_WIDTH - GOAL_DEPTH, GOAL_Y);
    canvas.fill_rect(left, mouth, HOME_NET);
    canvas.stroke_rect(left, mouth, 3.0, PLAYER);
    canvas.fill_rect(right, mouth, AWAY_NET);
    canvas.stroke_rect(right, mouth, 3.0, AWAY_POSTS);

    draw_footballer(canvas, &state.player);
    draw_footballer(canvas, &state.ai);
    canvas.fill_circle(state.ball.pos, BALL_RADIUS, Color::WHITE);

    canvas.text(
        Vec2::new(50.0, GOAL_Y - 20.0),
        "AI GOAL",
        20.0,
        Align::Center,
        PLAYER,
    );
    canvas.text(
        Vec2::new(FIELD_WIDTH - 50.0, GOAL_Y - 20.0),
        "YOUR GOAL",
        20.0,
        Align::Center,
        AWAY_POSTS,
    );

    if let MatchMode::Finished(outcome) = state.mode {
        let center = Vec2::new(mid, FIELD_HEIGHT * 0.5);
        let color = match outcome {
            Outcome::PlayerWins => Color::hex(0x4caf50),
            Outcome::AiWins => AI,
            Outcome::Tie => AWAY_POSTS,
        };
        canvas.fill_rect(
            Vec2::ZERO,
            Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            Color::BLACK.with_alpha(0.6),
        );
        canvas.text(
            center - Vec2::new(0.0, 40.0),
            outcome.headline(),
            56.0,
            Align::Center,
            color,
        );
        canvas.text(
            center + Vec2::new(0.0, 10.0),
            &format!("Final Score: {} - {}", state.player_score, state.ai_score),
            24.0,
            Align::Center,
            Color::WHITE,
        );
        canvas.text(
            center + Vec2::new(0.0, 50.0),
            "PRESS ENTER TO PLAY AGAIN",
            18.0,
            Align::Center,
            Color::WHITE,
        );
    }
}

fn draw_footballer(canvas: &mut dyn Canvas, f: &Footballer) {
    let (color, label) = match f.side {
        Side::Player => (PLAYER, "P"),
        Side::Ai => (AI, "AI"),
    };
    canvas.save();
    canvas.translate(f.pos);
    fill_centered(canvas, Vec2::splat(FOOTBALLER_SIZE), color);
    if f.sprinting {
        canvas.stroke_rect(
            Vec2::splat(-FOOTBALLER_SIZE * 0.5),
            Vec2::splat(FOOTBALLER_SIZE),
            2.0,
            Color::WHITE,
        );
    }
    canvas.text(Vec2::ZERO, label, 12.0, Align::Center, Color::WHITE);
    canvas.restore();
}
