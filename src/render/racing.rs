//! Racer drawing

use glam::Vec2;

use super::{Align, Canvas, Color, fill_centered};
use crate::racing::tuning::{CAR_HEIGHT, CAR_WIDTH};
use crate::racing::{Car, CarId, RacePhase, RaceState};
use crate::racing::track::{PAD_RADIUS, TRACK_HEIGHT, TRACK_WIDTH};

const GRASS: Color = Color::hex(0x27ae60);
const TARMAC: Color = Color::hex(0x34495e);
const INFIELD: Color = Color::hex(0x2ecc71);
const PAD: Color = Color::hex(0x00d2ff);
const KERB: Color = Color::hex(0xecf0f1);

pub fn draw(canvas: &mut dyn Canvas, state: &RaceState) {
    canvas.clear(GRASS);
    canvas.save();
    if state.fx.shake > 0.0 {
        // Deterministic wobble so drawing never touches the sim RNG
        let t = state.time_ticks as f32;
        canvas.translate(Vec2::new((t * 1.7).sin(), (t * 2.3).cos()) * state.fx.shake);
    }

    draw_track(canvas, state);

    for mark in &state.fx.skid_marks {
        let alpha = mark.life as f32 / 180.0 * 0.4;
        canvas.line(mark.from, mark.to, 3.0, Color::BLACK.with_alpha(alpha));
    }

    for car in state.ai_cars.iter().chain(std::iter::once(&state.player)) {
        draw_car(canvas, car);
    }

    for p in &state.fx.particles {
        let alpha = p.alpha();
        canvas.set_additive(p.glow);
        canvas.set_alpha(alpha);
        canvas.fill_circle(p.pos, p.size * alpha, p.color);
    }
    canvas.set_additive(false);
    canvas.set_alpha(1.0);
    canvas.restore();

    draw_overlay(canvas, state);
}

fn draw_track(canvas: &mut dyn Canvas, state: &RaceState) {
    let t = &state.track;
    canvas.fill_rect(t.outer.min, t.outer.size(), TARMAC);
    canvas.stroke_rect(t.outer.min, t.outer.size(), 4.0, KERB);
    canvas.fill_rect(t.infield.min, t.infield.size(), INFIELD);
    canvas.stroke_rect(t.infield.min, t.infield.size(), 4.0, KERB);

    // Checkered finish strip
    let finish = t.finish;
    let cell = 10.0;
    let cols = (finish.size().x / cell) as i32;
    for i in 0..cols {
        for j in 0..2 {
            let color = if (i + j) % 2 == 0 { Color::WHITE } else { Color::BLACK };
            let min = Vec2::new(
                finish.min.x + i as f32 * cell,
                finish.max.y - 20.0 + j as f32 * cell,
            );
            canvas.fill_rect(min, Vec2::splat(cell), color);
        }
    }
    canvas.stroke_rect(
        t.checkpoint.min,
        t.checkpoint.size(),
        1.0,
        Color::WHITE.with_alpha(0.2),
    );

    for (i, &pad) in t.boost_pads.iter().enumerate() {
        let pulse = 0.5 + 0.3 * (state.time_ticks as f32 * 0.1 + i as f32).sin();
        canvas.set_alpha(pulse);
        canvas.fill_circle(pad, PAD_RADIUS * 0.6, PAD);
        canvas.set_alpha(1.0);
    }
}

fn draw_car(canvas: &mut dyn Canvas, car: &Car) {
    canvas.save();
    canvas.translate(car.pos);
    canvas.rotate(car.angle);

    // Shadow, body, windscreen
    canvas.set_alpha(0.3);
    fill_centered(
        canvas,
        Vec2::new(CAR_WIDTH + 4.0, CAR_HEIGHT + 4.0),
        Color::BLACK,
    );
    canvas.set_alpha(1.0);
    fill_centered(canvas, Vec2::new(CAR_WIDTH, CAR_HEIGHT), car.color);
    canvas.fill_rect(
        Vec2::new(-CAR_WIDTH * 0.35, -CAR_HEIGHT * 0.25),
        Vec2::new(CAR_WIDTH * 0.7, CAR_HEIGHT * 0.2),
        Color::hex(0x1a1a2e),
    );
    if car.boosting {
        canvas.set_additive(true);
        canvas.fill_circle(
            Vec2::new(0.0, CAR_HEIGHT * 0.5 + 4.0),
            5.0,
            Color::hex(0x3498db),
        );
        canvas.set_additive(false);
    }
    if car.speed < 0.0 {
        canvas.fill_rect(
            Vec2::new(-CAR_WIDTH * 0.5, CAR_HEIGHT * 0.5 - 3.0),
            Vec2::new(CAR_WIDTH, 3.0),
            Color::hex(0xff4757),
        );
    }

    canvas.restore();
}

fn draw_overlay(canvas: &mut dyn Canvas, state: &RaceState) {
    let center = Vec2::new(TRACK_WIDTH * 0.5, TRACK_HEIGHT * 0.5);
    match state.phase {
        RacePhase::Menu => {
            let info = state.player_model.info();
            canvas.text(
                center - Vec2::new(0.0, 40.0),
                "PRESS ENTER TO RACE",
                36.0,
                Align::Center,
                Color::WHITE,
            );
            canvas.text(center, info.title, 24.0, Align::Center, state.player_color);
            canvas.text(
                center + Vec2::new(0.0, 30.0),
                info.description,
                14.0,
                Align::Center,
                Color::WHITE,
            );
        }
        RacePhase::Countdown => {
            if let Some(text) = state.countdown_text() {
                canvas.text(center, &text, 96.0, Align::Center, Color::WHITE);
            }
        }
        RacePhase::Racing => {}
        RacePhase::Finished => {
            if let Some(result) = state.result {
                let (title, color) = match result.winner {
                    CarId::Player => ("YOU WIN!", Color::hex(0x2ecc71)),
                    CarId::Ai(_) => ("AI WINS!", Color::hex(0xe74c3c)),
                };
                canvas.text(
                    center - Vec2::new(0.0, 30.0),
                    title,
                    56.0,
                    Align::Center,
                    color,
                );
                canvas.text(
                    center + Vec2::new(0.0, 20.0),
                    &format!("{:.2}s", result.time_secs),
                    28.0,
                    Align::Center,
                    Color::WHITE,
                );
            }
        }
    }
    if let Some(banner) = state.banner() {
        canvas.text(
            Vec2::new(center.x, 160.0),
            banner,
            32.0,
            Align::Center,
            Color::hex(0xf1c40f),
        );
    }
}
