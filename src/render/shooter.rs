//! Shooter drawing

use glam::Vec2;

use super::{Align, Canvas, Color, fill_centered};
use crate::shooter::entities::{Boss, Enemy, Owner, Player, PowerUp};
use crate::shooter::tuning::{
    ARENA_HEIGHT, ARENA_WIDTH, BOSS_SIZE, GAME_OVER_TICKS, POWERUP_SIZE, PROJECTILE_HEIGHT,
    PROJECTILE_WIDTH,
};
use crate::shooter::{ShooterMode, ShooterState};

const SPACE: Color = Color::hex(0x0a0a1a);
const GRID: Color = Color::rgba(0, 255, 136, 26);
const HULL: Color = Color::hex(0x00ff88);
const SHIELD: Color = Color::hex(0x00bfff);
const ENEMY_SHOT: Color = Color::hex(0xff4444);
const BOSS_HULL: Color = Color::hex(0xffaa00);
const BAR_BACK: Color = Color::hex(0xff0000);
const BAR_FILL: Color = Color::hex(0x00ff00);

pub fn draw(canvas: &mut dyn Canvas, state: &ShooterState) {
    canvas.clear(SPACE);
    let mut x = 0.0;
    while x < ARENA_WIDTH {
        canvas.line(Vec2::new(x, 0.0), Vec2::new(x, ARENA_HEIGHT), 1.0, GRID);
        x += 40.0;
    }

    for d in &state.debris {
        canvas.set_alpha(d.alpha());
        canvas.fill_circle(d.pos, d.size, d.color);
    }
    canvas.set_alpha(1.0);

    for p in &state.power_ups {
        draw_power_up(canvas, p);
    }
    for e in &state.enemies {
        draw_enemy(canvas, e);
    }
    if let Some(boss) = &state.boss {
        draw_boss(canvas, boss);
    }
    for p in &state.projectiles {
        let color = match p.owner {
            Owner::Player => HULL,
            Owner::Enemy => ENEMY_SHOT,
        };
        let size = Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
        canvas.fill_rect(p.pos - size * 0.5, size, color);
    }
    if state.mode != ShooterMode::GameOver {
        draw_player(canvas, &state.player);
    }

    draw_overlay(canvas, state);
}

fn draw_player(canvas: &mut dyn Canvas, player: &Player) {
    let size = Player::size();
    canvas.fill_rect(player.pos - size * 0.5, size, HULL);
    if player.shield > 0.0 {
        canvas.set_alpha(0.3 + 0.4 * player.shield / 100.0);
        canvas.fill_circle(player.pos, size.x * 0.5 + 5.0, SHIELD);
        canvas.set_alpha(1.0);
    }
}

fn draw_enemy(canvas: &mut dyn Canvas, enemy: &Enemy) {
    let size = Vec2::splat(enemy.size);
    let min = enemy.pos - size * 0.5;
    canvas.fill_rect(min, size, enemy.kind.stats().color);
    health_bar(
        canvas,
        min - Vec2::new(0.0, 8.0),
        enemy.size,
        4.0,
        enemy.hp / enemy.max_hp,
    );
}

fn draw_boss(canvas: &mut dyn Canvas, boss: &Boss) {
    let size = Vec2::splat(BOSS_SIZE);
    let min = boss.pos - size * 0.5;
    canvas.fill_rect(min, size, BOSS_HULL);
    canvas.text(
        boss.pos - Vec2::new(0.0, 20.0),
        Boss::NAME,
        16.0,
        Align::Center,
        Color::WHITE,
    );
    health_bar(
        canvas,
        min - Vec2::new(0.0, 12.0),
        BOSS_SIZE,
        6.0,
        boss.hp_fraction(),
    );
}

fn draw_power_up(canvas: &mut dyn Canvas, p: &PowerUp) {
    canvas.save();
    canvas.translate(p.pos);
    canvas.rotate(p.rotation);
    let size = Vec2::splat(POWERUP_SIZE);
    fill_centered(canvas, size, p.kind.color());
    canvas.stroke_rect(-size * 0.5, size, 2.0, Color::WHITE);
    canvas.restore();
}

fn health_bar(canvas: &mut dyn Canvas, min: Vec2, width: f32, height: f32, fraction: f32) {
    canvas.fill_rect(min, Vec2::new(width, height), BAR_BACK);
    let fill = width * fraction.clamp(0.0, 1.0);
    if fill > 0.0 {
        canvas.fill_rect(min, Vec2::new(fill, height), BAR_FILL);
    }
}

fn draw_overlay(canvas: &mut dyn Canvas, state: &ShooterState) {
    let center = Vec2::new(ARENA_WIDTH * 0.5, ARENA_HEIGHT * 0.5);
    let stats = format!("Final Score: {} | Level: {}", state.score, state.level);
    match state.mode {
        ShooterMode::Welcome => {
            canvas.text(
                center - Vec2::new(0.0, 30.0),
                "SHOOTER",
                56.0,
                Align::Center,
                HULL,
            );
            canvas.text(
                center + Vec2::new(0.0, 20.0),
                "PRESS ANY KEY TO START",
                22.0,
                Align::Center,
                Color::WHITE,
            );
        }
        ShooterMode::Playing => {}
        ShooterMode::LevelUp => {
            canvas.text(
                center,
                &format!("LEVEL {}", state.level),
                48.0,
                Align::Center,
                BOSS_HULL,
            );
        }
        ShooterMode::GameOver => {
            canvas.text(
                center - Vec2::new(0.0, 40.0),
                "MISSION FAILED",
                48.0,
                Align::Center,
                ENEMY_SHOT,
            );
            canvas.text(center, &stats, 20.0, Align::Center, Color::WHITE);
            if state.game_over_timer == 0 {
                canvas.text(
                    center + Vec2::new(0.0, 40.0),
                    "PRESS ENTER TO RESTART",
                    18.0,
                    Align::Center,
                    Color::WHITE,
                );
            } else {
                // Fade the prompt in while restart is locked
                let t = 1.0 - state.game_over_timer as f32 / GAME_OVER_TICKS as f32;
                canvas.set_alpha(t);
                canvas.text(
                    center + Vec2::new(0.0, 40.0),
                    "Your ship was destroyed...",
                    18.0,
                    Align::Center,
                    Color::WHITE,
                );
                canvas.set_alpha(1.0);
            }
        }
        ShooterMode::Won => {
            canvas.text(
                center - Vec2::new(0.0, 40.0),
                "CONGRATS!",
                48.0,
                Align::Center,
                HULL,
            );
            canvas.text(center, &stats, 20.0, Align::Center, Color::WHITE);
            canvas.text(
                center + Vec2::new(0.0, 40.0),
                "PRESS ENTER TO PLAY AGAIN",
                18.0,
                Align::Center,
                Color::WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandRecorder, DrawCommand};
    use crate::Settings;

    #[test]
    fn test_welcome_screen() {
        let state = ShooterState::new(1, &Settings::default());
        let mut rec = CommandRecorder::new();
        draw(&mut rec, &state);
        assert!(rec.is_balanced());
        assert!(rec.texts().contains(&"PRESS ANY KEY TO START"));
    }

    #[test]
    fn test_boss_name_and_bar() {
        let mut state = ShooterState::new(1, &Settings::default());
        state.restart();
        let mut boss = Boss::new(1);
        boss.damage(25.0);
        state.boss = Some(boss);
        let mut rec = CommandRecorder::new();
        draw(&mut rec, &state);
        assert!(rec.texts().contains(&Boss::NAME));
        let half_bar = rec.commands.iter().any(|c| {
            matches!(c, DrawCommand::FillRect { size, color, .. }
                if *color == BAR_FILL && (size.x - BOSS_SIZE * 0.5).abs() < 1e-4)
        });
        assert!(half_bar);
    }

    #[test]
    fn test_game_over_prompt_waits_for_timer() {
        let mut state = ShooterState::new(1, &Settings::default());
        state.mode = ShooterMode::GameOver;
        state.game_over_timer = 30;
        let mut rec = CommandRecorder::new();
        draw(&mut rec, &state);
        assert!(rec.texts().contains(&"MISSION FAILED"));
        assert!(!rec.texts().contains(&"PRESS ENTER TO RESTART"));

        state.game_over_timer = 0;
        let mut rec = CommandRecorder::new();
        draw(&mut rec, &state);
        assert!(rec.texts().contains(&"PRESS ENTER TO RESTART"));
    }
}
