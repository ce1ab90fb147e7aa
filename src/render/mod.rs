//! Canvas drawing collaborator
//!
//! Each game has a `draw` function that reads its state and issues 2D
//! canvas calls through the [`Canvas`] trait. Drawing never mutates the
//! simulation. The browser host implements `Canvas` over
//! `CanvasRenderingContext2d`; tests and the native runner use
//! [`CommandRecorder`].

pub mod racing;
pub mod shooter;
pub mod soccer;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self::rgba((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }

    /// Parse `#rrggbb` or `#rgb`
    pub fn from_css(s: &str) -> Option<Self> {
        let digits = s.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::hex),
            3 => {
                let v = u32::from_str_radix(digits, 16).ok()?;
                let expand = |n: u32| (n * 17) as u8;
                Some(Self::rgba(
                    expand((v >> 8) & 0xf),
                    expand((v >> 4) & 0xf),
                    expand(v & 0xf),
                    255,
                ))
            }
            _ => None,
        }
    }

    /// Same color with alpha scaled by `alpha` (0..=1)
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string for the 2D context
    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Minimal immediate-mode 2D surface
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, width: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    fn text(&mut self, pos: Vec2, text: &str, size: f32, align: Align, color: Color);
    /// Global alpha for following calls (0..=1)
    fn set_alpha(&mut self, alpha: f32);
    /// Additive blending for glow effects
    fn set_additive(&mut self, additive: bool);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { min: Vec2, size: Vec2, color: Color },
    StrokeRect { min: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    Text { pos: Vec2, text: String },
    Alpha(f32),
    Additive(bool),
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
}

/// Canvas that records calls instead of drawing
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Save/restore calls pair up
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0i32;
        for c in &self.commands {
            match c {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl Canvas for CommandRecorder {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { min, size, color });
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, _width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { min, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, _width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn text(&mut self, pos: Vec2, text: &str, _size: f32, _align: Align, _color: Color) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Alpha(alpha));
    }

    fn set_additive(&mut self, additive: bool) {
        self.commands.push(DrawCommand::Additive(additive));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }
}

/// Draw a rectangle of `size` centered on the origin after a translate/rotate
pub(crate) fn fill_centered(canvas: &mut dyn Canvas, size: Vec2, color: Color) {
    canvas.fill_rect(-size * 0.5, size, color);
}
