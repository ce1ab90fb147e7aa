//! Brute-force overlap tests for small actor counts
//!
//! Every game checks each pair it cares about every tick; with at most a few
//! dozen actors alive there is no spatial index.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with strict (open) containment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// True if `p` lies strictly inside the rectangle
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Result of a circle proximity test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first body toward the second
    pub normal: Vec2,
    /// How far inside the threshold the bodies are
    pub penetration: f32,
}

/// Circle proximity: `Some` when the centers are closer than `threshold`.
///
/// Coincident centers resolve along +x so the pair still separates.
pub fn circle_contact(a: Vec2, b: Vec2, threshold: f32) -> Option<Contact> {
    let delta = b - a;
    let dist = delta.length();
    if dist >= threshold {
        return None;
    }
    let angle = delta.y.atan2(delta.x);
    Some(Contact {
        normal: Vec2::new(angle.cos(), angle.sin()),
        penetration: threshold - dist,
    })
}

/// True if two points are closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Per-axis overlap test: `point` is within `half_extents` of `center`
#[inline]
pub fn aabb_overlap(point: Vec2, center: Vec2, half_extents: Vec2) -> bool {
    let d = (point - center).abs();
    d.x < half_extents.x && d.y < half_extents.y
}
