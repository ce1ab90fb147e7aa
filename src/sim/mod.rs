//! Shared simulation helpers
//!
//! The three games keep their own state and rules; this module only holds the
//! pieces they have in common:
//! - Fixed-step kinematics (per-tick velocities, smoothing, soft limits)
//! - Brute-force overlap tests
//! - Epoch-guarded timers for banners and countdowns

pub mod collision;
pub mod kinematics;
pub mod timer;

pub use collision::{Contact, Rect, aabb_overlap, circle_contact, within_radius};
pub use timer::{Timer, TimerStatus};

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Seeded generator used by every game so a seed replays identically
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
