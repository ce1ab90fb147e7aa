//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (held-key set fed by keydown/keyup)
//! - Time (fixed-step frame clock driven by animation frames)
//!
//! Storage lives in [`crate::persistence`].

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Key, KeySet};
