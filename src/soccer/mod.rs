//! One-on-one soccer against a simple AI
//!
//! A timed match on a 1200×700 pitch. The ball can roll a short way into
//! either net; a goal resets it to the centre and starts a cooldown.

pub mod ai;
pub mod state;
pub mod tick;

pub use state::{Ball, Footballer, MatchMode, MatchState, Outcome, Side, SoccerEvent};
pub use tick::{SoccerInput, tick};
