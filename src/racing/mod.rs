//! Top-down racer
//!
//! The player's car races two AI cars around a rectangular ring track. A lap
//! counts when a car passes the top checkpoint and then crosses the finish
//! zone; the first car to complete the configured lap count wins.

pub mod ai;
pub mod car;
pub mod state;
pub mod tick;
pub mod track;
pub mod tuning;

pub use car::{Car, CarControls, DriveOutcome};
pub use state::{CarId, Effects, Particle, RaceEvent, RacePhase, RaceResult, RaceState, SkidMark};
pub use tick::{RaceInput, finish, select_color, select_model, start_race, tick};
pub use track::Track;
pub use tuning::{CarModel, ModelInfo, ModelStats};
