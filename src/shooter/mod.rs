//! Vertical shoot-'em-up
//!
//! Enemies fall in waves of growing size; three cleared waves advance the
//! level, and every fifth level opens with a boss whose defeat wins the game.

pub mod entities;
pub mod state;
pub mod tick;
pub mod tuning;
pub mod waves;

pub use entities::{Boss, Debris, Enemy, Owner, Player, PowerUp, Projectile, Steer};
pub use state::{ShooterEvent, ShooterMode, ShooterState};
pub use tick::{ShooterInput, tick};
pub use tuning::{EnemyKind, PowerUpKind};
