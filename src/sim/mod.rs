//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, velocities in pixels per frame
//! - Seeded RNG only
//! - Stable iteration order (storage order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod level;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{WallHit, paddle_bounce_velocity, reflect_walls};
pub use input::{Action, InputHandler, TickInput};
pub use state::{
    Ball, Brick, GameEvent, GamePhase, GameState, Paddle, Powerup, PowerupKind, ROW_COLORS,
};
pub use tick::tick;
