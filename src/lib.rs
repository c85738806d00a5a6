//! Brick Breaker - a single-screen breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, physics, power-ups, level flow)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best-score persistence
//! - `hud`: Scoreboard and game-over text
//! - `renderer`: WebGPU rendering pipeline
//! - `game`: Fixed-timestep driver tying the pieces together

pub mod game;
pub mod highscores;
pub mod hud;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{HighScoreStore, MemoryStore};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display refresh at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Playfield dimensions (logical units)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const STARTING_LEVEL: u32 = 1;
}

/// Clamp a paddle's left edge so the whole paddle stays on the canvas
#[inline]
pub fn clamp_paddle_x(x: f32, width: f32, canvas_width: f32) -> f32 {
    x.clamp(0.0, (canvas_width - width).max(0.0))
}
