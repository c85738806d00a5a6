//! Data-driven game balance
//!
//! Every constant the simulation reads lives here so a JSON document can
//! override any of them. Missing fields fall back to the classic values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, STARTING_LEVEL, STARTING_LIVES};

/// Error loading a tuning document
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// The document parsed but describes an unplayable game
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_min_width: f32,
    pub paddle_max_width: f32,
    pub paddle_height: f32,
    /// Distance from the canvas bottom to the paddle's top edge
    pub paddle_bottom_gap: f32,
    /// Keyboard movement (px/frame)
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Distance from the canvas bottom to the serve position
    pub serve_bottom_gap: f32,
    /// Velocity component magnitude at session start
    pub ball_start_speed: f32,
    /// Velocity component magnitude before the per-level bonus
    pub ball_base_speed: f32,
    /// Added to the component magnitude per level on respawn
    pub ball_speed_per_level: f32,
    /// Largest bounce angle off the paddle edges (degrees)
    pub max_bounce_angle_deg: f32,

    // === Bricks ===
    pub brick_rows: u32,
    pub brick_cols: u32,
    pub brick_height: f32,
    pub brick_gap: f32,
    pub brick_offset_left: f32,
    pub brick_offset_top: f32,
    pub brick_score: u64,
    /// Frames of hit flash set on a struck brick
    pub brick_hit_frames: u32,

    // === Power-ups ===
    pub powerup_chance: f64,
    pub powerup_size: f32,
    pub powerup_fall_speed: f32,
    pub paddle_resize_step: f32,
    pub multiball_velocity: (f32, f32),
    pub slow_factor: f32,
    pub fast_factor: f32,

    // === Session ===
    pub starting_lives: u32,
    pub starting_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            paddle_width: 100.0,
            paddle_min_width: 60.0,
            paddle_max_width: 200.0,
            paddle_height: 15.0,
            paddle_bottom_gap: 40.0,
            paddle_speed: 7.0,

            ball_radius: 10.0,
            serve_bottom_gap: 60.0,
            ball_start_speed: 4.0,
            ball_base_speed: 4.0,
            ball_speed_per_level: 0.5,
            max_bounce_angle_deg: 60.0,

            brick_rows: 6,
            brick_cols: 8,
            brick_height: 25.0,
            brick_gap: 10.0,
            brick_offset_left: 35.0,
            brick_offset_top: 50.0,
            brick_score: 10,
            brick_hit_frames: 5,

            powerup_chance: 0.35,
            powerup_size: 20.0,
            powerup_fall_speed: 3.0,
            paddle_resize_step: 40.0,
            multiball_velocity: (-4.0, -4.0),
            slow_factor: 0.8,
            fast_factor: 1.2,

            starting_lives: STARTING_LIVES,
            starting_level: STARTING_LEVEL,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_tuning";

    /// Largest brick grid a document may ask for
    pub const MAX_BRICKS: usize = 4096;

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(TuningError::Invalid("canvas dimensions must be positive"));
        }
        if !(0.0..=1.0).contains(&self.powerup_chance) {
            return Err(TuningError::Invalid("powerup_chance must be within [0, 1]"));
        }
        if self.paddle_min_width <= 0.0
            || self.paddle_min_width > self.paddle_width
            || self.paddle_width > self.paddle_max_width
        {
            return Err(TuningError::Invalid(
                "paddle widths must satisfy 0 < min <= width <= max",
            ));
        }
        if self.paddle_max_width > self.canvas_width {
            return Err(TuningError::Invalid("paddle_max_width exceeds canvas width"));
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(TuningError::Invalid("brick grid must not be empty"));
        }
        match self.brick_rows.checked_mul(self.brick_cols) {
            Some(n) if n as usize <= Self::MAX_BRICKS => {}
            _ => return Err(TuningError::Invalid("brick grid is too large")),
        }
        if self.brick_width() <= 0.0 || self.brick_height <= 0.0 {
            return Err(TuningError::Invalid("bricks must have a positive size"));
        }
        if self.ball_radius <= 0.0 {
            return Err(TuningError::Invalid("ball_radius must be positive"));
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid("starting_lives must be at least 1"));
        }
        Ok(())
    }

    /// Width of a single brick so `brick_cols` of them span the canvas
    pub fn brick_width(&self) -> f32 {
        self.canvas_width / self.brick_cols as f32 - self.brick_gap
    }

    /// Total bricks in a fresh grid
    pub fn brick_count(&self) -> usize {
        self.brick_rows as usize * self.brick_cols as usize
    }

    /// Top edge of the paddle
    pub fn paddle_y(&self) -> f32 {
        self.canvas_height - self.paddle_bottom_gap
    }

    /// Where new balls appear
    pub fn serve_position(&self) -> (f32, f32) {
        (self.canvas_width / 2.0, self.canvas_height - self.serve_bottom_gap)
    }

    /// Velocity component magnitude for a ball served on `level`
    pub fn serve_speed(&self, level: u32) -> f32 {
        self.ball_base_speed + level as f32 * self.ball_speed_per_level
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
