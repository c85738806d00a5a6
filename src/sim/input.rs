//! Keyboard and pointer input
//!
//! Platform event callbacks write into an `InputHandler`; the driver takes a
//! `TickInput` snapshot from it before every simulation step.

use super::state::Paddle;
use crate::clamp_paddle_x;

/// Logical actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    ToggleAutopilot,
    Restart,
}

impl Action {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Action::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Action::MoveRight),
            "i" | "I" => Some(Action::ToggleAutopilot),
            "r" | "R" | "Enter" => Some(Action::Restart),
            _ => None,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Latest pointer x (canvas units) since the previous tick
    pub pointer_x: Option<f32>,
    /// Let the paddle play itself
    pub autopilot: bool,
}

/// Accumulates edge-triggered input events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    move_left: bool,
    move_right: bool,
    pointer_x: Option<f32>,
    autopilot: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed; returns the action so the caller can handle one-shots
    pub fn key_down(&mut self, key: &str) -> Option<Action> {
        let action = Action::from_key(key)?;
        match action {
            Action::MoveLeft => self.move_left = true,
            Action::MoveRight => self.move_right = true,
            Action::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            Action::Restart => {}
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: &str) {
        match Action::from_key(key) {
            Some(Action::MoveLeft) => self.move_left = false,
            Some(Action::MoveRight) => self.move_right = false,
            _ => {}
        }
    }

    /// Pointer moved to `x` in canvas coordinates; last one wins
    pub fn pointer_moved(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    /// Drop held keys and pending pointer motion
    pub fn clear(&mut self) {
        self.move_left = false;
        self.move_right = false;
        self.pointer_x = None;
    }

    /// Input for the next tick; pointer motion is consumed
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
            pointer_x: self.pointer_x.take(),
            autopilot: self.autopilot,
        }
    }
}

/// Center the paddle under the pointer, clamped to the canvas
pub fn apply_pointer(paddle: &mut Paddle, pointer_x: f32, canvas_width: f32) {
    paddle.x = clamp_paddle_x(pointer_x - paddle.width / 2.0, paddle.width, canvas_width);
}

/// Keyboard movement by `distance`; never leaves the canvas
pub fn apply_keys(paddle: &mut Paddle, input: &TickInput, distance: f32, canvas_width: f32) {
    if input.move_left && paddle.x > 0.0 {
        paddle.x -= distance;
    }
    if input.move_right && paddle.x < canvas_width - paddle.width {
        paddle.x += distance;
    }
    paddle.x = clamp_paddle_x(paddle.x, paddle.width, canvas_width);
}
