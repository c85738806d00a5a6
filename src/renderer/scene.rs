//! Frame composition
//!
//! Turns a `GameState` into one triangle list. Read-only with respect to
//! the simulation.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

/// Segments used to tessellate a ball
const BALL_SEGMENTS: u32 = 20;

/// Everything visible this frame, back to front
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        state.bricks.len() * 6 + state.balls.len() * BALL_SEGMENTS as usize * 3 + 64,
    );

    for brick in &state.bricks {
        vertices.extend(shapes::rect(
            brick.pos,
            Vec2::new(brick.width, brick.height),
            colors::from_hex(brick.color, 1.0),
        ));
    }

    let half = state.tuning.powerup_size / 2.0;
    for powerup in &state.powerups {
        let center = Vec2::new(powerup.pos.x, powerup.pos.y + half);
        vertices.extend(shapes::diamond(center, half, colors::powerup(powerup.kind)));
    }

    let paddle = &state.paddle;
    vertices.extend(shapes::horizontal_gradient_rect(
        Vec2::new(paddle.x, paddle.y),
        Vec2::new(paddle.width, paddle.height),
        colors::PADDLE_LEFT,
        colors::PADDLE_RIGHT,
    ));

    for ball in &state.balls {
        vertices.extend(shapes::radial_circle(
            ball.pos,
            ball.radius,
            colors::BALL_CORE,
            colors::BALL_EDGE,
            BALL_SEGMENTS,
        ));
    }

    if state.is_game_over() {
        vertices.extend(shapes::rect(
            Vec2::ZERO,
            Vec2::new(state.tuning.canvas_width, state.tuning.canvas_height),
            colors::GAME_OVER_SHADE,
        ));
    }

    vertices
}
