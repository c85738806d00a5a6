//! Collision detection and response
//!
//! Axis-aligned tests between a circular ball and the walls, the paddle and
//! the brick grid, plus the paddle's angle-controlled bounce.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};

/// Which walls a ball touched this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub side: bool,
    pub top: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Reflect a ball off the left, right and top walls
///
/// The velocity component is pointed back into the playfield rather than
/// blindly negated, so a ball that is still overlapping a wall on the next
/// frame cannot get trapped flipping back and forth.
pub fn reflect_walls(ball: &mut Ball, canvas_width: f32) -> WallHit {
    let mut hit = WallHit::default();

    if ball.pos.x - ball.radius <= 0.0 {
        ball.vel.x = ball.vel.x.abs();
        hit.side = true;
    } else if ball.pos.x + ball.radius >= canvas_width {
        ball.vel.x = -ball.vel.x.abs();
        hit.side = true;
    }

    if ball.pos.y - ball.radius <= 0.0 {
        ball.vel.y = ball.vel.y.abs();
        hit.top = true;
    }

    hit
}

/// Ball's bottom edge has reached the paddle and its center is over it
pub fn hits_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.y + ball.radius >= paddle.y && paddle.spans(ball.pos.x)
}

/// Outgoing velocity after a paddle hit
///
/// The hit offset from the paddle center, normalized to [-1, 1], maps
/// linearly onto [-max_angle, +max_angle] from vertical. Speed is preserved
/// and the result always points upward.
pub fn paddle_bounce_velocity(vel: Vec2, ball_x: f32, paddle: &Paddle, max_angle: f32) -> Vec2 {
    let half = paddle.width / 2.0;
    let normalized = ((ball_x - paddle.center_x()) / half).clamp(-1.0, 1.0);
    let angle = normalized * max_angle;
    let speed = vel.length();
    Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs())
}

/// Ball's center column is inside the brick and the vertical spans overlap
pub fn overlaps_brick(ball: &Ball, brick: &Brick) -> bool {
    ball.pos.x > brick.pos.x
        && ball.pos.x < brick.pos.x + brick.width
        && ball.pos.y - ball.radius < brick.pos.y + brick.height
        && ball.pos.y + ball.radius > brick.pos.y
}

/// Index of the first brick in storage order the ball overlaps
pub fn first_brick_hit(ball: &Ball, bricks: &[Brick]) -> Option<usize> {
    bricks.iter().position(|brick| overlaps_brick(ball, brick))
}

/// Ball has left through the bottom of the playfield
pub fn is_below_playfield(ball: &Ball, canvas_height: f32) -> bool {
    ball.pos.y > canvas_height
}
