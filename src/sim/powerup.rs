//! Power-up spawning, falling, catching and effects

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::reflect_walls;
use super::state::{Ball, GameEvent, GameState, Paddle, Powerup, PowerupKind};

/// Roll for a drop: `chance` to spawn, then a uniform pick of the kind
pub fn roll_spawn(rng: &mut Pcg32, chance: f64) -> Option<PowerupKind> {
    if rng.random_bool(chance) {
        let idx = rng.random_range(0..PowerupKind::ALL.len());
        Some(PowerupKind::ALL[idx])
    } else {
        None
    }
}

/// Maybe drop a power-up centered on a destroyed brick
pub fn maybe_spawn(state: &mut GameState, center: Vec2) {
    if let Some(kind) = roll_spawn(&mut state.rng, state.tuning.powerup_chance) {
        log::debug!("Power-up {} spawned at ({:.0}, {:.0})", kind.as_str(), center.x, center.y);
        state.powerups.push(Powerup { pos: center, kind });
        state.events.push(GameEvent::PowerupSpawned { kind, pos: center });
    }
}

/// Bottom edge has reached the paddle's top and the center is over it
pub fn is_caught(powerup: &Powerup, size: f32, paddle: &Paddle) -> bool {
    powerup.pos.y + size >= paddle.y && paddle.spans(powerup.pos.x)
}

/// Advance falling power-ups by `steps` frames
///
/// Each catch takes effect before the next power-up is tested, so a drop
/// caught right after an expand sees the wider paddle.
pub fn update_powerups(state: &mut GameState, steps: f32) {
    let fall = state.tuning.powerup_fall_speed * steps;
    let size = state.tuning.powerup_size;
    let floor = state.tuning.canvas_height;

    let mut i = 0;
    while i < state.powerups.len() {
        let powerup = &mut state.powerups[i];
        powerup.pos.y += fall;

        if is_caught(powerup, size, &state.paddle) {
            let kind = state.powerups.remove(i).kind;
            log::debug!("Power-up {} caught", kind.as_str());
            apply_effect(state, kind);
            state.events.push(GameEvent::PowerupCaught { kind });
        } else if powerup.pos.y > floor {
            // Missed drops vanish without penalty
            state.powerups.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Apply a caught power-up's effect immediately
pub fn apply_effect(state: &mut GameState, kind: PowerupKind) {
    let t = &state.tuning;
    match kind {
        PowerupKind::Expand => {
            let width = state.paddle.width + t.paddle_resize_step;
            state
                .paddle
                .resize(width, t.paddle_min_width, t.paddle_max_width, t.canvas_width);
        }
        PowerupKind::Shrink => {
            let width = state.paddle.width - t.paddle_resize_step;
            state
                .paddle
                .resize(width, t.paddle_min_width, t.paddle_max_width, t.canvas_width);
        }
        PowerupKind::MultiBall => {
            if let Some(first) = state.balls.first() {
                let (dx, dy) = t.multiball_velocity;
                let mut ball = Ball::new(first.pos, Vec2::new(dx, dy), t.ball_radius);
                // A ball cloned onto a wall must not head further out
                reflect_walls(&mut ball, t.canvas_width);
                state.balls.push(ball);
            }
        }
        PowerupKind::Slow => {
            for ball in state.balls.iter_mut() {
                ball.vel *= t.slow_factor;
            }
        }
        PowerupKind::Fast => {
            for ball in state.balls.iter_mut() {
                ball.vel *= t.fast_factor;
            }
        }
        PowerupKind::Life => {
            state.lives += 1;
        }
    }
}
