//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Per frame:
//! paddle input, ball motion and collisions, power-ups, level clear check.

use glam::Vec2;

use super::collision::{
    first_brick_hit, hits_paddle, is_below_playfield, paddle_bounce_velocity, reflect_walls,
};
use super::input::{TickInput, apply_keys, apply_pointer};
use super::state::{GameEvent, GamePhase, GameState};
use super::{level, powerup};
use crate::consts::FRAME_DT;

/// Advance the game state by one timestep
///
/// Velocities are in pixels per frame; `dt == FRAME_DT` advances exactly one
/// frame. A finished game is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    let steps = dt / FRAME_DT;

    // Autopilot steers through the pointer override
    let mut input = input.clone();
    if input.autopilot {
        if let Some(x) = autopilot_target(state) {
            input.pointer_x = Some(x);
        }
    }

    // Paddle: keyboard first, then pointer
    let canvas_width = state.tuning.canvas_width;
    apply_keys(
        &mut state.paddle,
        &input,
        state.tuning.paddle_speed * steps,
        canvas_width,
    );
    if let Some(x) = input.pointer_x {
        apply_pointer(&mut state.paddle, x, canvas_width);
    }

    update_balls(state, steps);
    if state.phase == GamePhase::GameOver {
        return;
    }

    powerup::update_powerups(state, steps);

    if state.bricks.is_empty() {
        level::advance_level(state);
    }
}

/// Move every ball and resolve its collisions
///
/// Order per ball: move, walls, paddle, first brick, bottom edge. The brick
/// check sees the velocity the paddle bounce produced this frame. Lost balls
/// are removed after the scan.
fn update_balls(state: &mut GameState, steps: f32) {
    let had_balls = !state.balls.is_empty();
    let max_angle = state.tuning.max_bounce_angle_deg.to_radians();
    let canvas_width = state.tuning.canvas_width;
    let canvas_height = state.tuning.canvas_height;

    let mut lost: Vec<usize> = Vec::new();

    for i in 0..state.balls.len() {
        let mut ball = state.balls[i];

        ball.pos += ball.vel * steps;

        let wall = reflect_walls(&mut ball, canvas_width);
        if wall.any() {
            log::trace!(
                "Ball {} hit {} wall at ({:.1}, {:.1})",
                i,
                if wall.top { "top" } else { "side" },
                ball.pos.x,
                ball.pos.y
            );
        }

        if hits_paddle(&ball, &state.paddle) {
            ball.vel = paddle_bounce_velocity(ball.vel, ball.pos.x, &state.paddle, max_angle);
        }

        if let Some(idx) = first_brick_hit(&ball, &state.bricks) {
            ball.vel.y = -ball.vel.y;
            break_brick(state, idx);
        }

        if is_below_playfield(&ball, canvas_height) {
            lost.push(i);
        }

        state.balls[i] = ball;
    }

    for &i in lost.iter().rev() {
        state.balls.remove(i);
        state.events.push(GameEvent::BallLost);
    }

    if had_balls && state.balls.is_empty() {
        level::lose_life(state);
    }
}

/// Score, flash, maybe drop a power-up, then remove the brick
fn break_brick(state: &mut GameState, idx: usize) {
    state.score += state.tuning.brick_score;

    let brick = &mut state.bricks[idx];
    brick.hit_animation = state.tuning.brick_hit_frames;
    let center = brick.center();
    let (row, col) = (brick.row, brick.col);

    state.events.push(GameEvent::BrickDestroyed { row, col, center });
    powerup::maybe_spawn(state, center);
    state.bricks.remove(idx);
}

/// Where the autopilot wants the paddle center
///
/// Follows the lowest descending ball; with none descending, goes after the
/// lowest falling power-up, else shadows the first ball.
fn autopilot_target(state: &GameState) -> Option<f32> {
    let lowest = |a: &Vec2, b: &Vec2| a.y.total_cmp(&b.y);

    let descending = state
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .map(|b| b.pos)
        .max_by(lowest);
    if let Some(pos) = descending {
        return Some(pos.x);
    }

    let pickup = state.powerups.iter().map(|p| p.pos).max_by(lowest);
    pickup.or_else(|| state.balls.first().map(|b| b.pos)).map(|pos| pos.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, Brick, Powerup, PowerupKind};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn tuning_with_chance(chance: f64) -> Tuning {
        Tuning {
            powerup_chance: chance,
            ..Tuning::default()
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_ball_moves_one_frame_per_step() {
        let mut state = GameState::new(1, Tuning::default());
        tick(&mut state, &idle(), FRAME_DT);
        assert_eq!(state.balls[0].pos, Vec2::new(404.0, 536.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_first_brick_strike_scores_and_spawns() {
        let mut state = GameState::new(1, tuning_with_chance(1.0));
        // Just below brick row 5, col 3 (x 335..425, y 225..250), heading up
        state.balls[0].pos = Vec2::new(380.0, 262.0);
        state.balls[0].vel = Vec2::new(0.0, -4.0);

        tick(&mut state, &idle(), FRAME_DT);

        assert_eq!(state.bricks.len(), 47);
        assert_eq!(state.score, 10);
        assert_eq!(state.balls[0].vel, Vec2::new(0.0, 4.0));
        let center = Vec2::new(380.0, 237.5);
        assert!(state.events.contains(&GameEvent::BrickDestroyed {
            row: 5,
            col: 3,
            center
        }));
        assert!(state.events.iter().any(
            |e| matches!(e, GameEvent::PowerupSpawned { pos, .. } if *pos == center)
        ));
        assert_eq!(state.powerups.len(), 1);
        // Spawned power-up already fell once this frame
        assert_eq!(state.powerups[0].pos, center + Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_no_spawn_when_chance_is_zero() {
        let mut state = GameState::new(1, tuning_with_chance(0.0));
        state.balls[0].pos = Vec2::new(380.0, 262.0);
        state.balls[0].vel = Vec2::new(0.0, -4.0);
        tick(&mut state, &idle(), FRAME_DT);
        assert_eq!(state.bricks.len(), 47);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_one_brick_per_ball_per_frame() {
        let mut state = GameState::new(1, tuning_with_chance(0.0));
        // Overlaps rows 0 and 1 of column 0 after moving
        state.balls[0].pos = Vec2::new(80.0, 84.0);
        state.balls[0].vel = Vec2::new(0.0, -4.0);
        tick(&mut state, &idle(), FRAME_DT);
        assert_eq!(state.bricks.len(), 47);
        assert_eq!((state.bricks[0].row, state.bricks[0].col), (0, 1));
    }

    #[test]
    fn test_paddle_bounce_before_brick_check() {
        let mut tuning = tuning_with_chance(0.0);
        // One row just above the paddle; col 3 sits over the ball
        tuning.brick_rows = 1;
        tuning.brick_offset_top = 530.0;
        let mut state = GameState::new(1, tuning);
        state.paddle.x = 350.0;
        state.balls[0].pos = Vec2::new(400.0, 547.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);
        state.bricks.retain(|b| b.col == 0 || b.col == 3);

        tick(&mut state, &idle(), FRAME_DT);

        // Paddle sends it up, the brick flips it back down
        assert!(state.balls[0].vel.y > 0.0);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_ball_lost_costs_a_life_and_respawns() {
        let mut state = GameState::new(1, Tuning::default());
        state.balls[0].pos = Vec2::new(50.0, 598.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);

        tick(&mut state, &idle(), FRAME_DT);

        assert_eq!(state.lives, 2);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(400.0, 540.0));
        assert_eq!(state.balls[0].vel, Vec2::new(4.5, -4.5));
        assert!(state.events.contains(&GameEvent::LifeLost { lives_left: 2 }));
    }

    #[test]
    fn test_losing_one_of_two_balls_keeps_lives() {
        let mut state = GameState::new(1, Tuning::default());
        state.balls[0].pos = Vec2::new(50.0, 598.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);
        state
            .balls
            .push(Ball::new(Vec2::new(600.0, 300.0), Vec2::new(1.0, 1.0), 10.0));

        tick(&mut state, &idle(), FRAME_DT);

        assert_eq!(state.lives, 3);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(601.0, 301.0));
    }

    #[test]
    fn test_losing_several_balls_same_frame_removes_all() {
        let mut state = GameState::new(1, Tuning::default());
        state.balls = vec![
            Ball::new(Vec2::new(50.0, 598.0), Vec2::new(0.0, 4.0), 10.0),
            Ball::new(Vec2::new(60.0, 599.0), Vec2::new(0.0, 4.0), 10.0),
            Ball::new(Vec2::new(70.0, 300.0), Vec2::new(0.0, 4.0), 10.0),
        ];
        tick(&mut state, &idle(), FRAME_DT);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos.x, 70.0);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_last_ball_on_last_life_is_game_over() {
        let mut state = GameState::new(1, Tuning::default());
        state.lives = 1;
        state.score = 40;
        state.balls[0].pos = Vec2::new(50.0, 598.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);

        tick(&mut state, &idle(), FRAME_DT);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 40);

        // Frozen from here on
        state.powerups.push(Powerup {
            pos: Vec2::new(100.0, 100.0),
            kind: PowerupKind::Life,
        });
        let paddle_x = state.paddle.x;
        let moving = TickInput {
            move_left: true,
            pointer_x: Some(100.0),
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &moving, FRAME_DT);
        }
        assert_eq!(state.paddle.x, paddle_x);
        assert_eq!(state.powerups[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_last_brick_advances_level() {
        let mut state = GameState::new(1, tuning_with_chance(1.0));
        let last = state.bricks[44].clone(); // row 5, col 4
        state.bricks = vec![last];
        state.paddle.width = 180.0;
        state.powerups.push(Powerup {
            pos: Vec2::new(10.0, 10.0),
            kind: PowerupKind::Shrink,
        });
        state.balls[0].pos = Vec2::new(480.0, 262.0);
        state.balls[0].vel = Vec2::new(0.0, -4.0);

        tick(&mut state, &idle(), FRAME_DT);

        assert_eq!(state.level, 2);
        assert_eq!(state.bricks.len(), 48);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(400.0, 540.0));
        assert_eq!(state.balls[0].vel, Vec2::new(5.0, -5.0));
        assert_eq!(state.paddle.width, 100.0);
        assert!(state.powerups.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::LevelCleared { new_level: 2 }));
    }

    #[test]
    fn test_catching_expand_at_180_caps_at_200() {
        let mut state = GameState::new(1, Tuning::default());
        state.paddle.width = 180.0;
        state.paddle.x = 300.0;
        state.powerups.push(Powerup {
            pos: Vec2::new(390.0, 539.0),
            kind: PowerupKind::Expand,
        });
        tick(&mut state, &idle(), FRAME_DT);
        assert_eq!(state.paddle.width, 200.0);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_pointer_overrides_keyboard() {
        let mut state = GameState::new(1, Tuning::default());
        let input = TickInput {
            move_right: true,
            pointer_x: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.paddle.x, 50.0);
    }

    #[test]
    fn test_keyboard_speed_scales_with_dt() {
        let mut state = GameState::new(1, Tuning::default());
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.paddle.x, 343.0);
        tick(&mut state, &input, FRAME_DT * 2.0);
        assert_eq!(state.paddle.x, 329.0);
    }

    #[test]
    fn test_autopilot_tracks_descending_ball() {
        let mut state = GameState::new(1, Tuning::default());
        state.balls[0].pos = Vec2::new(200.0, 400.0);
        state.balls[0].vel = Vec2::new(0.0, 4.0);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert_eq!(state.paddle.center_x(), 200.0);
    }

    #[test]
    fn test_determinism() {
        // Same seed and inputs must evolve identically
        let tuning = tuning_with_chance(0.5);
        let mut state1 = GameState::new(99999, tuning.clone());
        let mut state2 = GameState::new(99999, tuning);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..3_000 {
            tick(&mut state1, &input, FRAME_DT);
            tick(&mut state2, &input, FRAME_DT);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.bricks.len(), state2.bricks.len());
        assert_eq!(state1.balls, state2.balls);
        assert_eq!(state1.powerups, state2.powerups);
        assert_eq!(state1.paddle, state2.paddle);
    }

    #[test]
    fn test_fresh_grid_matches_tuning() {
        let tuning = Tuning::default();
        assert_eq!(Brick::grid(&tuning).len(), tuning.brick_count());
    }

    #[test]
    fn test_ball_past_side_wall_is_back_next_frame() {
        let mut state = GameState::new(1, Tuning::default());
        state.balls[0].pos = Vec2::new(15.0, 300.0);
        state.balls[0].vel = Vec2::new(-20.0, -4.0);

        tick(&mut state, &idle(), FRAME_DT);
        assert_eq!(state.balls[0].pos.x, -5.0);
        assert_eq!(state.balls[0].vel.x, 20.0);

        tick(&mut state, &idle(), FRAME_DT);
        assert_eq!(state.balls[0].pos.x, 15.0);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(-200.0f32..1000.0),
            any::<bool>(),
        )
            .prop_map(|(move_left, move_right, pointer_x, autopilot)| TickInput {
                move_left,
                move_right,
                pointer_x,
                autopilot,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_session_invariants(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..400),
        ) {
            let mut state = GameState::new(seed, Tuning::default());
            for input in &inputs {
                let before_score = state.score;
                let before_bricks = state.bricks.len();
                let before_high = state.high_score;

                tick(&mut state, input, FRAME_DT);

                let p = &state.paddle;
                prop_assert!(p.x >= 0.0 && p.x <= state.tuning.canvas_width - p.width);
                prop_assert!(p.width >= 60.0 && p.width <= 200.0);
                prop_assert!(state.score >= before_score);
                prop_assert!(state.high_score >= before_high);

                let destroyed = state
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
                    .count();
                prop_assert_eq!(state.score - before_score, 10 * destroyed as u64);
                let cleared = state
                    .events
                    .iter()
                    .any(|e| matches!(e, GameEvent::LevelCleared { .. }));
                if cleared {
                    prop_assert_eq!(state.bricks.len(), 48);
                } else if state.phase == GamePhase::Playing {
                    prop_assert_eq!(state.bricks.len(), before_bricks - destroyed);
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_balls_never_stay_outside_side_walls(seed in any::<u64>()) {
            // Every brick drops something, so fast catches and multiballs near
            // the walls come up often
            let mut state = GameState::new(seed, tuning_with_chance(1.0));
            let input = TickInput {
                autopilot: true,
                ..Default::default()
            };
            let width = state.tuning.canvas_width;
            let outside = |x: f32| x < 0.0 || x > width;
            let overshoot = |x: f32| if x < 0.0 { -x } else { x - width };

            let mut prev: Vec<f32> = state.balls.iter().map(|b| b.pos.x).collect();
            for _ in 0..1_500 {
                tick(&mut state, &input, FRAME_DT);
                if state.is_game_over() {
                    break;
                }

                for ball in &state.balls {
                    if ball.pos.x < 0.0 {
                        prop_assert!(ball.vel.x > 0.0, "stuck left: {:?}", ball);
                    } else if ball.pos.x > width {
                        prop_assert!(ball.vel.x < 0.0, "stuck right: {:?}", ball);
                    }
                }

                // Indices only stay aligned while no ball was removed or replaced
                let reshuffled = state.events.iter().any(|e| {
                    matches!(e, GameEvent::BallLost | GameEvent::LevelCleared { .. })
                });
                if !reshuffled {
                    for (ball, &x) in state.balls.iter().zip(&prev) {
                        if outside(x) && outside(ball.pos.x) {
                            prop_assert!(overshoot(ball.pos.x) < overshoot(x));
                        }
                    }
                }
                prev = state.balls.iter().map(|b| b.pos.x).collect();
            }
        }
    }
}
