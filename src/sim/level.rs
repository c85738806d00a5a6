//! Level and session flow: life loss, game over, level advance

use super::state::{Brick, GameEvent, GamePhase, GameState};

/// The last active ball is gone: take a life and serve again or end the run
pub fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives > 0 {
        log::info!("Life lost, {} remaining", state.lives);
        let ball = state.serve_ball();
        state.balls.push(ball);
    } else {
        enter_game_over(state);
    }
}

/// Terminal state; records a new best score when this run beat it
pub fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.balls.clear();

    let new_high_score = state.score > state.high_score;
    if new_high_score {
        log::info!("New high score: {} (was {})", state.score, state.high_score);
        state.high_score = state.score;
    }
    log::info!("Game over - score {}, level {}", state.score, state.level);

    state.events.push(GameEvent::GameOver {
        score: state.score,
        new_high_score,
    });
}

/// Brick set is empty: move to the next level within the same tick
pub fn advance_level(state: &mut GameState) {
    state.phase = GamePhase::LevelTransition;

    state.level += 1;
    state.bricks = Brick::grid(&state.tuning);
    state.balls = vec![state.serve_ball()];
    let t = &state.tuning;
    state
        .paddle
        .resize(t.paddle_width, t.paddle_min_width, t.paddle_max_width, t.canvas_width);
    state.powerups.clear();

    log::info!("Level {} start", state.level);
    state.events.push(GameEvent::LevelCleared {
        new_level: state.level,
    });
    state.phase = GamePhase::Playing;
}
