//! Scoreboard and game-over text

use crate::sim::GameState;

/// The scoreboard line shown every frame
pub fn scoreboard_text(state: &GameState) -> String {
    format!(
        "Score: {} | Lives: {} | Level: {} | High Score: {}",
        state.score, state.lives, state.level, state.high_score
    )
}

/// Lines of the game-over overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverText {
    pub title: &'static str,
    pub final_score: String,
    pub prompt: &'static str,
}

/// Overlay text once the run has ended
pub fn game_over_text(state: &GameState) -> Option<GameOverText> {
    state.is_game_over().then(|| GameOverText {
        title: "GAME OVER",
        final_score: format!("Final Score: {}", state.score),
        prompt: "Press F5 to Restart",
    })
}
