//! Platform-agnostic game driver
//!
//! Runs fixed simulation steps from real frame time, routes input events,
//! logs what happened and persists the best score when a run ends.

use crate::consts::{FRAME_DT, MAX_FRAME_DELTA, MAX_SUBSTEPS};
use crate::highscores::HighScoreStore;
use crate::hud;
use crate::sim::{Action, GameEvent, GamePhase, GameState, InputHandler, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game {
    state: GameState,
    input: InputHandler,
    store: Box<dyn HighScoreStore>,
    accumulator: f32,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn HighScoreStore>) -> Self {
        let mut state = GameState::new(seed, tuning);
        state.high_score = store.load();
        log::info!(
            "Game initialized with seed {} (high score {})",
            seed,
            state.high_score
        );
        Self {
            state,
            input: InputHandler::new(),
            store,
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for fixtures and debugging tools
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Run simulation ticks for `dt` seconds of real time; returns ticks run
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DELTA);

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }
        substeps
    }

    /// Exactly one simulation tick
    pub fn step(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        let input = self.input.snapshot();
        tick(&mut self.state, &input, FRAME_DT);
        self.handle_events();
    }

    fn handle_events(&mut self) {
        for event in &self.state.events {
            match event {
                GameEvent::LevelCleared { new_level } => {
                    log::info!("Level cleared, now on level {}", new_level);
                }
                GameEvent::GameOver {
                    score,
                    new_high_score: true,
                } => {
                    self.store.save(*score);
                }
                _ => {}
            }
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(Action::Restart) = self.input.key_down(key) {
            self.restart();
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Pointer x in canvas coordinates
    pub fn pointer_moved(&mut self, x: f32) {
        self.input.pointer_moved(x);
    }

    /// Full reset to a new session; the best score carries over
    pub fn restart(&mut self) {
        self.state.reset();
        self.input.clear();
        self.accumulator = 0.0;
        log::info!("Game restarted");
    }

    pub fn hud_text(&self) -> String {
        hud::scoreboard_text(&self.state)
    }
}
