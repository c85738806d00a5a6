//! Game state and core simulation types
//!
//! Everything a tick reads or writes is owned by `GameState`. Subsystems take
//! the state explicitly, so tests can build fixtures by hand.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::clamp_paddle_x;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Brick set just emptied; only ever held inside a single tick
    LevelTransition,
    /// Run ended, no further simulation
    GameOver,
}

/// Brick colors by row (0xRRGGBB), cycling for taller grids
pub const ROW_COLORS: [u32; 6] = [0xff3333, 0xffaa00, 0xffff00, 0x00cc00, 0x00cccc, 0xaa00ff];

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Velocity (px/frame)
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// A ball at the serve position heading up and to the right
    pub fn served(tuning: &Tuning, speed: f32) -> Self {
        let (x, y) = tuning.serve_position();
        Self::new(Vec2::new(x, y), Vec2::new(speed, -speed), tuning.ball_radius)
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Default-width paddle centered on the canvas
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: (tuning.canvas_width - tuning.paddle_width) / 2.0,
            y: tuning.paddle_y(),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True if `x` lies strictly inside the paddle's horizontal span
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.right()
    }

    /// Change width within bounds, keeping the paddle on the canvas
    pub fn resize(&mut self, width: f32, min: f32, max: f32, canvas_width: f32) {
        self.width = width.clamp(min, max);
        self.x = clamp_paddle_x(self.x, self.width, canvas_width);
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub row: u32,
    pub col: u32,
    /// 0xRRGGBB, from `ROW_COLORS`
    pub color: u32,
    /// Hit flash frames remaining
    pub hit_animation: u32,
}

impl Brick {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Full grid in row-major storage order
    pub fn grid(tuning: &Tuning) -> Vec<Brick> {
        let width = tuning.brick_width();
        let mut bricks = Vec::with_capacity(tuning.brick_count());
        for row in 0..tuning.brick_rows {
            for col in 0..tuning.brick_cols {
                bricks.push(Brick {
                    pos: Vec2::new(
                        col as f32 * (width + tuning.brick_gap) + tuning.brick_offset_left,
                        row as f32 * (tuning.brick_height + tuning.brick_gap)
                            + tuning.brick_offset_top,
                    ),
                    width,
                    height: tuning.brick_height,
                    row,
                    col,
                    color: ROW_COLORS[row as usize % ROW_COLORS.len()],
                    hit_animation: 0,
                });
            }
        }
        bricks
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerupKind {
    Expand,
    Shrink,
    MultiBall,
    Slow,
    Fast,
    Life,
}

impl PowerupKind {
    /// Every kind, in spawn-roll order
    pub const ALL: [PowerupKind; 6] = [
        PowerupKind::Expand,
        PowerupKind::Shrink,
        PowerupKind::MultiBall,
        PowerupKind::Slow,
        PowerupKind::Fast,
        PowerupKind::Life,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::Expand => "expand",
            PowerupKind::Shrink => "shrink",
            PowerupKind::MultiBall => "multiball",
            PowerupKind::Slow => "slow",
            PowerupKind::Fast => "fast",
            PowerupKind::Life => "life",
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, PartialEq)]
pub struct Powerup {
    /// Horizontal center, vertical top
    pub pos: Vec2,
    pub kind: PowerupKind,
}

/// Something that happened during the last tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BrickDestroyed { row: u32, col: u32, center: Vec2 },
    PowerupSpawned { kind: PowerupKind, pos: Vec2 },
    PowerupCaught { kind: PowerupKind },
    BallLost,
    LifeLost { lives_left: u32 },
    LevelCleared { new_level: u32 },
    GameOver { score: u64, new_high_score: bool },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn-roll RNG
    pub rng: Pcg32,
    /// Balance values for this session
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Best score across sessions; set by the driver at startup
    pub high_score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    /// Active bricks in grid storage order
    pub bricks: Vec<Brick>,
    pub powerups: Vec<Powerup>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            paddle: Paddle::new(&tuning),
            phase: GamePhase::Playing,
            score: 0,
            lives: tuning.starting_lives,
            level: tuning.starting_level,
            high_score: 0,
            time_ticks: 0,
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
            tuning,
        };
        state.reset();
        state
    }

    /// Back to the opening state of a session; keeps the high score
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.level = self.tuning.starting_level;
        self.time_ticks = 0;
        self.paddle = Paddle::new(&self.tuning);
        self.bricks = Brick::grid(&self.tuning);
        self.balls = vec![Ball::served(&self.tuning, self.tuning.ball_start_speed)];
        self.powerups.clear();
        self.events.clear();
    }

    /// Ball used after losing a life or clearing a level
    pub fn serve_ball(&self) -> Ball {
        Ball::served(&self.tuning, self.tuning.serve_speed(self.level))
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.bricks.len(), 48);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(400.0, 540.0));
        assert_eq!(state.balls[0].vel, Vec2::new(4.0, -4.0));
        assert_eq!(state.paddle.x, 350.0);
        assert_eq!(state.paddle.width, 100.0);
    }

    #[test]
    fn test_grid_layout() {
        let bricks = Brick::grid(&Tuning::default());
        assert_eq!(bricks[0].pos, Vec2::new(35.0, 50.0));
        assert_eq!(bricks[0].color, 0xff3333);
        // Row-major: index 9 is row 1, col 1
        assert_eq!((bricks[9].row, bricks[9].col), (1, 1));
        assert_eq!(bricks[9].pos, Vec2::new(135.0, 85.0));
        assert_eq!(bricks[47].color, 0xaa00ff);
        assert!(bricks.iter().all(|b| b.width == 90.0 && b.height == 25.0));
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = GameState::new(7, Tuning::default());
        state.high_score = 500;
        state.score = 120;
        state.lives = 1;
        state.level = 4;
        state.bricks.truncate(3);
        state.paddle.width = 180.0;
        state.phase = GamePhase::GameOver;

        state.reset();

        assert_eq!(state.high_score, 500);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.bricks.len(), 48);
        assert_eq!(state.paddle.width, 100.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_paddle_resize_clamps_and_stays_on_canvas() {
        let mut paddle = Paddle::new(&Tuning::default());
        paddle.x = 690.0;
        paddle.width = 110.0;
        paddle.resize(150.0, 60.0, 200.0, 800.0);
        assert_eq!(paddle.width, 150.0);
        assert_eq!(paddle.x, 650.0);

        paddle.resize(20.0, 60.0, 200.0, 800.0);
        assert_eq!(paddle.width, 60.0);
    }

    #[test]
    fn test_paddle_spans_is_strict() {
        let paddle = Paddle::new(&Tuning::default());
        assert!(!paddle.spans(350.0));
        assert!(paddle.spans(351.0));
        assert!(!paddle.spans(450.0));
    }
}
