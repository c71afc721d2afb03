use serde::{Deserialize, Serialize};

use super::types::{Direction, FieldSize, GameEndReason, GamePhase, Point};

/// Read-only copy of everything an observer needs to draw or judge a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    /// Head first.
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub score: u32,
    pub high_score: u32,
    pub tick: u64,
    pub end_reason: Option<GameEndReason>,
    pub field_size: FieldSize,
}

impl GameSnapshot {
    pub fn head(&self) -> Point {
        self.snake[0]
    }

    pub fn tail(&self) -> Point {
        self.snake[self.snake.len() - 1]
    }

    pub fn occupies(&self, point: &Point) -> bool {
        self.snake.contains(point)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
