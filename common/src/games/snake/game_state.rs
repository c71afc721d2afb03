use crate::debug_log;
use crate::games::SessionRng;
use super::settings::{ConfigError, SnakeSettings};
use super::snake::Snake;
use super::snapshot::GameSnapshot;
use super::types::{Direction, FieldSize, FoodSpawnPolicy, GameEndReason, GamePhase, Point};

/// Single-player snake simulation.
///
/// Never schedules itself: the owner calls [`SnakeGameState::tick`] on its own
/// clock and stops calling it when the phase leaves `Running`. Every command is
/// total; commands that make no sense in the current phase are ignored.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    settings: SnakeSettings,
    field_size: FieldSize,
    rng: SessionRng,
    phase: GamePhase,
    snake: Snake,
    food: Point,
    direction: Direction,
    pending_direction: Option<Direction>,
    score: u32,
    high_score: u32,
    tick: u64,
    end_reason: Option<GameEndReason>,
}

impl SnakeGameState {
    pub fn new(settings: SnakeSettings, rng: SessionRng) -> Result<Self, ConfigError> {
        settings.check()?;

        Ok(Self {
            field_size: settings.field_size(),
            snake: Snake::new(settings.initial_head),
            food: settings.initial_food,
            settings,
            rng,
            phase: GamePhase::Start,
            direction: Direction::Right,
            pending_direction: None,
            score: 0,
            high_score: 0,
            tick: 0,
            end_reason: None,
        })
    }

    pub fn with_seed(settings: SnakeSettings, seed: u64) -> Result<Self, ConfigError> {
        Self::new(settings, SessionRng::new(seed))
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Effective ticks since construction; ignored ticks are not counted.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn start(&mut self) {
        if !matches!(self.phase, GamePhase::Start | GamePhase::GameOver) {
            return;
        }

        self.reinitialize();
        self.phase = GamePhase::Running;
        debug_log!("Game started (high score {})", self.high_score);
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    pub fn reset(&mut self) {
        self.reinitialize();
        self.phase = GamePhase::Start;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if !matches!(self.phase, GamePhase::Running | GamePhase::Paused) {
            return;
        }
        if direction.is_opposite(&self.direction) {
            return;
        }

        self.pending_direction = Some(direction);
    }

    pub fn tick(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }

        self.tick += 1;

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let Some(next_head) = self.field_size.step(
            self.snake.head(),
            self.direction,
            self.settings.wall_collision_mode,
        ) else {
            self.end_game(GameEndReason::WallCollision);
            return;
        };

        let ate_food = next_head == self.food;

        // The body stays at its last valid position so it never overlaps itself.
        if self.snake.hits_body(next_head, ate_food) {
            self.end_game(GameEndReason::SelfCollision);
            return;
        }

        self.snake.advance(next_head, ate_food);

        if ate_food {
            self.score += 1;
            self.high_score = self.high_score.max(self.score);
            debug_log!(
                "Ate food at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );

            match self.next_food_position() {
                Some(food) => self.food = food,
                None => self.end_game(GameEndReason::BoardFilled),
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            snake: self.snake.cells().copied().collect(),
            food: self.food,
            direction: self.direction,
            pending_direction: self.pending_direction,
            score: self.score,
            high_score: self.high_score,
            tick: self.tick,
            end_reason: self.end_reason,
            field_size: self.field_size,
        }
    }

    fn reinitialize(&mut self) {
        self.snake = Snake::new(self.settings.initial_head);
        self.food = self.settings.initial_food;
        self.score = 0;
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.end_reason = None;
    }

    fn end_game(&mut self, reason: GameEndReason) {
        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        self.pending_direction = None;
        debug_log!(
            "Game over ({:?}) after {} ticks. Score: {}",
            reason,
            self.tick,
            self.score
        );
    }

    /// `None` once the snake covers the whole field.
    fn next_food_position(&mut self) -> Option<Point> {
        // Construction rejects fields whose cell count overflows.
        let cell_count = self.field_size.cell_count().unwrap_or(usize::MAX);
        let free_count = cell_count.saturating_sub(self.snake.len());
        if free_count == 0 {
            return None;
        }

        match self.settings.food_spawn_policy {
            FoodSpawnPolicy::AllowUnderSnake => Some(self.random_cell()),
            FoodSpawnPolicy::AvoidSnake if free_count >= cell_count / 2 => loop {
                let cell = self.random_cell();
                if !self.snake.contains(&cell) {
                    break Some(cell);
                }
            },
            FoodSpawnPolicy::AvoidSnake => {
                let width = self.field_size.width;
                let nth = self.rng.random_range(0..free_count);
                (0..cell_count)
                    .map(|i| Point::new(i % width, i / width))
                    .filter(|p| !self.snake.contains(p))
                    .nth(nth)
            }
        }
    }

    fn random_cell(&mut self) -> Point {
        let x = self.rng.random_range(0..self.field_size.width);
        let y = self.rng.random_range(0..self.field_size.height);
        Point::new(x, y)
    }

    #[cfg(test)]
    fn place_food(&mut self, food: Point) {
        self.food = food;
    }
}
