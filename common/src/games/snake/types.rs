use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Start,
    Running,
    Paused,
    GameOver,
}

/// What happens when the head leaves the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallCollisionMode {
    WrapAround,
    Bounded,
}

/// Where relocated food may land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodSpawnPolicy {
    /// Uniform over cells the snake does not occupy.
    AvoidSnake,
    /// Uniform over the whole grid; food may appear under the body.
    AllowUnderSnake,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    SelfCollision,
    WallCollision,
    BoardFilled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    /// `None` when the product does not fit in `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// One step from `from` towards `direction`. `None` means the step leaves
    /// the grid and the mode does not wrap.
    pub fn step(&self, from: Point, direction: Direction, mode: WallCollisionMode) -> Option<Point> {
        match mode {
            WallCollisionMode::Bounded => match direction {
                Direction::Up if from.y > 0 => Some(Point::new(from.x, from.y - 1)),
                Direction::Down if from.y + 1 < self.height => Some(Point::new(from.x, from.y + 1)),
                Direction::Left if from.x > 0 => Some(Point::new(from.x - 1, from.y)),
                Direction::Right if from.x + 1 < self.width => Some(Point::new(from.x + 1, from.y)),
                _ => None,
            },
            WallCollisionMode::WrapAround => Some(match direction {
                Direction::Up => Point::new(from.x, wrapping_dec(from.y, self.height)),
                Direction::Down => Point::new(from.x, wrapping_inc(from.y, self.height)),
                Direction::Left => Point::new(wrapping_dec(from.x, self.width), from.y),
                Direction::Right => Point::new(wrapping_inc(from.x, self.width), from.y),
            }),
        }
    }
}

fn wrapping_inc(value: usize, max: usize) -> usize {
    if value + 1 >= max { 0 } else { value + 1 }
}

fn wrapping_dec(value: usize, max: usize) -> usize {
    if value == 0 { max - 1 } else { value - 1 }
}
