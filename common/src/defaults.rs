use crate::games::snake::{FoodSpawnPolicy, Point, SnakeSettings, WallCollisionMode};

pub const FIELD_WIDTH: usize = 10;
pub const FIELD_HEIGHT: usize = 10;
pub const TICK_INTERVAL_MS: u64 = 150;
pub const INITIAL_HEAD: Point = Point { x: 0, y: 0 };
pub const INITIAL_FOOD: Point = Point { x: 5, y: 5 };
/// Largest accepted field, in cells (4096×4096).
pub const MAX_FIELD_CELLS: usize = 1 << 24;

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tick_interval_ms: TICK_INTERVAL_MS,
            initial_head: INITIAL_HEAD,
            initial_food: INITIAL_FOOD,
            wall_collision_mode: WallCollisionMode::WrapAround,
            food_spawn_policy: FoodSpawnPolicy::AvoidSnake,
        }
    }
}
