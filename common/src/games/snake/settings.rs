use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::defaults::MAX_FIELD_CELLS;
use super::types::{FieldSize, FoodSpawnPolicy, Point, WallCollisionMode};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub tick_interval_ms: u64,
    pub initial_head: Point,
    pub initial_food: Point,
    pub wall_collision_mode: WallCollisionMode,
    pub food_spawn_policy: FoodSpawnPolicy,
}

impl SnakeSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize {
            width: self.field_width,
            height: self.field_height,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        if self.field_width == 0 || self.field_height == 0 {
            return Err(ConfigError::InvalidFieldSize {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self
            .field_size()
            .cell_count()
            .is_none_or(|cells| cells > MAX_FIELD_CELLS)
        {
            return Err(ConfigError::FieldTooLarge {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }

        let field_size = self.field_size();
        if !field_size.contains(self.initial_head) {
            return Err(ConfigError::InitialHeadOutOfBounds(self.initial_head));
        }
        if !field_size.contains(self.initial_food) {
            return Err(ConfigError::InitialFoodOutOfBounds(self.initial_food));
        }
        if self.initial_food == self.initial_head {
            return Err(ConfigError::FoodOnInitialHead);
        }
        Ok(())
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        self.check().map_err(|e| e.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidFieldSize { width: usize, height: usize },
    FieldTooLarge { width: usize, height: usize },
    InvalidTickInterval,
    InitialHeadOutOfBounds(Point),
    InitialFoodOutOfBounds(Point),
    FoodOnInitialHead,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidFieldSize { width, height } => {
                write!(f, "Field size must be positive, got {}x{}", width, height)
            }
            ConfigError::FieldTooLarge { width, height } => write!(
                f,
                "Field {}x{} exceeds the limit of {} cells",
                width, height, MAX_FIELD_CELLS
            ),
            ConfigError::InvalidTickInterval => write!(f, "Tick interval must be positive"),
            ConfigError::InitialHeadOutOfBounds(p) => {
                write!(f, "Initial head ({}, {}) is outside the field", p.x, p.y)
            }
            ConfigError::InitialFoodOutOfBounds(p) => {
                write!(f, "Initial food ({}, {}) is outside the field", p.x, p.y)
            }
            ConfigError::FoodOnInitialHead => {
                write!(f, "Initial food must not share a cell with the initial head")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
