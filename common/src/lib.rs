pub mod config;
pub mod games;
pub mod logger;
pub mod replay;
pub mod version;
mod defaults;

pub use games::snake::{
    BotController, ConfigError, Direction, EngineCommand, FieldSize, FoodSpawnPolicy, GameEndReason, GamePhase,
    GameSnapshot, Point, SnakeBotType, SnakeGameState, SnakeSettings, WallCollisionMode,
};
pub use games::SessionRng;
