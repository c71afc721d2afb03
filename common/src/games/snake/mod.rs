mod bot_controller;
mod command;
mod game_state;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use bot_controller::{BotController, SnakeBotType};
pub use command::EngineCommand;
pub use game_state::SnakeGameState;
pub use settings::{ConfigError, SnakeSettings};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
pub use types::{
    Direction, FieldSize, FoodSpawnPolicy, GameEndReason, GamePhase, Point, WallCollisionMode,
};
