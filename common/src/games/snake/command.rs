use serde::{Deserialize, Serialize};

use super::game_state::SnakeGameState;
use super::types::Direction;

/// A player-facing engine command. Ticks are not commands: they come from
/// whoever owns the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCommand {
    Start,
    TogglePause,
    Reset,
    Turn(Direction),
}

impl EngineCommand {
    pub fn apply(self, state: &mut SnakeGameState) {
        match self {
            EngineCommand::Start => state.start(),
            EngineCommand::TogglePause => state.toggle_pause(),
            EngineCommand::Reset => state.reset(),
            EngineCommand::Turn(direction) => state.set_direction(direction),
        }
    }
}
