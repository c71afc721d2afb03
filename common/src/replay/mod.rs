pub mod file_io;
pub mod player;
pub mod recorder;

use serde::{Deserialize, Serialize};

use crate::games::snake::{EngineCommand, SnakeSettings};

pub use file_io::{
    ReplayError, generate_replay_filename, load_replay, load_replay_from_bytes, save_replay,
    save_replay_to_bytes,
};
pub use player::{ReplayPlayer, replay_game};
pub use recorder::ReplayRecorder;

pub const REPLAY_FILE_EXTENSION: &str = "snakereplay";
pub const REPLAY_VERSION: u8 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayMetadata {
    pub engine_version: String,
    pub game_started_timestamp_ms: i64,
    pub seed: u64,
    pub settings: SnakeSettings,
}

/// A command stamped with the engine tick count at the moment it was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayAction {
    pub tick: u64,
    pub command: EngineCommand,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub metadata: ReplayMetadata,
    pub actions: Vec<ReplayAction>,
    /// Engine tick count when recording stopped.
    pub final_tick: u64,
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::snake::{
        BotController, Direction, GamePhase, Point, SnakeBotType, SnakeGameState,
        WallCollisionMode,
    };

    /// Plays a bot-driven game the way a host would, recording every command.
    fn record_bot_game(seed: u64, bot_seed: u64, ticks: u64) -> (Replay, SnakeGameState) {
        let settings = SnakeSettings {
            wall_collision_mode: WallCollisionMode::Bounded,
            ..SnakeSettings::default()
        };
        let mut state = SnakeGameState::with_seed(settings.clone(), seed).unwrap();
        let mut bot_rng = SessionRng::new(bot_seed);
        let mut recorder = ReplayRecorder::new(seed, settings);

        let mut apply = |state: &mut SnakeGameState, command: EngineCommand| {
            recorder.record_command(state.tick_count(), command);
            command.apply(state);
        };

        apply(&mut state, EngineCommand::Start);
        for i in 0..ticks {
            if state.phase() == GamePhase::GameOver {
                apply(&mut state, EngineCommand::Start);
            }
            if i % 17 == 0 {
                apply(&mut state, EngineCommand::TogglePause);
                apply(&mut state, EngineCommand::Turn(Direction::Down));
                apply(&mut state, EngineCommand::TogglePause);
            }
            let snapshot = state.snapshot();
            if let Some(direction) = BotController::calculate_move(
                SnakeBotType::Random,
                &snapshot,
                WallCollisionMode::Bounded,
                &mut bot_rng,
            ) {
                apply(&mut state, EngineCommand::Turn(direction));
            }
            state.tick();
        }

        (recorder.finalize(state.tick_count()), state)
    }

    #[test]
    fn test_snake_replay_determinism() {
        let (replay, state) = record_bot_game(12345, 99999, 300);

        let replayed = replay_game(&replay).unwrap();
        assert_eq!(replayed, state.snapshot());
    }

    #[test]
    fn test_replay_survives_file_round_trip() {
        let (replay, state) = record_bot_game(7, 8, 120);

        let bytes = save_replay_to_bytes(&replay).unwrap();
        let loaded = load_replay_from_bytes(&bytes).unwrap();
        assert_eq!(loaded, replay);
        assert_eq!(replay_game(&loaded).unwrap(), state.snapshot());
    }

    #[test]
    fn test_replay_of_reset_game_keeps_high_score() {
        let settings = SnakeSettings {
            initial_food: Point::new(1, 0),
            ..SnakeSettings::default()
        };
        let mut recorder = ReplayRecorder::new(3, settings.clone());
        let mut state = SnakeGameState::with_seed(settings, 3).unwrap();
        let mut apply = |state: &mut SnakeGameState, command: EngineCommand| {
            recorder.record_command(state.tick_count(), command);
            command.apply(state);
        };

        apply(&mut state, EngineCommand::Start);
        state.tick();
        state.tick();
        apply(&mut state, EngineCommand::Reset);
        apply(&mut state, EngineCommand::Start);
        state.tick();

        let replay = recorder.finalize(state.tick_count());
        let replayed = replay_game(&replay).unwrap();
        assert_eq!(replayed.high_score, 1);
        assert_eq!(replayed.score, 1);
        assert_eq!(replayed, state.snapshot());
    }
}
