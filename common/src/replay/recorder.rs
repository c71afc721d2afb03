use chrono::Utc;

use crate::games::snake::{EngineCommand, SnakeSettings};
use crate::version::VERSION;
use super::{Replay, ReplayAction, ReplayMetadata};

pub struct ReplayRecorder {
    game_started_timestamp_ms: i64,
    seed: u64,
    settings: SnakeSettings,
    actions: Vec<ReplayAction>,
}

impl ReplayRecorder {
    pub fn new(seed: u64, settings: SnakeSettings) -> Self {
        Self {
            game_started_timestamp_ms: Utc::now().timestamp_millis(),
            seed,
            settings,
            actions: Vec::new(),
        }
    }

    pub fn record_command(&mut self, tick: u64, command: EngineCommand) {
        self.actions.push(ReplayAction { tick, command });
    }

    /// Commands recorded at the same tick keep their recording order.
    pub fn finalize(&mut self, final_tick: u64) -> Replay {
        let mut actions = std::mem::take(&mut self.actions);
        actions.sort_by_key(|a| a.tick);

        Replay {
            metadata: ReplayMetadata {
                engine_version: VERSION.to_string(),
                game_started_timestamp_ms: self.game_started_timestamp_ms,
                seed: self.seed,
                settings: self.settings.clone(),
            },
            actions,
            final_tick,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn actions_count(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::Direction;

    #[test]
    fn test_finalize_keeps_order_within_a_tick() {
        let mut recorder = ReplayRecorder::new(42, SnakeSettings::default());
        recorder.record_command(0, EngineCommand::Start);
        recorder.record_command(3, EngineCommand::TogglePause);
        recorder.record_command(3, EngineCommand::Turn(Direction::Up));
        recorder.record_command(3, EngineCommand::TogglePause);
        assert_eq!(recorder.actions_count(), 4);

        let replay = recorder.finalize(10);
        let commands: Vec<EngineCommand> = replay.actions.iter().map(|a| a.command).collect();
        assert_eq!(
            commands,
            vec![
                EngineCommand::Start,
                EngineCommand::TogglePause,
                EngineCommand::Turn(Direction::Up),
                EngineCommand::TogglePause,
            ]
        );
        assert_eq!(replay.final_tick, 10);
        assert_eq!(replay.metadata.seed, 42);
        assert_eq!(replay.metadata.engine_version, VERSION);
        assert_eq!(recorder.actions_count(), 0);
    }
}
