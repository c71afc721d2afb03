use crate::games::snake::{GamePhase, GameSnapshot, SnakeGameState};
use super::{Replay, ReplayAction, ReplayError, ReplayMetadata};

pub struct ReplayPlayer {
    replay: Replay,
    current_action_index: usize,
}

impl ReplayPlayer {
    pub fn new(replay: Replay) -> Self {
        Self {
            replay,
            current_action_index: 0,
        }
    }

    pub fn metadata(&self) -> &ReplayMetadata {
        &self.replay.metadata
    }

    pub fn final_tick(&self) -> u64 {
        self.replay.final_tick
    }

    pub fn total_actions(&self) -> usize {
        self.replay.actions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.current_action_index >= self.replay.actions.len()
    }

    pub fn peek_next_action(&self) -> Option<&ReplayAction> {
        self.replay.actions.get(self.current_action_index)
    }

    /// Consumes every action stamped with `tick`, skipping any left behind
    /// from earlier ticks.
    pub fn actions_for_tick(&mut self, tick: u64) -> Vec<ReplayAction> {
        let mut actions = Vec::new();
        while let Some(action) = self.replay.actions.get(self.current_action_index) {
            if action.tick > tick {
                break;
            }
            if action.tick == tick {
                actions.push(*action);
            }
            self.current_action_index += 1;
        }
        actions
    }

    pub fn reset(&mut self) {
        self.current_action_index = 0;
    }
}

/// Rebuilds the engine from the replay's settings and seed, feeds it the
/// recorded commands and runs it up to the recorded final tick.
pub fn replay_game(replay: &Replay) -> Result<GameSnapshot, ReplayError> {
    let mut player = ReplayPlayer::new(replay.clone());
    let metadata = player.metadata();
    let mut state = SnakeGameState::with_seed(metadata.settings.clone(), metadata.seed)
        .map_err(ReplayError::InvalidSettings)?;

    loop {
        for action in player.actions_for_tick(state.tick_count()) {
            action.command.apply(&mut state);
        }

        if state.tick_count() >= player.final_tick() {
            break;
        }
        if state.phase() != GamePhase::Running {
            return Err(ReplayError::Desync {
                tick: state.tick_count(),
            });
        }
        state.tick();
    }

    Ok(state.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{Direction, EngineCommand, Point, SnakeSettings};
    use crate::replay::ReplayRecorder;

    fn create_test_replay(actions: &[(u64, EngineCommand)], final_tick: u64) -> Replay {
        let mut recorder = ReplayRecorder::new(42, SnakeSettings::default());
        for (tick, command) in actions {
            recorder.record_command(*tick, *command);
        }
        recorder.finalize(final_tick)
    }

    #[test]
    fn test_actions_for_tick() {
        let replay = create_test_replay(
            &[
                (0, EngineCommand::Start),
                (2, EngineCommand::Turn(Direction::Down)),
                (2, EngineCommand::Turn(Direction::Left)),
                (5, EngineCommand::Reset),
            ],
            6,
        );
        let mut player = ReplayPlayer::new(replay);

        assert_eq!(player.actions_for_tick(0).len(), 1);
        assert!(player.actions_for_tick(1).is_empty());
        assert_eq!(player.actions_for_tick(2).len(), 2);
        assert_eq!(player.peek_next_action().map(|a| a.tick), Some(5));
        assert_eq!(player.actions_for_tick(5).len(), 1);
        assert!(player.is_finished());

        player.reset();
        assert!(!player.is_finished());
        assert_eq!(player.total_actions(), 4);
    }

    #[test]
    fn test_replay_game_follows_recorded_turns() {
        let replay = create_test_replay(
            &[
                (0, EngineCommand::Start),
                (2, EngineCommand::Turn(Direction::Down)),
            ],
            4,
        );

        let snapshot = replay_game(&replay).unwrap();
        assert_eq!(snapshot.head(), Point::new(2, 2));
        assert_eq!(snapshot.tick, 4);
    }

    #[test]
    fn test_replay_without_start_is_desync() {
        let replay = create_test_replay(&[], 3);
        assert!(matches!(
            replay_game(&replay),
            Err(ReplayError::Desync { tick: 0 })
        ));
    }

    #[test]
    fn test_replay_with_invalid_settings_fails() {
        let mut replay = create_test_replay(&[(0, EngineCommand::Start)], 1);
        replay.metadata.settings.field_width = 0;
        assert!(matches!(
            replay_game(&replay),
            Err(ReplayError::InvalidSettings(_))
        ));
    }
}
