use std::collections::HashMap;

use snake_common::{ConfigError, GameSnapshot, SnakeSettings, log};
use tokio::sync::{mpsc, watch};

use crate::identifiers::SessionId;
use crate::session::{SessionCommand, SessionHandle, SessionOptions, SessionResult, SnakeSession};

/// Keeps track of every session the host has started. Sessions share nothing
/// but this registry.
pub struct GameSessionManager {
    sessions: HashMap<SessionId, SessionHandle>,
    next_index: u64,
}

impl GameSessionManager {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            next_index: 1,
        }
    }

    pub fn create_session(
        &mut self,
        settings: SnakeSettings,
        seed: u64,
        options: SessionOptions,
    ) -> Result<SessionId, ConfigError> {
        let session_id = SessionId::from_index(self.next_index);
        let handle = SnakeSession::spawn(session_id.clone(), settings, seed, options)?;
        self.next_index += 1;
        self.sessions.insert(session_id.clone(), handle);
        Ok(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Receiver for a session's published snapshots.
    pub fn subscribe(&self, session_id: &SessionId) -> Option<watch::Receiver<GameSnapshot>> {
        self.sessions.get(session_id).map(SessionHandle::subscribe)
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Sends to every session, skipping the ones that already finished.
    pub fn broadcast(&self, command: SessionCommand) {
        for handle in self.sessions.values() {
            if let Err(e) = handle.send(command) {
                log!("{}", e);
            }
        }
    }

    pub fn command_senders(&self) -> Vec<mpsc::UnboundedSender<SessionCommand>> {
        self.sessions
            .values()
            .map(SessionHandle::command_sender)
            .collect()
    }

    /// Waits for every session to finish. Results come back ordered by id.
    pub async fn join_all(&mut self) -> Vec<SessionResult> {
        let mut handles: Vec<_> = self.sessions.drain().collect();
        handles.sort_by(|a, b| a.0.cmp(&b.0));

        let mut results = Vec::with_capacity(handles.len());
        for (session_id, handle) in handles {
            match handle.join().await {
                Ok(result) => results.push(result),
                Err(e) => log!("[session:{}] task failed: {}", session_id, e),
            }
        }
        results
    }
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::{Direction, EngineCommand, GamePhase, Point};
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_sessions_are_isolated() {
        let mut manager = GameSessionManager::new();
        let first = manager
            .create_session(SnakeSettings::default(), 1, SessionOptions::default())
            .unwrap();
        let second = manager
            .create_session(SnakeSettings::default(), 2, SessionOptions::default())
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(manager.session_ids(), vec![first.clone(), second.clone()]);

        let first_handle = &manager.sessions[&first];
        first_handle
            .send(SessionCommand::Engine(EngineCommand::Start))
            .unwrap();
        first_handle
            .send(SessionCommand::Engine(EngineCommand::Turn(Direction::Down)))
            .unwrap();
        sleep(Duration::from_millis(500)).await;

        let first_snapshot = manager.sessions[&first].snapshot();
        let second_snapshot = manager.sessions[&second].snapshot();
        assert_eq!(first_snapshot.phase, GamePhase::Running);
        assert_eq!(first_snapshot.head(), Point::new(0, 3));
        assert_eq!(second_snapshot.phase, GamePhase::Start);
        assert_eq!(second_snapshot.head(), Point::new(0, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_settings_do_not_create_session() {
        let mut manager = GameSessionManager::new();
        let settings = SnakeSettings {
            field_width: 0,
            ..SnakeSettings::default()
        };
        let result = manager.create_session(settings, 1, SessionOptions::default());
        assert!(matches!(result, Err(ConfigError::InvalidFieldSize { .. })));
        assert_eq!(manager.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_sees_published_snapshots() {
        let mut manager = GameSessionManager::new();
        let id = manager
            .create_session(SnakeSettings::default(), 1, SessionOptions::default())
            .unwrap();
        assert!(manager.subscribe(&SessionId::from("missing".to_string())).is_none());

        let mut rx = manager.subscribe(&id).unwrap();
        manager.broadcast(SessionCommand::Engine(EngineCommand::Start));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().phase, GamePhase::Running);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().tick, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_joins_every_session() {
        let mut manager = GameSessionManager::new();
        for seed in 0..3 {
            manager
                .create_session(SnakeSettings::default(), seed, SessionOptions::default())
                .unwrap();
        }
        manager.broadcast(SessionCommand::Engine(EngineCommand::Start));
        sleep(Duration::from_millis(200)).await;
        manager.broadcast(SessionCommand::Shutdown);

        let results = manager.join_all().await;
        assert_eq!(results.len(), 3);
        assert_eq!(manager.len(), 0);
        assert!(results.iter().all(|r| r.final_snapshot.tick == 1));
        assert_eq!(results[0].session_id, SessionId::from_index(1));
    }
}
