use std::fs;
use std::path::{Path, PathBuf};

use snake_common::replay::{Replay, generate_replay_filename, load_replay, replay_game, save_replay};
use snake_common::version::VERSION;
use snake_common::{EngineCommand, GameSnapshot, SessionRng, debug_log, log};
use tokio::sync::{mpsc, watch};

use crate::host_config::HostConfig;
use crate::identifiers::SessionId;
use crate::session::{SessionCommand, SessionOptions, SessionResult};
use crate::session_manager::GameSessionManager;

/// Spawns every configured session, starts them together and waits until
/// all of them are done.
pub struct SnakeHost {
    config: HostConfig,
    base_seed: Option<u64>,
    manager: GameSessionManager,
}

impl SnakeHost {
    pub fn new(config: HostConfig, base_seed: Option<u64>) -> Self {
        Self {
            config,
            base_seed,
            manager: GameSessionManager::new(),
        }
    }

    pub fn start(&mut self) -> Result<(), String> {
        let options = SessionOptions {
            bot: self.config.bot,
            games: self.config.games_per_session,
            max_ticks: self.config.max_ticks,
            record_replay: self.config.replay.save,
        };

        for index in 0..self.config.sessions {
            let seed = match self.base_seed {
                Some(base) => base.wrapping_add(index as u64),
                None => SessionRng::from_random().seed(),
            };
            let session_id = self
                .manager
                .create_session(self.config.engine.clone(), seed, options.clone())
                .map_err(|e| format!("Failed to create session: {}", e))?;
            log!("[session:{}] seed {}", session_id, seed);
        }

        for session_id in self.manager.session_ids() {
            if let Some(snapshots) = self.manager.subscribe(&session_id) {
                tokio::spawn(watch_progress(session_id, snapshots));
            }
        }

        self.manager
            .broadcast(SessionCommand::Engine(EngineCommand::Start));
        log!(
            "Started {} sessions ({}x{}, tick {} ms, bot {:?})",
            self.manager.len(),
            self.config.engine.field_width,
            self.config.engine.field_height,
            self.config.engine.tick_interval_ms,
            self.config.bot
        );
        Ok(())
    }

    pub fn command_senders(&self) -> Vec<mpsc::UnboundedSender<SessionCommand>> {
        self.manager.command_senders()
    }

    pub async fn wait(&mut self) -> Vec<SessionResult> {
        let results = self.manager.join_all().await;

        for result in &results {
            log!(
                "[session:{}] {} games, final score {}, high score {}",
                result.session_id,
                result.games_played,
                result.final_snapshot.score,
                result.final_snapshot.high_score
            );

            if let Some(ref replay) = result.replay {
                match self.save(replay) {
                    Ok(path) => log!("[session:{}] replay saved to {}", result.session_id, path.display()),
                    Err(e) => log!("[session:{}] failed to save replay: {}", result.session_id, e),
                }
            }
        }

        if let Some(best) = results.iter().map(|r| r.final_snapshot.high_score).max() {
            log!("Best high score across sessions: {}", best);
        }
        results
    }

    fn save(&self, replay: &Replay) -> Result<PathBuf, String> {
        let location = Path::new(&self.config.replay.location);
        fs::create_dir_all(location)
            .map_err(|e| format!("Failed to create {}: {}", location.display(), e))?;

        // Sessions finish within the same millisecond often enough to collide.
        let file_name = format!("s{}_{}", replay.metadata.seed, generate_replay_filename(VERSION));
        let path = location.join(file_name);
        save_replay(&path, replay).map_err(|e| e.to_string())?;
        Ok(path)
    }
}

/// Follows a session's snapshots until it finishes, reporting score changes.
async fn watch_progress(session_id: SessionId, mut snapshots: watch::Receiver<GameSnapshot>) {
    let mut last_score = 0;
    while snapshots.changed().await.is_ok() {
        let (score, length, tick) = {
            let snapshot = snapshots.borrow_and_update();
            (snapshot.score, snapshot.snake.len(), snapshot.tick)
        };
        if score > last_score {
            debug_log!(
                "[session:{}] score {} at tick {} (length {})",
                session_id,
                score,
                tick,
                length
            );
        }
        last_score = score;
    }
}

/// Loads a replay file and re-simulates it.
pub fn play_replay_file(path: &Path) -> Result<GameSnapshot, String> {
    let replay = load_replay(path).map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    log!(
        "Replaying {} actions over {} ticks (engine {}, seed {})",
        replay.actions.len(),
        replay.final_tick,
        replay.metadata.engine_version,
        replay.metadata.seed
    );

    let snapshot = replay_game(&replay).map_err(|e| e.to_string())?;
    log!(
        "Replay finished in {:?} at tick {}: score {}, high score {}, length {}",
        snapshot.phase,
        snapshot.tick,
        snapshot.score,
        snapshot.high_score,
        snapshot.snake.len()
    );
    Ok(snapshot)
}
