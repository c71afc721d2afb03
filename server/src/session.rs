use snake_common::replay::{Replay, ReplayRecorder};
use snake_common::{
    BotController, ConfigError, EngineCommand, GameSnapshot, SessionRng,
    SnakeBotType, SnakeGameState, SnakeSettings, debug_log, log,
};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};

use crate::identifiers::SessionId;
use crate::scheduler::TickScheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Engine(EngineCommand),
    Shutdown,
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub bot: Option<SnakeBotType>,
    pub games: u32,
    pub max_ticks: Option<u64>,
    pub record_replay: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            bot: None,
            games: 1,
            max_ticks: None,
            record_replay: false,
        }
    }
}

#[derive(Debug)]
pub struct SessionResult {
    pub session_id: SessionId,
    pub seed: u64,
    pub final_snapshot: GameSnapshot,
    pub games_played: u32,
    pub replay: Option<Replay>,
}

/// Bot stream for a session. Mixed so that neighbouring session seeds never
/// hand one session's food sequence to another session's bot.
fn bot_seed(seed: u64) -> u64 {
    seed ^ 0x9E37_79B9_7F4A_7C15
}

/// Owner-side view of a running session.
pub struct SessionHandle {
    session_id: SessionId,
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    task: JoinHandle<SessionResult>,
}

impl SessionHandle {
    pub fn send(&self, command: SessionCommand) -> Result<(), String> {
        self.command_tx
            .send(command)
            .map_err(|_| format!("Session {} has already finished", self.session_id))
    }

    pub fn command_sender(&self) -> mpsc::UnboundedSender<SessionCommand> {
        self.command_tx.clone()
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    pub async fn join(self) -> Result<SessionResult, JoinError> {
        self.task.await
    }
}

/// One game on its own task: commands and ticks are handled strictly one at
/// a time, and the engine is never touched from anywhere else.
pub struct SnakeSession {
    session_id: SessionId,
    state: SnakeGameState,
    scheduler: TickScheduler,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    snapshot_tx: watch::Sender<GameSnapshot>,
    bot: Option<(SnakeBotType, SessionRng)>,
    recorder: Option<ReplayRecorder>,
    options: SessionOptions,
    games_played: u32,
}

impl SnakeSession {
    pub fn spawn(
        session_id: SessionId,
        settings: SnakeSettings,
        seed: u64,
        options: SessionOptions,
    ) -> Result<SessionHandle, ConfigError> {
        let state = SnakeGameState::with_seed(settings.clone(), seed)?;
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        let session = Self {
            session_id: session_id.clone(),
            scheduler: TickScheduler::new(settings.tick_interval()),
            bot: options
                .bot
                .map(|bot_type| (bot_type, SessionRng::new(bot_seed(seed)))),
            recorder: options
                .record_replay
                .then(|| ReplayRecorder::new(seed, settings)),
            state,
            command_rx,
            snapshot_tx,
            options,
            games_played: 0,
        };

        let task = tokio::spawn(session.run());

        Ok(SessionHandle {
            session_id,
            command_tx,
            snapshot_rx,
            task,
        })
    }

    async fn run(mut self) -> SessionResult {
        log!("[session:{}] created (seed {})", self.session_id, self.state.seed());

        loop {
            tokio::select! {
                biased;

                command = self.command_rx.recv() => match command {
                    Some(SessionCommand::Engine(command)) => self.apply(command),
                    Some(SessionCommand::Shutdown) | None => break,
                },
                _ = self.scheduler.next_tick() => {
                    if self.on_tick() {
                        break;
                    }
                }
            }
        }

        self.scheduler.suspend();
        self.finish()
    }

    fn apply(&mut self, command: EngineCommand) {
        if let Some(ref mut recorder) = self.recorder {
            recorder.record_command(self.state.tick_count(), command);
        }

        command.apply(&mut self.state);
        self.scheduler.sync(self.state.phase());
        self.publish();
    }

    /// Returns true once the session has used up its budget.
    fn on_tick(&mut self) -> bool {
        if let Some((bot_type, ref mut rng)) = self.bot {
            let snapshot = self.state.snapshot();
            let wall_mode = self.state.settings().wall_collision_mode;
            if let Some(direction) =
                BotController::calculate_move(bot_type, &snapshot, wall_mode, rng)
                && direction != snapshot.direction
            {
                self.apply(EngineCommand::Turn(direction));
            }
        }

        self.state.tick();
        self.scheduler.sync(self.state.phase());
        let snapshot = self.state.snapshot();
        self.snapshot_tx.send_replace(snapshot.clone());

        if snapshot.is_over() {
            self.games_played += 1;
            log!(
                "[session:{}] game {} over ({:?}) score {} high score {}",
                self.session_id,
                self.games_played,
                snapshot.end_reason,
                snapshot.score,
                snapshot.high_score
            );

            if self.games_played >= self.options.games {
                return true;
            }
            if self.bot.is_some() {
                self.apply(EngineCommand::Start);
            }
        }

        if let Some(max_ticks) = self.options.max_ticks
            && self.state.tick_count() >= max_ticks
        {
            debug_log!("[session:{}] tick budget of {} spent", self.session_id, max_ticks);
            return true;
        }

        false
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.state.snapshot());
    }

    fn finish(mut self) -> SessionResult {
        let final_snapshot = self.state.snapshot();
        let replay = self
            .recorder
            .as_mut()
            .map(|recorder| recorder.finalize(self.state.tick_count()));

        log!(
            "[session:{}] finished after {} ticks, {} games, high score {}",
            self.session_id,
            final_snapshot.tick,
            self.games_played,
            final_snapshot.high_score
        );

        SessionResult {
            session_id: self.session_id,
            seed: self.state.seed(),
            final_snapshot,
            games_played: self.games_played,
            replay,
        }
    }
}
