use serde::{Deserialize, Serialize};
use snake_common::SnakeBotType;
use snake_common::SnakeSettings;
use snake_common::config::Validate;

pub const DEFAULT_CONFIG_PATH: &str = "snake_host.yaml";
pub const MAX_SESSIONS: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    pub save: bool,
    pub location: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            save: false,
            location: "replays".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    pub engine: SnakeSettings,
    pub sessions: usize,
    /// `None` leaves the sessions without an input source.
    pub bot: Option<SnakeBotType>,
    /// Completed games after which a session stops.
    pub games_per_session: u32,
    /// Tick budget per session; `None` runs until the game budget is spent.
    pub max_ticks: Option<u64>,
    pub replay: ReplayConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            engine: SnakeSettings::default(),
            sessions: 4,
            bot: Some(SnakeBotType::Efficient),
            games_per_session: 3,
            max_ticks: Some(2000),
            replay: ReplayConfig::default(),
        }
    }
}

impl Validate for HostConfig {
    fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;

        if !(1..=MAX_SESSIONS).contains(&self.sessions) {
            return Err(format!("Sessions must be between 1 and {}", MAX_SESSIONS));
        }
        if self.games_per_session == 0 {
            return Err("Games per session must be at least 1".to_string());
        }
        if self.max_ticks == Some(0) {
            return Err("Max ticks must be positive when set".to_string());
        }
        if self.bot.is_none() && self.max_ticks.is_none() {
            return Err("Sessions without a bot need a tick budget".to_string());
        }
        if self.bot.is_none() && self.games_per_session != 1 {
            return Err("Sessions without a bot play a single game".to_string());
        }
        if self.replay.save && self.replay.location.trim().is_empty() {
            return Err("Replay location must be set when saving replays".to_string());
        }
        Ok(())
    }
}
