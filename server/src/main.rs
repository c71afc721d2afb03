mod host;
mod host_config;
mod identifiers;
mod scheduler;
mod session;
mod session_manager;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use snake_common::config::{ConfigManager, Validate};
use snake_common::logger::{self, LogLevel};
use snake_common::version::VERSION;
use snake_common::{SnakeBotType, log};

use host::{SnakeHost, play_replay_file};
use host_config::{DEFAULT_CONFIG_PATH, HostConfig};
use session::SessionCommand;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BotArg {
    None,
    Efficient,
    Random,
}

impl BotArg {
    fn bot_type(self) -> Option<SnakeBotType> {
        match self {
            BotArg::None => None,
            BotArg::Efficient => Some(SnakeBotType::Efficient),
            BotArg::Random => Some(SnakeBotType::Random),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the configured sessions (default)
    Run {
        #[arg(long)]
        sessions: Option<usize>,
        /// Base seed; session N uses seed + N
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        bot: Option<BotArg>,
        #[arg(long)]
        max_ticks: Option<u64>,
    },
    /// Re-simulate a saved replay and print the final state
    Replay { path: PathBuf },
}

#[derive(Parser)]
#[command(name = "snake_host", version = VERSION)]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long)]
    use_log_prefix: bool,
    #[arg(long)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Host".to_string())
    } else {
        None
    };
    let level = if args.debug { LogLevel::Debug } else { LogLevel::Info };
    logger::init_logger(prefix, level);

    let command = args.command.unwrap_or(Command::Run {
        sessions: None,
        seed: None,
        bot: None,
        max_ticks: None,
    });

    match command {
        Command::Replay { path } => {
            play_replay_file(&path)?;
            Ok(())
        }
        Command::Run {
            sessions,
            seed,
            bot,
            max_ticks,
        } => {
            let config_manager: ConfigManager<_, HostConfig> =
                ConfigManager::from_yaml_file(&args.config);
            let mut config = config_manager.get_config()?;

            if let Some(sessions) = sessions {
                config.sessions = sessions;
            }
            if let Some(bot) = bot {
                config.bot = bot.bot_type();
            }
            if let Some(max_ticks) = max_ticks {
                config.max_ticks = Some(max_ticks);
            }
            config.validate()?;

            run(config, seed).await
        }
    }
}

async fn run(config: HostConfig, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    log!("Snake host {} starting", VERSION);

    let mut host = SnakeHost::new(config, seed);
    host.start()?;

    let senders = host.command_senders();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        log!("Shutdown signal received, stopping sessions...");
        for sender in senders {
            let _ = sender.send(SessionCommand::Shutdown);
        }
    });

    host.wait().await;
    log!("Snake host shut down gracefully");

    Ok(())
}
