use std::fs;
use std::path::Path;

use crate::games::snake::ConfigError;
use super::{REPLAY_FILE_EXTENSION, REPLAY_VERSION, Replay};

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Encode(serde_yaml_ng::Error),
    Decode(serde_yaml_ng::Error),
    UnsupportedVersion { found: u8, expected: u8 },
    EmptyFile,
    InvalidSettings(ConfigError),
    /// The log asks for ticks while the rebuilt game is not running.
    Desync { tick: u64 },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Io(e) => write!(f, "Replay file I/O failed: {}", e),
            ReplayError::Encode(e) => write!(f, "Cannot encode replay: {}", e),
            ReplayError::Decode(e) => write!(f, "Cannot decode replay: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(f, "Replay format {} is not supported (this build reads {})", found, expected)
            }
            ReplayError::EmptyFile => write!(f, "Replay file has no content"),
            ReplayError::InvalidSettings(e) => write!(f, "Invalid replay settings: {}", e),
            ReplayError::Desync { tick } => {
                write!(f, "Replay out of sync: game not running at tick {}", tick)
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io(e) => Some(e),
            ReplayError::Encode(e) | ReplayError::Decode(e) => Some(e),
            ReplayError::InvalidSettings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::Io(e)
    }
}

pub fn save_replay(path: &Path, replay: &Replay) -> Result<(), ReplayError> {
    fs::write(path, save_replay_to_bytes(replay)?)?;
    Ok(())
}

/// One format byte followed by the YAML document.
pub fn save_replay_to_bytes(replay: &Replay) -> Result<Vec<u8>, ReplayError> {
    let mut bytes = vec![REPLAY_VERSION];
    serde_yaml_ng::to_writer(&mut bytes, replay).map_err(ReplayError::Encode)?;
    Ok(bytes)
}

pub fn load_replay(path: &Path) -> Result<Replay, ReplayError> {
    load_replay_from_bytes(&fs::read(path)?)
}

pub fn load_replay_from_bytes(bytes: &[u8]) -> Result<Replay, ReplayError> {
    match bytes.split_first() {
        None => Err(ReplayError::EmptyFile),
        Some((&REPLAY_VERSION, document)) => {
            serde_yaml_ng::from_slice(document).map_err(ReplayError::Decode)
        }
        Some((&found, _)) => Err(ReplayError::UnsupportedVersion {
            found,
            expected: REPLAY_VERSION,
        }),
    }
}

/// `<local timestamp>_SNAKE_<version with underscores>.snakereplay`
pub fn generate_replay_filename(version: &str) -> String {
    format!(
        "{}_SNAKE_{}.{}",
        chrono::Local::now().format("%Y%m%d%H%M%S%3f"),
        version.replace('.', "_"),
        REPLAY_FILE_EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::ReplayRecorder;
    use crate::games::snake::{Direction, EngineCommand, SnakeSettings};

    fn short_replay(seed: u64) -> Replay {
        let mut recorder = ReplayRecorder::new(seed, SnakeSettings::default());
        recorder.record_command(0, EngineCommand::Start);
        recorder.record_command(2, EngineCommand::Turn(Direction::Down));
        recorder.finalize(6)
    }

    #[test]
    fn test_bytes_start_with_format_byte() {
        let replay = short_replay(42);
        let bytes = save_replay_to_bytes(&replay).unwrap();
        assert_eq!(bytes[0], REPLAY_VERSION);
        assert_eq!(load_replay_from_bytes(&bytes).unwrap(), replay);
    }

    #[test]
    fn test_replay_file_on_disk() {
        let replay = short_replay(5);
        let path = std::env::temp_dir().join(generate_replay_filename("file.io.test"));

        save_replay(&path, &replay).unwrap();
        let loaded = load_replay(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.unwrap(), replay);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_replay(Path::new("no_such_dir/no_such.snakereplay"));
        assert!(matches!(result, Err(ReplayError::Io(_))));
    }

    #[test]
    fn test_filename_carries_version_and_extension() {
        let filename = generate_replay_filename("1.2.3");
        assert!(filename.ends_with("_SNAKE_1_2_3.snakereplay"));
    }

    #[test]
    fn test_rejected_inputs() {
        assert!(matches!(load_replay_from_bytes(&[]), Err(ReplayError::EmptyFile)));
        assert!(matches!(
            load_replay_from_bytes(&[99]),
            Err(ReplayError::UnsupportedVersion { found: 99, expected: REPLAY_VERSION })
        ));
        assert!(matches!(
            load_replay_from_bytes(&[REPLAY_VERSION, b'[', b'[']),
            Err(ReplayError::Decode(_))
        ));
    }
}
