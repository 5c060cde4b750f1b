use std::path::Path;

use super::recorder::Replay;
use super::{REPLAY_FILE_EXTENSION, REPLAY_VERSION};

#[derive(Debug)]
pub enum ReplayError {
    IoError(std::io::Error),
    FormatError(serde_yaml_ng::Error),
    UnsupportedVersion { found: u8, expected: u8 },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::IoError(e) => write!(f, "IO error: {}", e),
            ReplayError::FormatError(e) => write!(f, "Replay format error: {}", e),
            ReplayError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported replay version: found {}, expected {}", found, expected)
            }
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        ReplayError::IoError(e)
    }
}

impl From<serde_yaml_ng::Error> for ReplayError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ReplayError::FormatError(e)
    }
}

pub fn save_replay(path: &Path, replay: &Replay) -> Result<(), ReplayError> {
    let content = serde_yaml_ng::to_string(replay)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_replay(path: &Path) -> Result<Replay, ReplayError> {
    let content = std::fs::read_to_string(path)?;
    let replay: Replay = serde_yaml_ng::from_str(&content)?;
    if replay.format_version != REPLAY_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: replay.format_version,
            expected: REPLAY_VERSION,
        });
    }
    Ok(replay)
}

pub fn generate_replay_filename(seed: u64) -> String {
    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    format!("{}_SNAKE_{}.{}", timestamp, seed, REPLAY_FILE_EXTENSION)
}
