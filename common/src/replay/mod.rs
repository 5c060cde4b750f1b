//! Input recordings that rebuild a session tick for tick. Food placement
//! only depends on the seed, so the seed plus the inputs is the whole game.

mod file_io;
mod player;
mod recorder;

pub use file_io::{generate_replay_filename, load_replay, save_replay, ReplayError};
pub use player::ReplayPlayer;
pub use recorder::{RecordedInput, Replay, ReplayInput, ReplayRecorder};

pub const REPLAY_FILE_EXTENSION: &str = "snakereplay";
pub const REPLAY_VERSION: u8 = 1;
