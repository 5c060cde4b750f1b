use chrono::Local;
use serde::{Deserialize, Serialize};

use super::REPLAY_VERSION;
use crate::games::snake::{Direction, SnakeSettings};
use crate::version::VERSION;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayInput {
    Turn(Direction),
    Restart,
}

/// An input applied before the session's `tick`-th step (0-based, counted
/// across restarts).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedInput {
    pub tick: u64,
    pub input: ReplayInput,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub format_version: u8,
    pub engine_version: String,
    pub recorded_at: String,
    pub seed: u64,
    pub settings: SnakeSettings,
    pub total_ticks: u64,
    pub inputs: Vec<RecordedInput>,
}

pub struct ReplayRecorder {
    recorded_at: String,
    seed: u64,
    settings: SnakeSettings,
    inputs: Vec<RecordedInput>,
}

impl ReplayRecorder {
    pub fn new(seed: u64, settings: SnakeSettings) -> Self {
        Self {
            recorded_at: Local::now().to_rfc3339(),
            seed,
            settings,
            inputs: Vec::new(),
        }
    }

    pub fn record(&mut self, tick: u64, input: ReplayInput) {
        self.inputs.push(RecordedInput { tick, input });
    }

    pub fn finalize(self, total_ticks: u64) -> Replay {
        let mut inputs = self.inputs;
        // stable: inputs on the same tick keep their order
        inputs.sort_by_key(|recorded| recorded.tick);

        Replay {
            format_version: REPLAY_VERSION,
            engine_version: VERSION.to_string(),
            recorded_at: self.recorded_at,
            seed: self.seed,
            settings: self.settings,
            total_ticks,
            inputs,
        }
    }
}
